#![cfg(feature = "sqlite")]

use sql_prep::driver::sqlite::{SqliteConnection, SqliteDriver};
use sql_prep::prelude::*;
use tempfile::tempdir;

fn fresh_db() -> Database<SqliteConnection> {
    DatabaseBuilder::new()
        .escape_mode(EscapeMode::Native)
        .field_type("age", FormatSpec::Integer)
        .field_type("id", FormatSpec::Integer)
        .attach(SqliteConnection::open_in_memory().expect("in-memory database"))
}

#[test]
fn full_write_read_cycle() {
    let mut db = fresh_db();

    let outcome = db
        .query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)")
        .unwrap();
    assert_eq!(outcome, QueryOutcome::Ddl);

    let outcome = db
        .insert(
            "users",
            &[
                ("name", SqlValue::Text("Alice".into())),
                ("age", SqlValue::Int(30)),
            ],
            None,
        )
        .unwrap();
    assert_eq!(outcome.rows_affected(), Some(1));
    assert_eq!(db.last_insert_id(), Some(1));

    db.insert(
        "users",
        &[
            ("name", SqlValue::Text("it's bob".into())),
            ("age", SqlValue::Int(25)),
        ],
        None,
    )
    .unwrap();
    assert_eq!(db.last_insert_id(), Some(2));

    let outcome = db.query("SELECT id, name, age FROM users ORDER BY id").unwrap();
    assert_eq!(outcome, QueryOutcome::Read { rows: 2 });
    assert_eq!(db.num_rows(), 2);

    // Value by ordinal position, row by index, column across rows.
    assert_eq!(
        db.get_value(None, 1, 1).unwrap(),
        Some(SqlValue::Text("it's bob".into()))
    );
    let row = db
        .get_row(Some("SELECT name, age FROM users WHERE id = 1"), 0)
        .unwrap()
        .unwrap();
    assert_eq!(row.get("age"), Some(&SqlValue::Int(30)));

    let ages = db
        .get_column(Some("SELECT age FROM users ORDER BY id"), 0)
        .unwrap();
    assert_eq!(ages, vec![Some(SqlValue::Int(30)), Some(SqlValue::Int(25))]);
}

#[test]
fn update_and_delete_through_builders() {
    let mut db = fresh_db();
    db.query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT, age INTEGER)")
        .unwrap();
    db.insert(
        "users",
        &[
            ("id", SqlValue::Int(1)),
            ("name", SqlValue::Text("Alice".into())),
            ("age", SqlValue::Int(30)),
        ],
        None,
    )
    .unwrap();

    let outcome = db
        .update(
            "users",
            &[("age", SqlValue::Int(31))],
            &[("id", SqlValue::Int(1))],
            None,
            None,
        )
        .unwrap();
    assert_eq!(outcome.rows_affected(), Some(1));
    assert_eq!(
        db.get_value(Some("SELECT age FROM users WHERE id = 1"), 0, 0)
            .unwrap(),
        Some(SqlValue::Int(31))
    );

    let outcome = db
        .delete("users", &[("id", SqlValue::Int(1))], None)
        .unwrap();
    assert_eq!(outcome.rows_affected(), Some(1));
    assert_eq!(
        db.get_value(Some("SELECT COUNT(*) FROM users"), 0, 0).unwrap(),
        Some(SqlValue::Int(0))
    );
}

#[test]
fn replace_overwrites_by_primary_key() {
    let mut db = fresh_db();
    db.query("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")
        .unwrap();
    db.insert(
        "users",
        &[("id", SqlValue::Int(1)), ("name", SqlValue::Text("old".into()))],
        None,
    )
    .unwrap();
    db.replace(
        "users",
        &[("id", SqlValue::Int(1)), ("name", SqlValue::Text("new".into()))],
        None,
    )
    .unwrap();

    let set = db
        .get_results(Some("SELECT name FROM users"))
        .unwrap()
        .unwrap();
    assert_eq!(set.num_rows(), 1);
    assert_eq!(
        set.rows()[0].get("name"),
        Some(&SqlValue::Text("new".into()))
    );
}

#[test]
fn column_metadata_comes_back_from_the_statement() {
    let mut db = fresh_db();
    db.query("CREATE TABLE t (id INTEGER, label VARCHAR(10))").unwrap();
    db.query("INSERT INTO t VALUES (1, 'abc'), (2, 'defgh')").unwrap();
    db.query("SELECT id, label FROM t").unwrap();

    assert_eq!(
        db.get_column_info(ColumnInfoKind::Name),
        Some(vec![SqlValue::Text("id".into()), SqlValue::Text("label".into())])
    );
    assert_eq!(
        db.get_column_info_at(ColumnInfoKind::TypeName, 1),
        Some(SqlValue::Text("VARCHAR(10)".into()))
    );
    // Max length reflects the widest value observed in this result set.
    assert_eq!(
        db.get_column_info_at(ColumnInfoKind::MaxLength, 1),
        Some(SqlValue::Int(5))
    );

    // No metadata without a cached read result.
    db.query("DROP TABLE t").unwrap();
    assert_eq!(db.get_column_info(ColumnInfoKind::Name), None);
}

#[test]
fn failed_query_leaves_no_stale_cache() {
    let mut db = fresh_db();
    db.query("CREATE TABLE t (id INTEGER)").unwrap();
    db.query("INSERT INTO t VALUES (1)").unwrap();
    db.query("SELECT id FROM t").unwrap();
    assert_eq!(db.num_rows(), 1);

    let err = db.query("SELECT nope FROM missing").unwrap_err();
    assert_eq!(err.kind(), "DriverError");
    assert!(db.current_result().is_none());
    assert_eq!(db.last_query(), Some("SELECT nope FROM missing"));
}

#[test]
fn driver_opens_a_database_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("round.db");
    let opts = ConnectOptions::builder()
        .dbname(path.to_string_lossy())
        .finish();

    let mut db = DatabaseBuilder::new().connect(&SqliteDriver, &opts).unwrap();
    db.query("CREATE TABLE kv (k TEXT, v TEXT)").unwrap();
    db.insert(
        "kv",
        &[("k", SqlValue::Text("a".into())), ("v", SqlValue::Text("1".into()))],
        None,
    )
    .unwrap();

    // Reopen the same file through a second connection.
    let mut db2 = DatabaseBuilder::new().connect(&SqliteDriver, &opts).unwrap();
    assert_eq!(
        db2.get_value(Some("SELECT v FROM kv WHERE k = 'a'"), 0, 0).unwrap(),
        Some(SqlValue::Text("1".into()))
    );
}
