use sql_prep::prelude::*;
use sql_prep::test_utils::{MockConnection, MockResponse};

fn db_with(script: Vec<MockResponse>) -> Database<MockConnection> {
    DatabaseBuilder::new()
        .field_type("age", FormatSpec::Integer)
        .attach(MockConnection::new(script))
}

#[test]
fn insert_renders_quoted_text_and_bare_integers() {
    let mut db = db_with(vec![MockResponse::affected(1).with_insert_id(7)]);
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

    assert_eq!(
        db.connection().submitted(),
        ["INSERT INTO `users` (`name`,`age`) VALUES ('Alice',30)"]
    );
    assert_eq!(
        outcome,
        QueryOutcome::Mutation {
            rows_affected: 1,
            last_insert_id: Some(7),
        }
    );
}

#[test]
fn replace_uses_the_replace_verb() {
    let mut db = db_with(vec![MockResponse::affected(1)]);
    db.replace(
        "users",
        &[("age", SqlValue::Int(31)), ("name", SqlValue::Text("Bob".into()))],
        None,
    )
    .unwrap();
    assert_eq!(
        db.connection().submitted(),
        ["REPLACE INTO `users` (`age`,`name`) VALUES (31,'Bob')"]
    );
}

#[test]
fn update_ands_where_pairs_with_data_args_first() {
    let mut db = db_with(vec![MockResponse::affected(1)]);
    db.update(
        "users",
        &[("age", SqlValue::Int(31))],
        &[
            ("id", SqlValue::Int(1)),
            ("name", SqlValue::Text("Alice".into())),
        ],
        None,
        Some(&[FormatSpec::Integer, FormatSpec::Text]),
    )
    .unwrap();
    assert_eq!(
        db.connection().submitted(),
        ["UPDATE `users` SET `age` = 31 WHERE `id` = 1 AND `name` = 'Alice'"]
    );
}

#[test]
fn delete_identifiers_stay_unquoted() {
    let mut db = db_with(vec![MockResponse::affected(1)]);
    db.delete("users", &[("id", SqlValue::Int(1))], None).unwrap();
    // `id` has no configured default, so it renders as a quoted string.
    assert_eq!(db.connection().submitted(), ["DELETE FROM users WHERE id = '1'"]);
}

#[test]
fn delete_respects_a_configured_integer_column() {
    let mut db = DatabaseBuilder::new()
        .field_type("id", FormatSpec::Integer)
        .attach(MockConnection::new(vec![MockResponse::affected(1)]));
    db.delete("users", &[("id", SqlValue::Int(1))], None).unwrap();
    assert_eq!(db.connection().submitted(), ["DELETE FROM users WHERE id = 1"]);
}

#[test]
fn explicit_formats_override_configured_defaults() {
    // `age` is configured as %d, but the caller forces %s here.
    let mut db = db_with(vec![MockResponse::affected(1)]);
    db.insert(
        "users",
        &[("age", SqlValue::Int(30))],
        Some(&[FormatSpec::Text]),
    )
    .unwrap();
    assert_eq!(
        db.connection().submitted(),
        ["INSERT INTO `users` (`age`) VALUES ('30')"]
    );
}

#[test]
fn exhausted_format_slice_falls_back_to_its_first_entry() {
    let mut db = db_with(vec![MockResponse::affected(1)]);
    db.insert(
        "t",
        &[
            ("a", SqlValue::Int(1)),
            ("b", SqlValue::Int(2)),
            ("c", SqlValue::Int(3)),
        ],
        Some(&[FormatSpec::Integer]),
    )
    .unwrap();
    assert_eq!(
        db.connection().submitted(),
        ["INSERT INTO `t` (`a`,`b`,`c`) VALUES (1,2,3)"]
    );
}

#[test]
fn data_and_where_formats_resolve_independently() {
    let mut db = db_with(vec![MockResponse::affected(1)]);
    db.update(
        "users",
        &[("age", SqlValue::Int(31))],
        &[("age", SqlValue::Int(30))],
        Some(&[FormatSpec::Float]),
        None,
    )
    .unwrap();
    // data side: explicit %f; where side: configured %d default for `age`.
    assert_eq!(
        db.connection().submitted(),
        ["UPDATE `users` SET `age` = 31.000000 WHERE `age` = 30"]
    );
}

#[test]
fn malformed_builder_input_never_contacts_the_driver() {
    let mut db = db_with(vec![]);

    let err = db.insert("t", &[], None).unwrap_err();
    assert!(matches!(err, SqlPrepError::BuilderError(_)));

    let err = db
        .update("t", &[], &[("id", SqlValue::Int(1))], None, None)
        .unwrap_err();
    assert!(matches!(err, SqlPrepError::BuilderError(_)));

    let err = db
        .update("t", &[("a", SqlValue::Int(1))], &[], None, None)
        .unwrap_err();
    assert!(matches!(err, SqlPrepError::BuilderError(_)));

    let err = db.delete("t", &[], None).unwrap_err();
    assert!(matches!(err, SqlPrepError::BuilderError(_)));

    assert!(db.connection().submitted().is_empty());
}

#[test]
fn builder_values_pass_through_the_escaper() {
    let mut db = DatabaseBuilder::new()
        .escape_mode(EscapeMode::Native)
        .attach(MockConnection::new(vec![MockResponse::affected(1)]));
    db.insert("notes", &[("body", SqlValue::Text("it's fine".into()))], None)
        .unwrap();
    assert_eq!(
        db.connection().submitted(),
        ["INSERT INTO `notes` (`body`) VALUES ('it''s fine')"]
    );
}
