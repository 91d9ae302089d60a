//! Bundled rusqlite-backed driver.

use std::collections::VecDeque;

use rusqlite::Connection as RusqliteConnection;
use rusqlite::types::Value;

use super::{ColumnDescriptor, ConnectOptions, Connection, Driver, ResultHandle};
use crate::error::SqlPrepError;
use crate::escape;
use crate::types::SqlValue;

/// Driver over an on-disk or in-memory `SQLite` database.
///
/// `dbname` in [`ConnectOptions`] is the database path; `host`, `user` and
/// `password` are not used by this backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDriver;

impl Driver for SqliteDriver {
    type Conn = SqliteConnection;

    fn connect(&self, opts: &ConnectOptions) -> Result<SqliteConnection, SqlPrepError> {
        let conn = RusqliteConnection::open(&opts.dbname).map_err(|e| {
            SqlPrepError::ConnectionError(format!("failed to open {}: {e}", opts.dbname))
        })?;
        Ok(SqliteConnection { conn })
    }
}

/// A live `SQLite` connection.
pub struct SqliteConnection {
    conn: RusqliteConnection,
}

impl SqliteConnection {
    /// Open a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if `SQLite` cannot create the database.
    pub fn open_in_memory() -> Result<Self, SqlPrepError> {
        let conn = RusqliteConnection::open_in_memory().map_err(|e| {
            SqlPrepError::ConnectionError(format!("failed to open in-memory database: {e}"))
        })?;
        Ok(Self { conn })
    }

    /// Wrap an already-open rusqlite connection.
    #[must_use]
    pub fn from_rusqlite(conn: RusqliteConnection) -> Self {
        Self { conn }
    }
}

fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<SqlValue, SqlPrepError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Int(i),
        Value::Real(f) => SqlValue::Float(f),
        Value::Text(s) => SqlValue::Text(s),
        Value::Blob(b) => SqlValue::Blob(b),
    })
}

/// Textual width of a value, for the observed-max-length column attribute.
fn value_width(value: &SqlValue) -> i64 {
    let width = match value {
        SqlValue::Null => 0,
        SqlValue::Int(i) => i.to_string().len(),
        SqlValue::Float(f) => f.to_string().len(),
        SqlValue::Text(s) => s.len(),
        SqlValue::Bool(_) => 1,
        SqlValue::Blob(b) => b.len(),
    };
    i64::try_from(width).unwrap_or(i64::MAX)
}

impl Connection for SqliteConnection {
    fn execute(&mut self, sql: &str) -> Result<Box<dyn ResultHandle>, SqlPrepError> {
        let mut stmt = self.conn.prepare(sql)?;

        // Statements with no result columns (DDL, DML) run to completion
        // here; the executor reads counts back off the connection.
        if stmt.column_count() == 0 {
            stmt.execute([])?;
            return Ok(Box::new(BufferedRows::default()));
        }

        let mut columns: Vec<ColumnDescriptor> = stmt
            .columns()
            .iter()
            .map(|c| ColumnDescriptor {
                name: c.name().to_string(),
                type_name: c.decl_type().map(str::to_string),
                ..ColumnDescriptor::default()
            })
            .collect();

        // Buffer everything so the handle owns its data outright; the
        // statement and its locks are released before we return.
        let mut buffered: VecDeque<Vec<SqlValue>> = VecDeque::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for (idx, column) in columns.iter_mut().enumerate() {
                let value = extract_value(row, idx)?;
                let width = value_width(&value);
                if column.max_length.is_none_or(|m| m < width) {
                    column.max_length = Some(width);
                }
                values.push(value);
            }
            buffered.push_back(values);
        }

        Ok(Box::new(BufferedRows {
            columns,
            rows: buffered,
        }))
    }

    fn affected_rows(&self) -> u64 {
        self.conn.changes()
    }

    fn last_insert_id(&self) -> u64 {
        u64::try_from(self.conn.last_insert_rowid()).unwrap_or(0)
    }

    fn escape(&self, raw: &str) -> String {
        // SQLite has no backslash escapes; the native rule is quote doubling.
        escape::quote_escape(raw)
    }
}

#[derive(Debug, Default)]
struct BufferedRows {
    columns: Vec<ColumnDescriptor>,
    rows: VecDeque<Vec<SqlValue>>,
}

impl ResultHandle for BufferedRows {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>, SqlPrepError> {
        Ok(self.rows.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_columns_and_rows() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (id INTEGER, name TEXT)")
            .unwrap();
        conn.execute("INSERT INTO t VALUES (1, 'alice'), (2, 'bob')")
            .unwrap();
        assert_eq!(conn.affected_rows(), 2);

        let mut handle = conn.execute("SELECT id, name FROM t ORDER BY id").unwrap();
        let columns = handle.columns().to_vec();
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].type_name.as_deref(), Some("INTEGER"));
        assert_eq!(columns[1].max_length, Some(5));

        let first = handle.next_row().unwrap().unwrap();
        assert_eq!(first, vec![SqlValue::Int(1), SqlValue::Text("alice".into())]);
        let second = handle.next_row().unwrap().unwrap();
        assert_eq!(second[1], SqlValue::Text("bob".into()));
        assert!(handle.next_row().unwrap().is_none());
    }

    #[test]
    fn rejects_bad_sql_as_driver_error() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        let err = conn.execute("NOT REALLY SQL").unwrap_err();
        assert!(matches!(err, SqlPrepError::SqliteError(_)));
    }

    #[test]
    fn native_escape_doubles_quotes() {
        let conn = SqliteConnection::open_in_memory().unwrap();
        assert_eq!(conn.escape("it's"), "it''s");
    }

    #[test]
    fn last_insert_id_tracks_rowid() {
        let mut conn = SqliteConnection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)")
            .unwrap();
        conn.execute("INSERT INTO t (v) VALUES ('x')").unwrap();
        assert_eq!(conn.last_insert_id(), 1);
    }
}
