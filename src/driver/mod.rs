//! The driver seam.
//!
//! Everything below the executor is a thin pass-through to an external
//! collaborator: a [`Driver`] opens a [`Connection`], a connection executes
//! one statement at a time, and a [`ResultHandle`] steps the returned rows.
//! Releasing the driver-side resource is `Drop`.

use crate::error::SqlPrepError;
use crate::types::SqlValue;

#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Connection settings handed to a driver.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    pub host: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
}

impl ConnectOptions {
    #[must_use]
    pub fn new(dbname: impl Into<String>) -> Self {
        Self {
            dbname: dbname.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn builder() -> ConnectOptionsBuilder {
        ConnectOptionsBuilder::default()
    }
}

/// Fluent builder for [`ConnectOptions`].
#[derive(Debug, Clone, Default)]
pub struct ConnectOptionsBuilder {
    opts: ConnectOptions,
}

impl ConnectOptionsBuilder {
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.opts.host = host.into();
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.opts.user = user.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.opts.password = password.into();
        self
    }

    #[must_use]
    pub fn dbname(mut self, dbname: impl Into<String>) -> Self {
        self.opts.dbname = dbname.into();
        self
    }

    #[must_use]
    pub fn finish(self) -> ConnectOptions {
        self.opts
    }
}

/// Opens connections for one backend.
pub trait Driver {
    type Conn: Connection;

    /// Open a connection.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` when the backend refuses the connection or
    /// the credentials.
    fn connect(&self, opts: &ConnectOptions) -> Result<Self::Conn, SqlPrepError>;
}

/// A live driver connection. One statement is in flight at a time.
pub trait Connection {
    /// Submit one SQL statement and return a handle over its result.
    ///
    /// Statements that produce no rows (DDL, DML) return an empty handle;
    /// the counts are read back through [`Connection::affected_rows`] and
    /// [`Connection::last_insert_id`].
    ///
    /// # Errors
    ///
    /// Returns the driver's rejection (syntax error, constraint violation,
    /// ...) as an error.
    fn execute(&mut self, sql: &str) -> Result<Box<dyn ResultHandle>, SqlPrepError>;

    /// Rows affected by the most recent mutation statement.
    fn affected_rows(&self) -> u64;

    /// Identifier generated by the most recent insert-style statement.
    fn last_insert_id(&self) -> u64;

    /// Escape a string for inclusion in a quoted literal using the
    /// connection's native rules (correct for its current character set).
    fn escape(&self, raw: &str) -> String;
}

/// Steps the rows of one executed statement.
pub trait ResultHandle: std::fmt::Debug {
    /// Column metadata, in driver order.
    fn columns(&self) -> &[ColumnDescriptor];

    /// The next row's values in column order, or `None` at the end.
    ///
    /// # Errors
    ///
    /// Returns the driver's error if stepping the result fails mid-way.
    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>, SqlPrepError>;
}

/// Metadata for one result column.
///
/// Drivers fill what they know; flags a backend cannot report stay at their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Declared type, when the backend reports one.
    pub type_name: Option<String>,
    /// Maximum value width observed in this result set.
    pub max_length: Option<i64>,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique_key: bool,
    pub multiple_key: bool,
}

impl ColumnDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
