//! The query executor: owns the connection and the most recent result set.

use std::collections::HashMap;

use crate::driver::{ConnectOptions, Connection, Driver};
use crate::error::SqlPrepError;
use crate::escape::{self, EscapeMode};
use crate::report::ErrorReporter;
use crate::results::ResultSet;
use crate::template;
use crate::types::{FormatSpec, IntoSqlArgs};

mod accessors;
mod classify;
mod dml;

pub use classify::{QueryOutcome, StatementKind};

/// A single database connection plus the cached result of its last query.
///
/// Strictly synchronous: one statement in flight at a time, and every
/// accessor that can trigger a query takes `&mut self`, so the
/// execute-then-read sequence is serialized by the borrow checker. For
/// concurrent use, give each logical session its own handle.
pub struct Database<C: Connection> {
    conn: C,
    escape_mode: EscapeMode,
    field_types: HashMap<String, FormatSpec>,
    reporter: Option<Box<dyn ErrorReporter>>,
    last_query: Option<String>,
    current: Option<ResultSet>,
    rows_affected: u64,
    insert_id: Option<u64>,
}

impl<C: Connection + std::fmt::Debug> std::fmt::Debug for Database<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("conn", &self.conn)
            .field("escape_mode", &self.escape_mode)
            .field("field_types", &self.field_types)
            .field("reporter", &self.reporter.as_ref().map(|_| "<reporter>"))
            .field("last_query", &self.last_query)
            .field("current", &self.current)
            .field("rows_affected", &self.rows_affected)
            .field("insert_id", &self.insert_id)
            .finish()
    }
}

/// Fluent configuration for [`Database`].
///
/// ```rust
/// # #[cfg(feature = "sqlite")]
/// # fn demo() -> Result<(), sql_prep::SqlPrepError> {
/// use sql_prep::prelude::*;
/// use sql_prep::driver::sqlite::SqliteConnection;
///
/// let db = DatabaseBuilder::new()
///     .escape_mode(EscapeMode::Native)
///     .field_type("id", FormatSpec::Integer)
///     .attach(SqliteConnection::open_in_memory()?);
/// # let _ = db;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct DatabaseBuilder {
    escape_mode: EscapeMode,
    field_types: HashMap<String, FormatSpec>,
    reporter: Option<Box<dyn ErrorReporter>>,
}

impl DatabaseBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select how string values are escaped before substitution.
    #[must_use]
    pub fn escape_mode(mut self, mode: EscapeMode) -> Self {
        self.escape_mode = mode;
        self
    }

    /// Configure the default format specifier for a column name.
    #[must_use]
    pub fn field_type(mut self, column: impl Into<String>, spec: FormatSpec) -> Self {
        self.field_types.insert(column.into(), spec);
        self
    }

    /// Configure default format specifiers in bulk.
    #[must_use]
    pub fn field_types<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, FormatSpec)>,
    {
        self.field_types.extend(entries);
        self
    }

    /// Install a fatal-error reporter.
    #[must_use]
    pub fn reporter(mut self, reporter: Box<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Attach an already-open connection.
    #[must_use]
    pub fn attach<C: Connection>(self, conn: C) -> Database<C> {
        Database {
            conn,
            escape_mode: self.escape_mode,
            field_types: self.field_types,
            reporter: self.reporter,
            last_query: None,
            current: None,
            rows_affected: 0,
            insert_id: None,
        }
    }

    /// Open a connection through `driver` and attach it.
    ///
    /// # Errors
    ///
    /// A refused connection is fatal: it is handed to the configured
    /// reporter and returned as `ConnectionError`.
    pub fn connect<D: Driver>(
        self,
        driver: &D,
        opts: &ConnectOptions,
    ) -> Result<Database<D::Conn>, SqlPrepError> {
        match driver.connect(opts) {
            Ok(conn) => Ok(self.attach(conn)),
            Err(err) => {
                if let Some(reporter) = &self.reporter {
                    reporter.report(err.kind(), &err.to_string());
                }
                Err(err)
            }
        }
    }
}

impl<C: Connection> Database<C> {
    /// A handle with default configuration over an existing connection.
    #[must_use]
    pub fn new(conn: C) -> Self {
        DatabaseBuilder::new().attach(conn)
    }

    /// The underlying driver connection.
    #[must_use]
    pub fn connection(&self) -> &C {
        &self.conn
    }

    /// Escape one string for inclusion in a quoted literal, using the
    /// configured mode.
    #[must_use]
    pub fn escape(&self, raw: &str) -> String {
        match self.escape_mode {
            EscapeMode::Native => self.conn.escape(raw),
            EscapeMode::Backslash => escape::backslash_escape(raw),
        }
    }

    /// Compile a template into final SQL, escaping each argument.
    ///
    /// An absent template returns `Ok(None)`: there is nothing to execute,
    /// and callers must treat it that way.
    ///
    /// # Errors
    ///
    /// See [`template::compile`].
    pub fn prepare<A: IntoSqlArgs>(
        &self,
        query: Option<&str>,
        args: A,
    ) -> Result<Option<String>, SqlPrepError> {
        let Some(query) = query else {
            return Ok(None);
        };
        let args = args.into_sql_args();
        template::compile(query, &args, |raw| self.escape(raw)).map(Some)
    }

    /// Execute one SQL statement and normalize its outcome.
    ///
    /// The cached result set and query text are reset before the driver is
    /// contacted, so a failed query never leaves stale rows behind under a
    /// new query's identity. Read-style statements replace the cache
    /// wholesale.
    ///
    /// # Errors
    ///
    /// Driver rejections are fatal: handed to the configured reporter, then
    /// returned. No retry.
    pub fn query(&mut self, sql: &str) -> Result<QueryOutcome, SqlPrepError> {
        match self.run(sql) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.report_fatal(&err);
                Err(err)
            }
        }
    }

    fn run(&mut self, sql: &str) -> Result<QueryOutcome, SqlPrepError> {
        self.flush();
        self.last_query = Some(sql.to_string());

        tracing::debug!(target: "sql_prep", sql, "executing statement");
        let mut handle = self.conn.execute(sql)?;

        match StatementKind::classify(sql) {
            StatementKind::Ddl => Ok(QueryOutcome::Ddl),
            StatementKind::Mutation { captures_insert_id } => {
                drop(handle);
                self.rows_affected = self.conn.affected_rows();
                let last_insert_id = if captures_insert_id {
                    let id = self.conn.last_insert_id();
                    self.insert_id = Some(id);
                    Some(id)
                } else {
                    None
                };
                tracing::debug!(
                    target: "sql_prep",
                    rows = self.rows_affected,
                    "mutation complete"
                );
                Ok(QueryOutcome::Mutation {
                    rows_affected: self.rows_affected,
                    last_insert_id,
                })
            }
            StatementKind::Read => {
                let mut set = ResultSet::new(handle.columns().to_vec());
                while let Some(values) = handle.next_row()? {
                    set.push_row(values);
                }
                // The cache is now the sole owner of the data.
                drop(handle);
                let rows = set.num_rows();
                tracing::debug!(target: "sql_prep", rows, "result set cached");
                self.current = Some(set);
                Ok(QueryOutcome::Read { rows })
            }
        }
    }

    /// Kill cached query results.
    fn flush(&mut self) {
        self.current = None;
        self.last_query = None;
    }

    fn report_fatal(&self, err: &SqlPrepError) {
        if let Some(reporter) = &self.reporter {
            reporter.report(err.kind(), &err.to_string());
        }
    }

    /// The most recently executed SQL text.
    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// The cached result set of the last read-style query.
    #[must_use]
    pub fn current_result(&self) -> Option<&ResultSet> {
        self.current.as_ref()
    }

    /// Row count of the cached result set.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.current.as_ref().map_or(0, ResultSet::num_rows)
    }

    /// Rows affected by the most recent mutation.
    #[must_use]
    pub fn rows_affected(&self) -> u64 {
        self.rows_affected
    }

    /// Identifier generated by the most recent insert/replace.
    #[must_use]
    pub fn last_insert_id(&self) -> Option<u64> {
        self.insert_id
    }
}
