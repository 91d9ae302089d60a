//! Scripted driver doubles for tests.
//!
//! [`MockConnection`] replays a fixed script of responses and records every
//! statement it is handed, so tests can assert on the exact SQL the executor
//! produced — including that it produced none at all.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::driver::{ColumnDescriptor, ConnectOptions, Connection, Driver, ResultHandle};
use crate::error::SqlPrepError;
use crate::escape;
use crate::report::ErrorReporter;
use crate::types::SqlValue;

/// One scripted reply for [`MockConnection`].
#[derive(Debug, Clone, Default)]
pub struct MockResponse {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Vec<SqlValue>>,
    pub affected_rows: u64,
    pub insert_id: u64,
    pub error: Option<String>,
}

impl MockResponse {
    /// An empty success (DDL-style).
    #[must_use]
    pub fn ok() -> Self {
        Self::default()
    }

    /// A read-style reply with columns and rows.
    #[must_use]
    pub fn rows(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// A mutation-style reply with an affected-row count.
    #[must_use]
    pub fn affected(rows: u64) -> Self {
        Self {
            affected_rows: rows,
            ..Self::default()
        }
    }

    /// Attach a generated identifier to this reply.
    #[must_use]
    pub fn with_insert_id(mut self, id: u64) -> Self {
        self.insert_id = id;
        self
    }

    /// A rejected statement.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// A connection that replays scripted responses in order.
///
/// Statements beyond the script get an empty success, so most tests only
/// script the interesting replies.
#[derive(Debug, Default)]
pub struct MockConnection {
    script: VecDeque<MockResponse>,
    submitted: Vec<String>,
    affected_rows: u64,
    insert_id: u64,
}

impl MockConnection {
    #[must_use]
    pub fn new(script: Vec<MockResponse>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    /// Every statement submitted so far, in order.
    #[must_use]
    pub fn submitted(&self) -> &[String] {
        &self.submitted
    }
}

impl Connection for MockConnection {
    fn execute(&mut self, sql: &str) -> Result<Box<dyn ResultHandle>, SqlPrepError> {
        self.submitted.push(sql.to_string());
        let response = self.script.pop_front().unwrap_or_default();
        if let Some(message) = response.error {
            return Err(SqlPrepError::ExecutionError(message));
        }
        self.affected_rows = response.affected_rows;
        self.insert_id = response.insert_id;
        Ok(Box::new(MockRows {
            columns: response.columns,
            rows: response.rows.into(),
        }))
    }

    fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    fn last_insert_id(&self) -> u64 {
        self.insert_id
    }

    fn escape(&self, raw: &str) -> String {
        escape::quote_escape(raw)
    }
}

#[derive(Debug)]
struct MockRows {
    columns: Vec<ColumnDescriptor>,
    rows: VecDeque<Vec<SqlValue>>,
}

impl ResultHandle for MockRows {
    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<SqlValue>>, SqlPrepError> {
        Ok(self.rows.pop_front())
    }
}

/// A driver whose connections start with an empty script.
///
/// Set `refuse` to test the connect-failure path.
#[derive(Debug, Default)]
pub struct MockDriver {
    pub refuse: Option<String>,
}

impl Driver for MockDriver {
    type Conn = MockConnection;

    fn connect(&self, opts: &ConnectOptions) -> Result<MockConnection, SqlPrepError> {
        if let Some(message) = &self.refuse {
            return Err(SqlPrepError::ConnectionError(format!(
                "{}@{}/{}: {message}",
                opts.user, opts.host, opts.dbname
            )));
        }
        Ok(MockConnection::default())
    }
}

/// A reporter that collects `(kind, message)` pairs for assertions.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    reports: Arc<Mutex<Vec<(String, String)>>>,
}

impl CollectingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reports(&self) -> Vec<(String, String)> {
        match self.reports.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, kind: &str, message: &str) {
        let mut guard = match self.reports.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push((kind.to_string(), message.to_string()));
    }
}
