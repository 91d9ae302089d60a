//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::driver::{
    ColumnDescriptor, ConnectOptions, ConnectOptionsBuilder, Connection, Driver, ResultHandle,
};
pub use crate::error::SqlPrepError;
pub use crate::escape::EscapeMode;
pub use crate::executor::{Database, DatabaseBuilder, QueryOutcome, StatementKind};
pub use crate::report::{ErrorReporter, JsonReporter};
pub use crate::results::{ColumnInfoKind, ResultSet, Row};
pub use crate::types::{FormatSpec, IntoSqlArgs, SqlValue};

#[cfg(feature = "sqlite")]
pub use crate::driver::sqlite::{SqliteConnection, SqliteDriver};
