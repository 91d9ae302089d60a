use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;

/// All errors surfaced by this crate.
#[derive(Debug, Error)]
pub enum SqlPrepError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    #[error("Builder error: {0}")]
    BuilderError(String),

    #[error("placeholder count mismatch: template has {expected}, {provided} argument(s) given")]
    TemplateMismatch { expected: usize, provided: usize },

    #[error("Parameter error: {0}")]
    ParameterError(String),
}

impl SqlPrepError {
    /// Stable kind tag handed to error reporters.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::SqliteError(_) => "DriverError",
            Self::ConnectionError(_) => "ConnectError",
            Self::ExecutionError(_) => "DriverError",
            Self::BuilderError(_) => "BuilderError",
            Self::TemplateMismatch { .. } => "TemplateMismatch",
            Self::ParameterError(_) => "ParameterError",
        }
    }
}
