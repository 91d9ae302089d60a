//! Fatal-error reporting collaborator.
//!
//! The executor never formats its own error payload; it hands a kind tag and
//! message to a reporter, which owns serialization and delivery.

use serde::Serialize;

/// The structured payload a reporter serializes.
#[derive(Debug, Serialize)]
pub struct ErrorPayload<'a> {
    pub error: &'a str,
    pub message: &'a str,
}

/// Renders fatal errors for the outside world.
pub trait ErrorReporter {
    fn report(&self, kind: &str, message: &str);
}

/// Serializes the payload as JSON and emits it through `tracing::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl ErrorReporter for JsonReporter {
    fn report(&self, kind: &str, message: &str) {
        let payload = ErrorPayload {
            error: kind,
            message,
        };
        match serde_json::to_string(&payload) {
            Ok(body) => tracing::error!(target: "sql_prep", "{body}"),
            Err(err) => {
                tracing::error!(target: "sql_prep", "failed to serialize error payload: {err}");
            }
        }
    }
}
