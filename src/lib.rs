//! Single-connection SQL helper with sprintf-style query templating.
//!
//! The core is [`template::compile`]: a constrained placeholder language
//! (`%d`, `%f`, `%s`, `%%`) that escapes each substituted value and produces
//! a syntactically valid final query. On top of it sit builders that derive
//! templates from column/value maps ([`Database::insert`],
//! [`Database::update`], [`Database::delete`]), a synchronous executor that
//! classifies statements and normalizes outcomes, and convenience accessors
//! over the cached result of the last read-style query.
//!
//! ```rust
//! use sql_prep::prelude::*;
//! use sql_prep::driver::sqlite::SqliteConnection;
//!
//! # fn main() -> Result<(), SqlPrepError> {
//! let mut db = DatabaseBuilder::new()
//!     .escape_mode(EscapeMode::Native)
//!     .field_type("age", FormatSpec::Integer)
//!     .attach(SqliteConnection::open_in_memory()?);
//!
//! db.query("CREATE TABLE users (name TEXT, age INTEGER)")?;
//! db.insert(
//!     "users",
//!     &[
//!         ("name", SqlValue::Text("Alice".into())),
//!         ("age", SqlValue::Int(30)),
//!     ],
//!     None,
//! )?;
//!
//! let age = db.get_value(Some("SELECT age FROM users WHERE name = 'Alice'"), 0, 0)?;
//! assert_eq!(age, Some(SqlValue::Int(30)));
//! # Ok(())
//! # }
//! ```

pub mod driver;
pub mod error;
pub mod escape;
pub mod executor;
pub mod prelude;
mod query_builder;
pub mod report;
pub mod results;
pub mod template;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::SqlPrepError;
pub use executor::{Database, DatabaseBuilder, QueryOutcome, StatementKind};
pub use types::{FormatSpec, IntoSqlArgs, SqlValue};
