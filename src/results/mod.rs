//! Result-set types and pure accessors over them.

mod result_set;
mod row;

pub use result_set::{ColumnInfoKind, ResultSet};
pub use row::Row;
