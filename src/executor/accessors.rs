//! Execute-or-reuse-cache convenience accessors.
//!
//! `get_value` and `get_column` reuse the cached result when called without
//! a query; `get_row` and `get_results` require an explicit query and return
//! the null sentinel otherwise. That asymmetry is deliberate.

use crate::driver::Connection;
use crate::error::SqlPrepError;
use crate::results::{ColumnInfoKind, ResultSet, Row};
use crate::types::SqlValue;

use super::Database;

impl<C: Connection> Database<C> {
    /// One value, by ordinal column position and row index.
    ///
    /// Runs `query` first when given, else reads the cache. Out-of-range
    /// positions and empty-string values read as `None`.
    ///
    /// # Errors
    ///
    /// Propagates [`Database::query`] failures when a query is given.
    pub fn get_value(
        &mut self,
        query: Option<&str>,
        col: usize,
        row: usize,
    ) -> Result<Option<SqlValue>, SqlPrepError> {
        if let Some(sql) = query {
            self.query(sql)?;
        }
        Ok(self
            .current
            .as_ref()
            .and_then(|set| set.value_at(col, row))
            .cloned())
    }

    /// One whole row.
    ///
    /// Requires an explicit query; `None` without touching the cache
    /// otherwise. Out-of-range rows read as `None`.
    ///
    /// # Errors
    ///
    /// Propagates [`Database::query`] failures.
    pub fn get_row(
        &mut self,
        query: Option<&str>,
        row: usize,
    ) -> Result<Option<Row>, SqlPrepError> {
        let Some(sql) = query else {
            return Ok(None);
        };
        self.query(sql)?;
        Ok(self
            .current
            .as_ref()
            .and_then(|set| set.row_at(row))
            .cloned())
    }

    /// One column across every cached row, in row order.
    ///
    /// Runs `query` first when given, else reads the cache.
    ///
    /// # Errors
    ///
    /// Propagates [`Database::query`] failures when a query is given.
    pub fn get_column(
        &mut self,
        query: Option<&str>,
        col: usize,
    ) -> Result<Vec<Option<SqlValue>>, SqlPrepError> {
        if let Some(sql) = query {
            self.query(sql)?;
        }
        Ok(self
            .current
            .as_ref()
            .map(|set| set.column_values(col))
            .unwrap_or_default())
    }

    /// The full result set.
    ///
    /// Requires an explicit query (same asymmetry as [`Database::get_row`]).
    ///
    /// # Errors
    ///
    /// Propagates [`Database::query`] failures.
    pub fn get_results(
        &mut self,
        query: Option<&str>,
    ) -> Result<Option<&ResultSet>, SqlPrepError> {
        let Some(sql) = query else {
            return Ok(None);
        };
        self.query(sql)?;
        Ok(self.current.as_ref())
    }

    /// One column-metadata attribute for every cached column, in order.
    ///
    /// Returns `None` when no column metadata is cached — callers must
    /// check.
    #[must_use]
    pub fn get_column_info(&self, kind: ColumnInfoKind) -> Option<Vec<SqlValue>> {
        self.current.as_ref()?.column_info(kind)
    }

    /// One column-metadata attribute for the column at `offset`.
    #[must_use]
    pub fn get_column_info_at(&self, kind: ColumnInfoKind, offset: usize) -> Option<SqlValue> {
        self.current.as_ref()?.column_info_at(kind, offset)
    }
}
