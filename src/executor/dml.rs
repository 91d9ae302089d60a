//! Builder entry points: derive a template, compile it, execute it.

use crate::driver::Connection;
use crate::error::SqlPrepError;
use crate::query_builder::{self, StatementPlan, WriteKind};
use crate::template;
use crate::types::{FormatSpec, SqlValue};

use super::{Database, QueryOutcome};

impl<C: Connection> Database<C> {
    /// Insert a row.
    ///
    /// `data` is ordered column/value pairs, raw (neither side SQL-escaped).
    /// `formats` optionally overrides the specifier per value, falling back
    /// to its first entry once exhausted; without it, the column's configured
    /// default applies, then `%s`.
    ///
    /// # Errors
    ///
    /// `BuilderError` for empty `data` (no driver contact), otherwise
    /// whatever compilation or execution returns.
    pub fn insert(
        &mut self,
        table: &str,
        data: &[(&str, SqlValue)],
        formats: Option<&[FormatSpec]>,
    ) -> Result<QueryOutcome, SqlPrepError> {
        self.write_row(WriteKind::Insert, table, data, formats)
    }

    /// Replace a row (insert-or-overwrite).
    ///
    /// # Errors
    ///
    /// Same contract as [`Database::insert`].
    pub fn replace(
        &mut self,
        table: &str,
        data: &[(&str, SqlValue)],
        formats: Option<&[FormatSpec]>,
    ) -> Result<QueryOutcome, SqlPrepError> {
        self.write_row(WriteKind::Replace, table, data, formats)
    }

    fn write_row(
        &mut self,
        kind: WriteKind,
        table: &str,
        data: &[(&str, SqlValue)],
        formats: Option<&[FormatSpec]>,
    ) -> Result<QueryOutcome, SqlPrepError> {
        let plan = query_builder::insert_replace(kind, table, data, formats, &self.field_types)?;
        self.run_plan(&plan)
    }

    /// Update rows matching the ANDed `where_clause` pairs.
    ///
    /// Substitution order is `data` values then `where_clause` values.
    ///
    /// # Errors
    ///
    /// `BuilderError` for an empty `data` or `where_clause` (no driver
    /// contact), otherwise whatever compilation or execution returns.
    pub fn update(
        &mut self,
        table: &str,
        data: &[(&str, SqlValue)],
        where_clause: &[(&str, SqlValue)],
        formats: Option<&[FormatSpec]>,
        where_formats: Option<&[FormatSpec]>,
    ) -> Result<QueryOutcome, SqlPrepError> {
        let plan = query_builder::update(
            table,
            data,
            where_clause,
            formats,
            where_formats,
            &self.field_types,
        )?;
        self.run_plan(&plan)
    }

    /// Delete rows matching the ANDed `where_clause` pairs.
    ///
    /// # Errors
    ///
    /// `BuilderError` for an empty `where_clause` (no driver contact),
    /// otherwise whatever compilation or execution returns.
    pub fn delete(
        &mut self,
        table: &str,
        where_clause: &[(&str, SqlValue)],
        where_formats: Option<&[FormatSpec]>,
    ) -> Result<QueryOutcome, SqlPrepError> {
        let plan = query_builder::delete(table, where_clause, where_formats, &self.field_types)?;
        self.run_plan(&plan)
    }

    fn run_plan(&mut self, plan: &StatementPlan) -> Result<QueryOutcome, SqlPrepError> {
        let sql = template::compile(&plan.template, &plan.args, |raw| self.escape(raw))?;
        self.query(&sql)
    }
}
