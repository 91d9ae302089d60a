use std::collections::HashMap;
use std::fmt::Write;

use crate::error::SqlPrepError;
use crate::types::{FormatSpec, SqlValue};

use super::{StatementPlan, WriteKind, resolve_spec};

/// Build an `INSERT INTO` / `REPLACE INTO` template from column/value pairs.
pub(crate) fn insert_replace(
    kind: WriteKind,
    table: &str,
    data: &[(&str, SqlValue)],
    formats: Option<&[FormatSpec]>,
    defaults: &HashMap<String, FormatSpec>,
) -> Result<StatementPlan, SqlPrepError> {
    if data.is_empty() {
        return Err(SqlPrepError::BuilderError(format!(
            "{} into `{table}` needs at least one column",
            kind.verb()
        )));
    }

    let mut columns = String::new();
    let mut placeholders = String::new();
    let mut args = Vec::with_capacity(data.len());
    for (index, (column, value)) in data.iter().enumerate() {
        if index > 0 {
            columns.push_str("`,`");
            placeholders.push(',');
        }
        columns.push_str(column);
        placeholders.push_str(resolve_spec(column, index, formats, defaults).placeholder());
        args.push(value.clone());
    }

    Ok(StatementPlan {
        template: format!(
            "{} INTO `{table}` (`{columns}`) VALUES ({placeholders})",
            kind.verb()
        ),
        args,
    })
}

/// Build an `UPDATE ... SET ... WHERE ...` template.
///
/// The argument list is `data` values followed by `where_clause` values, in
/// that order. WHERE pairs are ANDed.
pub(crate) fn update(
    table: &str,
    data: &[(&str, SqlValue)],
    where_clause: &[(&str, SqlValue)],
    formats: Option<&[FormatSpec]>,
    where_formats: Option<&[FormatSpec]>,
    defaults: &HashMap<String, FormatSpec>,
) -> Result<StatementPlan, SqlPrepError> {
    if data.is_empty() {
        return Err(SqlPrepError::BuilderError(format!(
            "UPDATE `{table}` needs at least one column to set"
        )));
    }
    if where_clause.is_empty() {
        return Err(SqlPrepError::BuilderError(format!(
            "UPDATE `{table}` needs at least one WHERE pair"
        )));
    }

    let mut args = Vec::with_capacity(data.len() + where_clause.len());

    let mut set_bits = String::new();
    for (index, (column, value)) in data.iter().enumerate() {
        if index > 0 {
            set_bits.push_str(", ");
        }
        let spec = resolve_spec(column, index, formats, defaults);
        let _ = write!(set_bits, "`{column}` = {}", spec.placeholder());
        args.push(value.clone());
    }

    let mut where_bits = String::new();
    for (index, (column, value)) in where_clause.iter().enumerate() {
        if index > 0 {
            where_bits.push_str(" AND ");
        }
        let spec = resolve_spec(column, index, where_formats, defaults);
        let _ = write!(where_bits, "`{column}` = {}", spec.placeholder());
        args.push(value.clone());
    }

    Ok(StatementPlan {
        template: format!("UPDATE `{table}` SET {set_bits} WHERE {where_bits}"),
        args,
    })
}

/// Build a `DELETE FROM ... WHERE ...` template.
///
/// Unlike the insert/update builders, identifiers here are deliberately not
/// backtick-quoted.
pub(crate) fn delete(
    table: &str,
    where_clause: &[(&str, SqlValue)],
    where_formats: Option<&[FormatSpec]>,
    defaults: &HashMap<String, FormatSpec>,
) -> Result<StatementPlan, SqlPrepError> {
    if where_clause.is_empty() {
        return Err(SqlPrepError::BuilderError(format!(
            "DELETE FROM {table} needs at least one WHERE pair"
        )));
    }

    let mut args = Vec::with_capacity(where_clause.len());
    let mut where_bits = String::new();
    for (index, (column, value)) in where_clause.iter().enumerate() {
        if index > 0 {
            where_bits.push_str(" AND ");
        }
        let spec = resolve_spec(column, index, where_formats, defaults);
        let _ = write!(where_bits, "{column} = {}", spec.placeholder());
        args.push(value.clone());
    }

    Ok(StatementPlan {
        template: format!("DELETE FROM {table} WHERE {where_bits}"),
        args,
    })
}
