//! Derives query templates and ordered argument lists from semantic intents.

use std::collections::HashMap;

use crate::types::{FormatSpec, SqlValue};

mod dml;

pub(crate) use dml::{delete, insert_replace, update};

/// Which row-write statement an insert-style builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteKind {
    Insert,
    Replace,
}

impl WriteKind {
    pub(crate) fn verb(self) -> &'static str {
        match self {
            WriteKind::Insert => "INSERT",
            WriteKind::Replace => "REPLACE",
        }
    }
}

/// A derived template plus its arguments, ready for compilation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatementPlan {
    pub template: String,
    pub args: Vec<SqlValue>,
}

/// Resolve the specifier for one column.
///
/// Precedence: the explicit per-call format slice (falling back to its first
/// entry once exhausted), then the configured per-column default, then `%s`.
pub(crate) fn resolve_spec(
    column: &str,
    index: usize,
    explicit: Option<&[FormatSpec]>,
    defaults: &HashMap<String, FormatSpec>,
) -> FormatSpec {
    if let Some(formats) = explicit
        && !formats.is_empty()
    {
        return formats.get(index).copied().unwrap_or(formats[0]);
    }
    defaults
        .get(column)
        .copied()
        .unwrap_or(FormatSpec::Text)
}
