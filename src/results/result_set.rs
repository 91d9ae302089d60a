use std::sync::Arc;

use crate::driver::ColumnDescriptor;
use crate::types::SqlValue;

use super::row::Row;

/// Which column-descriptor attribute an info lookup reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnInfoKind {
    Name,
    TypeName,
    MaxLength,
    NotNull,
    PrimaryKey,
    UniqueKey,
    MultipleKey,
}

impl ColumnInfoKind {
    /// Read this attribute from a descriptor as a [`SqlValue`].
    #[must_use]
    pub fn read(self, column: &ColumnDescriptor) -> SqlValue {
        match self {
            ColumnInfoKind::Name => SqlValue::Text(column.name.clone()),
            ColumnInfoKind::TypeName => column
                .type_name
                .as_ref()
                .map_or(SqlValue::Null, |t| SqlValue::Text(t.clone())),
            ColumnInfoKind::MaxLength => column
                .max_length
                .map_or(SqlValue::Null, |len| SqlValue::Int(len)),
            ColumnInfoKind::NotNull => SqlValue::Bool(column.not_null),
            ColumnInfoKind::PrimaryKey => SqlValue::Bool(column.primary_key),
            ColumnInfoKind::UniqueKey => SqlValue::Bool(column.unique_key),
            ColumnInfoKind::MultipleKey => SqlValue::Bool(column.multiple_key),
        }
    }
}

/// An ordered result set: rows plus parallel column metadata.
///
/// A result set is produced wholesale by one read-style query and never
/// mutated afterwards except by being replaced; the accessors here are pure
/// reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    columns: Vec<ColumnDescriptor>,
    column_names: Arc<Vec<String>>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// Create an empty result set with the given column metadata.
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        let column_names = Arc::new(columns.iter().map(|c| c.name.clone()).collect());
        Self {
            columns,
            column_names,
            rows: Vec::new(),
        }
    }

    /// Append a row; values must be in driver column order.
    pub fn push_row(&mut self, values: Vec<SqlValue>) {
        self.rows.push(Row::new(self.column_names.clone(), values));
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `row`, if in range.
    #[must_use]
    pub fn row_at(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// The value at ordinal position `col` of the row at `row`.
    ///
    /// Absent positions and empty-string values both read as `None`; absence
    /// is not an error in this layer.
    #[must_use]
    pub fn value_at(&self, col: usize, row: usize) -> Option<&SqlValue> {
        let value = self.rows.get(row)?.get_by_index(col)?;
        match value {
            SqlValue::Text(s) if s.is_empty() => None,
            other => Some(other),
        }
    }

    /// One [`Self::value_at`] result per row, preserving row order.
    #[must_use]
    pub fn column_values(&self, col: usize) -> Vec<Option<SqlValue>> {
        (0..self.rows.len())
            .map(|row| self.value_at(col, row).cloned())
            .collect()
    }

    /// The named attribute for every column, in column order.
    ///
    /// Returns `None` when no column metadata is cached — callers must check.
    #[must_use]
    pub fn column_info(&self, kind: ColumnInfoKind) -> Option<Vec<SqlValue>> {
        if self.columns.is_empty() {
            return None;
        }
        Some(self.columns.iter().map(|c| kind.read(c)).collect())
    }

    /// The named attribute for the column at `offset`.
    #[must_use]
    pub fn column_info_at(&self, kind: ColumnInfoKind, offset: usize) -> Option<SqlValue> {
        if self.columns.is_empty() {
            return None;
        }
        self.columns.get(offset).map(|c| kind.read(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultSet {
        let mut set = ResultSet::new(vec![
            ColumnDescriptor::new("id"),
            ColumnDescriptor::new("name"),
        ]);
        set.push_row(vec![SqlValue::Int(1), SqlValue::Text("alice".into())]);
        set.push_row(vec![SqlValue::Int(2), SqlValue::Text(String::new())]);
        set
    }

    #[test]
    fn value_at_reads_by_ordinal_position() {
        let set = sample();
        assert_eq!(set.value_at(1, 0), Some(&SqlValue::Text("alice".into())));
        assert_eq!(set.value_at(0, 1), Some(&SqlValue::Int(2)));
    }

    #[test]
    fn empty_string_reads_as_absent() {
        let set = sample();
        assert_eq!(set.value_at(1, 1), None);
    }

    #[test]
    fn out_of_range_reads_as_absent() {
        let set = sample();
        assert_eq!(set.value_at(9, 0), None);
        assert_eq!(set.value_at(0, 9), None);
        assert!(set.row_at(9).is_none());
    }

    #[test]
    fn column_values_preserve_row_order() {
        let set = sample();
        assert_eq!(
            set.column_values(0),
            vec![Some(SqlValue::Int(1)), Some(SqlValue::Int(2))]
        );
    }

    #[test]
    fn column_info_requires_metadata() {
        let set = sample();
        assert_eq!(
            set.column_info(ColumnInfoKind::Name),
            Some(vec![
                SqlValue::Text("id".into()),
                SqlValue::Text("name".into())
            ])
        );
        assert_eq!(
            set.column_info_at(ColumnInfoKind::Name, 1),
            Some(SqlValue::Text("name".into()))
        );
        assert_eq!(ResultSet::default().column_info(ColumnInfoKind::Name), None);
    }
}
