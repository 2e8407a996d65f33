use std::cmp::Ordering;

use tabseek_result::{Error, Result};
use tabseek_types::{SortKey, TableView};

use crate::compare::{DynComparator, make_column_comparator};

/// Lexicographic comparator between rows of two tables with matching schemas.
///
/// Column comparators are resolved once in [`RowComparator::try_new`]; comparing
/// rows walks them left to right and stops at the first column that is not
/// equal. The comparator is `Send + Sync` and is shared by reference across
/// search workers.
pub struct RowComparator<'a> {
    columns: Vec<DynComparator<'a>>,
}

impl<'a> RowComparator<'a> {
    /// Resolve one comparator per column of `left` against `right`.
    ///
    /// Fails with [`Error::ArityMismatch`] when the tables or `keys` disagree on
    /// the column count, with [`Error::TypeMismatch`] when a column pair differs
    /// in type, and with [`Error::InvalidArgumentError`] for types that have no
    /// ordering.
    pub fn try_new(left: TableView<'a>, right: TableView<'a>, keys: &[SortKey]) -> Result<Self> {
        if left.num_columns() != right.num_columns() {
            return Err(Error::arity_mismatch(
                "query table columns",
                left.num_columns(),
                right.num_columns(),
            ));
        }
        if keys.len() != left.num_columns() {
            return Err(Error::arity_mismatch(
                "sort keys",
                left.num_columns(),
                keys.len(),
            ));
        }

        let mut columns = Vec::with_capacity(keys.len());
        for (idx, key) in keys.iter().enumerate() {
            let (l, r) = (left.column(idx), right.column(idx));
            if l.data_type() != r.data_type() {
                return Err(Error::type_mismatch(
                    format!("column {idx}"),
                    l.data_type(),
                    r.data_type(),
                ));
            }
            tracing::trace!(
                column = idx,
                data_type = %l.data_type(),
                key = %key,
                "resolved column comparator"
            );
            columns.push(make_column_comparator(l, r, *key)?);
        }

        Ok(Self { columns })
    }

    /// Compare row `left_row` of the left table with row `right_row` of the right.
    #[inline]
    pub fn compare(&self, left_row: usize, right_row: usize) -> Ordering {
        for column in &self.columns {
            match column(left_row, right_row) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}
