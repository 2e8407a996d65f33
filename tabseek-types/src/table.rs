use arrow::array::{Array, ArrayRef};
use arrow::record_batch::RecordBatch;
use tabseek_result::{Error, Result};

/// Borrowed, read-only view of equal-length Arrow columns treated as one table.
///
/// The view never copies column data. A table with zero columns still carries a
/// row count, see [`TableView::with_row_count`].
#[derive(Clone, Copy, Debug)]
pub struct TableView<'a> {
    columns: &'a [ArrayRef],
    num_rows: usize,
}

impl<'a> TableView<'a> {
    /// View `columns` as a table, inferring the row count from the first column.
    ///
    /// An empty column slice yields an empty table.
    pub fn try_new(columns: &'a [ArrayRef]) -> Result<Self> {
        let num_rows = columns.first().map(|c| c.len()).unwrap_or(0);
        Self::with_row_count(columns, num_rows)
    }

    /// View `columns` as a table of exactly `num_rows` rows.
    pub fn with_row_count(columns: &'a [ArrayRef], num_rows: usize) -> Result<Self> {
        for (idx, column) in columns.iter().enumerate() {
            if column.len() != num_rows {
                return Err(Error::InvalidArgumentError(format!(
                    "column {idx} has {} rows but the table has {num_rows}",
                    column.len()
                )));
            }
        }
        Ok(Self { columns, num_rows })
    }

    #[inline]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    pub fn columns(&self) -> &'a [ArrayRef] {
        self.columns
    }

    /// Column at `idx`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn column(&self, idx: usize) -> &'a dyn Array {
        let columns = self.columns;
        columns[idx].as_ref()
    }
}

impl<'a> From<&'a RecordBatch> for TableView<'a> {
    fn from(batch: &'a RecordBatch) -> Self {
        Self {
            columns: batch.columns(),
            num_rows: batch.num_rows(),
        }
    }
}
