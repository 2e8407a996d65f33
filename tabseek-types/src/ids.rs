use arrow::datatypes::UInt32Type;

/// Position of a row within a table, as written to bound-query results.
///
/// Insertion points range over `[0, row_count]` inclusive, so a table can hold at
/// most [`MAX_SEARCH_ROWS`] rows.
pub type RowIndex = u32;

/// Arrow primitive type backing [`RowIndex`] results.
pub type RowIndexType = UInt32Type;

/// Largest sorted-table row count whose insertion points fit in a [`RowIndex`].
pub const MAX_SEARCH_ROWS: usize = RowIndex::MAX as usize;

/// Convert a row position into a [`RowIndex`].
///
/// Callers validate the table size up front; positions are always within range.
#[inline]
pub fn row_index(position: usize) -> RowIndex {
    debug_assert!(position <= MAX_SEARCH_ROWS);
    position as RowIndex
}
