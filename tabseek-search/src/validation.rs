use tabseek_compute::RowComparator;
use tabseek_result::{Error, Result};
use tabseek_types::{MAX_SEARCH_ROWS, NullOrder, Order, TableView, sort_keys};

/// Validated inputs of a bound search, ready to dispatch.
pub(crate) struct SearchPlan<'a> {
    pub(crate) comparator: RowComparator<'a>,
    pub(crate) table_rows: usize,
    pub(crate) query_rows: usize,
}

/// Check shapes and types of a bound search before any work is launched.
///
/// Column counts and the per-column vectors are checked first, then each column
/// pair's type while the comparator is resolved.
pub(crate) fn plan_search<'a>(
    t: TableView<'a>,
    values: TableView<'a>,
    column_order: &[Order],
    null_precedence: &[NullOrder],
) -> Result<SearchPlan<'a>> {
    if values.num_columns() != t.num_columns() {
        return Err(Error::arity_mismatch(
            "values",
            t.num_columns(),
            values.num_columns(),
        ));
    }
    let keys = sort_keys(column_order, null_precedence, t.num_columns())?;

    if t.num_rows() > MAX_SEARCH_ROWS {
        return Err(Error::InvalidArgumentError(format!(
            "sorted table has {} rows; at most {MAX_SEARCH_ROWS} can be indexed",
            t.num_rows()
        )));
    }

    let comparator = RowComparator::try_new(t, values, &keys)?;
    Ok(SearchPlan {
        comparator,
        table_rows: t.num_rows(),
        query_rows: values.num_rows(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Int32Array, StringArray};
    use std::sync::Arc;

    fn int_columns(n: usize) -> Vec<ArrayRef> {
        (0..n)
            .map(|_| Arc::new(Int32Array::from(vec![1, 2])) as ArrayRef)
            .collect()
    }

    #[test]
    fn column_count_checked_before_vectors() {
        let table = int_columns(2);
        let query = int_columns(1);
        let err = plan_search(
            TableView::try_new(&table).unwrap(),
            TableView::try_new(&query).unwrap(),
            &[Order::Ascending],
            &[NullOrder::First],
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            Error::ArityMismatch {
                what: "values",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn vector_lengths_must_match_columns() {
        let table = int_columns(2);
        let err = plan_search(
            TableView::try_new(&table).unwrap(),
            TableView::try_new(&table).unwrap(),
            &[Order::Ascending, Order::Ascending],
            &[NullOrder::First],
        )
        .err()
        .unwrap();
        assert!(matches!(
            err,
            Error::ArityMismatch {
                what: "null_precedence",
                ..
            }
        ));
    }

    #[test]
    fn column_types_must_match() {
        let table = int_columns(1);
        let query: Vec<ArrayRef> = vec![Arc::new(StringArray::from(vec!["1"]))];
        let err = plan_search(
            TableView::try_new(&table).unwrap(),
            TableView::try_new(&query).unwrap(),
            &[Order::Ascending],
            &[NullOrder::First],
        )
        .err()
        .unwrap();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn records_row_counts() {
        let table = int_columns(1);
        let query: Vec<ArrayRef> = vec![Arc::new(Int32Array::from(vec![5, 6, 7]))];
        let plan = plan_search(
            TableView::try_new(&table).unwrap(),
            TableView::try_new(&query).unwrap(),
            &[Order::Descending],
            &[NullOrder::Last],
        )
        .unwrap();
        assert_eq!((plan.table_rows, plan.query_rows), (2, 3));
    }
}
