use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use tabseek_memory::{CappedMemoryResource, DefaultMemoryResource, InstrumentedMemoryResource};
use tabseek_result::Error;
use tabseek_search::{BoundSearcher, SearchConfig, equal_range, lower_bound, upper_bound};
use tabseek_test_utils::{init_tracing_for_tests, int32_column, utf8_column};
use tabseek_types::{NullOrder, Order, TableView};

const ASC: &[Order] = &[Order::Ascending];
const DESC: &[Order] = &[Order::Descending];
const FIRST: &[NullOrder] = &[NullOrder::First];
const LAST: &[NullOrder] = &[NullOrder::Last];

fn bounds(
    table: &[ArrayRef],
    query: &[ArrayRef],
    order: &[Order],
    nulls: &[NullOrder],
) -> (Vec<u32>, Vec<u32>) {
    let t = TableView::try_new(table).unwrap();
    let v = TableView::try_new(query).unwrap();
    let lower = lower_bound(t, v, order, nulls, &DefaultMemoryResource).unwrap();
    let upper = upper_bound(t, v, order, nulls, &DefaultMemoryResource).unwrap();
    (lower.values().to_vec(), upper.values().to_vec())
}

#[test]
fn single_column_duplicates() {
    init_tracing_for_tests();
    let table = vec![int32_column([10, 20, 20, 30, 50].map(Some))];
    let query = vec![int32_column([Some(20)])];
    let (lower, upper) = bounds(&table, &query, ASC, FIRST);
    assert_eq!(lower, vec![1]);
    assert_eq!(upper, vec![3]);
}

#[test]
fn three_column_mixed_types() {
    init_tracing_for_tests();
    let table: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from(vec![10, 20, 20, 20, 20])),
        Arc::new(Float64Array::from(vec![5.0, 0.5, 0.5, 0.7, 0.7])),
        Arc::new(Int32Array::from(vec![90, 77, 78, 61, 61])),
    ];
    let query: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from(vec![20])),
        Arc::new(Float64Array::from(vec![0.7])),
        Arc::new(Int32Array::from(vec![61])),
    ];
    let order = [Order::Ascending; 3];
    let nulls = [NullOrder::First; 3];
    let (lower, upper) = bounds(&table, &query, &order, &nulls);
    assert_eq!(lower, vec![3]);
    assert_eq!(upper, vec![5]);
}

#[test]
fn null_query_rows_follow_null_precedence() {
    init_tracing_for_tests();
    let nulls_first = vec![int32_column([None, Some(1), Some(2)])];
    let nulls_last = vec![int32_column([Some(1), Some(2), None])];
    let query = vec![int32_column([None])];

    let (lower, upper) = bounds(&nulls_first, &query, ASC, FIRST);
    assert_eq!((lower, upper), (vec![0], vec![1]));

    let (lower, upper) = bounds(&nulls_last, &query, ASC, LAST);
    assert_eq!((lower, upper), (vec![2], vec![3]));
}

#[test]
fn descending_nulls_first_keeps_nulls_at_front() {
    let table = vec![int32_column([None, None, Some(9), Some(4), Some(4), Some(1)])];
    let query = vec![int32_column([None, Some(4), Some(10), Some(0)])];
    let (lower, upper) = bounds(&table, &query, DESC, FIRST);
    assert_eq!(lower, vec![0, 3, 2, 6]);
    assert_eq!(upper, vec![2, 5, 2, 6]);
}

#[test]
fn values_outside_the_table_range() {
    let table = vec![int32_column([10, 20, 30].map(Some))];
    let query = vec![int32_column([Some(-5), Some(31)])];
    let (lower, upper) = bounds(&table, &query, ASC, LAST);
    assert_eq!(lower, vec![0, 3]);
    assert_eq!(upper, vec![0, 3]);
}

#[test]
fn empty_inputs() {
    let empty_table = vec![int32_column([])];
    let query = vec![int32_column([Some(1), None])];
    let (lower, upper) = bounds(&empty_table, &query, ASC, FIRST);
    assert_eq!((lower, upper), (vec![0, 0], vec![0, 0]));

    let table = vec![int32_column([Some(1)])];
    let empty_query = vec![int32_column([])];
    let (lower, upper) = bounds(&table, &empty_query, ASC, FIRST);
    assert!(lower.is_empty() && upper.is_empty());
}

#[test]
fn string_keys_with_secondary_descending_column() {
    let table = vec![
        utf8_column([Some("apple"), Some("apple"), Some("apple"), Some("pear")]),
        int32_column([Some(3), Some(2), None, Some(7)]),
    ];
    let query = vec![
        utf8_column([Some("apple"), Some("apple"), Some("banana")]),
        int32_column([Some(2), None, Some(0)]),
    ];
    let order = [Order::Ascending, Order::Descending];
    let nulls = [NullOrder::First, NullOrder::Last];
    let (lower, upper) = bounds(&table, &query, &order, &nulls);
    assert_eq!(lower, vec![1, 2, 3]);
    assert_eq!(upper, vec![2, 3, 3]);
}

#[test]
fn zero_column_tables_compare_equal_everywhere() {
    let columns: Vec<ArrayRef> = Vec::new();
    let t = TableView::with_row_count(&columns, 4).unwrap();
    let v = TableView::with_row_count(&columns, 2).unwrap();
    let (lower, upper) = equal_range(t, v, &[], &[], &DefaultMemoryResource).unwrap();
    assert_eq!(lower.values().as_ref(), &[0, 0]);
    assert_eq!(upper.values().as_ref(), &[4, 4]);
}

#[test]
fn record_batches_are_tables() {
    let schema = Arc::new(Schema::new(vec![Field::new("k", DataType::Int32, true)]));
    let sorted = RecordBatch::try_new(
        Arc::clone(&schema),
        vec![int32_column([Some(1), Some(3), Some(3), None])],
    )
    .unwrap();
    let probes = RecordBatch::try_new(schema, vec![int32_column([Some(3), None])]).unwrap();

    let (lower, upper) = BoundSearcher::new(&DefaultMemoryResource)
        .equal_range(
            TableView::from(&sorted),
            TableView::from(&probes),
            &[Order::Ascending],
            &[NullOrder::Last],
        )
        .unwrap();
    assert_eq!(lower.values().as_ref(), &[1, 3]);
    assert_eq!(upper.values().as_ref(), &[3, 4]);
}

#[test]
fn repeated_calls_are_identical() {
    let table = vec![int32_column((0..10_000).map(|v| Some(v / 7)))];
    let query = vec![int32_column((0..5_000).map(|v| Some(v % 1_500)))];
    let t = TableView::try_new(&table).unwrap();
    let v = TableView::try_new(&query).unwrap();
    let searcher = BoundSearcher::new(&DefaultMemoryResource).with_config(
        SearchConfig::default()
            .with_min_parallel_rows(1)
            .with_min_rows_per_task(128),
    );

    let first = searcher
        .lower_bound(t, v, &[Order::Ascending], &[NullOrder::First])
        .unwrap();
    for _ in 0..3 {
        let again: UInt32Array = searcher
            .lower_bound(t, v, &[Order::Ascending], &[NullOrder::First])
            .unwrap();
        assert_eq!(first, again);
    }
    assert_eq!(first.value(10), 70);
}

#[test]
fn dedicated_pool_matches_global_pool() {
    let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap());
    let table = vec![int32_column((0..9_000).map(Some))];
    let query = vec![int32_column((0..9_000).rev().map(|v| Some(v * 2)))];
    let t = TableView::try_new(&table).unwrap();
    let v = TableView::try_new(&query).unwrap();

    let pooled = BoundSearcher::new(&DefaultMemoryResource)
        .with_config(SearchConfig::default().with_thread_pool(pool))
        .upper_bound(t, v, &[Order::Ascending], &[NullOrder::First])
        .unwrap();
    let global = upper_bound(
        t,
        v,
        &[Order::Ascending],
        &[NullOrder::First],
        &DefaultMemoryResource,
    )
    .unwrap();
    assert_eq!(pooled, global);
}

#[test]
fn mismatched_shapes_are_rejected() {
    let table = vec![int32_column([Some(1)]), int32_column([Some(2)])];
    let one_column = vec![int32_column([Some(1)])];
    let t = TableView::try_new(&table).unwrap();
    let order = [Order::Ascending; 2];
    let nulls = [NullOrder::First; 2];

    let narrow = TableView::try_new(&one_column).unwrap();
    let err = lower_bound(t, narrow, &order, &nulls, &DefaultMemoryResource).unwrap_err();
    assert!(matches!(err, Error::ArityMismatch { what: "values", .. }));

    let err = lower_bound(t, t, &order[..1], &nulls, &DefaultMemoryResource).unwrap_err();
    assert!(matches!(err, Error::ArityMismatch { what: "column_order", .. }));

    let err = lower_bound(t, t, &[], &[], &DefaultMemoryResource).unwrap_err();
    assert!(matches!(err, Error::ArityMismatch { .. }));

    let strings = vec![int32_column([Some(1)]), utf8_column([Some("2")])];
    let mistyped = TableView::try_new(&strings).unwrap();
    let err = upper_bound(t, mistyped, &order, &nulls, &DefaultMemoryResource).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { ref context, .. } if context == "column 1"));
    assert!(err.is_validation_error());
}

#[test]
fn refused_allocation_aborts_the_call() {
    let (instrumented, stats) = InstrumentedMemoryResource::new(DefaultMemoryResource);
    let capped = CappedMemoryResource::new(instrumented, 16);
    let table = vec![int32_column((0..100).map(Some))];
    let query = vec![int32_column((0..5).map(Some))];
    let t = TableView::try_new(&table).unwrap();
    let v = TableView::try_new(&query).unwrap();

    let err = lower_bound(t, v, &[Order::Ascending], &[NullOrder::First], &capped).unwrap_err();
    assert!(matches!(err, Error::ResourceExhausted { requested: 20, limit: 16 }));
    assert_eq!(stats.allocations(), 0);

    let small = vec![int32_column((0..4).map(Some))];
    let fits = TableView::try_new(&small).unwrap();
    let ok = lower_bound(t, fits, &[Order::Ascending], &[NullOrder::First], &capped).unwrap();
    assert_eq!(ok.values().as_ref(), &[0, 1, 2, 3]);
    assert_eq!(stats.allocations(), 1);
}
