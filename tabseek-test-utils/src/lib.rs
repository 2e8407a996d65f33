use std::sync::{Arc, Once};

use arrow::array::{ArrayRef, Int32Array, StringArray};
use arrow::compute::{SortColumn, lexsort_to_indices, take};
use tabseek_result::{Error, Result};
use tabseek_types::{SortKey, TableView};

static INIT: Once = Once::new();

/// Initialize tracing for test binaries. Safe to call multiple times.
pub fn init_tracing_for_tests() {
    INIT.call_once(|| {
        use tracing_subscriber::filter::EnvFilter;
        use tracing_subscriber::fmt;
        let env = std::env::var("RUST_LOG").ok();
        let filter = match env {
            Some(_) => {
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
            }
            None => EnvFilter::new("info"),
        };
        // A test binary may install its own global subscriber first; that one wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_test_writer()
            .try_init();
    });
}

#[cfg(feature = "auto-init")]
mod auto {
    // Runs at binary init so individual tests need not call it.
    use ctor::ctor;

    #[ctor]
    fn init() {
        super::init_tracing_for_tests();
    }
}

/// Reorder the rows of `table` so they are sorted by `keys`, lexicographically.
///
/// Uses Arrow's own sort kernels, so the result is an independent reference
/// ordering to search against.
pub fn sort_table(table: TableView<'_>, keys: &[SortKey]) -> Result<Vec<ArrayRef>> {
    let columns = table.columns();
    if columns.len() != keys.len() {
        return Err(Error::arity_mismatch("sort keys", columns.len(), keys.len()));
    }
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let sort_columns: Vec<SortColumn> = columns
        .iter()
        .zip(keys)
        .map(|(values, key)| SortColumn {
            values: Arc::clone(values),
            options: Some(key.to_sort_options()),
        })
        .collect();
    let indices = lexsort_to_indices(&sort_columns, None)?;
    columns
        .iter()
        .map(|column| take(column.as_ref(), &indices, None).map_err(Error::from))
        .collect()
}

pub fn int32_column(values: impl IntoIterator<Item = Option<i32>>) -> ArrayRef {
    Arc::new(values.into_iter().collect::<Int32Array>())
}

pub fn utf8_column<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> ArrayRef {
    Arc::new(values.into_iter().collect::<StringArray>())
}
