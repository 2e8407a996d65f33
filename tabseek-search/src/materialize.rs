//! Output materialization: one allocation per result, filled in parallel.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use arrow::array::{PrimitiveArray, UInt32Array};
use arrow::buffer::ScalarBuffer;
use rayon::prelude::*;
use tabseek_memory::{MemoryResource, allocate_typed};
use tabseek_result::{Error, Result};
use tabseek_types::{RowIndex, RowIndexType};

use crate::config::SearchConfig;

/// Run `op` on the configured pool, turning a worker panic into
/// [`Error::ExecutionFault`] so the caller never sees a partial result.
pub(crate) fn run_guarded<R, OP>(config: &SearchConfig, op: OP) -> Result<R>
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    catch_unwind(AssertUnwindSafe(|| config.install(op))).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::warn!(%message, "search worker panicked");
        Error::execution_fault(format_args!("search worker panicked: {message}"))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Allocate `len` row indices from `resource` and set slot `k` to `compute(k)`.
///
/// Every slot is written by exactly one task, so no synchronization is needed
/// and the output order never depends on scheduling.
pub(crate) fn materialize_indices<F>(
    resource: &dyn MemoryResource,
    config: &SearchConfig,
    len: usize,
    compute: F,
) -> Result<UInt32Array>
where
    F: Fn(usize) -> RowIndex + Send + Sync,
{
    let mut buffer = allocate_typed::<RowIndex, _>(resource, len)?;
    {
        let slots = buffer.typed_data_mut::<RowIndex>();
        if config.should_parallelize(len) {
            let min_len = config.min_rows_per_task;
            run_guarded(config, || {
                slots
                    .par_iter_mut()
                    .enumerate()
                    .with_min_len(min_len)
                    .for_each(|(row, slot)| *slot = compute(row));
            })?;
        } else {
            run_guarded(config, || {
                for (row, slot) in slots.iter_mut().enumerate() {
                    *slot = compute(row);
                }
            })?;
        }
    }

    let values = ScalarBuffer::<RowIndex>::new(buffer.into(), 0, len);
    Ok(PrimitiveArray::<RowIndexType>::new(values, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use arrow::datatypes::ArrowPrimitiveType;
    use tabseek_memory::{CappedMemoryResource, DefaultMemoryResource, InstrumentedMemoryResource};

    #[test]
    fn fills_every_slot_in_order() {
        let config = SearchConfig::default()
            .with_min_parallel_rows(1)
            .with_min_rows_per_task(3);
        let out = materialize_indices(&DefaultMemoryResource, &config, 10, |row| {
            (row * 2) as RowIndex
        })
        .unwrap();
        assert_eq!(out.len(), 10);
        assert_eq!(out.null_count(), 0);
        assert_eq!(out.data_type(), &RowIndexType::DATA_TYPE);
        assert_eq!(out.values().to_vec(), (0..10).map(|r| r * 2).collect::<Vec<u32>>());
    }

    #[test]
    fn allocates_exactly_once() {
        let (resource, stats) = InstrumentedMemoryResource::new(DefaultMemoryResource);
        let out = materialize_indices(&resource, &SearchConfig::serial(), 4, |row| row as RowIndex)
            .unwrap();
        assert_eq!(out.values().as_ref(), &[0, 1, 2, 3]);
        assert_eq!(stats.allocations(), 1);
        assert_eq!(stats.bytes_allocated(), 16);
    }

    #[test]
    fn allocation_failure_aborts_before_compute() {
        let resource = CappedMemoryResource::new(DefaultMemoryResource, 8);
        let err = materialize_indices(&resource, &SearchConfig::default(), 3, |_| {
            panic!("no work may run after a refused allocation")
        })
        .unwrap_err();
        assert!(matches!(err, Error::ResourceExhausted { requested: 12, limit: 8 }));
    }

    #[test]
    fn worker_panics_become_execution_faults() {
        let config = SearchConfig::default().with_min_parallel_rows(1);
        let err = materialize_indices(&DefaultMemoryResource, &config, 64, |row| {
            if row == 17 {
                panic!("bad row");
            }
            row as RowIndex
        })
        .unwrap_err();
        assert!(matches!(err, Error::ExecutionFault(msg) if msg.contains("bad row")));
    }
}
