//! Membership of a single scalar in a column.

use arrow::array::{Array, Datum};
use rayon::prelude::*;
use tabseek_compute::make_column_equality;
use tabseek_memory::MemoryResource;
use tabseek_result::{Error, Result};

use crate::config::SearchConfig;
use crate::materialize::run_guarded;

/// Membership queries with a configurable dispatch.
///
/// The column is not assumed sorted: the probe scans it, in parallel for large
/// columns, and stops as soon as any worker finds a match.
#[derive(Clone, Debug, Default)]
pub struct MembershipProbe {
    config: SearchConfig,
}

impl MembershipProbe {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Whether some element of `col` equals `value`.
    ///
    /// Equality is the column's native equality (floats by total order, so NaN
    /// matches NaN) and a null matches only a null. `value` must be a scalar
    /// `Datum` of the same type as `col`.
    pub fn contains(&self, col: &dyn Array, value: &dyn Datum) -> Result<bool> {
        let (needle, is_scalar) = value.get();
        if !is_scalar || needle.len() != 1 {
            return Err(Error::InvalidArgumentError(format!(
                "contains expects a single scalar value, got {} values",
                needle.len()
            )));
        }
        if col.data_type() != needle.data_type() {
            return Err(Error::type_mismatch(
                "scalar",
                col.data_type(),
                needle.data_type(),
            ));
        }

        if needle.logical_nulls().is_some_and(|n| n.is_null(0)) {
            let found = col.logical_nulls().is_some_and(|n| n.null_count() > 0);
            tracing::debug!(
                rows = col.len(),
                found,
                "null membership resolved from validity"
            );
            return Ok(found);
        }

        let eq = make_column_equality(col, needle)?;
        let rows = col.len();
        let parallel = self.config.should_parallelize(rows);
        tracing::debug!(
            rows,
            data_type = %col.data_type(),
            parallel,
            "dispatching membership scan"
        );

        if parallel {
            let min_len = self.config.min_rows_per_task;
            run_guarded(&self.config, || {
                (0..rows)
                    .into_par_iter()
                    .with_min_len(min_len)
                    .any(|row| eq(row, 0))
            })
        } else {
            run_guarded(&self.config, || (0..rows).any(|row| eq(row, 0)))
        }
    }
}

/// Whether `value` is present in `col`.
///
/// Membership returns its answer by value, so `_resource` is never asked for a
/// buffer; it is accepted so every search entry point takes the same
/// collaborators.
pub fn contains(
    col: &dyn Array,
    value: &dyn Datum,
    _resource: &dyn MemoryResource,
) -> Result<bool> {
    MembershipProbe::default().contains(col, value)
}
