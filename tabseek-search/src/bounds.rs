//! Insertion-point searches of query rows against a sorted table.

use std::cmp::Ordering;
use std::fmt;
use std::time::Instant;

use arrow::array::UInt32Array;
use tabseek_compute::RowComparator;
use tabseek_memory::MemoryResource;
use tabseek_result::Result;
use tabseek_types::{NullOrder, Order, TableView, row_index};

use crate::config::SearchConfig;
use crate::materialize::materialize_indices;
use crate::validation::{SearchPlan, plan_search};

/// Which end of a run of equal rows an insertion point is biased to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundKind {
    /// First index whose row is not ordered before the query row.
    Lower,
    /// First index whose row is ordered after the query row.
    Upper,
}

impl fmt::Display for BoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundKind::Lower => write!(f, "lower_bound"),
            BoundKind::Upper => write!(f, "upper_bound"),
        }
    }
}

/// Binary search of query row `query_row` over `[0, table_rows)`.
///
/// Returns the count of table rows ordered before the query row (`Lower`), or
/// ordered at-or-before it (`Upper`).
#[inline]
pub(crate) fn search_row(
    comparator: &RowComparator<'_>,
    table_rows: usize,
    query_row: usize,
    kind: BoundKind,
) -> usize {
    let mut lo = 0;
    let mut hi = table_rows;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let ord = comparator.compare(mid, query_row);
        let before = match kind {
            BoundKind::Lower => ord == Ordering::Less,
            BoundKind::Upper => ord != Ordering::Greater,
        };
        if before {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Bound searches bound to a memory resource and dispatch configuration.
///
/// The sorted table must already be ordered by `column_order` and
/// `null_precedence`; this is assumed, never checked. Results are non-nullable
/// `UInt32Array`s with one insertion point per query row, in query-row order.
pub struct BoundSearcher<'m> {
    resource: &'m dyn MemoryResource,
    config: SearchConfig,
}

impl<'m> BoundSearcher<'m> {
    pub fn new(resource: &'m dyn MemoryResource) -> Self {
        Self {
            resource,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find, for every row of `values`, the first index of `t` where it could be
    /// inserted while keeping `t` sorted.
    pub fn lower_bound(
        &self,
        t: TableView<'_>,
        values: TableView<'_>,
        column_order: &[Order],
        null_precedence: &[NullOrder],
    ) -> Result<UInt32Array> {
        self.search(t, values, column_order, null_precedence, BoundKind::Lower)
    }

    /// Find, for every row of `values`, the last index of `t` where it could be
    /// inserted while keeping `t` sorted (one past the last equal row).
    pub fn upper_bound(
        &self,
        t: TableView<'_>,
        values: TableView<'_>,
        column_order: &[Order],
        null_precedence: &[NullOrder],
    ) -> Result<UInt32Array> {
        self.search(t, values, column_order, null_precedence, BoundKind::Upper)
    }

    pub fn search(
        &self,
        t: TableView<'_>,
        values: TableView<'_>,
        column_order: &[Order],
        null_precedence: &[NullOrder],
        kind: BoundKind,
    ) -> Result<UInt32Array> {
        let plan = plan_search(t, values, column_order, null_precedence)?;
        self.run(&plan, kind)
    }

    /// Both bounds of every query row; `upper - lower` is the number of table rows
    /// equal to that query row.
    pub fn equal_range(
        &self,
        t: TableView<'_>,
        values: TableView<'_>,
        column_order: &[Order],
        null_precedence: &[NullOrder],
    ) -> Result<(UInt32Array, UInt32Array)> {
        let plan = plan_search(t, values, column_order, null_precedence)?;
        let lower = self.run(&plan, BoundKind::Lower)?;
        let upper = self.run(&plan, BoundKind::Upper)?;
        Ok((lower, upper))
    }

    fn run(&self, plan: &SearchPlan<'_>, kind: BoundKind) -> Result<UInt32Array> {
        let parallel = self.config.should_parallelize(plan.query_rows);
        tracing::debug!(
            %kind,
            table_rows = plan.table_rows,
            query_rows = plan.query_rows,
            columns = plan.comparator.num_columns(),
            parallel,
            "dispatching bound search"
        );

        let started = Instant::now();
        let comparator = &plan.comparator;
        let table_rows = plan.table_rows;
        let out = materialize_indices(self.resource, &self.config, plan.query_rows, |row| {
            row_index(search_row(comparator, table_rows, row, kind))
        })?;
        tracing::trace!(%kind, elapsed = ?started.elapsed(), "bound search finished");
        Ok(out)
    }
}

/// Lower-bound insertion points of `values` in the sorted table `t`.
///
/// Uses [`SearchConfig::default`]; see [`BoundSearcher`] for a configurable
/// variant.
pub fn lower_bound(
    t: TableView<'_>,
    values: TableView<'_>,
    column_order: &[Order],
    null_precedence: &[NullOrder],
    resource: &dyn MemoryResource,
) -> Result<UInt32Array> {
    BoundSearcher::new(resource).lower_bound(t, values, column_order, null_precedence)
}

/// Upper-bound insertion points of `values` in the sorted table `t`.
pub fn upper_bound(
    t: TableView<'_>,
    values: TableView<'_>,
    column_order: &[Order],
    null_precedence: &[NullOrder],
    resource: &dyn MemoryResource,
) -> Result<UInt32Array> {
    BoundSearcher::new(resource).upper_bound(t, values, column_order, null_precedence)
}

/// Lower and upper bounds of `values` in the sorted table `t` from one validation.
pub fn equal_range(
    t: TableView<'_>,
    values: TableView<'_>,
    column_order: &[Order],
    null_precedence: &[NullOrder],
    resource: &dyn MemoryResource,
) -> Result<(UInt32Array, UInt32Array)> {
    BoundSearcher::new(resource).equal_range(t, values, column_order, null_precedence)
}
