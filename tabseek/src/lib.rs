//! tabseek: ordered search over sorted Arrow tables
//!
//! This crate is the entrypoint of the tabseek workspace. It re-exports the
//! search functions and the types needed to call them from the underlying
//! `tabseek-*` crates.
//!
//! # Quick Start
//!
//! Find where query rows would be inserted into a table sorted by a descending
//! integer column with nulls last:
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int32Array};
//! use tabseek::{DefaultMemoryResource, NullOrder, Order, TableView, equal_range};
//!
//! let sorted: Vec<ArrayRef> = vec![Arc::new(Int32Array::from(vec![
//!     Some(9),
//!     Some(4),
//!     Some(4),
//!     None,
//! ]))];
//! let query: Vec<ArrayRef> = vec![Arc::new(Int32Array::from(vec![Some(4), None]))];
//!
//! let (lower, upper) = equal_range(
//!     TableView::try_new(&sorted).unwrap(),
//!     TableView::try_new(&query).unwrap(),
//!     &[Order::Descending],
//!     &[NullOrder::Last],
//!     &DefaultMemoryResource,
//! )
//! .unwrap();
//! assert_eq!(lower.values().as_ref(), &[1, 3]);
//! assert_eq!(upper.values().as_ref(), &[3, 4]);
//! ```
//!
//! # Architecture
//!
//! - **Types** (`tabseek-types`): `Order`, `NullOrder`, `SortKey`, `TableView`.
//! - **Comparison** (`tabseek-compute`): per-column comparators resolved once per
//!   call and the lexicographic `RowComparator`.
//! - **Search** (`tabseek-search`): parallel bound searches and membership.
//! - **Memory** (`tabseek-memory`): the `MemoryResource` allocator seam.
//! - **Errors** (`tabseek-result`): the shared `Error` enum.

pub use tabseek_search::{
    BoundKind, BoundSearcher, MIN_PARALLEL_ROWS_ENV, MIN_ROWS_PER_TASK_ENV, MembershipProbe,
    SearchConfig, contains, equal_range, lower_bound, upper_bound,
};

pub use tabseek_types::{NullOrder, Order, RowIndex, SortKey, TableView, sort_keys};

pub use tabseek_compute::{DynComparator, RowComparator};

pub mod memory {
    //! Allocators for search output buffers.
    //!
    //! Every bound search draws its result from a caller-supplied
    //! [`MemoryResource`]; the wrappers here add accounting and limits.

    pub use tabseek_memory::{
        AllocStats, CappedMemoryResource, DefaultMemoryResource, InstrumentedMemoryResource,
        MemoryResource, allocate_typed,
    };
}

pub use memory::{DefaultMemoryResource, MemoryResource};

// Re-export result types for error handling
pub use tabseek_result::{Error, Result};
