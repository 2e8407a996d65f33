//! Ordered search over sorted Arrow tables.
//!
//! - [`lower_bound`] / [`upper_bound`] / [`equal_range`]: for every row of a query
//!   table, the insertion point(s) in a table already sorted by per-column
//!   [`Order`](tabseek_types::Order) and [`NullOrder`](tabseek_types::NullOrder).
//! - [`contains`]: whether a scalar occurs in a column.
//!
//! Inputs are validated on the caller's thread before any work is dispatched.
//! Each query row is then searched independently on rayon, and every result slot
//! is written by exactly one task into a buffer obtained from the caller's
//! [`MemoryResource`](tabseek_memory::MemoryResource).
//!
//! ```
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int32Array};
//! use tabseek_memory::DefaultMemoryResource;
//! use tabseek_search::{lower_bound, upper_bound};
//! use tabseek_types::{NullOrder, Order, TableView};
//!
//! let table: Vec<ArrayRef> = vec![Arc::new(Int32Array::from(vec![10, 20, 20, 30, 50]))];
//! let query: Vec<ArrayRef> = vec![Arc::new(Int32Array::from(vec![20]))];
//! let t = TableView::try_new(&table)?;
//! let v = TableView::try_new(&query)?;
//! let mr = DefaultMemoryResource;
//!
//! let lower = lower_bound(t, v, &[Order::Ascending], &[NullOrder::First], &mr)?;
//! let upper = upper_bound(t, v, &[Order::Ascending], &[NullOrder::First], &mr)?;
//! assert_eq!(lower.values().as_ref(), &[1]);
//! assert_eq!(upper.values().as_ref(), &[3]);
//! # Ok::<(), tabseek_result::Error>(())
//! ```

pub mod bounds;
pub mod config;
pub mod contains;
mod materialize;
mod validation;

pub use bounds::{BoundKind, BoundSearcher, equal_range, lower_bound, upper_bound};
pub use config::{MIN_PARALLEL_ROWS_ENV, MIN_ROWS_PER_TASK_ENV, SearchConfig};
pub use contains::{MembershipProbe, contains};
