//! Shared vocabulary for ordered search.
//!
//! - [`Order`] and [`NullOrder`] describe how each column of a sorted table is
//!   ordered; [`SortKey`] pairs them and converts to and from Arrow's
//!   [`SortOptions`](arrow::compute::SortOptions).
//! - [`TableView`] borrows a group of equal-length Arrow columns as a table.
//! - [`RowIndex`] is the element type of every insertion-point result.

pub mod ids;
pub mod order;
pub mod table;

pub use ids::*;
pub use order::*;
pub use table::*;
