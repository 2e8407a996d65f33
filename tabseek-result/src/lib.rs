//! Error types and result definitions for tabseek.
//!
//! Every fallible operation in the workspace returns [`Result<T>`], whose error
//! variant is the single [`Error`] enum. Crates do not define their own error
//! types; they propagate with `?` and construct variants through the helpers on
//! [`Error`].
//!
//! # Error Categories
//!
//! - **Shape errors** ([`Error::ArityMismatch`]): order or null-precedence vectors
//!   whose length disagrees with the column count, or tables with different
//!   column counts.
//! - **Type errors** ([`Error::TypeMismatch`]): columns (or a scalar and a column)
//!   whose Arrow `DataType`s differ.
//! - **User input errors** ([`Error::InvalidArgumentError`]): unsupported element
//!   types, ragged tables, tables too large to index.
//! - **Execution faults** ([`Error::ResourceExhausted`], [`Error::ExecutionFault`]):
//!   the output allocation was refused or a worker task failed.
//! - **Data format errors** ([`Error::Arrow`]): wrapped Arrow failures.
//! - **Internal errors** ([`Error::Internal`]): bugs or unexpected states.
//!
//! Validation errors are always raised before any parallel work is launched, and no
//! error ever comes with a partial result.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
