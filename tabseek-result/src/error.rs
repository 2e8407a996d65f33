use std::fmt;

use arrow::datatypes::DataType;
use thiserror::Error;

/// Unified error type for all tabseek operations.
///
/// # Error Handling Strategy
///
/// Errors propagate upward through the call stack using Rust's `?` operator. Input
/// validation happens before any search is dispatched, so the shape and type
/// variants are always raised on the caller's thread with nothing left half-done.
///
/// # Thread Safety
///
/// `Error` implements `Send` and `Sync`, so worker tasks can hand failures back to
/// the dispatching thread.
#[derive(Error, Debug)]
pub enum Error {
    /// Arrow library error during columnar data operations.
    ///
    /// Typically raised while assembling the output array or while converting
    /// between Arrow buffer types.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Invalid user input or API parameter.
    ///
    /// This error indicates a problem with the arguments themselves:
    /// - Unsupported column element types (nested, dictionary, interval)
    /// - Columns of different lengths grouped into one table
    /// - Tables whose row count cannot be represented as an output index
    ///
    /// # Recovery
    ///
    /// Fix the input and retry the operation.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// A per-column vector or a table has the wrong number of entries.
    ///
    /// Raised when `column_order` or `null_precedence` do not have one entry per
    /// column, or when the sorted table and the query table have different column
    /// counts.
    #[error("{what} has {actual} entries but {expected} were expected")]
    ArityMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Two values that must share an element type do not.
    ///
    /// `context` names the position that was checked, e.g. `column 2` or `scalar`.
    #[error("type mismatch for {context}: expected {expected}, found {actual}")]
    TypeMismatch {
        context: String,
        expected: DataType,
        actual: DataType,
    },

    /// The memory resource refused to provide the requested buffer.
    ///
    /// The call is aborted and no partial result is produced.
    #[error("memory resource exhausted: requested {requested} bytes, limit is {limit} bytes")]
    ResourceExhausted { requested: usize, limit: usize },

    /// An unrecoverable failure while executing parallel work.
    ///
    /// Raised when a worker task panics or the allocator fails for a reason other
    /// than a configured limit. The entire call is aborted.
    #[error("execution fault: {0}")]
    ExecutionFault(String),

    /// Internal error indicating a bug or unexpected state.
    ///
    /// This error should never occur during normal operation. If you encounter it,
    /// it likely indicates a bug that should be reported with reproduction steps.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an arity mismatch error for the named vector or table.
    #[inline]
    pub fn arity_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Error::ArityMismatch {
            what,
            expected,
            actual,
        }
    }

    /// Create a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```
    /// use arrow::datatypes::DataType;
    /// use tabseek_result::Error;
    ///
    /// let err = Error::type_mismatch("column 0", &DataType::Int32, &DataType::Utf8);
    /// assert_eq!(
    ///     err.to_string(),
    ///     "type mismatch for column 0: expected Int32, found Utf8"
    /// );
    /// ```
    #[inline]
    pub fn type_mismatch(
        context: impl Into<String>,
        expected: &DataType,
        actual: &DataType,
    ) -> Self {
        Error::TypeMismatch {
            context: context.into(),
            expected: expected.clone(),
            actual: actual.clone(),
        }
    }

    /// Create an invalid argument error for an element type the engine cannot order.
    #[inline]
    pub fn unsupported_type(data_type: &DataType) -> Self {
        Error::InvalidArgumentError(format!(
            "ordered search does not support columns of type {data_type}"
        ))
    }

    /// Create an execution fault from any displayable error.
    #[inline]
    pub fn execution_fault<E: fmt::Display>(err: E) -> Self {
        Error::ExecutionFault(err.to_string())
    }

    /// Whether this error was raised by input validation rather than execution.
    #[inline]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::ArityMismatch { .. }
                | Error::TypeMismatch { .. }
                | Error::InvalidArgumentError(_)
        )
    }
}
