//! Error types shared by the growable array and both map variants

use thiserror::Error;

/// Errors raised by [`GrowableArray`](crate::GrowableArray) accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// `pop` was called on an empty array
    #[error("cannot pop from an empty array")]
    Underflow,
    /// An index outside `[0, length)` was used
    #[error("index {index} is out of bounds for array of length {length}")]
    IndexOutOfBounds {
        /// The offending index
        index: usize,
        /// The array length at the time of the access
        length: usize,
    },
}

/// Errors raised when a map rejects a `resize_table` target.
///
/// A rejected resize leaves the table exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResizeError {
    /// The open-addressing table cannot hold its live entries at the requested capacity
    #[error("cannot resize to capacity {requested}: the table holds {size} entries")]
    BelowSize {
        /// The capacity passed to `resize_table`
        requested: usize,
        /// The number of live entries at the time of the call
        size: usize,
    },
    /// A chaining table needs at least one bucket
    #[error("cannot resize a chaining table to zero buckets")]
    ZeroCapacity,
}
