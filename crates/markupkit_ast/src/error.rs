//! Tree navigation errors.

use thiserror::Error;

/// Errors that can occur while navigating a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The requested index is outside the node's range.
    #[error("Index {index} is out of range for a node spanning {start}..{end}")]
    IndexOutOfRange {
        /// The requested absolute index.
        index: usize,
        /// Absolute start of the node searched.
        start: usize,
        /// Absolute end of the node searched.
        end: usize,
    },
}

impl TreeError {
    /// Creates an out-of-range error.
    pub fn out_of_range(index: usize, start: usize, end: usize) -> Self {
        Self::IndexOutOfRange { index, start, end }
    }
}
