//! Error types for gridform-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridform-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Flat cell index outside `[0, CELL_COUNT)`
    #[error("Cell index {index} out of range (cell count: {count})")]
    OutOfRange { index: i64, count: usize },

    /// Row index outside the grid
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(usize, usize),

    /// Column index outside the grid
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(usize, usize),

    /// Invalid A1-style cell address
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// A value sequence did not have exactly one entry per cell
    #[error("Expected {expected} cell values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl Error {
    pub(crate) fn out_of_range(index: i64) -> Self {
        Error::OutOfRange {
            index,
            count: crate::CELL_COUNT,
        }
    }
}
