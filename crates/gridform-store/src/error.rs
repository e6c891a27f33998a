//! Store error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while loading or saving the grid
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the slot failed
    #[error("Failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the slot failed
    #[error("Failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored record is not a valid grid
    #[error("Stored record is corrupt: {0}")]
    Corrupt(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be used as a slot name
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

impl StoreError {
    /// Whether this error happened while reading a saved grid
    pub fn is_read_error(&self) -> bool {
        matches!(
            self,
            StoreError::Read { .. } | StoreError::Corrupt(_) | StoreError::Json(_)
        )
    }
}
