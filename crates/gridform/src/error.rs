//! Error types for the gridform facade

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`crate::Session`] and [`crate::Config`]
#[derive(Debug, Error)]
pub enum Error {
    /// Grid error (bad index or address)
    #[error(transparent)]
    Core(#[from] gridform_core::Error),

    /// Persistence error
    #[error(transparent)]
    Store(#[from] gridform_store::StoreError),

    /// Export error
    #[error(transparent)]
    Xlsx(#[from] gridform_xlsx::XlsxError),

    /// The config file could not be read
    #[error("Failed to read config '{}': {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::Config`]
    #[error("Invalid config '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A background task panicked or was aborted
    #[error("Background task failed: {0}")]
    Task(String),
}
