//! # gridform
//!
//! A fixed 10x5 grid of text cells with local persistence and XLSX export.
//!
//! ## Features
//!
//! - Edits are saved in the background to a single durable slot
//! - Saved records are plain JSON strings and are never evaluated
//! - The grid exports as a single-sheet XLSX file named after the current time
//!
//! ## Example
//!
//! ```rust,no_run
//! use gridform::prelude::*;
//!
//! # async fn run() -> gridform::Result<()> {
//! let config = Config::load(None)?;
//! let mut session = Session::from_config(&config).await;
//!
//! // Edit a cell; the save runs in the background
//! session.set_address("A1", "Q1")?.wait().await;
//!
//! // Export and tell the user how it went
//! let notification = session.export().await;
//! println!("{}", notification);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod notification;
pub mod prelude;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use notification::Notification;
pub use session::{SaveHandle, Session};

// Re-export core types
pub use gridform_core::{
    column_label, row_label, to_matrix, CellIndex, CellStore, Matrix, CELL_COUNT, COLS, ROWS,
};

// Re-export persistence and export types
pub use gridform_store::{
    FileStore, KeyValueStore, MemoryStore, PersistenceAdapter, StoreError, STORAGE_KEY,
};
pub use gridform_xlsx::{ExportWriter, XlsxError, XlsxReader, XlsxWriter, SHEET_NAME};
