//! # gridform-core
//!
//! Core data structures for the gridform data pipeline.
//!
//! This crate provides the fundamental types used throughout gridform:
//! - [`CellIndex`] - Row-major position of a cell in the fixed grid
//! - [`CellStore`] - The authoritative in-memory grid state for a session
//! - [`Matrix`] - A row/column view of the store used for export
//! - [`row_label`] and [`column_label`] - Header labels ("1", "A", ...)
//!
//! ## Example
//!
//! ```rust
//! use gridform_core::{CellIndex, CellStore};
//!
//! let mut store = CellStore::new();
//!
//! // Using the flat index
//! store.set(0, "Q1").unwrap();
//!
//! // Or an A1-style address
//! let index = CellIndex::parse("B3").unwrap();
//! store.set(index.get(), "total").unwrap();
//!
//! let matrix = store.to_matrix();
//! assert_eq!(matrix.get(0, 0), Some("Q1"));
//! assert_eq!(matrix.get(2, 1), Some("total"));
//! ```

pub mod error;
pub mod grid;
pub mod label;
pub mod matrix;

// Re-exports for convenience
pub use error::{Error, Result};
pub use grid::{CellIndex, CellStore};
pub use label::{column_label, letters_to_column, row_label};
pub use matrix::{to_matrix, Matrix};

/// Number of rows in the grid
pub const ROWS: usize = 10;

/// Number of columns in the grid
pub const COLS: usize = 5;

/// Total number of cells (`ROWS * COLS`)
pub const CELL_COUNT: usize = ROWS * COLS;
