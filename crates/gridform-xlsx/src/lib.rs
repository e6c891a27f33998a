//! # gridform-xlsx
//!
//! XLSX (Office Open XML) export for gridform.
//!
//! [`XlsxWriter`] encodes a [`gridform_core::Matrix`] as a single-sheet
//! workbook, [`ExportWriter`] places it in a destination directory under a
//! timestamped name, and [`XlsxReader`] reads an exported sheet back.

pub mod error;
pub mod export;
pub mod reader;
pub mod writer;

mod escape;

pub use error::{XlsxError, XlsxResult};
pub use export::{export_file_name, ExportWriter};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;

/// Name of the single sheet in every exported workbook
pub const SHEET_NAME: &str = "Sheet1";
