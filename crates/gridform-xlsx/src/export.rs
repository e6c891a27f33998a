//! Exporting the matrix to a timestamped file

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use gridform_core::Matrix;

use crate::error::{XlsxError, XlsxResult};
use crate::writer::XlsxWriter;

/// Highest numeric suffix tried before giving up on a name collision
const MAX_COLLISION_SUFFIX: u32 = 999;

/// File name for an export taken at `at`
///
/// The timestamp is the ISO-8601 UTC date-time with every separator removed,
/// down to milliseconds: `data_YYYYMMDDHHmmssSSS.xlsx`.
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("data_{}.xlsx", at.format("%Y%m%d%H%M%S%3f"))
}

/// Writes exported workbooks into a destination directory
#[derive(Debug, Clone)]
pub struct ExportWriter {
    dir: PathBuf,
}

impl ExportWriter {
    /// Create a writer targeting `dir`
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Destination directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Export the matrix under a name derived from the current time
    ///
    /// Returns the absolute path of the new file.
    pub fn write(&self, matrix: &Matrix) -> XlsxResult<PathBuf> {
        self.write_at(matrix, Utc::now())
    }

    /// Export the matrix under a name derived from `at`
    ///
    /// The workbook is encoded fully before anything touches the
    /// destination. The file is created with create-new semantics; when the
    /// name is already taken a `_1`, `_2`, ... suffix is added, so an export
    /// never replaces an earlier one.
    pub fn write_at(&self, matrix: &Matrix, at: DateTime<Utc>) -> XlsxResult<PathBuf> {
        let bytes = XlsxWriter::to_bytes(matrix).map_err(|e| XlsxError::Encode(e.to_string()))?;

        let dir = self.dir.canonicalize().map_err(|source| XlsxError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let file_name = export_file_name(at);
        let stem = file_name.trim_end_matches(".xlsx");

        for suffix in 0..=MAX_COLLISION_SUFFIX {
            let path = if suffix == 0 {
                dir.join(&file_name)
            } else {
                dir.join(format!("{}_{}.xlsx", stem, suffix))
            };

            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    log::debug!("{} already exists, trying next name", path.display());
                    continue;
                }
                Err(source) => return Err(XlsxError::Write { path, source }),
            };

            if let Err(source) = file.write_all(&bytes).and_then(|()| file.sync_all()) {
                drop(file);
                if let Err(e) = fs::remove_file(&path) {
                    log::warn!("Could not remove partial export {}: {}", path.display(), e);
                }
                return Err(XlsxError::Write { path, source });
            }

            log::info!("File saved successfully: {}", path.display());
            return Ok(path);
        }

        Err(XlsxError::Write {
            path: dir.join(file_name),
            source: std::io::Error::new(
                ErrorKind::AlreadyExists,
                "no free export file name left for this timestamp",
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_file_name_is_digits_only() {
        let at = Utc
            .with_ymd_and_hms(2023, 5, 1, 12, 34, 56)
            .unwrap()
            .with_nanosecond(789_000_000)
            .unwrap();
        assert_eq!(export_file_name(at), "data_20230501123456789.xlsx");

        let name = export_file_name(Utc::now());
        let digits = name
            .strip_prefix("data_")
            .and_then(|s| s.strip_suffix(".xlsx"))
            .unwrap();
        assert_eq!(digits.len(), 17);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }
}
