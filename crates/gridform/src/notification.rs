//! User-facing export notifications

use std::fmt;
use std::path::PathBuf;

/// Outcome of an export, phrased for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The file was written
    Success { path: PathBuf },
    /// The export failed; `reason` is for logs, not the user
    Failure { reason: String },
}

impl Notification {
    /// Short title
    pub fn title(&self) -> &'static str {
        match self {
            Notification::Success { .. } => "Success",
            Notification::Failure { .. } => "Error",
        }
    }

    /// Message naming the general download location, not the exact path
    pub fn message(&self) -> &'static str {
        match self {
            Notification::Success { .. } => "File downloaded successfully, check your downloads.",
            Notification::Failure { .. } => "File download failed.",
        }
    }

    /// Whether the export succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Notification::Success { .. })
    }

    /// Path of the exported file on success
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Notification::Success { path } => Some(path),
            Notification::Failure { .. } => None,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}
