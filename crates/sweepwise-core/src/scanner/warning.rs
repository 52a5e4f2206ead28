/// Non-fatal scan problems, surfaced alongside the result.
///
/// A warning never aborts a scan: the affected entry or location is left
/// out and everything else in the category is still reported.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Kind", rename_all_fields = "PascalCase")]
pub enum ScanWarning {
    /// A location could not be listed at all.
    LocationFailed {
        category: String,
        path: String,
        message: String,
    },
    /// A location listing exceeded the per-location timeout.
    LocationTimedOut {
        category: String,
        path: String,
        timeout_ms: u64,
    },
    /// An entry was listed but its size could not be read.
    UnreadableEntry {
        category: String,
        path: String,
        message: String,
    },
}

impl ScanWarning {
    pub fn category(&self) -> &str {
        match self {
            Self::LocationFailed { category, .. }
            | Self::LocationTimedOut { category, .. }
            | Self::UnreadableEntry { category, .. } => category,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::LocationFailed { path, .. }
            | Self::LocationTimedOut { path, .. }
            | Self::UnreadableEntry { path, .. } => path,
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocationFailed {
                category,
                path,
                message,
            } => write!(f, "[{category}] cannot list {path}: {message}"),
            Self::LocationTimedOut {
                category,
                path,
                timeout_ms,
            } => write!(f, "[{category}] listing {path} timed out after {timeout_ms} ms"),
            Self::UnreadableEntry {
                category,
                path,
                message,
            } => write!(f, "[{category}] size unreadable for {path}: {message}"),
        }
    }
}
