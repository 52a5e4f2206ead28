/// Error type shared by every core operation.
///
/// Per-path and per-location failures never surface here: they are recovered
/// locally and reported as [`crate::scanner::ScanWarning`]s. Only conditions
/// that make a whole operation meaningless become a `CoreError`.
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    /// The host offers no usable way to determine the process privilege level.
    #[error("privilege check unavailable: {0}")]
    PrivilegeCheckUnavailable(String),

    #[error("failed to list {path}: {message}")]
    ListingFailed { path: PathBuf, message: String },

    #[error("listing {path} timed out after {timeout:?}")]
    ListingTimedOut { path: PathBuf, timeout: Duration },

    #[error("metric sampling failed: {0}")]
    Metrics(String),

    #[error("failed to build scan worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
