/// Sweepwise Core: cleanup planning, permission evaluation, and health scoring.
///
/// This crate contains all business logic with zero UI dependencies.
/// It never deletes anything: a scan only reports what could be reclaimed
/// and which permission barriers apply.
///
/// # Modules
///
/// - [`model`]: Wire types (`FileInfo`, `PermissionStatus`, `CleanerResult`, metric samples).
/// - [`evaluator`]: Privilege and per-location accessibility evaluation.
/// - [`scanner`]: Per-category enumeration and elevation tagging.
/// - [`aggregate`]: Bounded parallel scan of all categories into one result.
/// - [`health`]: Battery / disk / memory health score.
/// - [`monitor`]: CPU and memory samples, latest-only cache.
/// - [`platform`]: Collaborator traits and their native implementations.
/// - [`report`]: CSV export of a finished scan.
pub mod aggregate;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod health;
pub mod model;
pub mod monitor;
pub mod platform;
pub mod report;
pub mod scanner;

pub use config::ScanConfig;
pub use error::{CoreError, Result};
