/// Scan configuration supplied by the caller.
///
/// Nothing here is loaded from disk; the caller builds a `ScanConfig`
/// (usually `ScanConfig::default()`) and hands it to the aggregator.
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on concurrent category workers, regardless of core count.
///
/// Scans are I/O-bound; more workers than this mostly adds seek contention.
pub const MAX_SCAN_WORKERS: usize = 4;

/// Default per-location listing timeout.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Entries modified more recently than this are assumed to be in use.
pub const DEFAULT_MIN_ENTRY_AGE: Duration = Duration::from_secs(60);

/// Path fragments that are never offered for cleanup.
pub const CRITICAL_PATTERNS: &[&str] = &[
    "System Volume Information",
    "$Recycle.Bin",
    "pagefile.sys",
    "hiberfil.sys",
    "swapfile.sys",
    "/proc",
    "/sys",
    "/dev",
    "/boot",
];

/// System-owned roots that require elevation by policy.
#[cfg(windows)]
pub const PROTECTED_PREFIXES: &[&str] = &["C:\\Windows"];

/// System-owned roots that require elevation by policy.
#[cfg(not(windows))]
pub const PROTECTED_PREFIXES: &[&str] = &["/var", "/etc", "/usr", "/opt", "/private/var"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum number of categories scanned at once.
    pub max_workers: usize,
    /// Bound on a single location listing; a slower location is reported
    /// as timed out and the rest of its category still completes.
    pub location_timeout: Duration,
    /// Skip entries whose modification time is younger than this.
    pub min_entry_age: Duration,
    /// Locations under these prefixes are treated as inaccessible while the
    /// process is not elevated. Matching is case-insensitive on Windows.
    pub protected_prefixes: Vec<String>,
    /// Entries matching any of these are never listed. Rooted patterns match
    /// as path prefixes, the rest as a single path component.
    pub critical_patterns: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_workers: num_cpus::get().clamp(1, MAX_SCAN_WORKERS),
            location_timeout: DEFAULT_LOCATION_TIMEOUT,
            min_entry_age: DEFAULT_MIN_ENTRY_AGE,
            protected_prefixes: PROTECTED_PREFIXES.iter().map(|s| s.to_string()).collect(),
            critical_patterns: CRITICAL_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanConfig {
    /// Number of pool threads to use for `category_count` categories.
    ///
    /// Never zero, never more than there are categories to scan.
    pub fn worker_count(&self, category_count: usize) -> usize {
        self.max_workers.max(1).min(category_count.max(1))
    }
}
