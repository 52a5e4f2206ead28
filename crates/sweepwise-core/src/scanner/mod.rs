/// Scanner module: per-category enumeration of reclaimable entries.
///
/// A [`CategoryScanner`] walks the locations of one category in order,
/// asks the [`EntryLister`] for their entries, and turns each into a
/// [`FileInfo`] tagged with the category name and an elevation flag taken
/// from the shared [`PermissionStatus`].
///
/// Every listing runs on a helper thread bounded by the configured
/// per-location timeout, so one unresponsive mount cannot stall the whole
/// category. Failures become [`ScanWarning`]s; the category always returns
/// whatever it could read.
pub mod warning;

pub use warning::ScanWarning;

use crate::model::{FileInfo, PermissionStatus};
use crate::platform::{EntryLister, RawEntry};
use crate::{CoreError, Result};
use compact_str::CompactString;
use crossbeam_channel::RecvTimeoutError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// A named group of locations scanned together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategorySpec {
    pub name: String,
    pub locations: Vec<PathBuf>,
}

impl CategorySpec {
    pub fn new(name: impl Into<String>, locations: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            name: name.into(),
            locations: locations.into_iter().collect(),
        }
    }
}

/// Output of one category scan, owned exclusively by the worker that
/// produced it until handed to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScan {
    pub category: String,
    pub files: Vec<FileInfo>,
    pub warnings: Vec<ScanWarning>,
}

#[derive(Clone)]
pub struct CategoryScanner {
    lister: Arc<dyn EntryLister>,
    location_timeout: Duration,
}

impl CategoryScanner {
    /// A zero `location_timeout` disables the bound and lists inline.
    pub fn new(lister: Arc<dyn EntryLister>, location_timeout: Duration) -> Self {
        Self {
            lister,
            location_timeout,
        }
    }

    /// Scan every location of `spec`.
    ///
    /// `claimed` holds every location of the scan plan, this category's
    /// included. An entry that is itself a claimed location is left to that
    /// location's listing. An entry that contains a claimed location is
    /// descended into instead of being sized whole, so the bytes beside the
    /// nested location still count here and the nested ones are counted once.
    pub fn scan(
        &self,
        spec: &CategorySpec,
        permissions: &PermissionStatus,
        claimed: &[PathBuf],
    ) -> CategoryScan {
        let mut files = Vec::new();
        let mut warnings = Vec::new();

        for location in &spec.locations {
            self.collect(
                spec,
                location,
                permissions,
                claimed,
                &mut files,
                &mut warnings,
            );
        }

        debug!(
            "[{}] {} entries, {} warnings",
            spec.name,
            files.len(),
            warnings.len()
        );

        CategoryScan {
            category: spec.name.clone(),
            files,
            warnings,
        }
    }

    fn collect(
        &self,
        spec: &CategorySpec,
        location: &Path,
        permissions: &PermissionStatus,
        claimed: &[PathBuf],
        files: &mut Vec<FileInfo>,
        warnings: &mut Vec<ScanWarning>,
    ) {
        let entries = match self.list_location(location) {
            Ok(entries) => entries,
            Err(CoreError::ListingTimedOut { path, timeout }) => {
                warnings.push(ScanWarning::LocationTimedOut {
                    category: spec.name.clone(),
                    path: path.to_string_lossy().into_owned(),
                    timeout_ms: timeout.as_millis() as u64,
                });
                return;
            }
            Err(err) => {
                warnings.push(ScanWarning::LocationFailed {
                    category: spec.name.clone(),
                    path: location.to_string_lossy().into_owned(),
                    message: err.to_string(),
                });
                return;
            }
        };

        for entry in entries {
            if claimed.iter().any(|c| *c == entry.path) {
                debug!(
                    "[{}] {} is a location of its own, skipping",
                    spec.name,
                    entry.path.display()
                );
                continue;
            }
            if claimed.iter().any(|c| c.starts_with(&entry.path)) {
                self.collect(spec, &entry.path, permissions, claimed, files, warnings);
                continue;
            }

            let size = match entry.size {
                Ok(size) => size,
                Err(message) => {
                    warnings.push(ScanWarning::UnreadableEntry {
                        category: spec.name.clone(),
                        path: entry.path.to_string_lossy().into_owned(),
                        message,
                    });
                    continue;
                }
            };

            files.push(FileInfo {
                needs_elevation: permissions.covers(&entry.path),
                path: entry.path.to_string_lossy().into_owned(),
                size,
                name: CompactString::new(&entry.name),
                location: CompactString::new(&spec.name),
            });
        }
    }

    /// List one location on a helper thread, giving up after the timeout.
    ///
    /// A timed-out helper is abandoned, not killed; it finishes in the
    /// background and its result is dropped.
    fn list_location(&self, location: &Path) -> Result<Vec<RawEntry>> {
        if self.location_timeout.is_zero() {
            return self.lister.list(location);
        }

        let (tx, rx) = crossbeam_channel::bounded::<Result<Vec<RawEntry>>>(1);
        let lister = Arc::clone(&self.lister);
        let path = location.to_path_buf();

        thread::Builder::new()
            .name("sweepwise-lister".to_owned())
            .spawn(move || {
                let _ = tx.send(lister.list(&path));
            })?;

        match rx.recv_timeout(self.location_timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(CoreError::ListingTimedOut {
                path: location.to_path_buf(),
                timeout: self.location_timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(CoreError::ListingFailed {
                path: location.to_path_buf(),
                message: "lister thread exited without a result".to_owned(),
            }),
        }
    }
}
