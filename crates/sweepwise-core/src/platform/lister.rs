/// Native location lister: the top-level entries of a cleanup location.
///
/// Each direct child of the location becomes one candidate. Directories are
/// sized by a recursive `jwalk` walk so a cache folder shows up as a single
/// entry carrying everything beneath it.
///
/// Entries are skipped when they match a critical pattern, or when they were
/// modified within `min_entry_age` (likely still in use). Results are sorted
/// by path so repeated scans list in the same order.
use super::{EntryLister, RawEntry};
use crate::config::ScanConfig;
use crate::{CoreError, Result};
use std::io::ErrorKind;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct NativeLister {
    min_entry_age: Duration,
    critical_patterns: Vec<String>,
}

impl NativeLister {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            min_entry_age: config.min_entry_age,
            critical_patterns: config.critical_patterns.clone(),
        }
    }

    /// Absolute patterns (`/proc`) match as path prefixes; anything else
    /// matches a single path component by name.
    fn is_critical(&self, path: &Path) -> bool {
        self.critical_patterns.iter().any(|pattern| {
            let pattern = Path::new(pattern);
            if pattern.has_root() {
                path.starts_with(pattern)
            } else {
                path.iter().any(|c| Path::new(c) == pattern)
            }
        })
    }

    /// A modification time in the future counts as recent.
    fn is_recent(&self, modified: Option<SystemTime>, now: SystemTime) -> bool {
        if self.min_entry_age.is_zero() {
            return false;
        }
        match modified {
            Some(m) => match now.duration_since(m) {
                Ok(age) => age < self.min_entry_age,
                Err(_) => true,
            },
            None => false,
        }
    }
}

impl EntryLister for NativeLister {
    fn list(&self, location: &Path) -> Result<Vec<RawEntry>> {
        let read = match std::fs::read_dir(location) {
            Ok(r) => r,
            // An absent cache directory simply has nothing to reclaim.
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Location {} does not exist, nothing to list", location.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(CoreError::ListingFailed {
                    path: location.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        let now = SystemTime::now();
        let mut entries = Vec::new();

        for dirent in read {
            let dirent = match dirent {
                Ok(d) => d,
                Err(e) => {
                    debug!("Skipping unreadable entry in {}: {e}", location.display());
                    continue;
                }
            };
            let path = dirent.path();
            if self.is_critical(&path) {
                continue;
            }
            let name = dirent.file_name().to_string_lossy().into_owned();

            let meta = match std::fs::symlink_metadata(&path) {
                Ok(m) => m,
                Err(e) => {
                    entries.push(RawEntry {
                        path,
                        name,
                        size: Err(e.to_string()),
                    });
                    continue;
                }
            };

            if self.is_recent(meta.modified().ok(), now) {
                continue;
            }

            let size = if meta.is_dir() {
                dir_size(&path)
            } else {
                meta.len()
            };
            entries.push(RawEntry {
                path,
                name,
                size: Ok(size),
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}

/// Total size of every file below `root`. Unreadable descendants count as 0.
fn dir_size(root: &Path) -> u64 {
    // Serial: this already runs on a category worker thread.
    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::Serial);

    let mut total: u64 = 0;
    for entry in walker.into_iter().flatten() {
        if entry.file_type().is_dir() {
            continue;
        }
        if let Ok(meta) = std::fs::symlink_metadata(entry.path()) {
            total += meta.len();
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_bytes(path: &Path, n: usize) {
        let mut f = fs::File::create(path).unwrap();
        f.write_all(&vec![0u8; n]).unwrap();
    }

    /// Lister with no age filter so freshly written test files are listed.
    fn lister() -> NativeLister {
        NativeLister::new(&ScanConfig {
            min_entry_age: Duration::ZERO,
            ..ScanConfig::default()
        })
    }

    #[test]
    fn lists_top_level_entries_sorted() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("b.log"), 20);
        write_bytes(&tmp.path().join("a.log"), 10);

        let entries = lister().list(tmp.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.log", "b.log"]);
        assert_eq!(entries[0].size, Ok(10));
        assert_eq!(entries[1].size, Ok(20));
    }

    #[test]
    fn directory_entry_carries_recursive_size() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("bundle").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        write_bytes(&tmp.path().join("bundle").join("x.bin"), 300);
        write_bytes(&nested.join("y.bin"), 700);

        let entries = lister().list(tmp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "bundle");
        assert_eq!(entries[0].size, Ok(1_000));
    }

    #[test]
    fn missing_location_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        let entries = lister().list(&tmp.path().join("absent")).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn file_as_location_is_a_listing_failure() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        write_bytes(&file, 1);
        assert!(matches!(
            lister().list(&file),
            Err(CoreError::ListingFailed { .. })
        ));
    }

    /// With the default one-minute age filter, files written just now are
    /// considered in use and skipped.
    #[test]
    fn recently_modified_entries_are_skipped() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("fresh.tmp"), 10);

        let strict = NativeLister::new(&ScanConfig::default());
        assert!(strict.list(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn critical_patterns_are_never_listed() {
        let tmp = TempDir::new().unwrap();
        write_bytes(&tmp.path().join("pagefile.sys"), 10);
        write_bytes(&tmp.path().join("ok.tmp"), 10);

        let entries = lister().list(tmp.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "ok.tmp");
    }

    /// `/sys` guards the system root, not any folder that happens to be
    /// called `sys`.
    #[test]
    fn rooted_patterns_match_only_as_prefixes() {
        let tmp = TempDir::new().unwrap();
        let sys = tmp.path().join("sys");
        fs::create_dir_all(&sys).unwrap();
        write_bytes(&sys.join("c.tmp"), 10);

        let l = lister();
        assert!(l.is_critical(Path::new("/sys/kernel")));
        assert!(!l.is_critical(&sys.join("c.tmp")));
        assert_eq!(l.list(&sys).unwrap().len(), 1);
    }
}
