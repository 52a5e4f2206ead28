/// The aggregated snapshot returned by one scan pass.
use super::{FileInfo, PermissionStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Files grouped by category, the reclaimable total, and the permission
/// snapshot the scan ran under.
///
/// Every configured category has a key, even when it yielded no files.
/// Keys are kept sorted for deterministic serialisation only; callers pick
/// their own display order (see [`CleanerResult::categories_by_size`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CleanerResult {
    pub files: BTreeMap<String, Vec<FileInfo>>,
    pub total_size: u64,
    pub permissions: PermissionStatus,
}

impl CleanerResult {
    /// Build a result, deriving `total_size` from `files`.
    pub fn new(files: BTreeMap<String, Vec<FileInfo>>, permissions: PermissionStatus) -> Self {
        let total_size = sum_sizes(&files);
        Self {
            files,
            total_size,
            permissions,
        }
    }

    /// Number of entries across all categories.
    pub fn file_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Sum of entry sizes within one category; `0` for unknown categories.
    pub fn category_size(&self, category: &str) -> u64 {
        self.files
            .get(category)
            .map(|files| files.iter().map(|f| f.size).sum())
            .unwrap_or(0)
    }

    /// `true` if `total_size` matches the sum of every entry size.
    ///
    /// Always true for results built with [`CleanerResult::new`]; useful for
    /// results that arrived over the wire.
    pub fn is_consistent(&self) -> bool {
        self.total_size == sum_sizes(&self.files)
    }

    /// Category names ordered by reclaimable size, largest first, ties by name.
    pub fn categories_by_size(&self) -> Vec<(&str, u64)> {
        let mut out: Vec<(&str, u64)> = self
            .files
            .keys()
            .map(|name| (name.as_str(), self.category_size(name)))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }

    /// Iterate every entry that can be reclaimed without elevation.
    pub fn user_cleanable(&self) -> impl Iterator<Item = &FileInfo> {
        self.files
            .values()
            .flatten()
            .filter(|f| !f.needs_elevation)
    }
}

fn sum_sizes(files: &BTreeMap<String, Vec<FileInfo>>) -> u64 {
    files.values().flatten().map(|f| f.size).sum()
}
