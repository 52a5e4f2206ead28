/// One reclaimable file or directory discovered by a category scan.
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileInfo {
    /// Full path of the entry.
    pub path: String,
    /// Logical size in bytes. For directories this is the sum of every
    /// file below it.
    pub size: u64,
    /// Final path component only.
    pub name: CompactString,
    /// Category tag of the scan that produced this entry.
    pub location: CompactString,
    /// `true` if the entry lies under a location that is inaccessible
    /// without elevation.
    pub needs_elevation: bool,
}
