/// Permission snapshot computed once per scan pass.
///
/// Shared read-only by every category scan in the pass; never mutated
/// after the evaluator returns it.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionStatus {
    pub is_elevated: bool,
    pub requires_elevation: bool,
    /// Configured locations that failed the access probe or sit under a
    /// protected prefix. Sorted, so serialisation is deterministic.
    pub unaccessible_paths: BTreeSet<String>,
    /// Platform instruction for relaunching elevated. Empty unless
    /// `requires_elevation` is set.
    pub elevation_command: String,
    pub can_clean_user_files: bool,
    pub can_clean_system_files: bool,
}

impl PermissionStatus {
    /// Whether `path` equals, or is nested under, any unaccessible location.
    ///
    /// Matching is component-wise, so `/var/tmpfoo` is not under `/var/tmp`.
    pub fn covers(&self, path: &Path) -> bool {
        self.unaccessible_paths
            .iter()
            .any(|blocked| path.starts_with(Path::new(blocked)))
    }
}
