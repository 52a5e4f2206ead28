/// Permission evaluation: one snapshot per scan pass.
///
/// Determines whether the process is elevated and which configured
/// locations are out of reach without elevation. A location is out of
/// reach when its access probe is denied (or the probe itself fails), or
/// when it sits under a protected system prefix and the process is not
/// elevated. Missing locations are ignored.
///
/// Evaluation is read-only and deterministic: the same filesystem and
/// privilege state always produce the same snapshot.
use crate::config::ScanConfig;
use crate::model::PermissionStatus;
use crate::platform::{Access, AccessProbe, PrivilegeProbe};
use crate::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct PermissionEvaluator {
    privilege: Arc<dyn PrivilegeProbe>,
    access: Arc<dyn AccessProbe>,
    protected_prefixes: Vec<String>,
}

impl PermissionEvaluator {
    pub fn new(
        privilege: Arc<dyn PrivilegeProbe>,
        access: Arc<dyn AccessProbe>,
        config: &ScanConfig,
    ) -> Self {
        Self {
            privilege,
            access,
            protected_prefixes: config.protected_prefixes.clone(),
        }
    }

    /// Build the permission snapshot for `configured` locations.
    ///
    /// Fails only when the privilege level cannot be determined at all.
    pub fn evaluate<'a, I>(&self, configured: I) -> Result<PermissionStatus>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let is_elevated = self.privilege.is_elevated()?;

        let mut unaccessible = BTreeSet::new();
        for path in configured {
            let blocked = match self.access.probe(path) {
                Access::Granted => !is_elevated && self.is_protected(path),
                Access::Denied => true,
                Access::Missing => false,
            };
            if blocked {
                debug!("{} is not accessible without elevation", path.display());
                unaccessible.insert(path.to_string_lossy().into_owned());
            }
        }

        let requires_elevation = !unaccessible.is_empty() && !is_elevated;
        let elevation_command = if requires_elevation {
            self.privilege.elevation_command()
        } else {
            String::new()
        };

        info!(
            "Permissions evaluated: elevated={is_elevated}, {} unaccessible location(s)",
            unaccessible.len()
        );

        Ok(PermissionStatus {
            is_elevated,
            requires_elevation,
            unaccessible_paths: unaccessible,
            elevation_command,
            can_clean_user_files: true,
            can_clean_system_files: is_elevated,
        })
    }

    /// Component-wise prefix match; case-insensitive on Windows.
    fn is_protected(&self, path: &Path) -> bool {
        let path = normalise(path);
        self.protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(normalise(Path::new(prefix))))
    }
}

#[cfg(windows)]
fn normalise(path: &Path) -> PathBuf {
    PathBuf::from(path.to_string_lossy().to_lowercase())
}

#[cfg(not(windows))]
fn normalise(path: &Path) -> PathBuf {
    path.to_path_buf()
}
