/// Platform collaborators: privilege checks, access probes, directory
/// listing, and metric sampling.
///
/// Each concern is a trait so scans can run against fakes in tests; the
/// `Native*` types are the real implementations for the host OS.
pub mod lister;
pub mod locations;
pub mod permissions;

pub use lister::NativeLister;
pub use locations::default_categories;
pub use permissions::{elevation_command, NativeAccessProbe, NativePrivilegeProbe};

use crate::config::ScanConfig;
use crate::health::{DiskReading, RamReading};
use crate::model::{CpuStats, MemoryStats};
use crate::monitor::SysinfoSampler;
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reports the privilege level of the current process.
pub trait PrivilegeProbe: Send + Sync {
    /// `Err` only when the host has no usable privilege check at all.
    fn is_elevated(&self) -> Result<bool>;

    /// Instruction for relaunching the process elevated.
    fn elevation_command(&self) -> String;
}

/// Result of a non-destructive access probe on one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// Denied, or the probe itself failed.
    Denied,
    /// The location does not exist; there is nothing to clean or elevate for.
    Missing,
}

pub trait AccessProbe: Send + Sync {
    /// Must not create, modify or delete anything.
    fn probe(&self, path: &Path) -> Access;
}

/// One raw entry produced by an [`EntryLister`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub path: PathBuf,
    pub name: String,
    /// `Err` carries the reason the size could not be read.
    pub size: std::result::Result<u64, String>,
}

/// Lists the reclaimable entries directly inside one location.
pub trait EntryLister: Send + Sync {
    fn list(&self, location: &Path) -> Result<Vec<RawEntry>>;
}

/// Takes one CPU or memory sample on demand. Cadence is the caller's concern.
///
/// `sample_disk` and `sample_ram` produce the raw readings the health score
/// is computed from.
pub trait MetricsSampler: Send + Sync {
    fn sample_cpu(&self) -> Result<CpuStats>;
    fn sample_memory(&self) -> Result<MemoryStats>;
    fn sample_disk(&self) -> Result<DiskReading>;
    fn sample_ram(&self) -> Result<RamReading>;
}

/// The full set of collaborators a scan needs.
#[derive(Clone)]
pub struct Platform {
    pub privilege: Arc<dyn PrivilegeProbe>,
    pub access: Arc<dyn AccessProbe>,
    pub lister: Arc<dyn EntryLister>,
    pub sampler: Arc<dyn MetricsSampler>,
}

impl Platform {
    /// Native implementations for the host OS.
    pub fn native(config: &ScanConfig) -> Self {
        Self {
            privilege: Arc::new(NativePrivilegeProbe),
            access: Arc::new(NativeAccessProbe),
            lister: Arc::new(NativeLister::new(config)),
            sampler: Arc::new(SysinfoSampler::new()),
        }
    }
}
