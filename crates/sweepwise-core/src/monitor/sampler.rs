/// Native metric sampler backed by `sysinfo`.
use crate::health::{DiskReading, RamReading};
use crate::model::{CpuStats, MemoryStats};
use crate::platform::MetricsSampler;
use crate::{CoreError, Result};
use parking_lot::Mutex;
use std::path::PathBuf;
use sysinfo::{Disks, System};

/// Keeps one `System` across calls so CPU usage is measured against the
/// previous refresh rather than from scratch each time.
pub struct SysinfoSampler {
    system: Mutex<System>,
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSampler {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu_all();
        Self {
            system: Mutex::new(system),
        }
    }
}

impl MetricsSampler for SysinfoSampler {
    /// Blocks for `MINIMUM_CPU_UPDATE_INTERVAL` so the usage delta is
    /// meaningful.
    fn sample_cpu(&self) -> Result<CpuStats> {
        let mut system = self.system.lock();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        system.refresh_cpu_usage();
        if system.cpus().is_empty() {
            return Err(CoreError::Metrics("no CPUs reported".to_owned()));
        }
        Ok(CpuStats::new(
            system.global_cpu_usage() as f64,
            chrono::Utc::now().timestamp(),
        ))
    }

    fn sample_memory(&self) -> Result<MemoryStats> {
        let mut system = self.system.lock();
        system.refresh_memory();
        let total = system.total_memory();
        if total == 0 {
            return Err(CoreError::Metrics("total memory reported as 0".to_owned()));
        }
        Ok(MemoryStats::from_bytes(
            total,
            system.free_memory(),
            system.available_memory(),
            chrono::Utc::now().timestamp(),
        ))
    }

    /// The disk holding the user's home directory, where cleanup happens.
    fn sample_disk(&self) -> Result<DiskReading> {
        let disks = Disks::new_with_refreshed_list();
        let target = dirs::home_dir().unwrap_or_else(root_dir);
        let disk = disks
            .list()
            .iter()
            .filter(|d| target.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().components().count())
            .or_else(|| disks.list().first())
            .ok_or_else(|| CoreError::Metrics("no disks reported".to_owned()))?;
        Ok(DiskReading {
            total: disk.total_space(),
            free: disk.available_space(),
        })
    }

    fn sample_ram(&self) -> Result<RamReading> {
        let mut system = self.system.lock();
        system.refresh_memory();
        let total = system.total_memory();
        if total == 0 {
            return Err(CoreError::Metrics("total memory reported as 0".to_owned()));
        }
        Ok(RamReading {
            total,
            available: system.available_memory(),
        })
    }
}

#[cfg(windows)]
fn root_dir() -> PathBuf {
    let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_owned());
    PathBuf::from(format!("{drive}\\"))
}

#[cfg(not(windows))]
fn root_dir() -> PathBuf {
    PathBuf::from("/")
}
