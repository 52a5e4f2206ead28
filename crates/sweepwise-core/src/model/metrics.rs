/// Point-in-time CPU and memory samples.
///
/// Samples are immutable once taken. Producing them is the job of a
/// [`crate::platform::MetricsSampler`]; the core keeps only the latest pair.
use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    /// Overall utilisation across all cores, 0–100.
    pub usage: f64,
    /// Unix epoch seconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    #[serde(rename = "totalRAMMB")]
    pub total_ram_mb: u64,
    #[serde(rename = "freeRAMMB")]
    pub free_ram_mb: u64,
    #[serde(rename = "usedRAMMB")]
    pub used_ram_mb: u64,
    #[serde(rename = "usagePercent")]
    pub usage_percent: f64,
    pub timestamp: i64,
}

impl CpuStats {
    /// Build a sample, clamping `usage` into 0–100 (samplers occasionally
    /// report a hair over 100 on busy multi-core hosts).
    pub fn new(usage: f64, timestamp: i64) -> Self {
        let usage = if usage.is_finite() {
            usage.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self { usage, timestamp }
    }
}

impl MemoryStats {
    /// Build a sample from raw byte counts.
    ///
    /// `used` is `total - free`; `usage_percent` counts reclaimable cache as
    /// free, i.e. `(total - available) / total`.
    pub fn from_bytes(total: u64, free: u64, available: u64, timestamp: i64) -> Self {
        let usage_percent = if total > 0 {
            total.saturating_sub(available) as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total_ram_mb: total / MIB,
            free_ram_mb: free / MIB,
            used_ram_mb: total.saturating_sub(free) / MIB,
            usage_percent,
            timestamp,
        }
    }
}
