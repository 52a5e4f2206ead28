/// Metric samples: CPU and memory snapshots with a latest-only cache.
///
/// Sampling cadence is the caller's business: something calls
/// [`MetricsCache::refresh`] on its own schedule, and readers pick up the
/// most recent pair with [`MetricsCache::latest`]. No history is kept; each
/// refresh replaces the previous pair.
///
/// # Usage
///
/// ```ignore
/// let cache = MetricsCache::new(Arc::new(SysinfoSampler::new()));
/// cache.refresh()?;
/// let (cpu, mem) = cache.latest().unwrap();
/// ```
pub mod sampler;

pub use sampler::SysinfoSampler;

use crate::model::{CpuStats, MemoryStats};
use crate::platform::MetricsSampler;
use crate::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// The most recent CPU and memory pair.
pub type MetricsSnapshot = (CpuStats, MemoryStats);

pub struct MetricsCache {
    sampler: Arc<dyn MetricsSampler>,
    latest: RwLock<Option<MetricsSnapshot>>,
}

impl MetricsCache {
    pub fn new(sampler: Arc<dyn MetricsSampler>) -> Self {
        Self {
            sampler,
            latest: RwLock::new(None),
        }
    }

    /// Take one CPU and one memory sample and make them the latest pair.
    ///
    /// On failure the previous pair is kept.
    pub fn refresh(&self) -> Result<MetricsSnapshot> {
        let cpu = self.sampler.sample_cpu()?;
        let memory = self.sampler.sample_memory()?;
        debug!(
            "Metrics sampled: cpu={:.1}%, mem={:.1}%",
            cpu.usage, memory.usage_percent
        );
        *self.latest.write() = Some((cpu, memory));
        Ok((cpu, memory))
    }

    /// The latest pair, or `None` before the first successful sample.
    pub fn latest(&self) -> Option<MetricsSnapshot> {
        *self.latest.read()
    }
}
