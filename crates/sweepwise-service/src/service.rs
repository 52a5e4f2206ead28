/// Operation facade over the core.
///
/// Owns the configuration, the platform collaborators, and the latest
/// metric pair. Every scan builds a fresh permission snapshot first and only
/// then starts the category workers; nothing from one scan survives into
/// the next.
use std::path::PathBuf;
use sweepwise_core::aggregate::{ResultAggregator, ScanReport};
use sweepwise_core::evaluator::PermissionEvaluator;
use sweepwise_core::health::{health_score, BatteryReading, HealthInputs};
use sweepwise_core::model::{CleanerResult, PermissionStatus};
use sweepwise_core::monitor::{MetricsCache, MetricsSnapshot};
use sweepwise_core::platform::{self, Platform};
use sweepwise_core::scanner::{CategoryScanner, CategorySpec};
use sweepwise_core::{Result, ScanConfig};
use tracing::info;

pub struct SweepService {
    config: ScanConfig,
    platform: Platform,
    metrics: MetricsCache,
}

impl SweepService {
    pub fn new(config: ScanConfig, platform: Platform) -> Self {
        let metrics = MetricsCache::new(platform.sampler.clone());
        Self {
            config,
            platform,
            metrics,
        }
    }

    /// Service backed by the host OS with default configuration.
    pub fn native() -> Self {
        let config = ScanConfig::default();
        let platform = Platform::native(&config);
        Self::new(config, platform)
    }

    /// Per-OS default categories, as a starting point for callers.
    pub fn default_categories(&self) -> Vec<CategorySpec> {
        platform::default_categories()
    }

    /// One full scan pass: evaluate permissions, then scan every category.
    ///
    /// Fails only if the privilege level cannot be determined; every other
    /// problem is reported in [`ScanReport::warnings`].
    pub fn run_cleanup_scan(&self, categories: &[CategorySpec]) -> Result<ScanReport> {
        info!("Cleanup scan requested for {} categories", categories.len());
        let permissions = self.evaluate(categories)?;
        self.aggregator().aggregate(categories, &permissions)
    }

    /// Scan only what can be reclaimed without elevation.
    ///
    /// Locations needing elevation are not listed at all, and any entry
    /// still flagged is dropped, so every returned file has
    /// `needs_elevation == false`. Categories keep their key even if all of
    /// their locations were dropped.
    pub fn run_safe_scan(&self, categories: &[CategorySpec]) -> Result<ScanReport> {
        info!("Safe scan requested for {} categories", categories.len());
        let permissions = self.evaluate(categories)?;

        let safe: Vec<CategorySpec> = categories
            .iter()
            .map(|spec| {
                CategorySpec::new(
                    spec.name.clone(),
                    spec.locations
                        .iter()
                        .filter(|loc| !permissions.covers(loc))
                        .cloned(),
                )
            })
            .collect();

        let report = self.aggregator().aggregate(&safe, &permissions)?;
        let ScanReport { result, warnings } = report;
        let files = result
            .files
            .into_iter()
            .map(|(name, files)| {
                let kept = files.into_iter().filter(|f| !f.needs_elevation).collect();
                (name, kept)
            })
            .collect();

        Ok(ScanReport {
            result: CleanerResult::new(files, result.permissions),
            warnings,
        })
    }

    pub fn health_score(&self, inputs: &HealthInputs) -> f64 {
        health_score(inputs)
    }

    /// Read disk and RAM from the host. The host offers no battery source,
    /// so `battery` comes from the caller, [`BatteryReading::NOMINAL`] if
    /// absent.
    pub fn sample_health_inputs(&self, battery: Option<BatteryReading>) -> Result<HealthInputs> {
        let sampler = &self.platform.sampler;
        Ok(HealthInputs {
            battery: battery.unwrap_or(BatteryReading::NOMINAL),
            disk: sampler.sample_disk()?,
            ram: sampler.sample_ram()?,
        })
    }

    /// Health score of this host, see [`Self::sample_health_inputs`].
    pub fn host_health_score(&self, battery: Option<BatteryReading>) -> Result<f64> {
        let inputs = self.sample_health_inputs(battery)?;
        let score = health_score(&inputs);
        info!("Host health score: {score}");
        Ok(score)
    }

    /// Take a fresh CPU and memory sample and make it the latest pair.
    pub fn refresh_metrics(&self) -> Result<MetricsSnapshot> {
        self.metrics.refresh()
    }

    /// The most recent metric pair, `None` until the first sample.
    pub fn latest_metrics(&self) -> Option<MetricsSnapshot> {
        self.metrics.latest()
    }

    fn evaluate(&self, categories: &[CategorySpec]) -> Result<PermissionStatus> {
        let evaluator = PermissionEvaluator::new(
            self.platform.privilege.clone(),
            self.platform.access.clone(),
            &self.config,
        );
        let locations: Vec<&PathBuf> = categories.iter().flat_map(|c| &c.locations).collect();
        evaluator.evaluate(locations.into_iter().map(PathBuf::as_path))
    }

    fn aggregator(&self) -> ResultAggregator {
        let scanner =
            CategoryScanner::new(self.platform.lister.clone(), self.config.location_timeout);
        ResultAggregator::new(scanner, &self.config)
    }
}
