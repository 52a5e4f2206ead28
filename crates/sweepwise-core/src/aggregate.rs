/// Result aggregation: scan every category and merge into one snapshot.
///
/// Categories run on a dedicated rayon pool capped at
/// [`ScanConfig::max_workers`]. Each worker owns its [`CategoryScan`] until
/// the pool joins; the merge into [`CleanerResult`] then happens on the
/// calling thread. The merged map is keyed and sorted, so the outcome does
/// not depend on which category finished first.
use crate::config::ScanConfig;
use crate::model::{CleanerResult, PermissionStatus};
use crate::scanner::{CategoryScan, CategoryScanner, CategorySpec, ScanWarning};
use crate::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A finished scan: the wire result plus every warning raised on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanReport {
    pub result: CleanerResult,
    pub warnings: Vec<ScanWarning>,
}

#[derive(Clone)]
pub struct ResultAggregator {
    scanner: CategoryScanner,
    config: ScanConfig,
}

impl ResultAggregator {
    pub fn new(scanner: CategoryScanner, config: &ScanConfig) -> Self {
        Self {
            scanner,
            config: config.clone(),
        }
    }

    /// Scan all `categories` under one shared `permissions` snapshot.
    ///
    /// The snapshot must already be final; it is only read here.
    pub fn aggregate(
        &self,
        categories: &[CategorySpec],
        permissions: &PermissionStatus,
    ) -> Result<ScanReport> {
        let start = Instant::now();
        let plan = merge_specs(categories);
        let claimed: Vec<PathBuf> = plan.iter().flat_map(|c| c.locations.clone()).collect();
        let workers = self.config.worker_count(plan.len());

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sweepwise-scan-{i}"))
            .build()?;

        let scans: Vec<CategoryScan> = pool.install(|| {
            plan.par_iter()
                .map(|spec| self.scanner.scan(spec, permissions, &claimed))
                .collect()
        });

        let report = merge_scans(scans, permissions.clone());
        info!(
            "Scan complete: {} categories, {} files, {} bytes, {} warnings in {:?}",
            report.result.files.len(),
            report.result.file_count(),
            report.result.total_size,
            report.warnings.len(),
            start.elapsed()
        );
        Ok(report)
    }
}

/// Merge the per-category outputs into one report.
///
/// Every scanned category gets a key, even when it produced no files.
/// Warnings are ordered by category name so the report is reproducible.
pub fn merge_scans(scans: Vec<CategoryScan>, permissions: PermissionStatus) -> ScanReport {
    let mut files = BTreeMap::new();
    let mut by_category: BTreeMap<String, Vec<ScanWarning>> = BTreeMap::new();

    for scan in scans {
        for w in &scan.warnings {
            warn!("{w}");
        }
        by_category
            .entry(scan.category.clone())
            .or_default()
            .extend(scan.warnings);
        files
            .entry(scan.category)
            .or_insert_with(Vec::new)
            .extend(scan.files);
    }

    ScanReport {
        result: CleanerResult::new(files, permissions),
        warnings: by_category.into_values().flatten().collect(),
    }
}

/// Build the scan plan.
///
/// Categories sharing a name collapse into one, keeping first-seen order of
/// both categories and locations. Each location then gets exactly one
/// owner: the first category in plan order that names it. Later categories
/// lose the location, so no path is listed twice.
pub fn merge_specs(categories: &[CategorySpec]) -> Vec<CategorySpec> {
    let mut merged: Vec<CategorySpec> = Vec::with_capacity(categories.len());
    for spec in categories {
        let target = match merged.iter_mut().position(|m| m.name == spec.name) {
            Some(i) => &mut merged[i],
            None => {
                merged.push(CategorySpec::new(spec.name.clone(), Vec::new()));
                let last = merged.len() - 1;
                &mut merged[last]
            }
        };
        for loc in &spec.locations {
            if !target.locations.contains(loc) {
                target.locations.push(loc.clone());
            }
        }
    }

    let mut owned: HashSet<PathBuf> = HashSet::new();
    for CategorySpec { name, locations } in &mut merged {
        locations.retain(|loc| {
            let first = owned.insert(loc.clone());
            if !first {
                debug!("[{name}] {} already belongs to an earlier category", loc.display());
            }
            first
        });
    }
    merged
}
