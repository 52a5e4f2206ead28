/// End-to-end tests for `SweepService` and the JSON bridge.
///
/// Scans run the real native lister against a temporary tree. Privilege,
/// access and metric sampling are faked so elevation and sampling outcomes
/// are deterministic on any machine.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use sweepwise_core::health::{BatteryReading, DiskReading, HealthInputs, RamReading};
use sweepwise_core::model::{CleanerResult, CpuStats, MemoryStats};
use sweepwise_core::platform::{
    Access, AccessProbe, MetricsSampler, NativeAccessProbe, NativeLister, Platform,
    PrivilegeProbe,
};
use sweepwise_core::scanner::CategorySpec;
use sweepwise_core::{CoreError, Result, ScanConfig};
use sweepwise_service::bridge::{BridgeResponse, MetricsPayload};
use sweepwise_service::{dispatch_json, SweepService};
use tempfile::TempDir;

// ── Fakes ─────────────────────────────────────────────────────────────────────

struct FixedPrivilege(Option<bool>);

impl PrivilegeProbe for FixedPrivilege {
    fn is_elevated(&self) -> Result<bool> {
        self.0
            .ok_or_else(|| CoreError::PrivilegeCheckUnavailable("unsupported host".to_owned()))
    }

    fn elevation_command(&self) -> String {
        "sudo sweepwise".to_owned()
    }
}

struct DenyOne(PathBuf);

impl AccessProbe for DenyOne {
    fn probe(&self, path: &Path) -> Access {
        if path == self.0 {
            Access::Denied
        } else {
            NativeAccessProbe.probe(path)
        }
    }
}

struct TickingSampler(AtomicI64);

impl MetricsSampler for TickingSampler {
    fn sample_cpu(&self) -> Result<CpuStats> {
        let t = self.0.fetch_add(1, Ordering::SeqCst);
        Ok(CpuStats::new(25.0, 1_700_000_000 + t))
    }

    fn sample_memory(&self) -> Result<MemoryStats> {
        Ok(MemoryStats::from_bytes(8 << 30, 2 << 30, 4 << 30, 1_700_000_000))
    }

    fn sample_disk(&self) -> Result<DiskReading> {
        Ok(DiskReading { total: 100, free: 25 })
    }

    fn sample_ram(&self) -> Result<RamReading> {
        Ok(RamReading { total: 100, available: 75 })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

/// ```text
/// root/
///   temp/  a.tmp (100)  b.tmp (200)
///   sys/   c.tmp (300)
///   idle/
/// ```
fn make_temp_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for dir in ["temp", "sys", "idle"] {
        fs::create_dir_all(tmp.path().join(dir)).unwrap();
    }
    write_bytes(&tmp.path().join("temp/a.tmp"), 100);
    write_bytes(&tmp.path().join("temp/b.tmp"), 200);
    write_bytes(&tmp.path().join("sys/c.tmp"), 300);
    tmp
}

fn service(root: &Path, elevated: Option<bool>) -> SweepService {
    let config = ScanConfig {
        max_workers: 3,
        min_entry_age: Duration::ZERO,
        protected_prefixes: Vec::new(),
        ..ScanConfig::default()
    };
    let platform = Platform {
        privilege: Arc::new(FixedPrivilege(elevated)),
        access: Arc::new(DenyOne(root.join("sys"))),
        lister: Arc::new(NativeLister::new(&config)),
        sampler: Arc::new(TickingSampler(AtomicI64::new(0))),
    };
    SweepService::new(config, platform)
}

fn categories(root: &Path) -> Vec<CategorySpec> {
    vec![
        CategorySpec::new("Temp", [root.join("temp")]),
        CategorySpec::new("System", [root.join("sys")]),
        CategorySpec::new("Idle", [root.join("idle")]),
    ]
}

// ── Scans ─────────────────────────────────────────────────────────────────────

#[test]
fn cleanup_scan_reports_everything_with_elevation_flags() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));

    let report = svc.run_cleanup_scan(&categories(tmp.path())).unwrap();
    let result = &report.result;

    assert_eq!(result.total_size, 600);
    assert!(result.is_consistent());
    assert!(result.permissions.requires_elevation);
    assert!(!result.permissions.can_clean_system_files);
    assert!(result.files["System"].iter().all(|f| f.needs_elevation));
    assert!(result.files["Temp"].iter().all(|f| !f.needs_elevation));
    assert!(result.files["Idle"].is_empty());
}

#[test]
fn safe_scan_drops_everything_needing_elevation() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));

    let report = svc.run_safe_scan(&categories(tmp.path())).unwrap();
    let result = &report.result;

    assert_eq!(result.total_size, 300);
    assert!(result.is_consistent());
    assert!(result.files.values().flatten().all(|f| !f.needs_elevation));
    assert!(result.files["System"].is_empty(), "key kept, entries dropped");
}

/// Same-named categories are scanned as one.
#[test]
fn duplicate_category_names_are_merged() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(true));
    let cats = vec![
        CategorySpec::new("Temp", [tmp.path().join("temp")]),
        CategorySpec::new("Temp", [tmp.path().join("idle")]),
    ];

    let report = svc.run_cleanup_scan(&cats).unwrap();
    assert_eq!(report.result.files.len(), 1);
    assert_eq!(report.result.category_size("Temp"), 300);
}

#[test]
fn missing_privilege_check_fails_the_scan() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), None);
    assert!(matches!(
        svc.run_cleanup_scan(&categories(tmp.path())),
        Err(CoreError::PrivilegeCheckUnavailable(_))
    ));
}

// ── Health & metrics ───────────────────────────────────────────────────────────

#[test]
fn latest_metrics_are_empty_until_refreshed() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));
    assert!(svc.latest_metrics().is_none());

    svc.refresh_metrics().unwrap();
    svc.refresh_metrics().unwrap();
    let (cpu, mem) = svc.latest_metrics().unwrap();
    assert_eq!(cpu.timestamp, 1_700_000_001);
    assert_eq!(mem.total_ram_mb, 8192);
}

/// Without a battery reading the host is scored with a nominal battery:
/// (100 + 25 + 75) / 3.
#[test]
fn host_health_uses_sampled_disk_and_ram() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));

    let inputs = svc.sample_health_inputs(None).unwrap();
    assert_eq!(inputs.battery, BatteryReading::NOMINAL);
    assert_eq!(inputs.disk, DiskReading { total: 100, free: 25 });
    assert_eq!(svc.host_health_score(None).unwrap(), 66.67);

    let battery = BatteryReading {
        designed_capacity: 100.0,
        current_capacity: 50.0,
    };
    assert_eq!(svc.host_health_score(Some(battery)).unwrap(), 50.0);
}

// ── Bridge ─────────────────────────────────────────────────────────────────────

#[test]
fn bridge_scan_returns_wire_result() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));
    let request = serde_json::json!({
        "Op": "RunCleanupScan",
        "Categories": categories(tmp.path()),
    })
    .to_string();

    let response: serde_json::Value = serde_json::from_str(&dispatch_json(&svc, &request)).unwrap();
    assert_eq!(response["Kind"], "Scan");
    assert_eq!(response["Data"]["Result"]["TotalSize"], 600);

    let result: CleanerResult =
        serde_json::from_value(response["Data"]["Result"].clone()).unwrap();
    assert!(result.is_consistent());
    assert_eq!(result.files.len(), 3);
}

#[test]
fn bridge_health_score_matches_reference() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));
    let request = r#"{
        "Op": "GetHealthScore",
        "Inputs": {
            "battery": {"designed_capacity": 100.0, "current_capacity": 50.0},
            "disk": {"total": 100, "free": 25},
            "ram": {"total": 100, "available": 75}
        }
    }"#;

    let response: BridgeResponse = serde_json::from_str(&dispatch_json(&svc, request)).unwrap();
    assert_eq!(response, BridgeResponse::HealthScore(50.0));
}

#[test]
fn bridge_metrics_round_trip() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));

    let before: BridgeResponse =
        serde_json::from_str(&dispatch_json(&svc, r#"{"Op":"GetLatestMetrics"}"#)).unwrap();
    assert_eq!(before, BridgeResponse::Metrics(None));

    dispatch_json(&svc, r#"{"Op":"RefreshMetrics"}"#);
    let after = dispatch_json(&svc, r#"{"Op":"GetLatestMetrics"}"#);
    let value: serde_json::Value = serde_json::from_str(&after).unwrap();
    assert_eq!(value["Data"]["CPUStats"]["usage"], 25.0);
    assert_eq!(value["Data"]["MemoryStats"]["totalRAMMB"], 8192);

    let parsed: BridgeResponse = serde_json::from_str(&after).unwrap();
    match parsed {
        BridgeResponse::Metrics(Some(MetricsPayload { cpu, .. })) => {
            assert_eq!(cpu.timestamp, 1_700_000_000)
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn bridge_rejects_malformed_requests() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));

    for bad in ["not json", r#"{"Op":"DeleteEverything"}"#, r#"{"Op":"GetHealthScore"}"#] {
        let response: BridgeResponse = serde_json::from_str(&dispatch_json(&svc, bad)).unwrap();
        assert!(
            matches!(response, BridgeResponse::Error(_)),
            "{bad} should be rejected"
        );
    }
}

#[test]
fn bridge_surfaces_fatal_scan_errors() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), None);
    let response: BridgeResponse =
        serde_json::from_str(&dispatch_json(&svc, r#"{"Op":"RunCleanupScan","Categories":[]}"#))
            .unwrap();
    match response {
        BridgeResponse::Error(msg) => assert!(msg.contains("privilege check unavailable")),
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn bridge_samples_host_health() {
    let tmp = make_temp_tree();
    let svc = service(tmp.path(), Some(false));

    let sampled: BridgeResponse =
        serde_json::from_str(&dispatch_json(&svc, r#"{"Op":"SampleHealthInputs"}"#)).unwrap();
    let expected = HealthInputs {
        battery: BatteryReading::NOMINAL,
        disk: DiskReading { total: 100, free: 25 },
        ram: RamReading { total: 100, available: 75 },
    };
    assert_eq!(sampled, BridgeResponse::HealthInputs(expected));

    let request = r#"{
        "Op": "GetHostHealthScore",
        "Battery": {"designed_capacity": 100.0, "current_capacity": 50.0}
    }"#;
    let scored: BridgeResponse = serde_json::from_str(&dispatch_json(&svc, request)).unwrap();
    assert_eq!(scored, BridgeResponse::HealthScore(50.0));
}
