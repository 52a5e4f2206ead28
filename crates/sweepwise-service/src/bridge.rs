/// Typed JSON shapes for the inter-process bridge.
///
/// The transport is someone else's job; this module only turns a JSON
/// request into a call on [`SweepService`] and the outcome back into JSON.
/// Every request and response has a concrete serde type, so malformed input
/// is rejected at parse time instead of surfacing as missing fields later.
use crate::service::SweepService;
use serde::{Deserialize, Serialize};
use sweepwise_core::aggregate::ScanReport;
use sweepwise_core::health::{BatteryReading, HealthInputs};
use sweepwise_core::model::{CpuStats, MemoryStats};
use sweepwise_core::scanner::CategorySpec;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Op")]
pub enum BridgeRequest {
    /// Full scan. Without categories the per-OS defaults are used.
    RunCleanupScan {
        #[serde(rename = "Categories", default)]
        categories: Option<Vec<CategorySpec>>,
    },
    /// Scan restricted to what needs no elevation.
    RunSafeScan {
        #[serde(rename = "Categories", default)]
        categories: Option<Vec<CategorySpec>>,
    },
    GetHealthScore {
        #[serde(rename = "Inputs")]
        inputs: HealthInputs,
    },
    /// Disk and RAM read from the host; battery from the request if given.
    SampleHealthInputs {
        #[serde(rename = "Battery", default)]
        battery: Option<BatteryReading>,
    },
    GetHostHealthScore {
        #[serde(rename = "Battery", default)]
        battery: Option<BatteryReading>,
    },
    GetLatestMetrics,
    RefreshMetrics,
    DefaultCategories,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsPayload {
    #[serde(rename = "CPUStats")]
    pub cpu: CpuStats,
    #[serde(rename = "MemoryStats")]
    pub memory: MemoryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Kind", content = "Data")]
pub enum BridgeResponse {
    Scan(ScanReport),
    HealthScore(f64),
    HealthInputs(HealthInputs),
    /// `null` until the first sample has been taken.
    Metrics(Option<MetricsPayload>),
    Categories(Vec<CategorySpec>),
    Error(String),
}

/// Execute one request against `service`.
pub fn dispatch(service: &SweepService, request: BridgeRequest) -> BridgeResponse {
    match request {
        BridgeRequest::RunCleanupScan { categories } => {
            let categories = categories.unwrap_or_else(|| service.default_categories());
            scan_response(service.run_cleanup_scan(&categories))
        }
        BridgeRequest::RunSafeScan { categories } => {
            let categories = categories.unwrap_or_else(|| service.default_categories());
            scan_response(service.run_safe_scan(&categories))
        }
        BridgeRequest::GetHealthScore { inputs } => {
            BridgeResponse::HealthScore(service.health_score(&inputs))
        }
        BridgeRequest::SampleHealthInputs { battery } => {
            match service.sample_health_inputs(battery) {
                Ok(inputs) => BridgeResponse::HealthInputs(inputs),
                Err(e) => BridgeResponse::Error(e.to_string()),
            }
        }
        BridgeRequest::GetHostHealthScore { battery } => match service.host_health_score(battery) {
            Ok(score) => BridgeResponse::HealthScore(score),
            Err(e) => BridgeResponse::Error(e.to_string()),
        },
        BridgeRequest::GetLatestMetrics => BridgeResponse::Metrics(
            service
                .latest_metrics()
                .map(|(cpu, memory)| MetricsPayload { cpu, memory }),
        ),
        BridgeRequest::RefreshMetrics => match service.refresh_metrics() {
            Ok((cpu, memory)) => BridgeResponse::Metrics(Some(MetricsPayload { cpu, memory })),
            Err(e) => BridgeResponse::Error(e.to_string()),
        },
        BridgeRequest::DefaultCategories => {
            BridgeResponse::Categories(service.default_categories())
        }
    }
}

/// Parse `request`, execute it, and serialise the response.
///
/// Never fails: parse errors come back as an `Error` response.
pub fn dispatch_json(service: &SweepService, request: &str) -> String {
    let response = match serde_json::from_str::<BridgeRequest>(request) {
        Ok(req) => dispatch(service, req),
        Err(e) => {
            warn!("Rejected bridge request: {e}");
            BridgeResponse::Error(format!("invalid request: {e}"))
        }
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        serde_json::json!({ "Kind": "Error", "Data": e.to_string() }).to_string()
    })
}

fn scan_response(result: sweepwise_core::Result<ScanReport>) -> BridgeResponse {
    match result {
        Ok(report) => BridgeResponse::Scan(report),
        Err(e) => BridgeResponse::Error(e.to_string()),
    }
}
