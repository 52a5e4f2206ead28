//! Sweepwise: permission-aware cleanup planner.
//!
//! Thin binary entry point. All logic lives in the `sweepwise-core`
//! and `sweepwise-service` crates.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sweepwise_core::report::{summary_lines, write_csv};
use sweepwise_service::{dispatch_json, SweepService};

#[derive(Debug, Parser)]
#[command(
    name = "sweepwise",
    version,
    about = "Plan what temp and cache files could be reclaimed, and which need elevation"
)]
struct Cli {
    /// Only report what can be cleaned without elevation.
    #[arg(long)]
    safe: bool,
    /// Log a CPU and memory sample before scanning.
    #[arg(long)]
    metrics: bool,
    /// Log the host health score before scanning.
    #[arg(long)]
    health: bool,
    /// Also write the scanned entries as CSV to this file.
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
    /// Answer one JSON bridge request on stdout instead of scanning.
    #[arg(long, value_name = "JSON", conflicts_with_all = ["safe", "csv"])]
    bridge: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Sweepwise starting");
    let service = SweepService::native();

    if let Some(request) = &cli.bridge {
        println!("{}", dispatch_json(&service, request));
        return Ok(());
    }

    if cli.metrics {
        let (cpu, memory) = service.refresh_metrics()?;
        tracing::info!(
            "CPU {:.1}%, memory {:.1}% of {} MB",
            cpu.usage,
            memory.usage_percent,
            memory.total_ram_mb
        );
    }
    if cli.health {
        service.host_health_score(None)?;
    }

    let categories = service.default_categories();
    let report = if cli.safe {
        service.run_safe_scan(&categories)?
    } else {
        service.run_cleanup_scan(&categories)?
    };

    for line in summary_lines(&report.result) {
        tracing::info!("{line}");
    }

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        write_csv(&report.result, BufWriter::new(file))?;
        tracing::info!("CSV written to {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
