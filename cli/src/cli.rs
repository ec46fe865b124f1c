use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use curb_engine::config::AppConfig;
use curb_engine::filter::ZoneSelection;
use curb_engine::session::Session;
use curb_engine::types::TimeRange;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[clap(name = "curbsim", version, about = "Curbside live-metrics simulator")]
pub struct Cli {
    /// Generator seed (overrides CURB_SEED)
    #[clap(long)]
    pub seed: Option<u32>,

    /// Time-series window: 1h, 4h, 8h or 24h (overrides CURB_TIME_RANGE)
    #[clap(long)]
    pub time_range: Option<TimeRange>,

    /// Zones to show (comma-separated), or "All" (overrides CURB_ZONES)
    #[clap(long, value_delimiter = ',')]
    pub zones: Option<Vec<String>>,

    /// Raise volatility and alert injection
    #[clap(long)]
    pub demo: bool,

    /// Tick cadence in milliseconds (overrides CURB_TICK_MS)
    #[clap(long)]
    pub tick_ms: Option<u64>,

    /// Apply this many ticks immediately, print the dashboard as JSON and exit
    #[clap(long)]
    pub ticks: Option<u64>,

    /// Directory for the media registry (overrides CURB_MEDIA_DIR)
    #[clap(long)]
    pub media_dir: Option<PathBuf>,

    /// Register an uploaded clip as NAME=PATH before running
    #[clap(long, value_parser = parse_media)]
    pub add_media: Option<(String, String)>,

    /// Log as JSON
    #[clap(long)]
    pub json_logs: bool,
}

fn parse_media(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok((name.trim().to_string(), path.trim().to_string()))
        }
        _ => Err(format!("expected NAME=PATH, got {raw:?}")),
    }
}

/// Layers command-line flags over the environment-derived config.
pub(crate) fn apply_overrides(cli: &Cli, mut cfg: AppConfig) -> AppConfig {
    if let Some(seed) = cli.seed {
        cfg.seed = seed;
    }
    if let Some(range) = cli.time_range {
        cfg.sim.time_range = range;
    }
    if let Some(zones) = &cli.zones {
        cfg.sim.selected_zones = ZoneSelection::from_names(zones.iter().map(String::as_str));
    }
    if cli.demo {
        cfg.sim.demo_mode = true;
    }
    if let Some(ms) = cli.tick_ms.filter(|ms| *ms > 0) {
        cfg.tick_interval = Duration::from_millis(ms);
    }
    if let Some(dir) = &cli.media_dir {
        cfg.media_dir = dir.clone();
    }
    if cli.json_logs {
        cfg.json_logs = true;
    }
    cfg
}

/// Logs the session's KPIs every `every` until `shutdown` resolves.
/// Returns how many reports were written.
pub(crate) async fn report_until(
    session: &Session,
    every: Duration,
    shutdown: impl Future<Output = std::io::Result<()>>,
) -> u64 {
    let mut report = tokio::time::interval(every);
    let mut reports = 0;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = report.tick() => {
                let snap = session.snapshot();
                let kpis = session.kpis();
                info!(
                    tick = snap.tick,
                    avg_dwell = kpis.avg_dwell,
                    throughput = kpis.throughput,
                    occupancy = kpis.occupancy,
                    sla = kpis.sla_compliance,
                    alerts = kpis.unattended_alerts,
                    risk = ?kpis.delay_risk,
                    "kpis"
                );
                reports += 1;
            }
            res = &mut shutdown => {
                if let Err(e) = res {
                    warn!(error = %e, "shutdown signal failed, stopping");
                }
                return reports;
            }
        }
    }
}
