pub mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use common::logger::init_logger;
use tracing::info;

use cli::*;
use curb_engine::config::AppConfig;
use curb_engine::media::{FileKvStore, KeyValueStore, MediaRegistry};
use curb_engine::session::Session;

/// How often the live loop reports KPIs.
const REPORT_EVERY: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = apply_overrides(&cli, AppConfig::from_env()?);

    init_logger("curbsim", cfg.json_logs);

    let store: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::new(&cfg.media_dir));
    let media = MediaRegistry::load(store).await;
    if let Some((name, path)) = &cli.add_media {
        media.add(name.as_str(), path.as_str()).await?;
    }
    info!(
        clips = media.catalog().await.len(),
        dir = %cfg.media_dir.display(),
        "media catalog ready"
    );

    let session = Session::new(&cfg);

    if let Some(n) = cli.ticks {
        for _ in 0..n {
            session.step();
        }
        println!("{}", serde_json::to_string_pretty(&session.dashboard())?);
        return Ok(());
    }

    session.start()?;

    let reports = report_until(&session, REPORT_EVERY, tokio::signal::ctrl_c()).await;
    info!(reports, "shutdown requested");

    session.stop();
    Ok(())
}
