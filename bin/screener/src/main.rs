mod report;

use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{Config, MetricsFeed, ScanCommand, ScanReport};
use engine::{ScanPipeline, Scanner};
use strategy::{StrategyFileConfig, StrategyRegistry};
use synthetic::SyntheticFeed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    // Logs go to stderr, stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().context("invalid environment configuration")?;
    info!(
        seed = ?cfg.seed,
        output = ?cfg.output,
        rescan = ?cfg.rescan_interval,
        "IDX screener starting"
    );

    // ── Strategy registry ─────────────────────────────────────────────────────
    let registry = match &cfg.strategy_config_path {
        Some(path) => {
            let file = StrategyFileConfig::load(path)?;
            info!(path = %path, strategies = file.strategies.len(), "Loaded strategy tables");
            StrategyRegistry::from_config(&file)?
        }
        None => StrategyRegistry::builtin(),
    };

    // ── Scanner ───────────────────────────────────────────────────────────────
    let feed: Arc<dyn MetricsFeed> = Arc::new(SyntheticFeed::new(cfg.seed));
    let (scanner, handle) = Scanner::new(feed, ScanPipeline::new(registry));
    let mut reports = handle.subscribe();
    let scanner_task = tokio::spawn(scanner.run());

    match cfg.rescan_interval {
        None => {
            handle.send(ScanCommand::Rescan).await;
            handle.send(ScanCommand::Stop).await;
            drop(handle);
            scanner_task.await.context("scanner task failed")?;

            match reports.recv().await {
                Ok(report) => print(&report, &cfg)?,
                Err(_) => bail!("scan pass produced no report, see log for the cause"),
            }
        }

        Some(period) => {
            let mut ticker = tokio::time::interval(period);
            let shutdown = tokio::signal::ctrl_c();
            tokio::pin!(shutdown);

            loop {
                tokio::select! {
                    _ = ticker.tick() => handle.send(ScanCommand::Rescan).await,
                    received = reports.recv() => match received {
                        Ok(report) => print(&report, &cfg)?,
                        Err(RecvError::Lagged(n)) => warn!(dropped = n, "Report printer lagged"),
                        Err(RecvError::Closed) => break,
                    },
                    _ = &mut shutdown => {
                        info!("Shutdown signal received");
                        break;
                    }
                }
            }

            handle.send(ScanCommand::Stop).await;
            scanner_task.await.context("scanner task failed")?;
        }
    }

    info!("IDX screener exiting");
    Ok(())
}

fn print(report: &ScanReport, cfg: &Config) -> anyhow::Result<()> {
    let rendered = report::render(report, cfg.output).context("failed to render report")?;
    println!("{rendered}");
    Ok(())
}
