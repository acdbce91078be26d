use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{error, info, warn};

use common::{MetricsFeed, ScanCommand, ScanReport, ScannerState};

use crate::pipeline::ScanPipeline;

/// Cloneable handle for driving a running [`Scanner`].
#[derive(Clone)]
pub struct ScannerHandle {
    command_tx: mpsc::Sender<ScanCommand>,
    state: Arc<RwLock<ScannerState>>,
    report_tx: broadcast::Sender<Arc<ScanReport>>,
}

impl ScannerHandle {
    pub async fn send(&self, cmd: ScanCommand) {
        let _ = self.command_tx.send(cmd).await;
    }

    pub async fn state(&self) -> ScannerState {
        *self.state.read().await
    }

    /// Subscribe to reports broadcast after each completed scan.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<ScanReport>> {
        self.report_tx.subscribe()
    }
}

/// The scan service: pulls snapshots from the feed on command and publishes reports.
pub struct Scanner {
    feed: Arc<dyn MetricsFeed>,
    pipeline: ScanPipeline,
    state: Arc<RwLock<ScannerState>>,
    report_tx: broadcast::Sender<Arc<ScanReport>>,
    command_rx: mpsc::Receiver<ScanCommand>,
}

impl Scanner {
    pub fn new(feed: Arc<dyn MetricsFeed>, pipeline: ScanPipeline) -> (Self, ScannerHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (report_tx, _) = broadcast::channel(16);
        let state = Arc::new(RwLock::new(ScannerState::Idle));

        let handle = ScannerHandle {
            command_tx,
            state: state.clone(),
            report_tx: report_tx.clone(),
        };

        let scanner = Scanner {
            feed,
            pipeline,
            state,
            report_tx,
            command_rx,
        };

        (scanner, handle)
    }

    /// Run the command loop until `Stop` or until every handle is dropped.
    /// Call from `tokio::spawn`.
    pub async fn run(mut self) {
        info!(feed = self.feed.name(), "Scanner idle, waiting for commands");

        loop {
            match self.command_rx.recv().await {
                Some(ScanCommand::Rescan) => {
                    *self.state.write().await = ScannerState::Scanning;
                    self.rescan().await;
                    *self.state.write().await = ScannerState::Idle;
                }

                Some(ScanCommand::Stop) => {
                    info!("Scanner stopping");
                    break;
                }

                None => {
                    warn!("Scanner command channel closed, shutting down");
                    break;
                }
            }
        }

        *self.state.write().await = ScannerState::Stopped;
    }

    async fn rescan(&self) {
        let snapshot = match self.feed.snapshot().await {
            Ok(s) => s,
            Err(e) => {
                error!(feed = self.feed.name(), error = %e, "Snapshot failed, skipping scan");
                return;
            }
        };

        match self.pipeline.scan(snapshot).await {
            Ok(report) => {
                let receivers = self.report_tx.send(Arc::new(report)).unwrap_or(0);
                info!(receivers, "Scan report published");
            }
            Err(e) => error!(error = %e, "Scan pass failed"),
        }
    }
}
