//! In-process publish schedule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{info, warn};

use super::runner::PublishOrchestrator;
use super::types::{CycleOutcome, CycleRequest};

/// Triggers a "publish now" cycle on a fixed interval.
///
/// The first cycle runs one full interval after `start`, not immediately.
pub struct PublishScheduler {
    orchestrator: Arc<PublishOrchestrator>,
    interval: Duration,
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

impl PublishScheduler {
    pub fn new(orchestrator: Arc<PublishOrchestrator>, interval: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            orchestrator,
            interval,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Spawn the schedule loop.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Publish scheduler already running");
            return;
        }

        let orchestrator = Arc::clone(&self.orchestrator);
        let running = Arc::clone(&self.running);
        let interval = self.interval;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!("Publish scheduler started (every {:?})", interval);
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Publish scheduler received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                        match orchestrator.run_cycle(&CycleRequest::now()).await {
                            Ok(CycleOutcome::Published(report)) => {
                                info!("Scheduled cycle published article {}", report.article_id);
                            }
                            Ok(CycleOutcome::NothingToPublish) => {}
                            Err(e) => warn!("Scheduled publish cycle failed: {}", e),
                        }
                    }
                }
            }
            info!("Publish scheduler stopped");
        });
    }

    /// Signal the loop to stop. A cycle already in progress finishes first.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        let _ = self.shutdown_tx.send(());
    }
}
