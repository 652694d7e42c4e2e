use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::config::PollingConfig;
use crate::error::Result;
use crate::ordering::QueueOrderingEngine;
use crate::types::{Profile, QueueEntry, QueuePosition, UserContext};

/// Read access to the backend's queue and profile snapshots
///
/// Implementors wrap the real HTTP client. Both methods return the full,
/// unordered snapshot; filtering and ordering happen in the engine.
#[async_trait]
pub trait QueueSnapshotSource: Send + Sync {
    /// Fetch all current queue entries
    async fn fetch_entries(&self) -> Result<Vec<QueueEntry>>;

    /// Fetch all profiles needed to resolve names and priority
    async fn fetch_profiles(&self) -> Result<Vec<Profile>>;
}

/// Poll-driven position watcher for one patient
///
/// Re-fetches both snapshots every `poll_interval`, recomputes the
/// context's position through the ordering engine, and publishes on a
/// [`tokio::sync::watch`] channel only when the position changed. Fetch
/// failures keep the last known position; the next successful tick
/// self-corrects.
pub struct PositionWatcher {
    source: Arc<dyn QueueSnapshotSource>,
    engine: QueueOrderingEngine,
    config: PollingConfig,
    context: UserContext,
}

/// Handle to a running watcher task
pub struct WatcherHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl WatcherHandle {
    /// Stop the watcher and wait for the task to finish
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            if !e.is_cancelled() {
                warn!("⚠️ Position watcher task ended abnormally: {}", e);
            }
        }
    }
}

impl PositionWatcher {
    /// Create a watcher for the given patient context
    pub fn new(
        source: Arc<dyn QueueSnapshotSource>,
        engine: QueueOrderingEngine,
        config: PollingConfig,
        context: UserContext,
    ) -> Self {
        Self {
            source,
            engine,
            config,
            context,
        }
    }

    /// Spawn the polling task
    ///
    /// The receiver starts at [`QueuePosition::NotInQueue`]; the first tick
    /// fires immediately. Dropping the receiver does not stop the task;
    /// use [`WatcherHandle::stop`], or drop the handle to let the loop
    /// notice the closed shutdown channel on its next wakeup.
    pub fn spawn(self) -> (WatcherHandle, watch::Receiver<QueuePosition>) {
        let (position_tx, position_rx) = watch::channel(QueuePosition::NotInQueue);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        info!(
            "🔄 Starting position watcher for {} (every {:?})",
            self.context.profile_id, self.config.poll_interval
        );

        let task = tokio::spawn(self.run(position_tx, shutdown_rx));

        (WatcherHandle { shutdown_tx, task }, position_rx)
    }

    async fn run(
        self,
        position_tx: watch::Sender<QueuePosition>,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let mut interval = tokio::time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut consecutive_failures: u32 = 0;

        loop {
            tokio::select! {
                // Breaks on both an explicit stop and a dropped handle.
                _ = shutdown_rx.changed() => {
                    info!("🛑 Position watcher for {} shutting down", self.context.profile_id);
                    break;
                }
                _ = interval.tick() => {
                    match self.poll_once().await {
                        Ok(position) => {
                            consecutive_failures = 0;
                            position_tx.send_if_modified(|current| {
                                if *current == position {
                                    return false;
                                }
                                info!(
                                    "📋 Queue position for {} changed: {:?} -> {:?}",
                                    self.context.profile_id, current, position
                                );
                                *current = position;
                                true
                            });
                        }
                        Err(e) => {
                            consecutive_failures += 1;
                            if consecutive_failures >= self.config.max_quiet_failures {
                                error!(
                                    "❌ Snapshot fetch failed {} times in a row: {}",
                                    consecutive_failures, e
                                );
                            } else {
                                warn!("⚠️ Snapshot fetch failed, keeping last known position: {}", e);
                            }
                        }
                    }
                }
            }
        }
    }

    async fn poll_once(&self) -> Result<QueuePosition> {
        let entries = self.source.fetch_entries().await?;
        let profiles = self.source.fetch_profiles().await?;

        Ok(self
            .engine
            .position_of(&self.context.profile_id, &entries, &profiles))
    }
}
