//! Health monitor
//!
//! A single periodic task that sweeps the registry, repairs entries whose
//! transcoder died, and relaunches them. It terminates when the shared
//! shutdown signal fires.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;

use crate::ingest::{process, StreamLauncher};
use crate::registry::{StreamRegistry, StreamStatus};

/// Periodic liveness sweep over all registry entries
pub struct HealthMonitor {
    registry: Arc<StreamRegistry>,
    launcher: Arc<StreamLauncher>,
    interval: Duration,
    shutdown_rx: watch::Receiver<bool>,
}

impl HealthMonitor {
    /// Create a monitor
    pub fn new(
        registry: Arc<StreamRegistry>,
        launcher: Arc<StreamLauncher>,
        interval: Duration,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            registry,
            launcher,
            interval,
            shutdown_rx,
        }
    }

    /// Run the sweep loop until shutdown
    pub async fn run(mut self) {
        tracing::info!(interval = ?self.interval, "Health monitor running");

        let mut ticker = tokio::time::interval(self.interval);
        // The first tick of `interval` fires immediately; consume it so
        // sweeps start one interval after launch, matching the timer
        // semantics of the original service.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.sweep().await,
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Health monitor stopped");
    }

    /// Run one sweep
    ///
    /// Marks dead entries `Inactive`, clears their handles, refreshes
    /// `last_update` on every entry, and relaunches the dead ones. Never
    /// removes an entry and never restarts an `Error` entry (those failed
    /// to spawn at all; retrying every sweep would flap).
    pub async fn sweep(&self) {
        let now = Utc::now();
        let mut restarts: Vec<(String, String)> = Vec::new();

        self.registry
            .for_each_mut(|entry| {
                let dead = match entry.process {
                    // A handle whose pid vanished means the watcher has
                    // not caught the exit yet.
                    Some(handle) => match handle.pid {
                        Some(pid) => !process::is_alive(pid),
                        None => false,
                    },
                    // The watcher already recorded the exit.
                    None => entry.status == StreamStatus::Inactive,
                };

                if dead {
                    if entry.process.is_some() {
                        entry.process = None;
                        entry.set_status(StreamStatus::Inactive);
                    }
                    restarts.push((entry.name.clone(), entry.source_url.clone()));
                }

                entry.last_update = now;
            })
            .await;

        if restarts.is_empty() {
            return;
        }

        // A sweep racing shutdown must not spawn new processes.
        if *self.shutdown_rx.borrow() {
            return;
        }

        for (name, source_url) in restarts {
            tracing::warn!(stream = %name, "Transcoder dead, restarting");
            let launcher = Arc::clone(&self.launcher);
            tokio::spawn(async move {
                if let Err(e) = launcher.launch(&name, &source_url).await {
                    tracing::warn!(stream = %name, error = %e, "Restart failed");
                }
            });
        }
    }
}
