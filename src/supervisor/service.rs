//! Supervisor lifecycle controller
//!
//! Owns startup (bulk-launch of the configured streams), shutdown
//! (cancel and terminate everything), and the query operations exposed to
//! callers such as an HTTP layer.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::IngestConfig;
use crate::error::{Error, Result};
use crate::ingest::{process, StreamLauncher, PLAYLIST_NAME};
use crate::registry::{StreamRegistry, StreamSnapshot, StreamStatus};

use super::monitor::HealthMonitor;

/// Stream ingest supervisor
///
/// Single-shot lifecycle: construct, `start()`, query while running,
/// `stop()`. Restarting a stopped supervisor is not supported.
pub struct StreamSupervisor {
    config: IngestConfig,
    registry: Arc<StreamRegistry>,
    launcher: Arc<StreamLauncher>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl StreamSupervisor {
    /// Create a supervisor from configuration
    ///
    /// All collaborators are constructed and wired here; nothing is
    /// global. No process is started until [`start`](Self::start).
    pub fn new(config: IngestConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let registry = Arc::new(StreamRegistry::new());
        let launcher = Arc::new(StreamLauncher::new(
            config.clone(),
            Arc::clone(&registry),
            shutdown_rx.clone(),
        ));

        Self {
            config,
            registry,
            launcher,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Get the supervisor configuration
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Get a reference to the stream registry
    pub fn registry(&self) -> &Arc<StreamRegistry> {
        &self.registry
    }

    /// Start all configured streams and the health monitor
    ///
    /// A stream that fails to launch is logged and skipped; one bad
    /// source must not prevent the others from starting. Fails only if
    /// the output root cannot be created.
    pub async fn start(&self) -> Result<()> {
        tracing::info!(
            output_dir = %self.config.output_dir.display(),
            streams = self.config.streams.len(),
            "Starting stream supervisor"
        );

        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        for (name, source_url) in &self.config.streams {
            if let Err(e) = self.launcher.launch(name, source_url).await {
                tracing::warn!(stream = %name, error = %e, "Stream failed to start");
            }
        }

        let monitor = HealthMonitor::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.launcher),
            self.config.monitor_interval,
            self.shutdown_rx.clone(),
        );
        tokio::spawn(monitor.run());

        tracing::info!("Stream supervisor started");
        Ok(())
    }

    /// Stop the supervisor
    ///
    /// Sets the shared shutdown signal, which stops the monitor and makes
    /// every completion watcher kill and reap its child, then sends a
    /// best-effort kill to every still-attached handle. Returns once
    /// termination has been requested; does not wait for exits.
    pub async fn stop(&self) {
        tracing::info!("Stopping stream supervisor");

        let _ = self.shutdown_tx.send(true);

        self.registry
            .for_each_mut(|entry| {
                if let Some(pid) = entry.process.and_then(|h| h.pid) {
                    if let Err(e) = process::terminate(pid) {
                        tracing::debug!(stream = %entry.name, pid, error = %e, "Termination failed");
                    }
                }
            })
            .await;

        tracing::info!("Stream supervisor stopped");
    }

    /// Snapshot of every stream entry, for status display
    pub async fn list_streams(&self) -> Vec<StreamSnapshot> {
        self.registry.list().await
    }

    /// Snapshot of a single stream entry
    pub async fn stream_info(&self, name: &str) -> Result<StreamSnapshot> {
        self.registry.get(name).await.ok_or_else(|| Error::StreamNotFound {
            name: name.to_string(),
        })
    }

    /// Resolve the playback URL for an active stream
    ///
    /// Fails with `StreamNotFound` for an unknown name and
    /// `StreamNotActive` for a stream that is not currently active.
    pub async fn resolve_playback_url(&self, name: &str) -> Result<String> {
        let snap = self.stream_info(name).await?;

        if snap.status != StreamStatus::Active {
            return Err(Error::StreamNotActive {
                name: name.to_string(),
                status: snap.status,
            });
        }

        Ok(format!(
            "http://{}:{}/{}/{}",
            self.config.http_host, self.config.http_port, name, PLAYLIST_NAME
        ))
    }

    /// Set the informational viewer counter for a stream
    ///
    /// The supervisor itself never changes this value; it exists for the
    /// collaborator that tracks playback sessions.
    pub async fn set_viewer_count(&self, name: &str, count: u32) -> Result<()> {
        let found = self
            .registry
            .update(name, |entry| entry.viewer_count = count)
            .await;

        if found {
            Ok(())
        } else {
            Err(Error::StreamNotFound {
                name: name.to_string(),
            })
        }
    }
}
