//! Stream launcher
//!
//! Classifies a source URL, starts the matching transcoder invocation,
//! records the result in the registry, and watches for completion.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::process::Child;
use tokio::sync::watch;

use crate::config::IngestConfig;
use crate::error::{Error, Result};
use crate::registry::{ProcessHandle, StreamRegistry, StreamStatus};

use super::command::transcode_command;
use super::source::SourceKind;

/// Launches transcoding processes and wires them into the registry
pub struct StreamLauncher {
    config: IngestConfig,
    registry: Arc<StreamRegistry>,
    shutdown_rx: watch::Receiver<bool>,
    next_launch_id: AtomicU64,
}

impl StreamLauncher {
    /// Create a launcher
    pub fn new(
        config: IngestConfig,
        registry: Arc<StreamRegistry>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            config,
            registry,
            shutdown_rx,
            next_launch_id: AtomicU64::new(1),
        }
    }

    /// Launch the transcoder for a stream
    ///
    /// `name` and `source_url` must be non-empty. On success the entry is
    /// `Active` with a fresh process handle and a completion watcher is
    /// running. An unclassifiable URL is rejected without creating an
    /// entry; a spawn failure records the entry as `Error`.
    pub async fn launch(&self, name: &str, source_url: &str) -> Result<()> {
        let kind = SourceKind::classify(source_url).ok_or_else(|| Error::UnsupportedSource {
            url: source_url.to_string(),
        })?;

        let stream_dir = self.config.stream_dir(name);
        tokio::fs::create_dir_all(&stream_dir).await?;

        tracing::info!(stream = %name, kind = %kind, url = %source_url, "Launching stream");

        let mut cmd = transcode_command(&self.config, kind, source_url, &stream_dir);
        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                self.registry
                    .upsert(name, source_url, |entry| {
                        entry.process = None;
                        entry.set_status(StreamStatus::Error);
                    })
                    .await;
                tracing::error!(stream = %name, error = %e, "Failed to spawn transcoder");
                return Err(Error::LaunchFailure {
                    name: name.to_string(),
                    source: e,
                });
            }
        };

        let handle = ProcessHandle {
            launch_id: self.next_launch_id.fetch_add(1, Ordering::Relaxed),
            pid: child.id(),
        };

        // Attaching replaces any previous handle, so at most one live
        // handle exists per name.
        self.registry
            .upsert(name, source_url, |entry| entry.attach(handle))
            .await;

        tracing::info!(stream = %name, pid = ?handle.pid, "Stream active");

        tokio::spawn(watch_completion(
            Arc::clone(&self.registry),
            self.shutdown_rx.clone(),
            name.to_string(),
            handle.launch_id,
            child,
        ));

        Ok(())
    }
}

/// Wait for a transcoder to finish and record the outcome
///
/// Runs as one task per spawn and owns the child. On shutdown the child
/// is killed and reaped here. The registry entry is only touched if it
/// still carries this watcher's `launch_id`.
async fn watch_completion(
    registry: Arc<StreamRegistry>,
    mut shutdown_rx: watch::Receiver<bool>,
    name: String,
    launch_id: u64,
    mut child: Child,
) {
    let already_stopping = *shutdown_rx.borrow();
    let status = if already_stopping {
        let _ = child.start_kill();
        child.wait().await
    } else {
        tokio::select! {
            status = child.wait() => status,
            _ = shutdown_rx.changed() => {
                if let Err(e) = child.start_kill() {
                    tracing::debug!(stream = %name, error = %e, "Kill request failed");
                }
                child.wait().await
            }
        }
    };

    match status {
        Ok(exit) => tracing::info!(stream = %name, exit = %exit, "Transcoder exited"),
        Err(e) => tracing::warn!(stream = %name, error = %e, "Lost track of transcoder"),
    }

    registry
        .update(&name, |entry| {
            if entry.process.map(|h| h.launch_id) == Some(launch_id) {
                entry.process = None;
                if entry.status == StreamStatus::Active {
                    entry.set_status(StreamStatus::Inactive);
                }
            }
        })
        .await;
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::registry::StreamSnapshot;

    fn launcher_with_bin(bin: &str, dir: &std::path::Path) -> (StreamLauncher, Arc<StreamRegistry>, watch::Sender<bool>) {
        let registry = Arc::new(StreamRegistry::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let config = IngestConfig::with_output_dir(dir).ffmpeg_bin(bin);
        let launcher = StreamLauncher::new(config, Arc::clone(&registry), shutdown_rx);
        (launcher, registry, shutdown_tx)
    }

    async fn wait_for<F>(registry: &StreamRegistry, name: &str, mut pred: F) -> StreamSnapshot
    where
        F: FnMut(&StreamSnapshot) -> bool,
    {
        for _ in 0..150 {
            if let Some(snap) = registry.get(name).await {
                if pred(&snap) {
                    return snap;
                }
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("condition not reached for stream {}", name);
    }

    #[tokio::test]
    async fn test_unsupported_url_creates_no_entry() {
        let dir = tempfile::tempdir().unwrap();
        let (launcher, registry, _tx) = launcher_with_bin("true", dir.path());

        let result = launcher.launch("cam1", "udp://239.0.0.1:5000").await;

        assert!(matches!(result, Err(Error::UnsupportedSource { .. })));
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn test_spawn_failure_records_error() {
        let dir = tempfile::tempdir().unwrap();
        let (launcher, registry, _tx) =
            launcher_with_bin("/nonexistent/transcoder-binary", dir.path());

        let result = launcher.launch("cam1", "rtsp://host/stream").await;

        assert!(matches!(result, Err(Error::LaunchFailure { .. })));
        let snap = registry.get("cam1").await.unwrap();
        assert_eq!(snap.status, StreamStatus::Error);
    }

    #[tokio::test]
    async fn test_instant_exit_goes_inactive() {
        let dir = tempfile::tempdir().unwrap();
        // `true` ignores its arguments and exits immediately
        let (launcher, registry, _tx) = launcher_with_bin("true", dir.path());

        launcher.launch("cam1", "rtsp://host/stream").await.unwrap();

        let snap = wait_for(&registry, "cam1", |s| s.status == StreamStatus::Inactive).await;
        assert_eq!(snap.source_url, "rtsp://host/stream");
        let mut has_handle = true;
        registry
            .for_each_mut(|e| has_handle = e.process.is_some())
            .await;
        assert!(!has_handle);
    }

    #[tokio::test]
    async fn test_long_running_stays_active() {
        let dir = tempfile::tempdir().unwrap();
        // `yes` ignores the meaning of its arguments and runs until killed
        let (launcher, registry, shutdown_tx) = launcher_with_bin("yes", dir.path());

        launcher.launch("cam1", "rtsp://host/stream").await.unwrap();

        let snap = registry.get("cam1").await.unwrap();
        assert_eq!(snap.status, StreamStatus::Active);

        // Shutdown propagates to the watcher, which kills and reaps
        shutdown_tx.send(true).unwrap();
        wait_for(&registry, "cam1", |s| s.status == StreamStatus::Inactive).await;
    }

    #[tokio::test]
    async fn test_launch_during_shutdown_is_reaped() {
        let dir = tempfile::tempdir().unwrap();
        let (launcher, registry, shutdown_tx) = launcher_with_bin("yes", dir.path());

        shutdown_tx.send(true).unwrap();
        launcher.launch("cam1", "rtsp://host/stream").await.unwrap();

        wait_for(&registry, "cam1", |s| s.status == StreamStatus::Inactive).await;
    }

    #[tokio::test]
    async fn test_relaunch_replaces_handle() {
        let dir = tempfile::tempdir().unwrap();
        let (launcher, registry, _tx) = launcher_with_bin("true", dir.path());

        launcher.launch("cam1", "rtsp://host/stream").await.unwrap();
        wait_for(&registry, "cam1", |s| s.status == StreamStatus::Inactive).await;

        launcher.launch("cam1", "rtsp://host/stream").await.unwrap();

        // The stale watcher from the first launch must not clear the new
        // handle; the entry ends up Inactive only via the second watcher.
        wait_for(&registry, "cam1", |s| s.status == StreamStatus::Inactive).await;
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_stream_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let (launcher, _registry, _tx) = launcher_with_bin("true", dir.path());

        launcher.launch("cam1", "rtsp://host/stream").await.unwrap();

        assert!(dir.path().join("cam1").is_dir());
    }
}
