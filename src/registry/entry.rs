//! Stream entry and state types
//!
//! This module defines the per-stream state stored in the registry.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Status of a stream entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    /// A transcoding process is attached and believed to be running
    Active,
    /// The process exited; the monitor will attempt a restart
    Inactive,
    /// The process could not be started
    Error,
}

impl std::fmt::Display for StreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamStatus::Active => write!(f, "active"),
            StreamStatus::Inactive => write!(f, "inactive"),
            StreamStatus::Error => write!(f, "error"),
        }
    }
}

/// Ownership token for a running transcoding process
///
/// `launch_id` is unique per spawn. A completion watcher only clears a
/// handle whose `launch_id` matches the one it was spawned with, so a
/// stale watcher cannot downgrade an entry that has been relaunched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    /// Spawn generation this handle belongs to
    pub launch_id: u64,
    /// OS process id, if the runtime reported one
    pub pid: Option<u32>,
}

/// Entry for a single stream in the registry
#[derive(Debug)]
pub struct StreamEntry {
    /// Stream name, immutable after creation
    pub name: String,

    /// Origin URL, immutable after creation (restarts reuse it)
    pub source_url: String,

    /// Current status
    pub status: StreamStatus,

    /// Refreshed by every health sweep and every state transition
    pub last_update: DateTime<Utc>,

    /// Informational viewer counter, maintained by a collaborator
    pub viewer_count: u32,

    /// Handle of the attached process, `None` when not running
    pub process: Option<ProcessHandle>,
}

impl StreamEntry {
    /// Create a new entry with no process attached
    pub(super) fn new(name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            status: StreamStatus::Inactive,
            last_update: Utc::now(),
            viewer_count: 0,
            process: None,
        }
    }

    /// Check whether a process is attached
    pub fn has_process(&self) -> bool {
        self.process.is_some()
    }

    /// Mark a status transition, refreshing `last_update`
    pub fn set_status(&mut self, status: StreamStatus) {
        self.status = status;
        self.last_update = Utc::now();
    }

    /// Attach a new process handle, replacing any previous one
    pub fn attach(&mut self, handle: ProcessHandle) {
        self.process = Some(handle);
        self.set_status(StreamStatus::Active);
    }

    /// Value copy for query surfaces
    pub fn snapshot(&self) -> StreamSnapshot {
        StreamSnapshot {
            name: self.name.clone(),
            source_url: self.source_url.clone(),
            status: self.status,
            last_update: self.last_update,
            viewer_count: self.viewer_count,
        }
    }
}

/// Point-in-time copy of a stream entry, safe to hand to callers
#[derive(Debug, Clone, Serialize)]
pub struct StreamSnapshot {
    /// Stream name
    pub name: String,
    /// Origin URL
    pub source_url: String,
    /// Status at snapshot time
    pub status: StreamStatus,
    /// Last registry touch
    pub last_update: DateTime<Utc>,
    /// Informational viewer counter
    pub viewer_count: u32,
}
