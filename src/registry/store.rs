//! Stream registry implementation
//!
//! The central registry that tracks every configured stream and the
//! transcoding process attached to it.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::entry::{StreamEntry, StreamSnapshot};

/// Central registry for all configured streams
///
/// Thread-safe via `RwLock`. Queries take the shared lock and return value
/// copies; mutations take the exclusive lock and hold it only for the
/// in-memory change, never across a process spawn or wait.
pub struct StreamRegistry {
    /// Map of stream name to stream entry
    streams: RwLock<HashMap<String, StreamEntry>>,
}

impl StreamRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            streams: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or update an entry
    ///
    /// If no entry exists for `name`, one is created from `name` and
    /// `source_url` before `apply` runs. `name` and `source_url` of an
    /// existing entry are never overwritten.
    pub async fn upsert<F>(&self, name: &str, source_url: &str, apply: F)
    where
        F: FnOnce(&mut StreamEntry),
    {
        let mut streams = self.streams.write().await;
        let entry = streams
            .entry(name.to_string())
            .or_insert_with(|| StreamEntry::new(name, source_url));
        apply(entry);
    }

    /// Mutate an existing entry
    ///
    /// Returns `false` if the registry has no entry for `name`.
    pub async fn update<F>(&self, name: &str, apply: F) -> bool
    where
        F: FnOnce(&mut StreamEntry),
    {
        let mut streams = self.streams.write().await;
        match streams.get_mut(name) {
            Some(entry) => {
                apply(entry);
                true
            }
            None => false,
        }
    }

    /// Get a snapshot of a single entry
    pub async fn get(&self, name: &str) -> Option<StreamSnapshot> {
        let streams = self.streams.read().await;
        streams.get(name).map(StreamEntry::snapshot)
    }

    /// Get snapshots of all entries
    ///
    /// Returns value copies so callers cannot observe a torn or
    /// later-mutated entry.
    pub async fn list(&self) -> Vec<StreamSnapshot> {
        let streams = self.streams.read().await;
        streams.values().map(StreamEntry::snapshot).collect()
    }

    /// Remove an entry
    ///
    /// Not used during normal operation; a dead source degrades to
    /// `Inactive` or `Error` instead of being removed.
    pub async fn remove(&self, name: &str) -> bool {
        let mut streams = self.streams.write().await;
        streams.remove(name).is_some()
    }

    /// Number of entries
    pub async fn len(&self) -> usize {
        self.streams.read().await.len()
    }

    /// Check whether the registry is empty
    pub async fn is_empty(&self) -> bool {
        self.streams.read().await.is_empty()
    }

    /// Run one exclusive pass over all entries
    ///
    /// Used by the health sweep and by shutdown termination. The closure
    /// must not block; the write lock is held for the whole pass.
    pub async fn for_each_mut<F>(&self, mut visit: F)
    where
        F: FnMut(&mut StreamEntry),
    {
        let mut streams = self.streams.write().await;
        for entry in streams.values_mut() {
            visit(entry);
        }
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::new()
    }
}
