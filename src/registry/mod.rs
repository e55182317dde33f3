//! Stream registry
//!
//! The registry is the concurrency-safe store of stream entries keyed by
//! name. Every other component reads and writes stream state through it.
//!
//! # Architecture
//!
//! ```text
//!                        Arc<StreamRegistry>
//!                   ┌──────────────────────────┐
//!                   │ streams: HashMap<String, │
//!                   │   StreamEntry {          │
//!                   │     status,              │
//!                   │     process: Handle?,    │
//!                   │   }                      │
//!                   │ >                        │
//!                   └────────────┬─────────────┘
//!                                │
//!        ┌───────────────────────┼───────────────────────┐
//!        │                       │                       │
//!        ▼                       ▼                       ▼
//!   [Launcher]            [HealthMonitor]           [Callers]
//!   attach handle         sweep + relaunch          list() / get()
//! ```
//!
//! Queries return [`StreamSnapshot`] value copies, so a caller can never
//! observe a torn entry or hold a reference into the locked map.

pub mod entry;
pub mod store;

pub use entry::{ProcessHandle, StreamEntry, StreamSnapshot, StreamStatus};
pub use store::StreamRegistry;
