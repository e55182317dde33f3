//! Supervisor lifecycle
//!
//! The supervisor ties the registry, launcher, and health monitor into a
//! single-shot lifecycle: `start()` bulk-launches the configured streams
//! and spawns the monitor; `stop()` cancels the shared lifetime and
//! terminates whatever is still attached. Queries are served from
//! registry snapshots at any time in between.

pub mod monitor;
pub mod service;

pub use monitor::HealthMonitor;
pub use service::StreamSupervisor;
