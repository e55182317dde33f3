//! Self-healing HLS stream ingest supervisor
//!
//! `ingest-rs` pulls a set of named external media sources (HLS, RTMP,
//! RTSP, or a looping file) through an external transcoder into per-stream
//! HLS directories, keeps one process per source alive, and answers
//! status and playback-URL queries from concurrent callers.
//!
//! # Architecture
//!
//! ```text
//!   IngestConfig
//!        │
//!        ▼
//!   StreamSupervisor ──── start() ───► StreamLauncher ──► transcoder process
//!        │                                  │                    │
//!        │                                  ▼                    │ exit
//!        │                            StreamRegistry ◄── completion watcher
//!        │                                  ▲
//!        └── spawns ──► HealthMonitor ──────┘  (sweep + relaunch)
//! ```
//!
//! One completion watcher task runs per spawned process; a single monitor
//! task sweeps the registry on an interval and relaunches dead streams.
//! A shared `watch` channel, set once by [`StreamSupervisor::stop`],
//! cancels the monitor and makes every watcher kill its child.
//!
//! # Quick start
//!
//! ```no_run
//! use ingest_rs::{IngestConfig, StreamSupervisor};
//!
//! #[tokio::main]
//! async fn main() -> ingest_rs::Result<()> {
//!     let config = IngestConfig::with_output_dir("/var/lib/hls")
//!         .stream("cam1", "rtsp://10.0.0.5:554/stream")
//!         .stream("promo", "/data/loops/promo.mp4")
//!         .http_port(8081);
//!
//!     let supervisor = StreamSupervisor::new(config);
//!     supervisor.start().await?;
//!
//!     for stream in supervisor.list_streams().await {
//!         println!("{}: {}", stream.name, stream.status);
//!     }
//!
//!     tokio::signal::ctrl_c().await.ok();
//!     supervisor.stop().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ingest;
pub mod registry;
pub mod supervisor;

pub use config::IngestConfig;
pub use error::{Error, Result};
pub use ingest::{SourceKind, StreamLauncher};
pub use registry::{StreamRegistry, StreamSnapshot, StreamStatus};
pub use supervisor::{HealthMonitor, StreamSupervisor};
