//! Stream ingest supervisor example
//!
//! Run with: cargo run --example supervise [NAME=URL]...
//!
//! Examples:
//!   cargo run --example supervise cam1=rtsp://10.0.0.5:554/stream
//!   cargo run --example supervise news=https://cdn.example.com/live.m3u8 promo=/data/promo.mp4
//!
//! Output is written to /tmp/public_streams/<name>/index.m3u8; serve that
//! directory with any static file server to play the streams. Press
//! ctrl-c to stop.

use std::time::Duration;

use ingest_rs::{IngestConfig, StreamSupervisor};

#[tokio::main]
async fn main() -> ingest_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut config = IngestConfig::default();
    for arg in std::env::args().skip(1) {
        match arg.split_once('=') {
            Some((name, url)) => {
                config = config.stream(name, url);
            }
            None => {
                eprintln!("Ignoring malformed argument (expected NAME=URL): {}", arg);
            }
        }
    }

    if config.streams.is_empty() {
        eprintln!("No streams configured; pass NAME=URL arguments");
        std::process::exit(1);
    }

    let supervisor = StreamSupervisor::new(config);
    supervisor.start().await?;

    // Print a status line every 10 seconds until ctrl-c
    let status = {
        let streams = supervisor.list_streams().await.len();
        println!("Supervising {} stream(s)", streams);
        tokio::spawn({
            let registry = std::sync::Arc::clone(supervisor.registry());
            async move {
                let mut ticker = tokio::time::interval(Duration::from_secs(10));
                ticker.tick().await;
                loop {
                    ticker.tick().await;
                    for snap in registry.list().await {
                        println!(
                            "{}: {} (viewers: {}, updated: {})",
                            snap.name, snap.status, snap.viewer_count, snap.last_update
                        );
                    }
                }
            }
        })
    };

    tokio::signal::ctrl_c().await.ok();
    status.abort();
    supervisor.stop().await;

    Ok(())
}
