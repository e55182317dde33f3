//! Supervisor configuration

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Ingest supervisor configuration options
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Root directory for HLS output (one subdirectory per stream)
    pub output_dir: PathBuf,

    /// Configured streams: name -> source URL
    pub streams: HashMap<String, String>,

    /// HLS segment duration in seconds
    pub segment_seconds: u32,

    /// Number of segments kept in the playlist
    pub playlist_size: u32,

    /// Host used when constructing playback URLs
    pub http_host: String,

    /// Port used when constructing playback URLs
    pub http_port: u16,

    /// Transcoder binary to invoke
    pub ffmpeg_bin: PathBuf,

    /// Health sweep interval
    pub monitor_interval: Duration,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("/tmp/public_streams"),
            streams: HashMap::new(),
            segment_seconds: 2,
            playlist_size: 5,
            http_host: "localhost".to_string(),
            http_port: 8081,
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            monitor_interval: Duration::from_secs(30),
        }
    }
}

impl IngestConfig {
    /// Create a new config with a custom output directory
    pub fn with_output_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Add a configured stream
    pub fn stream(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.streams.insert(name.into(), url.into());
        self
    }

    /// Replace the configured stream map
    pub fn streams(mut self, streams: HashMap<String, String>) -> Self {
        self.streams = streams;
        self
    }

    /// Set the segment duration in seconds
    pub fn segment_seconds(mut self, seconds: u32) -> Self {
        self.segment_seconds = seconds;
        self
    }

    /// Set the playlist size
    pub fn playlist_size(mut self, size: u32) -> Self {
        self.playlist_size = size;
        self
    }

    /// Set the playback host
    pub fn http_host(mut self, host: impl Into<String>) -> Self {
        self.http_host = host.into();
        self
    }

    /// Set the playback port
    pub fn http_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }

    /// Set the transcoder binary path
    pub fn ffmpeg_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.ffmpeg_bin = bin.into();
        self
    }

    /// Set the health sweep interval
    pub fn monitor_interval(mut self, interval: Duration) -> Self {
        self.monitor_interval = interval;
        self
    }

    /// Directory a stream's segments and playlist are written to
    pub fn stream_dir(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IngestConfig::default();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/public_streams"));
        assert!(config.streams.is_empty());
        assert_eq!(config.segment_seconds, 2);
        assert_eq!(config.playlist_size, 5);
        assert_eq!(config.http_host, "localhost");
        assert_eq!(config.http_port, 8081);
        assert_eq!(config.ffmpeg_bin, PathBuf::from("ffmpeg"));
        assert_eq!(config.monitor_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_with_output_dir() {
        let config = IngestConfig::with_output_dir("/var/lib/hls");

        assert_eq!(config.output_dir, PathBuf::from("/var/lib/hls"));
        assert_eq!(config.http_port, 8081);
    }

    #[test]
    fn test_builder_stream() {
        let config = IngestConfig::default().stream("cam1", "rtsp://host/stream");

        assert_eq!(
            config.streams.get("cam1").map(String::as_str),
            Some("rtsp://host/stream")
        );
    }

    #[test]
    fn test_builder_streams_replaces() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), "rtmp://h/a".to_string());

        let config = IngestConfig::default().stream("cam1", "rtsp://h/s").streams(map);

        assert_eq!(config.streams.len(), 1);
        assert!(config.streams.contains_key("a"));
    }

    #[test]
    fn test_builder_segment_seconds() {
        let config = IngestConfig::default().segment_seconds(6);

        assert_eq!(config.segment_seconds, 6);
    }

    #[test]
    fn test_builder_monitor_interval() {
        let config = IngestConfig::default().monitor_interval(Duration::from_secs(5));

        assert_eq!(config.monitor_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_stream_dir() {
        let config = IngestConfig::with_output_dir("/out");

        assert_eq!(config.stream_dir("cam1"), PathBuf::from("/out/cam1"));
    }

    #[test]
    fn test_builder_chaining() {
        let config = IngestConfig::default()
            .output_dir("/srv/hls")
            .stream("cam1", "rtsp://h/s")
            .segment_seconds(4)
            .playlist_size(8)
            .http_host("media.example.com")
            .http_port(9000)
            .ffmpeg_bin("/usr/local/bin/ffmpeg")
            .monitor_interval(Duration::from_secs(10));

        assert_eq!(config.output_dir, PathBuf::from("/srv/hls"));
        assert_eq!(config.streams.len(), 1);
        assert_eq!(config.segment_seconds, 4);
        assert_eq!(config.playlist_size, 8);
        assert_eq!(config.http_host, "media.example.com");
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.ffmpeg_bin, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.monitor_interval, Duration::from_secs(10));
    }
}
