//! Source classification
//!
//! Maps a source URL's shape to a transcoding strategy. The rules are
//! checked in a fixed order and the first match wins, so an RTMP URL that
//! happens to point at a `.m3u8` playlist is treated as HLS.

use serde::Serialize;

/// Transcoding strategy for a source URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Already-HLS origin, repackaged without re-encoding
    Hls,
    /// RTMP pull, re-encoded
    Rtmp,
    /// RTSP pull, re-encoded
    Rtsp,
    /// Local or remote file looped as a synthetic live source
    FileLoop,
}

impl SourceKind {
    /// Classify a source URL
    ///
    /// Returns `None` for URLs matching no rule; the caller reports an
    /// unsupported-source error and creates no registry entry.
    pub fn classify(url: &str) -> Option<SourceKind> {
        if url.contains(".m3u8") {
            return Some(SourceKind::Hls);
        }
        if url.starts_with("rtmp://") {
            return Some(SourceKind::Rtmp);
        }
        if url.starts_with("rtsp://") {
            return Some(SourceKind::Rtsp);
        }
        if url.contains(".mp4") {
            return Some(SourceKind::FileLoop);
        }
        None
    }

    /// Whether this kind copies streams unmodified
    pub fn is_passthrough(&self) -> bool {
        matches!(self, SourceKind::Hls)
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Hls => write!(f, "hls"),
            SourceKind::Rtmp => write!(f, "rtmp"),
            SourceKind::Rtsp => write!(f, "rtsp"),
            SourceKind::FileLoop => write!(f, "file-loop"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_hls() {
        assert_eq!(
            SourceKind::classify("https://cdn.example.com/live/index.m3u8"),
            Some(SourceKind::Hls)
        );
    }

    #[test]
    fn test_classify_rtmp() {
        assert_eq!(
            SourceKind::classify("rtmp://media.example.com/live/key"),
            Some(SourceKind::Rtmp)
        );
    }

    #[test]
    fn test_classify_rtsp() {
        assert_eq!(
            SourceKind::classify("rtsp://10.0.0.5:554/cam"),
            Some(SourceKind::Rtsp)
        );
    }

    #[test]
    fn test_classify_mp4_loop() {
        assert_eq!(
            SourceKind::classify("/data/loops/promo.mp4"),
            Some(SourceKind::FileLoop)
        );
        assert_eq!(
            SourceKind::classify("https://cdn.example.com/clip.mp4"),
            Some(SourceKind::FileLoop)
        );
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(SourceKind::classify("udp://239.0.0.1:5000"), None);
        assert_eq!(SourceKind::classify("https://example.com/page"), None);
        assert_eq!(SourceKind::classify(""), None);
    }

    #[test]
    fn test_classify_order_m3u8_wins() {
        // A playlist behind an rtmp scheme is still HLS: rule 1 is checked first
        assert_eq!(
            SourceKind::classify("rtmp://host/app/index.m3u8"),
            Some(SourceKind::Hls)
        );
    }

    #[test]
    fn test_passthrough() {
        assert!(SourceKind::Hls.is_passthrough());
        assert!(!SourceKind::Rtsp.is_passthrough());
        assert!(!SourceKind::FileLoop.is_passthrough());
    }
}
