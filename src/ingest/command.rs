//! Transcoder invocation
//!
//! Builds the ffmpeg argument set for each source kind. All re-encoding
//! variants share the same HLS muxer parameters; only the input side and
//! codec selection differ.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::IngestConfig;

use super::source::SourceKind;

/// Segment filename pattern inside a stream directory
pub const SEGMENT_PATTERN: &str = "segment_%03d.ts";

/// Playlist filename inside a stream directory
pub const PLAYLIST_NAME: &str = "index.m3u8";

/// x264 preset for re-encoded sources
const VIDEO_PRESET: &str = "ultrafast";

/// AAC bitrate for re-encoded sources
const AUDIO_BITRATE: &str = "128k";

/// Build the transcoder argument vector for a source
pub fn transcode_args(
    config: &IngestConfig,
    kind: SourceKind,
    source_url: &str,
    stream_dir: &Path,
) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    match kind {
        SourceKind::Hls => {
            args.extend(["-i".into(), source_url.into()]);
            args.extend(["-c".into(), "copy".into()]);
        }
        SourceKind::Rtmp | SourceKind::Rtsp => {
            args.extend(["-i".into(), source_url.into()]);
            args.extend(reencode_args());
        }
        SourceKind::FileLoop => {
            args.extend(["-stream_loop".into(), "-1".into()]);
            args.extend(["-i".into(), source_url.into()]);
            args.extend(reencode_args());
        }
    }

    args.extend([
        "-f".into(),
        "hls".into(),
        "-hls_time".into(),
        config.segment_seconds.to_string(),
        "-hls_list_size".into(),
        config.playlist_size.to_string(),
        "-hls_flags".into(),
        "delete_segments".into(),
        "-hls_segment_filename".into(),
        stream_dir.join(SEGMENT_PATTERN).to_string_lossy().into_owned(),
    ]);
    args.push(stream_dir.join(PLAYLIST_NAME).to_string_lossy().into_owned());

    args
}

fn reencode_args() -> Vec<String> {
    vec![
        "-c:v".into(),
        "libx264".into(),
        "-preset".into(),
        VIDEO_PRESET.into(),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        AUDIO_BITRATE.into(),
    ]
}

/// Build the ready-to-spawn transcoder command for a source
///
/// Output is discarded; the segments on disk are the only artifact we
/// care about. `kill_on_drop` ensures a dropped watcher cannot leak a
/// transcoder process.
pub fn transcode_command(
    config: &IngestConfig,
    kind: SourceKind,
    source_url: &str,
    stream_dir: &Path,
) -> Command {
    let mut cmd = Command::new(&config.ffmpeg_bin);
    cmd.args(transcode_args(config, kind, source_url, stream_dir))
        .current_dir(stream_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    cmd
}
