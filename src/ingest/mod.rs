//! Process launching
//!
//! Everything between a configured source URL and a running transcoder:
//! classification of the URL into a strategy, construction of the
//! invocation, spawning, and the per-process completion watcher.

pub mod command;
pub mod launcher;
pub(crate) mod process;
pub mod source;

pub use command::{PLAYLIST_NAME, SEGMENT_PATTERN};
pub use launcher::StreamLauncher;
pub use source::SourceKind;
