//! Crate error types
//!
//! Error types for launch, query, and filesystem operations.

use crate::registry::StreamStatus;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for supervisor operations
#[derive(Debug)]
pub enum Error {
    /// Source URL matched none of the classification rules
    UnsupportedSource {
        /// The rejected URL
        url: String,
    },
    /// The transcoding process failed to start
    LaunchFailure {
        /// Stream the launch was for
        name: String,
        /// Underlying spawn error
        source: std::io::Error,
    },
    /// Query for a stream name the registry does not know
    StreamNotFound {
        /// The unknown name
        name: String,
    },
    /// Playback URL requested for a stream that is not active
    StreamNotActive {
        /// Stream name
        name: String,
        /// Status the stream was in
        status: StreamStatus,
    },
    /// Filesystem error (output directory creation and similar)
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnsupportedSource { url } => write!(f, "Unsupported source format: {}", url),
            Error::LaunchFailure { name, source } => {
                write!(f, "Failed to launch stream {}: {}", name, source)
            }
            Error::StreamNotFound { name } => write!(f, "Stream not found: {}", name),
            Error::StreamNotActive { name, status } => {
                write!(f, "Stream {} is {}", name, status)
            }
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::LaunchFailure { source, .. } => Some(source),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_unsupported() {
        let err = Error::UnsupportedSource {
            url: "udp://10.0.0.1:5000".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported source format: udp://10.0.0.1:5000");
    }

    #[test]
    fn test_display_not_active() {
        let err = Error::StreamNotActive {
            name: "cam1".to_string(),
            status: StreamStatus::Error,
        };
        assert_eq!(err.to_string(), "Stream cam1 is error");
    }

    #[test]
    fn test_launch_failure_source() {
        use std::error::Error as _;

        let err = Error::LaunchFailure {
            name: "cam1".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.source().is_some());
    }
}
