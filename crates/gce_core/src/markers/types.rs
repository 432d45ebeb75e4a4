//! Marker parsing errors.

use std::path::PathBuf;

/// Errors from chapter marker parsing.
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    /// The metadata source could not be read.
    #[error("failed to read marker metadata from {}: {source}", path.display())]
    Io {
        /// The unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl MarkerError {
    /// Create an Io error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for marker operations.
pub type MarkerResult<T> = Result<T, MarkerError>;
