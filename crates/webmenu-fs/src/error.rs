//! Error types for discovery and writing.

use std::path::PathBuf;

/// Error reading page sources.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A discovered page could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Page file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Error writing the finished tree.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// A file or directory could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}
