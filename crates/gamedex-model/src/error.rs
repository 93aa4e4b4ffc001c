//! Error types for loading game records.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing or loading model data.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A platform tag did not match any known platform.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// I/O error while reading a catalog file.
    #[error("failed to read catalog file '{path}': {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
