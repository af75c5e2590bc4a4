//! Error types for `densest`.
//!
//! The peeling core and the graph model are infallible; errors come from the
//! edge-list readers, the dataset converter and the batch driver around them.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O failure without a known path.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O failure on a specific file or directory.
    #[error("io error on {}: {source}", .path.display())]
    File {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An edge-list line that does not hold exactly two names.
    #[error("line {line}: expected 2 tokens, found {tokens}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Number of tokens found on the line.
        tokens: usize,
    },

    /// `from -> to` is present but `to -> from` is not.
    #[error("asymmetric adjacency: {from} -> {to} has no reverse entry")]
    Asymmetric {
        /// Name of the source node.
        from: String,
        /// Name of the target node.
        to: String,
    },

    /// A `.time` file line that is not an unsigned nanosecond count.
    #[error("{}:{line}: invalid timing sample", .path.display())]
    InvalidSample {
        /// The timing file.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
    },

    /// JSON (de)serialization failure for configs, size registries and reports.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io_at(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}

/// Result type for `densest` operations.
pub type Result<T> = std::result::Result<T, Error>;
