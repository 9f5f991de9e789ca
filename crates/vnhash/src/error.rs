//! Error types for the ring library.
//!
//! Ring operations themselves never fail: misses, unknown nodes and
//! out-of-range replica counts are signalled through return values or
//! clamped. Errors only come from loading a ring description.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for the ring library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a ring from configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("failed to read ring config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is malformed.
    #[error("invalid ring config: {0}")]
    Config(#[from] serde_json::Error),

    /// A hash algorithm name that is not built in.
    #[error("unknown hash algorithm: {0:?} (expected xxh3, fnv1 or sip13)")]
    UnknownHasher(String),
}
