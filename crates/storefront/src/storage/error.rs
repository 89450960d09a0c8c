//! Storage error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the key-value storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A stored value does not decode as the expected JSON shape.
    #[error("malformed stored data under key '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    /// Reading or writing a store file failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A store file exists but is not a JSON object of strings.
    #[error("corrupt store file {path}: {source}")]
    CorruptFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
