//! Error types for volley-protocol

use thiserror::Error;

/// Protocol error type
#[derive(Debug, Error)]
pub enum Error {
    /// Decode failure or unrecognized message tag
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for protocol operations
pub type Result<T> = std::result::Result<T, Error>;
