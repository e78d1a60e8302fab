//! Error types for volley-session

use thiserror::Error;

/// Session error type
///
/// Nothing here is fatal to the process: every failure degrades to
/// "skip this message" or "await reconnect".
#[derive(Debug, Error)]
pub enum Error {
    /// The transport went away; the session transitions to `Disconnected`
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// An operation that requires a live connection was attempted without one
    #[error("session is not connected")]
    NotConnected,

    /// Message encode/decode failure
    #[error(transparent)]
    Protocol(#[from] volley_protocol::Error),

    /// Socket-level failure while establishing a connection
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, Error>;
