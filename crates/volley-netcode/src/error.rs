//! Error types for volley-netcode

use thiserror::Error;

/// Netcode error type
#[derive(Debug, Error)]
pub enum Error {
    /// Input log reached its configured capacity
    #[error("input log full, cannot record more directives")]
    InputLogFull,
}

/// Result type for netcode operations
pub type Result<T> = std::result::Result<T, Error>;
