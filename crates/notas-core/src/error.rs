//! Error types for notas-core

use thiserror::Error;

/// Result type alias using notas-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notas-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The request never completed (DNS, refused connection, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response arrived but its status was not a success
    #[error("Remote service error: {message} ({status})")]
    Transport { status: u16, message: String },

    /// Credential-specific failure from the auth endpoints
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Caller-supplied input failed a precondition
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Token store error
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status of a `Transport` failure, if this is one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}
