//! Error types for the VibeBeat client.

use thiserror::Error;
use vibebeat_core::ErrorKind;

/// Errors that can occur when talking to the VibeBeat backend.
///
/// Errors are `Clone` so a single failed refresh can be handed to every
/// caller that was waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Request never produced a response
    #[error("Network failure: {0}")]
    Network(String),

    /// Request exceeded its timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Backend returned a non-success status
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(String),
}

impl ClientError {
    /// Category of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) => ErrorKind::NetworkFailure,
            ClientError::Timeout(_) => ErrorKind::Timeout,
            ClientError::Backend { .. } | ClientError::ParseError(_) => ErrorKind::BackendFailure,
            ClientError::InvalidUrl(_) => ErrorKind::ValidationFailure,
            ClientError::FileNotFound(_) => ErrorKind::NotFound,
            ClientError::Io(_) => ErrorKind::Storage,
        }
    }

    /// HTTP status for backend failures
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout(e.to_string())
        } else if e.is_decode() {
            ClientError::ParseError(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Backend {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Io(e.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
