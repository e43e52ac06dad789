/// Storage-specific errors
use thiserror::Error;
use vibebeat_core::ErrorKind;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Login form rejected
    #[error("{0}")]
    InvalidLogin(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::InvalidLogin(_) => ErrorKind::ValidationFailure,
            StorageError::SerializationError(_) | StorageError::Io(_) => ErrorKind::Storage,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}
