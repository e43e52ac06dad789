/// Application error types
use thiserror::Error;
use vibebeat_core::ErrorKind;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] vibebeat_client::ClientError),

    #[error(transparent)]
    Sync(#[from] vibebeat_sync::SyncError),

    #[error(transparent)]
    Playback(#[from] vibebeat_playback::PlaybackError),

    #[error(transparent)]
    Storage(#[from] vibebeat_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) => ErrorKind::ValidationFailure,
            AppError::Client(e) => e.kind(),
            AppError::Sync(e) => e.kind(),
            AppError::Playback(e) => e.kind(),
            AppError::Storage(e) => e.kind(),
            AppError::Io(_) => ErrorKind::Storage,
        }
    }
}
