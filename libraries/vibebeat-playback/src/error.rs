//! Error types for playback control

use thiserror::Error;
use vibebeat_core::ErrorKind;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Filename does not resolve in the catalog
    #[error("Song not found: {0}")]
    SongNotFound(String),

    /// No song is current
    #[error("No song loaded")]
    NoTrackLoaded,

    /// Queue or playlist has no entries
    #[error("No songs to play")]
    QueueEmpty,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Transport rejected a command
    #[error("Transport error: {0}")]
    Transport(String),
}

impl PlaybackError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlaybackError::SongNotFound(_) => ErrorKind::NotFound,
            PlaybackError::NoTrackLoaded
            | PlaybackError::QueueEmpty
            | PlaybackError::IndexOutOfBounds(_) => ErrorKind::ValidationFailure,
            PlaybackError::Transport(_) => ErrorKind::BackendFailure,
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
