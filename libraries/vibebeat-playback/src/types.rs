//! Core types for playback control

use serde::{Deserialize, Serialize};
use vibebeat_core::{PlaylistId, DEFAULT_RECENTLY_PLAYED_LIMIT};

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No current song
    Idle,

    /// Current song set, transport paused
    Loaded,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl PlaybackState {
    /// Whether a song is current
    pub fn has_song(self) -> bool {
        !matches!(self, PlaybackState::Idle)
    }
}

/// What `next`/`previous` do at the ends of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueEndPolicy {
    /// Stay put at the first/last entry
    #[default]
    Clamp,

    /// Jump to the other end
    Wrap,
}

/// Where the active queue came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueSource {
    /// A single song played on its own
    AdHoc,

    /// The whole catalog
    Library,

    /// A server-backed playlist
    Playlist { id: PlaylistId, name: String },
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 70)
    pub volume: u8,

    /// End-of-queue behavior for next/previous (default: Clamp)
    pub queue_end: QueueEndPolicy,

    /// Recently played capacity (default: 20)
    pub recently_played_limit: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 70,
            queue_end: QueueEndPolicy::Clamp,
            recently_played_limit: DEFAULT_RECENTLY_PLAYED_LIMIT,
        }
    }
}
