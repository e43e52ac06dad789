//! Playback Events
//!
//! Events are queued by the controller and drained by the UI after each
//! action to keep transport mirrors (time, volume, highlighted row) in sync.

use crate::types::{PlaybackState, QueueSource};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged { state: PlaybackState },

    /// Current song changed
    TrackChanged {
        filename: String,
        previous: Option<String>,
        index: usize,
    },

    /// Current song reached its end
    TrackFinished { filename: String },

    /// Position update from the transport
    PositionUpdate { position: f64, duration: f64 },

    /// Volume or mute changed
    VolumeChanged { level: u8, muted: bool },

    /// Active queue replaced
    QueueChanged { length: usize, source: QueueSource },

    /// Transport rejected a command
    Error { message: String },
}
