//! VibeBeat - Playback Control
//!
//! Platform-agnostic playback state for VibeBeat.
//!
//! This crate provides:
//! - The playback state machine (Idle, Loaded, Playing, Paused)
//! - A play queue (ad-hoc song, whole library or playlist)
//! - Next/previous with a configurable end-of-queue policy (clamp or wrap)
//! - Repeat and shuffle flags that never reorder the queue
//! - Linear volume (0-100) with mute
//! - Seeking by pointer fraction
//!
//! Audio output is supplied through the [`Transport`] trait, and songs are
//! resolved through a catalog snapshot implementing
//! [`SongLookup`](vibebeat_core::SongLookup).
//!
//! # Example
//!
//! ```rust
//! use vibebeat_core::Song;
//! use vibebeat_playback::{NullTransport, PlaybackConfig, PlaybackController, PlaybackState};
//!
//! let catalog = vec![
//!     Song::new("a.mp3", "http://127.0.0.1:8000/play/a.mp3"),
//!     Song::new("b.mp3", "http://127.0.0.1:8000/play/b.mp3"),
//! ];
//!
//! let mut controller = PlaybackController::new(NullTransport, &PlaybackConfig::default());
//! controller.play_song(&catalog, "a.mp3").unwrap();
//! assert_eq!(controller.state(), PlaybackState::Playing);
//!
//! // Unknown songs fail without touching the current song
//! assert!(controller.play_song(&catalog, "missing.mp3").is_err());
//! assert_eq!(controller.current_song().unwrap().filename, "a.mp3");
//! ```

mod controller;
mod error;
mod events;
mod queue;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::PlayQueue;
pub use transport::{NullTransport, Transport};
pub use types::{PlaybackConfig, PlaybackState, QueueEndPolicy, QueueSource};
pub use volume::{Volume, VolumeIcon};
