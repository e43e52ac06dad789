//! VibeBeat Core
//!
//! Platform-agnostic domain types and helpers shared by every VibeBeat crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Playlist`, `SongRef`
//! - **Lookup Trait**: `SongLookup`, implemented by catalog snapshots
//! - **Display Helpers**: title derivation and time formatting
//! - **Recently Played**: bounded most-recent-first history
//! - **Error Taxonomy**: `ErrorKind`, shared by every crate's error type
//!
//! # Example
//!
//! ```rust
//! use vibebeat_core::{format_display_title, RecentlyPlayed, Song};
//!
//! let song = Song::new("Midnight City.mp3", "http://localhost:8000/play/Midnight%20City.mp3");
//! assert_eq!(song.title, "Midnight City");
//! assert_eq!(format_display_title("intro.flac"), "intro");
//!
//! let mut recent = RecentlyPlayed::default();
//! recent.record(&song.filename);
//! assert_eq!(recent.to_vec(), vec!["Midnight City.mp3".to_string()]);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod recent;
pub mod title;
pub mod traits;
pub mod types;

pub use error::ErrorKind;
pub use recent::{RecentlyPlayed, DEFAULT_RECENTLY_PLAYED_LIMIT};
pub use title::{format_display_title, format_time, strip_extension};
pub use traits::SongLookup;
pub use types::{Playlist, PlaylistId, Song, SongRef, DEFAULT_ALBUM, DEFAULT_ARTIST};
