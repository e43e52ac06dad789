//! Domain types

mod playlist;
mod song;

pub use playlist::{Playlist, PlaylistId};
pub use song::{Song, SongRef, DEFAULT_ALBUM, DEFAULT_ARTIST};
