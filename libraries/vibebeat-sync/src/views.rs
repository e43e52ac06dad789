//! View models
//!
//! Plain data built from cache snapshots, ready for any renderer. Builders
//! never fail: a playlist entry missing from the catalog renders under its
//! raw filename and is flagged unavailable.

use crate::catalog::Catalog;
use serde::Serialize;
use vibebeat_core::{format_time, Playlist, PlaylistId, RecentlyPlayed, Song, SongLookup};
use vibebeat_playback::{PlayQueue, PlaybackController, PlaybackState, Transport, VolumeIcon};

/// Shown when the catalog is empty
pub const EMPTY_LIBRARY_MESSAGE: &str = "No songs uploaded";

/// Shown when a playlist has no entries
pub const EMPTY_PLAYLIST_MESSAGE: &str = "No songs in this playlist";

/// Number of entries on the home screen's recently played row
pub const RECENT_VIEW_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongCard {
    pub filename: String,
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl From<&Song> for SongCard {
    fn from(song: &Song) -> Self {
        Self {
            filename: song.filename.clone(),
            title: song.title.clone(),
            artist: song.artist.clone(),
            album: song.album.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryView {
    pub cards: Vec<SongCard>,
    /// Set when there is nothing to show
    pub empty_message: Option<&'static str>,
}

pub fn library_view(catalog: &Catalog) -> LibraryView {
    LibraryView {
        cards: catalog.songs().iter().map(SongCard::from).collect(),
        empty_message: catalog.is_empty().then_some(EMPTY_LIBRARY_MESSAGE),
    }
}

/// Playlist entry in the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarEntry {
    pub id: PlaylistId,
    /// Name, with the song count appended when non-zero: "Mix (2)"
    pub label: String,
    pub active: bool,
}

pub fn sidebar(playlists: &[Playlist], selected: Option<PlaylistId>) -> Vec<SidebarEntry> {
    playlists
        .iter()
        .map(|p| SidebarEntry {
            id: p.id,
            label: if p.is_empty() {
                p.name.clone()
            } else {
                format!("{} ({})", p.name, p.len())
            },
            active: selected == Some(p.id),
        })
        .collect()
}

/// Playlist tile in the playlists grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistCard {
    pub id: PlaylistId,
    pub name: String,
    pub description: String,
    pub count_label: String,
}

pub fn playlist_cards(playlists: &[Playlist]) -> Vec<PlaylistCard> {
    playlists
        .iter()
        .map(|p| PlaylistCard {
            id: p.id,
            name: p.name.clone(),
            description: p.description_or_empty().to_string(),
            count_label: format!("{} songs", p.len()),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistRow {
    /// 1-based
    pub position: usize,
    pub filename: String,
    pub title: String,
    /// Whether the entry resolves in the catalog
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistDetailView {
    pub id: PlaylistId,
    pub title: String,
    pub description: String,
    pub info: String,
    pub rows: Vec<PlaylistRow>,
    pub empty_message: Option<&'static str>,
}

impl PlaylistDetailView {
    pub fn build(playlist: &Playlist, catalog: &(impl SongLookup + ?Sized)) -> Self {
        let rows = playlist
            .filenames()
            .enumerate()
            .map(|(i, filename)| PlaylistRow {
                position: i + 1,
                filename: filename.to_string(),
                title: catalog.display_title(filename),
                available: catalog.has_song(filename),
            })
            .collect();

        Self {
            id: playlist.id,
            title: playlist.name.clone(),
            description: playlist.description_or_empty().to_string(),
            info: format!("{} song(s)", playlist.len()),
            rows,
            empty_message: playlist.is_empty().then_some(EMPTY_PLAYLIST_MESSAGE),
        }
    }
}

/// Catalog songs not yet in `playlist`, offered in the add-songs picker
pub fn add_candidates(catalog: &Catalog, playlist: &Playlist) -> Vec<SongCard> {
    catalog
        .songs()
        .iter()
        .filter(|s| !playlist.contains(&s.filename))
        .map(SongCard::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueRow {
    pub index: usize,
    pub filename: String,
    pub title: String,
    pub active: bool,
}

pub fn queue_view(queue: &PlayQueue, catalog: &(impl SongLookup + ?Sized)) -> Vec<QueueRow> {
    let current = queue.current_index();
    queue
        .entries()
        .iter()
        .enumerate()
        .map(|(index, filename)| QueueRow {
            index,
            filename: filename.clone(),
            title: catalog.display_title(filename),
            active: current == Some(index),
        })
        .collect()
}

/// Liked songs that are still in the catalog, in catalog order
pub fn liked_view(catalog: &Catalog, liked: &[String]) -> Vec<SongCard> {
    catalog
        .songs()
        .iter()
        .filter(|s| liked.iter().any(|l| *l == s.filename))
        .map(SongCard::from)
        .collect()
}

/// Most recent plays that still resolve, newest first
pub fn recent_view(catalog: &Catalog, recent: &RecentlyPlayed) -> Vec<SongCard> {
    recent
        .iter()
        .filter_map(|filename| catalog.lookup(filename))
        .take(RECENT_VIEW_LIMIT)
        .map(SongCard::from)
        .collect()
}

/// Player bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowPlaying {
    pub song: Option<SongCard>,
    pub state: PlaybackState,
    pub elapsed: String,
    pub total: String,
    /// 0.0 to 1.0
    pub progress: f64,
    pub volume: u8,
    pub volume_icon: VolumeIcon,
    pub repeat: bool,
    pub shuffle: bool,
    pub liked: bool,
}

impl NowPlaying {
    pub fn build<T: Transport>(controller: &PlaybackController<T>, liked: &[String]) -> Self {
        let song = controller.current_song();
        Self {
            liked: song.is_some_and(|s| liked.iter().any(|l| *l == s.filename)),
            song: song.map(SongCard::from),
            state: controller.state(),
            elapsed: format_time(controller.position()),
            total: format_time(controller.duration()),
            progress: controller.progress(),
            volume: controller.volume().level(),
            volume_icon: controller.volume().icon(),
            repeat: controller.is_repeat(),
            shuffle: controller.is_shuffle(),
        }
    }
}
