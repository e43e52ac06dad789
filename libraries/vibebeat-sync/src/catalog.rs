//! Catalog cache
//!
//! In-memory mirror of the backend's song list. Every refresh builds a new
//! [`Catalog`] and swaps it in whole; readers holding a snapshot keep seeing
//! the old one.

use crate::error::Result;
use crate::single_flight::SingleFlight;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};
use vibebeat_client::MusicBackend;
use vibebeat_core::{Song, SongLookup};

/// Immutable snapshot of the song catalog, keyed by filename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    songs: Vec<Song>,
    index: HashMap<String, usize>,
}

/// Songs matching a search query, grouped by the field that matched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub songs: Vec<Song>,
    pub artists: Vec<Song>,
    pub albums: Vec<Song>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty() && self.artists.is_empty() && self.albums.is_empty()
    }
}

/// Songs grouped by artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistGroup {
    pub name: String,
    pub songs: Vec<Song>,
}

/// Songs grouped by album
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumGroup {
    pub name: String,
    /// Artist of the first song on the album
    pub artist: String,
    pub songs: Vec<Song>,
}

impl Catalog {
    /// Build a catalog; a repeated filename keeps its first record
    pub fn from_songs(songs: impl IntoIterator<Item = Song>) -> Self {
        let mut catalog = Self::default();
        for song in songs {
            if catalog.index.contains_key(&song.filename) {
                debug!(file = %song.filename, "Skipping duplicate catalog entry");
                continue;
            }
            catalog
                .index
                .insert(song.filename.clone(), catalog.songs.len());
            catalog.songs.push(song);
        }
        catalog
    }

    /// Songs in backend order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.songs.iter().map(|s| s.filename.as_str())
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Case-insensitive substring search over title, artist and album
    pub fn search(&self, query: &str) -> SearchResults {
        let query = query.trim().to_lowercase();
        let mut results = SearchResults::default();
        if query.is_empty() {
            return results;
        }

        for song in &self.songs {
            if song.title.to_lowercase().contains(&query) {
                results.songs.push(song.clone());
            }
            if song.artist.to_lowercase().contains(&query) {
                results.artists.push(song.clone());
            }
            if song.album.to_lowercase().contains(&query) {
                results.albums.push(song.clone());
            }
        }
        results
    }

    /// Unique artists in first-seen order
    pub fn artists(&self) -> Vec<ArtistGroup> {
        let mut groups: Vec<ArtistGroup> = Vec::new();
        for song in &self.songs {
            match groups.iter_mut().find(|g| g.name == song.artist) {
                Some(group) => group.songs.push(song.clone()),
                None => groups.push(ArtistGroup {
                    name: song.artist.clone(),
                    songs: vec![song.clone()],
                }),
            }
        }
        groups
    }

    /// Unique albums in first-seen order
    pub fn albums(&self) -> Vec<AlbumGroup> {
        let mut groups: Vec<AlbumGroup> = Vec::new();
        for song in &self.songs {
            match groups.iter_mut().find(|g| g.name == song.album) {
                Some(group) => group.songs.push(song.clone()),
                None => groups.push(AlbumGroup {
                    name: song.album.clone(),
                    artist: song.artist.clone(),
                    songs: vec![song.clone()],
                }),
            }
        }
        groups
    }
}

impl SongLookup for Catalog {
    fn lookup(&self, filename: &str) -> Option<&Song> {
        self.index.get(filename).and_then(|&i| self.songs.get(i))
    }
}

/// Shared, refreshable catalog
pub struct CatalogCache {
    backend: Arc<dyn MusicBackend>,
    current: Arc<RwLock<Arc<Catalog>>>,
    flight: SingleFlight<Catalog>,
}

impl CatalogCache {
    pub fn new(backend: Arc<dyn MusicBackend>) -> Self {
        Self {
            backend,
            current: Arc::new(RwLock::new(Arc::new(Catalog::default()))),
            flight: SingleFlight::new("catalog"),
        }
    }

    /// Current snapshot; never partially updated
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Cloned song record, if present in the current snapshot
    pub fn lookup(&self, filename: &str) -> Option<Song> {
        self.snapshot().lookup(filename).cloned()
    }

    /// Re-fetch the song list and swap it in.
    ///
    /// Concurrent callers share one request. On failure the previous
    /// snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<Catalog>> {
        self.fetch(self.flight.epoch()).await
    }

    /// Refresh after an upload; never joins a fetch that began before it.
    pub async fn refresh_after_write(&self) -> Result<Arc<Catalog>> {
        self.fetch(self.flight.invalidate()).await
    }

    async fn fetch(&self, epoch: u64) -> Result<Arc<Catalog>> {
        let backend = self.backend.clone();
        let current = self.current.clone();

        self.flight
            .run_since(epoch, move || async move {
                let records = backend.list_songs().await?;
                let catalog = Catalog::from_songs(records.iter().map(|r| backend.to_song(r)));

                info!(songs = catalog.len(), "Catalog refreshed");
                let snapshot = Arc::new(catalog);
                *current.write().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
                Ok(snapshot)
            })
            .await
    }
}
