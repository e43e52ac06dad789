//! Backend abstraction used by the sync layer.

use crate::client::VibeClient;
use crate::error::Result;
use crate::types::SongRecord;
use async_trait::async_trait;
use vibebeat_core::{Playlist, PlaylistId, Song};

/// Everything the client state needs from a song and playlist backend.
///
/// [`VibeClient`] is the HTTP implementation; tests substitute in-memory fakes.
#[async_trait]
pub trait MusicBackend: Send + Sync {
    async fn list_songs(&self) -> Result<Vec<SongRecord>>;

    async fn upload_song(&self, filename: &str, contents: Vec<u8>) -> Result<()>;

    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    async fn create_playlist(&self, name: &str, description: &str) -> Result<Option<PlaylistId>>;

    async fn update_playlist(&self, id: PlaylistId, name: &str, description: &str) -> Result<()>;

    async fn delete_playlist(&self, id: PlaylistId) -> Result<()>;

    async fn add_song(&self, id: PlaylistId, filename: &str) -> Result<()>;

    async fn remove_song(&self, id: PlaylistId, filename: &str) -> Result<()>;

    /// Playable URL for a record
    fn media_url(&self, record: &SongRecord) -> String;

    /// Catalog entry for a record, with derived title and default tags
    fn to_song(&self, record: &SongRecord) -> Song {
        Song::new(record.filename.clone(), self.media_url(record))
    }
}

#[async_trait]
impl MusicBackend for VibeClient {
    async fn list_songs(&self) -> Result<Vec<SongRecord>> {
        self.songs().list().await
    }

    async fn upload_song(&self, filename: &str, contents: Vec<u8>) -> Result<()> {
        self.songs().upload(filename, contents).await
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        self.playlists().list().await
    }

    async fn create_playlist(&self, name: &str, description: &str) -> Result<Option<PlaylistId>> {
        self.playlists().create(name, description).await
    }

    async fn update_playlist(&self, id: PlaylistId, name: &str, description: &str) -> Result<()> {
        self.playlists().update(id, name, description).await
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        self.playlists().delete(id).await
    }

    async fn add_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        self.playlists().add_song(id, filename).await
    }

    async fn remove_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        self.playlists().remove_song(id, filename).await
    }

    fn media_url(&self, record: &SongRecord) -> String {
        VibeClient::media_url(self, record)
    }
}
