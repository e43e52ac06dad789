//! In-memory backend for sync tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vibebeat_client::{ClientError, MusicBackend, Result, SongRecord};
use vibebeat_core::{Playlist, PlaylistId, SongRef};
use vibebeat_sync::{NoticeLog, SyncOrchestrator};

#[derive(Debug, Default)]
struct State {
    songs: Vec<String>,
    playlists: Vec<Playlist>,
    next_id: PlaylistId,
    /// Fail every call until cleared
    failure: Option<ClientError>,
    /// List calls read the state, then wait this long before answering
    list_delay: Option<Duration>,
}

/// Backend that behaves like the real one: appends on add, removes the
/// first occurrence on remove, 404s on unknown playlists.
#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<State>,
    pub list_song_calls: AtomicUsize,
    pub list_playlist_calls: AtomicUsize,
}

fn not_found() -> ClientError {
    ClientError::Backend {
        status: 404,
        message: "Playlist not found".to_string(),
    }
}

impl FakeBackend {
    pub fn with_songs(filenames: &[&str]) -> Arc<Self> {
        let backend = Self::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.songs = filenames.iter().map(|f| f.to_string()).collect();
            state.next_id = 1;
        }
        Arc::new(backend)
    }

    pub fn fail_with(&self, error: ClientError) {
        self.state.lock().unwrap().failure = Some(error);
    }

    pub fn slow_lists(&self, delay: Duration) {
        self.state.lock().unwrap().list_delay = Some(delay);
    }

    async fn list_delay(&self) {
        let delay = self.state.lock().unwrap().list_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().failure = None;
    }

    /// Server-side change not made through the client
    pub fn delete_behind_back(&self, id: PlaylistId) {
        self.state.lock().unwrap().playlists.retain(|p| p.id != id);
    }

    pub fn server_playlist(&self, id: PlaylistId) -> Option<Playlist> {
        self.state
            .lock()
            .unwrap()
            .playlists
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn check(&self) -> Result<()> {
        match &self.state.lock().unwrap().failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn with_playlist<R>(&self, id: PlaylistId, f: impl FnOnce(&mut Playlist) -> R) -> Result<R> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let playlist = state
            .playlists
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(not_found)?;
        Ok(f(playlist))
    }
}

#[async_trait]
impl MusicBackend for FakeBackend {
    async fn list_songs(&self) -> Result<Vec<SongRecord>> {
        self.list_song_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let songs: Vec<SongRecord> = self
            .state
            .lock()
            .unwrap()
            .songs
            .iter()
            .map(SongRecord::new)
            .collect();
        self.list_delay().await;
        Ok(songs)
    }

    async fn upload_song(&self, filename: &str, _contents: Vec<u8>) -> Result<()> {
        self.check()?;
        self.state.lock().unwrap().songs.push(filename.to_string());
        Ok(())
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        self.list_playlist_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let playlists = self.state.lock().unwrap().playlists.clone();
        self.list_delay().await;
        Ok(playlists)
    }

    async fn create_playlist(&self, name: &str, description: &str) -> Result<Option<PlaylistId>> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;

        let mut playlist = Playlist::new(id, name);
        playlist.description = (!description.is_empty()).then(|| description.to_string());
        state.playlists.push(playlist);
        Ok(Some(id))
    }

    async fn update_playlist(&self, id: PlaylistId, name: &str, description: &str) -> Result<()> {
        self.with_playlist(id, |p| {
            p.name = name.to_string();
            p.description = Some(description.to_string());
        })
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let before = state.playlists.len();
        state.playlists.retain(|p| p.id != id);
        if state.playlists.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn add_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        self.with_playlist(id, |p| p.songs.push(SongRef::new(filename)))
    }

    async fn remove_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        self.with_playlist(id, |p| {
            if let Some(pos) = p.songs.iter().position(|s| s == filename) {
                p.songs.remove(pos);
            }
        })
    }

    fn media_url(&self, record: &SongRecord) -> String {
        format!("http://fake/play/{}", record.filename)
    }
}

/// Orchestrator over `backend` with a notice log, already loaded
pub async fn loaded(backend: Arc<FakeBackend>) -> (SyncOrchestrator, Arc<NoticeLog>) {
    let log = Arc::new(NoticeLog::new());
    let sync = SyncOrchestrator::new(backend).with_observer(log.clone());
    sync.load().await.unwrap();
    (sync, log)
}
