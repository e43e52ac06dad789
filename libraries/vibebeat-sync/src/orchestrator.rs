//! Sync orchestrator
//!
//! Runs each user action as one unit: mutate the backend, refresh the
//! affected caches, then tell the observer. Any failure ends the action,
//! leaves the caches as they were and is reported as a [`Notice`].

use crate::catalog::{Catalog, CatalogCache};
use crate::error::{Result, SyncError};
use crate::registry::PlaylistRegistry;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use vibebeat_client::MusicBackend;
use vibebeat_core::{ErrorKind, Playlist, PlaylistId, SongLookup};

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-visible outcome of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Underlying error text, if any
    pub detail: Option<String>,
    pub kind: Option<ErrorKind>,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            detail: None,
            kind: None,
        }
    }

    pub fn error(message: impl Into<String>, kind: ErrorKind, detail: impl ToString) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            detail: Some(detail.to_string()),
            kind: Some(kind),
        }
    }

    /// Failure notice for a sync action.
    ///
    /// Validation failures carry their own message ("Name required"); every
    /// other failure shows `label` with the error as detail.
    pub fn failure(label: &str, err: &SyncError) -> Self {
        match err {
            SyncError::Validation(message) => Self {
                level: NoticeLevel::Error,
                message: message.clone(),
                detail: None,
                kind: Some(ErrorKind::ValidationFailure),
            },
            other => Self::error(label, other.kind(), other),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Receives notices and refresh results; the rendering side of the app.
pub trait SyncObserver: Send + Sync {
    fn on_notice(&self, _notice: &Notice) {}

    fn on_catalog_refreshed(&self, _catalog: &Catalog) {}

    fn on_playlists_refreshed(&self, _playlists: &[Playlist]) {}
}

/// Observer that ignores everything
#[derive(Debug, Default)]
pub struct NullObserver;

impl SyncObserver for NullObserver {}

/// Observer that records notices in order
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices so far
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return recorded notices
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl SyncObserver for NoticeLog {
    fn on_notice(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}

/// Sequences backend mutations with cache refreshes
pub struct SyncOrchestrator {
    backend: Arc<dyn MusicBackend>,
    catalog: Arc<CatalogCache>,
    registry: Arc<PlaylistRegistry>,
    observer: Arc<dyn SyncObserver>,
}

impl SyncOrchestrator {
    pub fn new(backend: Arc<dyn MusicBackend>) -> Self {
        Self {
            catalog: Arc::new(CatalogCache::new(backend.clone())),
            registry: Arc::new(PlaylistRegistry::new(backend.clone())),
            backend,
            observer: Arc::new(NullObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SyncObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn catalog(&self) -> &Arc<CatalogCache> {
        &self.catalog
    }

    pub fn registry(&self) -> &Arc<PlaylistRegistry> {
        &self.registry
    }

    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            warn!(message = %notice.message, detail = ?notice.detail, "Action failed");
        } else {
            info!(message = %notice.message, "Action succeeded");
        }
        self.observer.on_notice(&notice);
    }

    /// Report a failed action under `label` and pass the result through
    fn report<T>(&self, label: &str, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.notify(Notice::failure(label, e));
        }
        result
    }

    /// Reject actions on playlists missing from the current snapshot
    fn require_playlist(&self, id: PlaylistId) -> Result<Playlist> {
        self.registry
            .get(id)
            .ok_or_else(|| SyncError::not_found("playlist", id))
    }

    // ===== Refresh =====

    /// Refresh the song catalog
    pub async fn refresh_songs(&self) -> Result<Arc<Catalog>> {
        let result = self.catalog.refresh().await;
        self.songs_refreshed(result)
    }

    fn songs_refreshed(&self, result: Result<Arc<Catalog>>) -> Result<Arc<Catalog>> {
        let catalog = self.report("Failed to load songs", result)?;
        self.observer.on_catalog_refreshed(&catalog);
        Ok(catalog)
    }

    /// Refresh the playlists
    pub async fn refresh_playlists(&self) -> Result<Arc<Vec<Playlist>>> {
        let result = self.registry.refresh().await;
        let playlists = self.report("Failed to load playlists", result)?;
        self.observer.on_playlists_refreshed(&playlists);
        Ok(playlists)
    }

    /// Initial load: songs, then playlists.
    ///
    /// Both are attempted; the first failure is returned.
    pub async fn load(&self) -> Result<()> {
        let songs = self.refresh_songs().await;
        let playlists = self.refresh_playlists().await;
        songs?;
        playlists?;
        Ok(())
    }

    // ===== Songs =====

    /// Upload a file, then refresh both caches
    pub async fn upload(&self, filename: &str, contents: Vec<u8>) -> Result<()> {
        let result = self
            .backend
            .upload_song(filename, contents)
            .await
            .map_err(SyncError::from);
        self.report("Upload failed", result)?;

        let result = self.catalog.refresh_after_write().await;
        self.songs_refreshed(result)?;
        self.refresh_playlists().await?;
        self.notify(Notice::info("Uploaded!"));
        Ok(())
    }

    // ===== Playlists =====

    /// Select a playlist for the detail view; clears the selection if it
    /// no longer exists.
    pub fn select_playlist(&self, id: PlaylistId) -> Option<Playlist> {
        self.registry.select(id)
    }

    pub async fn create_playlist(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Option<PlaylistId>> {
        let result = self.registry.create(name, description).await;
        let id = self.report("Create failed", result)?;
        self.after_playlists_changed();
        Ok(id)
    }

    pub async fn edit_playlist(&self, id: PlaylistId, name: &str, description: &str) -> Result<()> {
        let result = match self.require_playlist(id) {
            Ok(_) => self.registry.rename(id, name, description).await,
            Err(e) => Err(e),
        };
        self.report("Save failed", result)?;
        self.after_playlists_changed();
        Ok(())
    }

    pub async fn delete_playlist(&self, id: PlaylistId) -> Result<()> {
        let result = match self.require_playlist(id) {
            Ok(_) => self.registry.delete(id).await,
            Err(e) => Err(e),
        };
        self.report("Failed to delete", result)?;
        if self.registry.selected_id() == Some(id) {
            self.registry.clear_selection();
        }
        self.after_playlists_changed();
        Ok(())
    }

    /// Add catalog songs to a playlist, one request each, then reselect it
    pub async fn add_songs(&self, id: PlaylistId, filenames: &[String]) -> Result<()> {
        let result = self.check_add_songs(id, filenames);
        self.report("Failed to add songs", result)?;

        let result = self.registry.add_songs(id, filenames).await;
        self.report("Failed to add songs", result)?;
        self.registry.select(id);
        self.after_playlists_changed();
        Ok(())
    }

    fn check_add_songs(&self, id: PlaylistId, filenames: &[String]) -> Result<()> {
        self.require_playlist(id)?;
        if self.catalog.snapshot().is_empty() {
            return Err(SyncError::validation("No songs available to add"));
        }
        if filenames.is_empty() {
            return Err(SyncError::validation("Select at least one"));
        }
        Ok(())
    }

    /// Add one song (typically the one playing) to a playlist
    pub async fn quick_add(&self, id: PlaylistId, filename: &str) -> Result<()> {
        let result = self.check_quick_add(id, filename);
        self.report("Failed to add", result)?;

        let result = self.registry.add_song(id, filename).await;
        self.report("Failed to add", result)?;
        self.after_playlists_changed();
        Ok(())
    }

    fn check_quick_add(&self, id: PlaylistId, filename: &str) -> Result<()> {
        if self.registry.snapshot().is_empty() {
            return Err(SyncError::validation("No playlists. Create one first."));
        }
        self.require_playlist(id)?;
        if !self.catalog.snapshot().has_song(filename) {
            return Err(SyncError::not_found("song", filename));
        }
        Ok(())
    }

    /// Remove the first occurrence of `filename`, then reselect the playlist
    pub async fn remove_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        let result = match self.require_playlist(id) {
            Ok(_) => self.registry.remove_song(id, filename).await,
            Err(e) => Err(e),
        };
        self.report("Failed to remove", result)?;
        self.registry.select(id);
        self.after_playlists_changed();
        Ok(())
    }

    fn after_playlists_changed(&self) {
        self.observer
            .on_playlists_refreshed(&self.registry.snapshot());
    }
}
