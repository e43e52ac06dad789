//! Playlist registry
//!
//! Mirror of the backend's playlists plus the "selected" playlist shown in
//! the detail view. Mutations are request-then-refetch: nothing is patched
//! locally, so a failed call leaves the mirror exactly as it was.

use crate::error::{Result, SyncError};
use crate::single_flight::SingleFlight;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};
use vibebeat_client::MusicBackend;
use vibebeat_core::{Playlist, PlaylistId};

/// Immutable snapshot of all playlists
pub type PlaylistSnapshot = Arc<Vec<Playlist>>;

#[derive(Debug, Default)]
struct Mirror {
    playlists: PlaylistSnapshot,
    selected: Option<PlaylistId>,
}

impl Mirror {
    /// Drop the selection if its playlist disappeared
    fn revalidate(&mut self) {
        if let Some(id) = self.selected {
            if !self.playlists.iter().any(|p| p.id == id) {
                info!(id, "Selected playlist no longer exists; clearing selection");
                self.selected = None;
            }
        }
    }
}

/// Shared, refreshable playlist list with selection
pub struct PlaylistRegistry {
    backend: Arc<dyn MusicBackend>,
    mirror: Arc<RwLock<Mirror>>,
    flight: SingleFlight<Vec<Playlist>>,
    /// Serializes mutation chains (request, then refresh)
    mutation: tokio::sync::Mutex<()>,
}

impl PlaylistRegistry {
    pub fn new(backend: Arc<dyn MusicBackend>) -> Self {
        Self {
            backend,
            mirror: Arc::new(RwLock::new(Mirror::default())),
            flight: SingleFlight::new("playlists"),
            mutation: tokio::sync::Mutex::new(()),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Mirror> {
        self.mirror.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Mirror> {
        self.mirror.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== Reads =====

    pub fn snapshot(&self) -> PlaylistSnapshot {
        self.read().playlists.clone()
    }

    pub fn get(&self, id: PlaylistId) -> Option<Playlist> {
        self.read().playlists.iter().find(|p| p.id == id).cloned()
    }

    pub fn selected_id(&self) -> Option<PlaylistId> {
        self.read().selected
    }

    /// Selected playlist from the current snapshot
    pub fn selected(&self) -> Option<Playlist> {
        let mirror = self.read();
        let id = mirror.selected?;
        mirror.playlists.iter().find(|p| p.id == id).cloned()
    }

    // ===== Selection =====

    /// Select `id` if it exists in the current snapshot; otherwise clear.
    pub fn select(&self, id: PlaylistId) -> Option<Playlist> {
        let mut mirror = self.write();
        match mirror.playlists.iter().find(|p| p.id == id).cloned() {
            Some(playlist) => {
                mirror.selected = Some(id);
                Some(playlist)
            }
            None => {
                debug!(id, "Cannot select missing playlist");
                mirror.selected = None;
                None
            }
        }
    }

    pub fn clear_selection(&self) {
        self.write().selected = None;
    }

    // ===== Refresh =====

    /// Re-fetch all playlists, swap them in and revalidate the selection.
    ///
    /// Concurrent callers share one request. On failure the previous
    /// snapshot and selection stay in place.
    pub async fn refresh(&self) -> Result<PlaylistSnapshot> {
        self.fetch(self.flight.epoch()).await
    }

    /// Refresh after a write; never joins a fetch that began before it.
    async fn refresh_after_write(&self) -> Result<PlaylistSnapshot> {
        self.fetch(self.flight.invalidate()).await
    }

    async fn fetch(&self, epoch: u64) -> Result<PlaylistSnapshot> {
        let backend = self.backend.clone();
        let mirror = self.mirror.clone();

        self.flight
            .run_since(epoch, move || async move {
                let playlists = Arc::new(backend.list_playlists().await?);

                let mut mirror = mirror.write().unwrap_or_else(PoisonError::into_inner);
                mirror.playlists = playlists.clone();
                mirror.revalidate();

                info!(playlists = playlists.len(), "Playlists refreshed");
                Ok(playlists)
            })
            .await
    }

    // ===== Mutations =====

    /// Create a playlist. The name is trimmed and must not be empty.
    pub async fn create(&self, name: &str, description: &str) -> Result<Option<PlaylistId>> {
        let name = required_name(name)?;
        let _chain = self.mutation.lock().await;

        let id = self
            .backend
            .create_playlist(name, description.trim())
            .await?;
        self.refresh_after_write().await?;
        Ok(id)
    }

    /// Replace a playlist's name and description.
    pub async fn rename(&self, id: PlaylistId, name: &str, description: &str) -> Result<()> {
        let name = required_name(name)?;
        let _chain = self.mutation.lock().await;

        self.backend
            .update_playlist(id, name, description.trim())
            .await?;
        self.refresh_after_write().await?;
        Ok(())
    }

    /// Delete a playlist. A selection pointing at it is cleared by the
    /// refresh.
    pub async fn delete(&self, id: PlaylistId) -> Result<()> {
        let _chain = self.mutation.lock().await;

        self.backend.delete_playlist(id).await?;
        self.refresh_after_write().await?;
        Ok(())
    }

    /// Append `filename` to a playlist.
    pub async fn add_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        let _chain = self.mutation.lock().await;

        self.backend.add_song(id, filename).await?;
        self.refresh_after_write().await?;
        Ok(())
    }

    /// Append several songs one request at a time, then refresh once.
    ///
    /// Stops at the first failure; earlier additions have already reached
    /// the backend, so the mirror is refreshed before the error is returned.
    pub async fn add_songs(&self, id: PlaylistId, filenames: &[String]) -> Result<()> {
        let _chain = self.mutation.lock().await;

        for (added, filename) in filenames.iter().enumerate() {
            if let Err(e) = self.backend.add_song(id, filename).await {
                if added > 0 {
                    // Partial success: pick up what did land, keep the original error
                    let _ = self.refresh_after_write().await;
                }
                return Err(e.into());
            }
        }
        self.refresh_after_write().await?;
        Ok(())
    }

    /// Remove `filename` from a playlist.
    pub async fn remove_song(&self, id: PlaylistId, filename: &str) -> Result<()> {
        let _chain = self.mutation.lock().await;

        self.backend.remove_song(id, filename).await?;
        self.refresh_after_write().await?;
        Ok(())
    }
}

fn required_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        Err(SyncError::validation("Name required"))
    } else {
        Ok(name)
    }
}
