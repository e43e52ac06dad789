/// Application state owned by the running client
use crate::config::AppConfig;
use crate::error::Result;
use crate::transport::LoggingTransport;
use std::sync::Arc;
use tracing::info;
use vibebeat_client::VibeClient;
use vibebeat_core::PlaylistId;
use vibebeat_playback::{PlaybackController, PlaybackError, QueueSource};
use vibebeat_storage::{AutosaveHandle, JsonFileStore, KeyValueStore, SessionStore};
use vibebeat_sync::views::{self, NowPlaying, SongCard};
use vibebeat_sync::{Notice, SyncError, SyncObserver, SyncOrchestrator};

/// Everything the client holds; built once and passed explicitly
pub struct AppState {
    pub config: AppConfig,
    pub client: Arc<VibeClient>,
    pub sync: SyncOrchestrator,
    pub player: PlaybackController<LoggingTransport>,
    pub session: Arc<SessionStore>,
    observer: Arc<dyn SyncObserver>,
}

impl AppState {
    /// Build state with the session persisted to `config.session.path`
    pub fn new(config: AppConfig, observer: Arc<dyn SyncObserver>) -> Result<Self> {
        let store = Arc::new(JsonFileStore::open(&config.session.path)?);
        Self::with_store(config, store, observer)
    }

    pub fn with_store(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        observer: Arc<dyn SyncObserver>,
    ) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(VibeClient::new(config.client_config())?);
        let sync = SyncOrchestrator::new(client.clone()).with_observer(observer.clone());
        let session = Arc::new(SessionStore::load(
            store,
            config.playback.recently_played_limit,
        )?);
        let player = PlaybackController::new(LoggingTransport::new(), &config.playback)
            .with_recently_played(session.recently_played());

        info!(url = %client.url(), "Client state ready");

        Ok(Self {
            config,
            client,
            sync,
            player,
            session,
            observer,
        })
    }

    /// Fetch songs and playlists
    pub async fn load(&self) -> Result<()> {
        self.sync.load().await?;
        Ok(())
    }

    /// Start saving the session on the configured interval
    pub fn spawn_autosave(&self) -> AutosaveHandle {
        self.session.spawn_autosave(self.config.autosave_interval())
    }

    fn playback_failure(&self, label: &str, err: PlaybackError) -> PlaybackError {
        self.observer
            .on_notice(&Notice::error(label, err.kind(), &err));
        err
    }

    fn record_history(&self) {
        self.session
            .set_recently_played(self.player.recently_played());
    }

    // ===== Playback =====

    /// Play one song from the catalog
    pub fn play_song(&mut self, filename: &str) -> Result<()> {
        let catalog = self.sync.catalog().snapshot();
        if let Err(e) = self.player.play_song(&*catalog, filename) {
            return Err(self.playback_failure("Song not found", e).into());
        }
        self.record_history();
        Ok(())
    }

    /// Play the whole library, starting at `start` or the first song
    pub fn play_library(&mut self, start: Option<&str>) -> Result<()> {
        let catalog = self.sync.catalog().snapshot();
        let entries: Vec<String> = catalog.filenames().map(str::to_string).collect();
        if entries.is_empty() {
            return Err(self.playback_failure("No songs", PlaybackError::QueueEmpty).into());
        }

        let index = match start {
            Some(filename) => match entries.iter().position(|f| f == filename) {
                Some(index) => index,
                None => {
                    let err = PlaybackError::SongNotFound(filename.to_string());
                    return Err(self.playback_failure("Song not found", err).into());
                }
            },
            None => 0,
        };

        if let Err(e) = self
            .player
            .play_queue(&*catalog, entries, QueueSource::Library, index)
        {
            return Err(self.playback_failure("Song not found", e).into());
        }
        self.record_history();
        Ok(())
    }

    /// Play a playlist from its first available entry
    pub fn play_playlist(&mut self, id: PlaylistId) -> Result<()> {
        let Some(playlist) = self.sync.registry().get(id) else {
            let err = SyncError::not_found("playlist", id);
            self.observer.on_notice(&Notice::failure("Playlist not found", &err));
            return Err(err.into());
        };

        let catalog = self.sync.catalog().snapshot();
        if let Err(e) = self.player.play_playlist(&*catalog, &playlist) {
            let label = match e {
                PlaybackError::QueueEmpty => "No songs",
                _ => "First song not available on server",
            };
            return Err(self.playback_failure(label, e).into());
        }
        self.record_history();
        Ok(())
    }

    pub fn next(&mut self) -> Result<bool> {
        let catalog = self.sync.catalog().snapshot();
        let moved = self.player.next(&*catalog)?;
        self.record_history();
        Ok(moved)
    }

    pub fn previous(&mut self) -> Result<bool> {
        let catalog = self.sync.catalog().snapshot();
        let moved = self.player.previous(&*catalog)?;
        self.record_history();
        Ok(moved)
    }

    // ===== Likes =====

    /// Like or unlike the current song; returns the new liked state
    pub fn toggle_like_current(&self) -> Result<bool> {
        let Some(song) = self.player.current_song() else {
            return Err(self
                .playback_failure("No song playing", PlaybackError::NoTrackLoaded)
                .into());
        };
        Ok(self.session.toggle_like(&song.filename)?)
    }

    // ===== Views =====

    pub fn liked_view(&self) -> Vec<SongCard> {
        views::liked_view(&self.sync.catalog().snapshot(), &self.session.liked_songs())
    }

    pub fn recent_view(&self) -> Vec<SongCard> {
        views::recent_view(&self.sync.catalog().snapshot(), self.player.recently_played())
    }

    pub fn now_playing(&self) -> NowPlaying {
        NowPlaying::build(&self.player, &self.session.liked_songs())
    }
}
