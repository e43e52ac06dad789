//! Playback controller
//!
//! Owns the "now playing" pointer, the active queue and the transport. Songs
//! are resolved through a [`SongLookup`] snapshot passed into each call; the
//! controller never talks to the backend.

use crate::error::{PlaybackError, Result};
use crate::events::PlaybackEvent;
use crate::queue::PlayQueue;
use crate::transport::Transport;
use crate::types::{PlaybackConfig, PlaybackState, QueueEndPolicy, QueueSource};
use crate::volume::Volume;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use vibebeat_core::{format_time, Playlist, RecentlyPlayed, Song, SongLookup};

/// Playback state machine
///
/// States: `Idle` (no current song), `Loaded` (song set, transport paused),
/// `Playing`, `Paused`. A failed call never changes the current song.
pub struct PlaybackController<T: Transport> {
    transport: T,
    state: PlaybackState,
    queue: PlayQueue,
    current: Option<Song>,

    /// Seconds into the current song
    position: f64,
    /// Seconds, 0.0 until the transport reports metadata
    duration: f64,

    volume: Volume,
    repeat: bool,
    shuffle: bool,
    queue_end: QueueEndPolicy,
    recent: RecentlyPlayed,

    rng: StdRng,
    pending_events: Vec<PlaybackEvent>,
}

impl<T: Transport> PlaybackController<T> {
    pub fn new(transport: T, config: &PlaybackConfig) -> Self {
        let mut controller = Self {
            transport,
            state: PlaybackState::Idle,
            queue: PlayQueue::new(),
            current: None,
            position: 0.0,
            duration: 0.0,
            volume: Volume::new(config.volume),
            repeat: false,
            shuffle: false,
            queue_end: config.queue_end,
            recent: RecentlyPlayed::new(config.recently_played_limit),
            rng: StdRng::from_entropy(),
            pending_events: Vec::new(),
        };
        let gain = controller.volume.gain();
        controller.transport.set_gain(gain);
        controller
    }

    /// Seed the shuffle generator (deterministic tests)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Start from a previously persisted history
    pub fn with_recently_played(mut self, recent: RecentlyPlayed) -> Self {
        self.recent = recent;
        self
    }

    // ===== Starting playback =====

    /// Play `filename`.
    ///
    /// If the song is already in the active queue the cursor moves there;
    /// otherwise the queue is replaced by an ad-hoc queue holding just this
    /// song. Fails without touching any state when the song is not in the
    /// catalog.
    pub fn play_song(&mut self, catalog: &(impl SongLookup + ?Sized), filename: &str) -> Result<()> {
        let song = resolve(catalog, filename)?;

        match self.queue.position_of(filename) {
            Some(index) => self.start(song, index, None),
            None => self.start(song, 0, Some(PlayQueue::ad_hoc(filename))),
        }
    }

    /// Replace the queue with `entries` and play the entry at `index`.
    pub fn play_queue(
        &mut self,
        catalog: &(impl SongLookup + ?Sized),
        entries: Vec<String>,
        source: QueueSource,
        index: usize,
    ) -> Result<()> {
        if entries.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        let filename = entries
            .get(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;
        let song = resolve(catalog, filename)?;

        self.start(song, index, Some(PlayQueue::from_entries(entries, source)))
    }

    /// Play a playlist from its first entry that resolves in the catalog.
    pub fn play_playlist(
        &mut self,
        catalog: &(impl SongLookup + ?Sized),
        playlist: &Playlist,
    ) -> Result<()> {
        if playlist.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }

        let index = playlist
            .filenames()
            .position(|f| catalog.has_song(f))
            .ok_or_else(|| {
                PlaybackError::SongNotFound(playlist.songs[0].filename().to_string())
            })?;

        let entries = playlist.filenames().map(str::to_string).collect();
        let source = QueueSource::Playlist {
            id: playlist.id,
            name: playlist.name.clone(),
        };
        self.play_queue(catalog, entries, source, index)
    }

    // ===== Transport =====

    /// Toggle between playing and paused. No-op without a current song.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        match self.state {
            PlaybackState::Idle => Ok(()),
            PlaybackState::Playing => {
                self.transport.pause();
                self.set_state(PlaybackState::Paused);
                Ok(())
            }
            PlaybackState::Paused | PlaybackState::Loaded => {
                self.transport.play()?;
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
        }
    }

    /// Move to the next entry. Returns whether the cursor moved.
    ///
    /// With shuffle on, picks a random other entry; the queue itself is
    /// never reordered. Entries missing from the catalog are skipped; if
    /// every candidate is missing, fails with the first one and nothing
    /// changes.
    pub fn next(&mut self, catalog: &(impl SongLookup + ?Sized)) -> Result<bool> {
        if !self.state.has_song() {
            return Ok(false);
        }

        let candidates = match self.shuffle_start() {
            Some(start) => self.queue.indices_from(start),
            None => self.queue.indices_after(self.queue_end),
        };
        self.advance(catalog, candidates)
    }

    /// Move to the previous entry. Returns whether the cursor moved.
    pub fn previous(&mut self, catalog: &(impl SongLookup + ?Sized)) -> Result<bool> {
        if !self.state.has_song() {
            return Ok(false);
        }

        let candidates = self.queue.indices_before(self.queue_end);
        self.advance(catalog, candidates)
    }

    /// Play the queue entry at `index`
    pub fn play_index(&mut self, catalog: &(impl SongLookup + ?Sized), index: usize) -> Result<()> {
        let filename = self
            .queue
            .get(index)
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;
        let song = resolve(catalog, filename)?;

        self.start(song, index, None)
    }

    /// Natural end of the current media.
    ///
    /// Repeat restarts the same song at 0. At the last queue entry playback
    /// stops (state `Loaded`, position 0) whatever the shuffle flag or
    /// end-of-queue policy. Otherwise the next entry plays (a random other
    /// one with shuffle on), skipping entries missing from the catalog.
    /// When nothing further can be played, playback stops the same way and
    /// the error is returned.
    pub fn on_media_ended(&mut self, catalog: &(impl SongLookup + ?Sized)) -> Result<()> {
        let Some(song) = self.current.as_ref() else {
            return Ok(());
        };
        self.pending_events.push(PlaybackEvent::TrackFinished {
            filename: song.filename.clone(),
        });

        if self.repeat {
            debug!(file = %song.filename, "Repeating song");
            self.set_position(0.0);
            self.transport.play()?;
            self.set_state(PlaybackState::Playing);
            return Ok(());
        }

        if self.queue.is_at_last() {
            debug!("Reached end of queue");
            self.stop();
            return Ok(());
        }

        let candidates = match self.shuffle_start() {
            Some(start) => self.queue.indices_from(start),
            None => self.queue.indices_after(QueueEndPolicy::Clamp),
        };

        match self.advance(catalog, candidates) {
            Ok(true) => Ok(()),
            Ok(false) => {
                self.stop();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Auto-advance failed; stopping");
                self.stop();
                Err(e)
            }
        }
    }

    /// Seek to `fraction` (0.0-1.0) of the song's duration.
    ///
    /// Ignored until the transport has reported a duration.
    pub fn seek_fraction(&mut self, fraction: f64) -> Result<()> {
        if self.current.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if !(self.duration.is_finite() && self.duration > 0.0) || fraction.is_nan() {
            return Ok(());
        }

        let target = fraction.clamp(0.0, 1.0) * self.duration;
        self.set_position(target);
        Ok(())
    }

    /// Seek to `seconds` from the start
    pub fn seek_to(&mut self, seconds: f64) -> Result<()> {
        if self.current.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if seconds.is_nan() {
            return Ok(());
        }

        let upper = if self.duration > 0.0 {
            self.duration
        } else {
            f64::MAX
        };
        self.set_position(seconds.clamp(0.0, upper));
        Ok(())
    }

    /// Mirror time reported by the transport
    pub fn on_time_update(&mut self, position: f64, duration: f64) {
        if self.current.is_none() {
            return;
        }
        self.position = if position.is_finite() { position.max(0.0) } else { 0.0 };
        if duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position: self.position,
            duration: self.duration,
        });
    }

    // ===== Volume =====

    /// Set volume level (0-100). Changing the level unmutes.
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.volume.set_muted(false);
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    // ===== Flags =====

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.repeat = !self.repeat;
        self.repeat
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.shuffle = shuffle;
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn set_queue_end_policy(&mut self, policy: QueueEndPolicy) {
        self.queue_end = policy;
    }

    pub fn queue_end_policy(&self) -> QueueEndPolicy {
        self.queue_end
    }

    // ===== Accessors =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Progress through the current song in 0.0-1.0
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// "m:ss" labels for position and duration
    pub fn time_labels(&self) -> (String, String) {
        (format_time(self.position), format_time(self.duration))
    }

    pub fn recently_played(&self) -> &RecentlyPlayed {
        &self.recent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // ===== Events =====

    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn shuffle_start(&mut self) -> Option<usize> {
        if self.shuffle {
            self.queue.random_other_index(&mut self.rng)
        } else {
            None
        }
    }

    /// Play the first of `candidates` that resolves in the catalog.
    ///
    /// `Ok(false)` when there are no candidates; `SongNotFound` naming the
    /// first skipped entry when none resolve.
    fn advance(
        &mut self,
        catalog: &(impl SongLookup + ?Sized),
        candidates: Vec<usize>,
    ) -> Result<bool> {
        let mut first_missing = None;

        for index in candidates {
            let Some(filename) = self.queue.get(index) else {
                continue;
            };
            match catalog.lookup(filename) {
                Some(song) => {
                    let song = song.clone();
                    self.start(song, index, None)?;
                    return Ok(true);
                }
                None => {
                    warn!(file = %filename, index, "Skipping queue entry missing from the catalog");
                    if first_missing.is_none() {
                        first_missing = Some(filename.to_string());
                    }
                }
            }
        }

        match first_missing {
            Some(filename) => Err(PlaybackError::SongNotFound(filename)),
            None => Ok(false),
        }
    }

    /// Load `song` and make it current at `index`, in `queue` if given.
    ///
    /// Queue and cursor are only committed once the transport accepted the
    /// load.
    fn start(&mut self, song: Song, index: usize, queue: Option<PlayQueue>) -> Result<()> {
        let previous = self.current.as_ref().map(|s| s.filename.clone());

        self.transport.load(&song.url)?;
        self.transport.set_gain(self.volume.gain());

        if let Some(queue) = queue {
            self.replace_queue(queue);
        }
        self.queue.set_index(index);

        info!(file = %song.filename, index, "Now playing");
        self.recent.record(&song.filename);
        self.pending_events.push(PlaybackEvent::TrackChanged {
            filename: song.filename.clone(),
            previous,
            index,
        });
        self.current = Some(song);
        self.position = 0.0;
        self.duration = 0.0;

        match self.transport.play() {
            Ok(()) => {
                self.set_state(PlaybackState::Playing);
                Ok(())
            }
            Err(e) => {
                // Song stays loaded so the user can retry with play/pause
                warn!(error = %e, "Transport refused to start playback");
                self.pending_events.push(PlaybackEvent::Error {
                    message: e.to_string(),
                });
                self.set_state(PlaybackState::Loaded);
                Err(e)
            }
        }
    }

    /// Pause at the start of the current song
    fn stop(&mut self) {
        self.transport.pause();
        self.set_position(0.0);
        self.set_state(PlaybackState::Loaded);
    }

    fn replace_queue(&mut self, queue: PlayQueue) {
        self.queue = queue;
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            source: self.queue.source().clone(),
        });
    }

    fn set_position(&mut self, position: f64) {
        self.position = position;
        self.transport.seek(position);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    fn apply_volume(&mut self) {
        self.transport.set_gain(self.volume.gain());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            muted: self.volume.is_muted(),
        });
    }
}

fn resolve(catalog: &(impl SongLookup + ?Sized), filename: &str) -> Result<Song> {
    catalog
        .lookup(filename)
        .cloned()
        .ok_or_else(|| PlaybackError::SongNotFound(filename.to_string()))
}
