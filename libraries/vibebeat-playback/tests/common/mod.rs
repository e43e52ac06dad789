//! Shared helpers for playback integration tests

#![allow(dead_code)]

use vibebeat_core::{Playlist, Song, SongRef};
use vibebeat_playback::{PlaybackConfig, PlaybackController, Result, Transport};

/// Transport that remembers the last command of each kind
#[derive(Debug, Default)]
pub struct FakeTransport {
    pub loaded: Vec<String>,
    pub playing: bool,
    pub last_seek: Option<f64>,
    pub gain: f32,
}

impl Transport for FakeTransport {
    fn load(&mut self, url: &str) -> Result<()> {
        self.loaded.push(url.to_string());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position: f64) {
        self.last_seek = Some(position);
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }
}

pub fn create_song(filename: &str) -> Song {
    Song::new(filename, format!("http://backend/play/{}", filename))
}

pub fn create_catalog(filenames: &[&str]) -> Vec<Song> {
    filenames.iter().map(|f| create_song(f)).collect()
}

pub fn create_playlist(id: i64, name: &str, filenames: &[&str]) -> Playlist {
    let mut playlist = Playlist::new(id, name);
    playlist.songs = filenames.iter().map(|f| SongRef::new(*f)).collect();
    playlist
}

pub fn controller() -> PlaybackController<FakeTransport> {
    controller_with(PlaybackConfig::default())
}

pub fn controller_with(config: PlaybackConfig) -> PlaybackController<FakeTransport> {
    PlaybackController::new(FakeTransport::default(), &config).with_seed(42)
}
