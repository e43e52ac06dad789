//! Transport for a terminal without audio output: every command is logged.

use tracing::{debug, info};
use vibebeat_playback::{Result, Transport};

#[derive(Debug, Default)]
pub struct LoggingTransport {
    source: Option<String>,
    playing: bool,
}

impl LoggingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Media URL currently loaded
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl Transport for LoggingTransport {
    fn load(&mut self, url: &str) -> Result<()> {
        info!(url, "Loading media");
        self.source = Some(url.to_string());
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        debug!(url = ?self.source, "Play");
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        debug!("Pause");
        self.playing = false;
    }

    fn seek(&mut self, position: f64) {
        debug!(position, "Seek");
    }

    fn set_gain(&mut self, gain: f32) {
        debug!(gain, "Gain");
    }
}
