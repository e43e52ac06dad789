//! Audio transport abstraction
//!
//! The controller never decodes audio. It drives a transport (a media
//! element, a headless player, a test double) through this trait.

use crate::error::Result;

/// Media transport driven by the playback controller
pub trait Transport: Send {
    /// Point the transport at a new media URL
    fn load(&mut self, url: &str) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Jump to `position` seconds from the start
    fn seek(&mut self, position: f64);

    /// Output gain in 0.0-1.0
    fn set_gain(&mut self, gain: f32);
}

/// Transport that accepts every command and produces no sound
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl Transport for NullTransport {
    fn load(&mut self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _position: f64) {}

    fn set_gain(&mut self, _gain: f32) {}
}
