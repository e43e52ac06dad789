//! Volume control
//!
//! Level is 0-100 and maps linearly onto the media element's 0.0-1.0 gain.

use serde::{Deserialize, Serialize};

/// Icon shown next to the volume slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

/// Volume controller with mute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level, clamped to 100
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain to hand to the transport: 0.0 when muted, otherwise `level / 100`
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.level) / 100.0
        }
    }

    pub fn icon(&self) -> VolumeIcon {
        if self.muted || self.level == 0 {
            VolumeIcon::Muted
        } else if self.level < 50 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_level() {
        let mut volume = Volume::new(150);
        assert_eq!(volume.level(), 100);
        volume.set_level(255);
        assert_eq!(volume.level(), 100);
    }

    #[test]
    fn linear_gain() {
        assert!((Volume::new(70).gain() - 0.7).abs() < f32::EPSILON);
        assert!((Volume::new(100).gain() - 1.0).abs() < f32::EPSILON);
        assert_eq!(Volume::new(0).gain(), 0.0);
    }

    #[test]
    fn mute_preserves_level() {
        let mut volume = Volume::new(40);
        volume.toggle_mute();
        assert_eq!(volume.gain(), 0.0);
        assert_eq!(volume.level(), 40);

        volume.toggle_mute();
        assert!((volume.gain() - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn icon_thresholds() {
        assert_eq!(Volume::new(0).icon(), VolumeIcon::Muted);
        assert_eq!(Volume::new(49).icon(), VolumeIcon::Low);
        assert_eq!(Volume::new(50).icon(), VolumeIcon::High);

        let mut muted = Volume::new(90);
        muted.set_muted(true);
        assert_eq!(muted.icon(), VolumeIcon::Muted);
    }
}
