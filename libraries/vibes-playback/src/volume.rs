//! Volume control
//!
//! The audio element takes a linear volume in `[0.0, 1.0]`; this module keeps
//! every adjustment inside that range and classifies it for the volume icon.

use serde::{Deserialize, Serialize};

/// Volume icon state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeLevel {
    /// Exactly zero
    Muted,

    /// Below half
    Low,

    /// Half or above
    High,
}

impl VolumeLevel {
    pub fn from_volume(volume: f32) -> Self {
        if volume <= 0.0 {
            VolumeLevel::Muted
        } else if volume < 0.5 {
            VolumeLevel::Low
        } else {
            VolumeLevel::High
        }
    }

    /// Glyph shown next to the volume slider
    pub fn icon(self) -> &'static str {
        match self {
            VolumeLevel::Muted => "🔇",
            VolumeLevel::Low => "🔉",
            VolumeLevel::High => "🔊",
        }
    }
}

/// Clamp a volume into `[0.0, 1.0]`
///
/// NaN is treated as silence.
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Apply a relative change (e.g. ±0.05 from the arrow keys)
pub fn step_volume(current: f32, delta: f32) -> f32 {
    clamp_volume(current + delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_unit_range() {
        assert_eq!(clamp_volume(1.4), 1.0);
        assert_eq!(clamp_volume(-0.2), 0.0);
        assert_eq!(clamp_volume(f32::NAN), 0.0);
        assert_eq!(clamp_volume(0.3), 0.3);
    }

    #[test]
    fn steps_stop_at_the_edges() {
        assert_eq!(step_volume(0.98, 0.05), 1.0);
        assert_eq!(step_volume(0.02, -0.05), 0.0);
        assert!((step_volume(0.5, 0.05) - 0.55).abs() < f32::EPSILON);
    }

    #[test]
    fn icon_thresholds() {
        assert_eq!(VolumeLevel::from_volume(0.0), VolumeLevel::Muted);
        assert_eq!(VolumeLevel::from_volume(0.49), VolumeLevel::Low);
        assert_eq!(VolumeLevel::from_volume(0.5), VolumeLevel::High);
        assert_eq!(VolumeLevel::High.icon(), "🔊");
    }
}
