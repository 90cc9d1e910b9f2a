//! Keyboard bindings
//!
//! Space toggles playback, Left/Right seek, Up/Down change volume and
//! Escape closes the album overlay. Keys are ignored while the user is typing
//! in a text field.

use crate::config::PlayerConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Direction of a relative seek
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeekDirection {
    Back,
    Forward,
}

/// Transport command bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KeyCommand {
    TogglePlay,
    Seek {
        direction: SeekDirection,
        step: Duration,
    },
    /// Signed volume change
    Volume { delta: f32 },
    CloseOverlay,
}

impl KeyCommand {
    /// Map a keyboard event to a command
    ///
    /// `code` is the physical key code (`"Space"`), `key` the logical key
    /// (`"ArrowLeft"`); `typing` is true when focus is in an input, textarea
    /// or content-editable element. Returns `None` for unbound keys; bound
    /// keys should have their default action prevented.
    pub fn from_key(code: &str, key: &str, typing: bool, config: &PlayerConfig) -> Option<Self> {
        if typing {
            return None;
        }
        if code == "Space" {
            return Some(KeyCommand::TogglePlay);
        }
        let step = config.seek_step();
        match key {
            "ArrowRight" => Some(KeyCommand::Seek {
                direction: SeekDirection::Forward,
                step,
            }),
            "ArrowLeft" => Some(KeyCommand::Seek {
                direction: SeekDirection::Back,
                step,
            }),
            "ArrowUp" => Some(KeyCommand::Volume {
                delta: config.volume_step,
            }),
            "ArrowDown" => Some(KeyCommand::Volume {
                delta: -config.volume_step,
            }),
            "Escape" => Some(KeyCommand::CloseOverlay),
            _ => None,
        }
    }
}

/// Position after a relative seek, clamped to `[0, duration]`
///
/// With an unknown duration, forward seeks clamp to zero like the audio
/// element does before metadata arrives.
pub fn seek_target(
    position: Duration,
    duration: Option<Duration>,
    direction: SeekDirection,
    step: Duration,
) -> Duration {
    match direction {
        SeekDirection::Back => position.saturating_sub(step),
        SeekDirection::Forward => (position + step).min(duration.unwrap_or(Duration::ZERO)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: &str, key: &str) -> Option<KeyCommand> {
        KeyCommand::from_key(code, key, false, &PlayerConfig::default())
    }

    #[test]
    fn default_bindings() {
        assert_eq!(key("Space", " "), Some(KeyCommand::TogglePlay));
        assert_eq!(
            key("ArrowRight", "ArrowRight"),
            Some(KeyCommand::Seek {
                direction: SeekDirection::Forward,
                step: Duration::from_secs(5)
            })
        );
        assert_eq!(
            key("ArrowDown", "ArrowDown"),
            Some(KeyCommand::Volume { delta: -0.05 })
        );
        assert_eq!(key("Escape", "Escape"), Some(KeyCommand::CloseOverlay));
        assert_eq!(key("KeyA", "a"), None);
    }

    #[test]
    fn typing_suppresses_bindings() {
        let config = PlayerConfig::default();
        assert_eq!(KeyCommand::from_key("Space", " ", true, &config), None);
        assert_eq!(KeyCommand::from_key("Escape", "Escape", true, &config), None);
    }

    #[test]
    fn seek_target_clamps() {
        let step = Duration::from_secs(5);
        let total = Some(Duration::from_secs(100));

        assert_eq!(
            seek_target(Duration::from_secs(2), total, SeekDirection::Back, step),
            Duration::ZERO
        );
        assert_eq!(
            seek_target(Duration::from_secs(97), total, SeekDirection::Forward, step),
            Duration::from_secs(100)
        );
        assert_eq!(
            seek_target(Duration::from_secs(10), None, SeekDirection::Forward, step),
            Duration::ZERO
        );
    }
}
