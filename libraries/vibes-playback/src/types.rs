//! Core types for playback control

use crate::time::ProgressDisplay;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use vibes_core::Album;

/// Repeat mode
///
/// Only ever changes through the fixed cycle off → all → one → off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track
    #[default]
    Off,

    /// Wrap around the album
    All,

    /// Replay the current track
    One,
}

impl RepeatMode {
    /// Next mode in the off → all → one → off cycle
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
        }
    }

    /// Button label / tooltip, e.g. "Repeat all"
    pub fn label(self) -> String {
        format!("Repeat {}", self.as_str())
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(RepeatMode::Off),
            "all" => Ok(RepeatMode::All),
            "one" => Ok(RepeatMode::One),
            other => Err(format!(
                "Invalid repeat mode '{other}'. Use 'off', 'all', or 'one'"
            )),
        }
    }
}

/// Result of a best-effort playback start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayOutcome {
    /// Audio is playing; `is_playing` is now true
    Started,

    /// The platform refused to start (autoplay policy, decode failure)
    Blocked,

    /// A newer load or a pause happened while the start was in flight;
    /// the result was discarded
    Superseded,
}

/// Read-only view of the transport state for UI layers
#[derive(Debug, Clone, Default)]
pub struct PlaybackSnapshot {
    pub album: Option<Arc<Album>>,
    pub current_index: Option<usize>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub is_playing: bool,
    pub progress: ProgressDisplay,
    pub volume: f32,
    pub overlay_open: bool,
}

impl PlaybackSnapshot {
    /// Title of the loaded track, if any
    pub fn track_title(&self) -> Option<&str> {
        let album = self.album.as_ref()?;
        let index = self.current_index?;
        album.track(index).map(|t| t.title.as_str())
    }

    /// Play button label ("Play" while paused, "Pause" while playing)
    pub fn play_label(&self) -> &'static str {
        if self.is_playing {
            "Pause"
        } else {
            "Play"
        }
    }

    /// Shuffle button tooltip
    pub fn shuffle_label(&self) -> &'static str {
        if self.shuffle {
            "Shuffle on"
        } else {
            "Shuffle off"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycles_through_three_states() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
    }

    #[test]
    fn repeat_labels_and_parsing() {
        assert_eq!(RepeatMode::All.label(), "Repeat all");
        assert_eq!("one".parse::<RepeatMode>().unwrap(), RepeatMode::One);
        assert!("sometimes".parse::<RepeatMode>().is_err());
    }

    #[test]
    fn repeat_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RepeatMode::One).unwrap(), "\"one\"");
        let mode: RepeatMode = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(mode, RepeatMode::All);
    }

    #[test]
    fn empty_snapshot_labels() {
        let snapshot = PlaybackSnapshot::default();
        assert_eq!(snapshot.play_label(), "Play");
        assert_eq!(snapshot.shuffle_label(), "Shuffle off");
        assert!(snapshot.track_title().is_none());
    }
}
