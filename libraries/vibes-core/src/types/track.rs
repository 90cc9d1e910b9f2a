//! Track types

use serde::{Deserialize, Serialize};

/// A single playable audio item
///
/// Tracks carry no id of their own; they are identified by their position
/// within the parent album's track list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    /// Display-only "M:SS" string; never used for seek or progress math
    pub duration: String,
    /// Audio locator, accepted as-is (may be empty)
    pub audio: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        duration: impl Into<String>,
        audio: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            duration: duration.into(),
            audio: audio.into(),
        }
    }

    /// Accessible label for the track row at `index` (zero-based)
    pub fn row_label(&self, index: usize) -> String {
        format!(
            "Play track {}: {}, duration {}",
            index + 1,
            self.title,
            self.duration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_label_is_one_based() {
        let track = Track::new("Warm Intro", "0:02", "");
        assert_eq!(track.row_label(0), "Play track 1: Warm Intro, duration 0:02");
    }

    #[test]
    fn deserializes_input_contract() {
        let track: Track =
            serde_json::from_str(r#"{"title":"Low Sun","duration":"3:12","audio":"a.mp3"}"#)
                .unwrap();
        assert_eq!(track.title, "Low Sun");
        assert_eq!(track.duration, "3:12");
        assert_eq!(track.audio, "a.mp3");
    }
}
