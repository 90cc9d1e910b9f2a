//! Album types

use super::Track;
use serde::{Deserialize, Serialize};

pub type AlbumId = String;

/// An album: shared artist/year/cover metadata plus an ordered track list
///
/// Immutable after load. The catalog hands albums out as `Arc<Album>` and
/// playback refers to the current album by identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub cover: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Album {
    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// "Artist • Year", shown under gallery cards and in the album overlay
    pub fn byline(&self) -> String {
        format!("{} • {}", self.artist, self.year)
    }

    /// "Artist — Title", shown in the player bar
    pub fn player_subtitle(&self) -> String {
        format!("{} — {}", self.artist, self.title)
    }

    /// Accessible label for the gallery card
    pub fn card_label(&self) -> String {
        format!("Open {} by {} ({})", self.title, self.artist, self.year)
    }

    /// Case-insensitive match against title or artist
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.artist.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn album() -> Album {
        Album {
            id: "a1".to_string(),
            title: "Tide Lines".to_string(),
            artist: "Marea".to_string(),
            year: 2024,
            cover: "covers/tide.jpg".to_string(),
            tracks: vec![Track::new("Low Sun", "3:12", "audio/low-sun.mp3")],
        }
    }

    #[test]
    fn display_strings() {
        let album = album();
        assert_eq!(album.byline(), "Marea • 2024");
        assert_eq!(album.player_subtitle(), "Marea — Tide Lines");
        assert_eq!(album.card_label(), "Open Tide Lines by Marea (2024)");
    }

    #[test]
    fn matches_title_or_artist() {
        let album = album();
        assert!(album.matches("tide"));
        assert!(album.matches("mar"));
        assert!(album.matches(""));
        assert!(!album.matches("jazz"));
    }

    #[test]
    fn missing_tracks_default_to_empty() {
        let album: Album = serde_json::from_str(
            r#"{"id":"x","title":"T","artist":"A","year":1999,"cover":"c.jpg"}"#,
        )
        .unwrap();
        assert!(album.is_empty());
        assert!(album.track(0).is_none());
    }
}
