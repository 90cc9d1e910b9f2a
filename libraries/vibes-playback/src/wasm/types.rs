//! JS-facing view types
//!
//! Plain serializable structs (camelCase fields) passed to JavaScript
//! through `serde-wasm-bindgen`.

use crate::types::PlaybackSnapshot;
use crate::volume::VolumeLevel;
use serde::Serialize;
use vibes_core::{Album, Track};

/// Gallery card / overlay view of an album
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmAlbum {
    id: String,
    title: String,
    artist: String,
    year: i32,
    cover: String,
    byline: String,
    card_label: String,
    tracks: Vec<WasmTrack>,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmTrack {
    title: String,
    duration: String,
    row_label: String,
}

impl From<&Album> for WasmAlbum {
    fn from(album: &Album) -> Self {
        Self {
            id: album.id.clone(),
            title: album.title.clone(),
            artist: album.artist.clone(),
            year: album.year,
            cover: album.cover.clone(),
            byline: album.byline(),
            card_label: album.card_label(),
            tracks: album
                .tracks
                .iter()
                .enumerate()
                .map(|(i, track)| WasmTrack::new(i, track))
                .collect(),
        }
    }
}

impl WasmTrack {
    fn new(index: usize, track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            duration: track.duration.clone(),
            row_label: track.row_label(index),
        }
    }
}

/// Everything the player bar renders
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WasmSnapshot {
    album_id: Option<String>,
    cover: Option<String>,
    track_title: Option<String>,
    subtitle: Option<String>,
    current_index: Option<usize>,
    is_playing: bool,
    play_label: &'static str,
    shuffle: bool,
    shuffle_label: &'static str,
    repeat: String,
    repeat_label: String,
    elapsed: String,
    total: String,
    seek_percent: f64,
    volume: f32,
    volume_icon: &'static str,
    overlay_open: bool,
}

impl From<&PlaybackSnapshot> for WasmSnapshot {
    fn from(snapshot: &PlaybackSnapshot) -> Self {
        let album = snapshot.album.as_deref();
        Self {
            album_id: album.map(|a| a.id.clone()),
            cover: album.map(|a| a.cover.clone()),
            track_title: snapshot.track_title().map(str::to_string),
            subtitle: album.map(Album::player_subtitle),
            current_index: snapshot.current_index,
            is_playing: snapshot.is_playing,
            play_label: snapshot.play_label(),
            shuffle: snapshot.shuffle,
            shuffle_label: snapshot.shuffle_label(),
            repeat: snapshot.repeat.to_string(),
            repeat_label: snapshot.repeat.label(),
            elapsed: snapshot.progress.elapsed.clone(),
            total: snapshot.progress.total.clone(),
            seek_percent: snapshot.progress.seek_percent,
            volume: snapshot.volume,
            volume_icon: VolumeLevel::from_volume(snapshot.volume).icon(),
            overlay_open: snapshot.overlay_open,
        }
    }
}
