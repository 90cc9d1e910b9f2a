//! Playback Events
//!
//! Event-based communication for UI synchronization. The controller never
//! calls into views; it queues events that views drain and render:
//! - Album selection and track loads
//! - Play/pause transitions (and blocked starts)
//! - Shuffle/repeat changes
//! - Progress updates from the audio clock
//! - Visualizer start/stop

use crate::types::RepeatMode;
use crate::volume::VolumeLevel;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PlaybackEvent {
    /// An album was opened; its overlay is showing
    AlbumSelected {
        album_id: String,
    },

    /// A track was assigned to the audio output
    ///
    /// Views reset elapsed/total to "0:00" and the seek bar to 0.
    TrackLoaded {
        album_id: String,
        index: usize,
        title: String,
    },

    /// Playing flag changed
    StateChanged {
        is_playing: bool,
    },

    /// The platform refused to start playback; the UI stays paused
    PlaybackBlocked,

    /// Advanced past the last track without repeat-all
    QueueEnded,

    ShuffleChanged {
        enabled: bool,
    },

    RepeatChanged {
        mode: RepeatMode,
    },

    /// Elapsed/total labels and seek-bar position
    Progress {
        elapsed: String,
        total: String,
        seek_percent: f64,
    },

    VolumeChanged {
        volume: f32,
        level: VolumeLevel,
    },

    /// The album overlay should close
    OverlayDismissed,

    /// Per-frame visualizer sampling should run
    VisualizerStarted,

    /// Per-frame visualizer sampling must stop (clear the frame callback)
    VisualizerStopped,

    /// No frequency analysis on this platform; show the decorative bars
    VisualizerFallback,
}
