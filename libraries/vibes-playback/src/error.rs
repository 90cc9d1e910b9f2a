//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Track index outside the album's track list
    #[error("Track index {index} out of bounds for album with {len} tracks")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The audio output refused or failed to start playback
    #[error("Audio output error: {0}")]
    AudioOutput(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
