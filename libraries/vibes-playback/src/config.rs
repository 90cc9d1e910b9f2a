//! Player configuration
//!
//! Loaded through the `config` crate: an optional file, then `VIBES_`
//! environment overrides (`VIBES_SEEK_STEP_MS=10000`,
//! `VIBES_VISUALIZER__BARS=48`). Browser hosts pass a JSON string instead.

use crate::error::Result;
use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Elapsed time after which "previous" restarts the track (default: 3000)
    #[serde(default = "default_restart_threshold_ms")]
    pub restart_threshold_ms: u64,

    /// Arrow-key seek step (default: 5000)
    #[serde(default = "default_seek_step_ms")]
    pub seek_step_ms: u64,

    /// Arrow-key volume step (default: 0.05)
    #[serde(default = "default_volume_step")]
    pub volume_step: f32,

    /// Initial output volume, 0.0-1.0 (default: 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// Initial shuffle flag (default: false)
    #[serde(default)]
    pub shuffle: bool,

    /// Initial repeat mode (default: off)
    #[serde(default)]
    pub repeat: RepeatMode,

    #[serde(default)]
    pub visualizer: VisualizerConfig,
}

/// Visualizer sampling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Number of bars sampled from the spectrum (default: 32)
    #[serde(default = "default_bars")]
    pub bars: usize,

    /// Analyser FFT size (default: 1024)
    #[serde(default = "default_fft_size")]
    pub fft_size: u32,

    /// Bars in the decorative fallback animation (default: 24)
    #[serde(default = "default_fallback_bars")]
    pub fallback_bars: usize,

    /// Never start per-frame sampling (prefers-reduced-motion)
    #[serde(default)]
    pub reduced_motion: bool,
}

fn default_restart_threshold_ms() -> u64 {
    3000
}

fn default_seek_step_ms() -> u64 {
    5000
}

fn default_volume_step() -> f32 {
    0.05
}

fn default_volume() -> f32 {
    1.0
}

fn default_bars() -> usize {
    32
}

fn default_fft_size() -> u32 {
    1024
}

fn default_fallback_bars() -> usize {
    24
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            restart_threshold_ms: default_restart_threshold_ms(),
            seek_step_ms: default_seek_step_ms(),
            volume_step: default_volume_step(),
            volume: default_volume(),
            shuffle: false,
            repeat: RepeatMode::Off,
            visualizer: VisualizerConfig::default(),
        }
    }
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            bars: default_bars(),
            fft_size: default_fft_size(),
            fallback_bars: default_fallback_bars(),
            reduced_motion: false,
        }
    }
}

impl PlayerConfig {
    /// Load configuration from an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path).required(false));
        }

        // Override with environment variables (prefixed with VIBES_)
        settings = settings.add_source(
            config::Environment::with_prefix("VIBES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Parse configuration from a JSON document (browser hosts)
    pub fn from_json(json: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(json, config::FileFormat::Json))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn restart_threshold(&self) -> Duration {
        Duration::from_millis(self.restart_threshold_ms)
    }

    pub fn seek_step(&self) -> Duration {
        Duration::from_millis(self.seek_step_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.restart_threshold(), Duration::from_secs(3));
        assert_eq!(config.seek_step(), Duration::from_secs(5));
        assert_eq!(config.volume_step, 0.05);
        assert_eq!(config.volume, 1.0);
        assert!(!config.shuffle);
        assert_eq!(config.repeat, RepeatMode::Off);
        assert_eq!(config.visualizer.bars, 32);
        assert_eq!(config.visualizer.fft_size, 1024);
        assert_eq!(config.visualizer.fallback_bars, 24);
    }

    #[test]
    fn json_overrides_keep_other_defaults() {
        let config =
            PlayerConfig::from_json(r#"{"repeat":"all","visualizer":{"reduced_motion":true}}"#)
                .unwrap();
        assert_eq!(config.repeat, RepeatMode::All);
        assert!(config.visualizer.reduced_motion);
        assert_eq!(config.visualizer.bars, 32);
        assert_eq!(config.seek_step_ms, 5000);
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(PlayerConfig::from_json("{}").unwrap(), PlayerConfig::default());
    }

    #[test]
    fn invalid_repeat_is_rejected() {
        assert!(PlayerConfig::from_json(r#"{"repeat":"twice"}"#).is_err());
    }
}
