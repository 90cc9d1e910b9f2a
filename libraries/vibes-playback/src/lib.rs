//! Summery Vibes - Playback Control
//!
//! Platform-agnostic playback control for the Summery Vibes player.
//!
//! This crate provides:
//! - Track selection within the open album (next, previous, ended)
//! - Shuffle (uniform over the other tracks) and repeat modes (Off, All, One)
//! - Async playback starts that tolerate autoplay refusal and stale answers
//! - Elapsed/total labels and seek-bar projections
//! - Volume control and keyboard bindings
//! - Visualizer bar sampling
//!
//! # Architecture
//!
//! The controller drives a single [`AudioOutput`]. In the browser that is an
//! `HtmlAudioElement` (see the `wasm` feature); tests use a mock. The
//! controller keeps no clock of its own and reads position and duration back
//! from the output.
//!
//! # Example: Shuffle and Repeat
//!
//! ```rust,no_run
//! use std::future::{ready, Ready};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vibes_core::Catalog;
//! use vibes_playback::{AudioOutput, PlaybackController, PlayerConfig, RepeatMode, Result};
//!
//! #[derive(Default)]
//! struct Silent {
//!     source: Option<String>,
//!     paused: bool,
//!     volume: f32,
//! }
//!
//! impl AudioOutput for Silent {
//!     type Start = Ready<Result<()>>;
//!
//!     fn load(&mut self, locator: &str) {
//!         self.source = Some(locator.to_string());
//!     }
//!     fn start(&mut self) -> Self::Start {
//!         self.paused = false;
//!         ready(Ok(()))
//!     }
//!     fn pause(&mut self) {
//!         self.paused = true;
//!     }
//!     fn is_paused(&self) -> bool {
//!         self.paused
//!     }
//!     fn has_source(&self) -> bool {
//!         self.source.is_some()
//!     }
//!     fn position(&self) -> Duration {
//!         Duration::ZERO
//!     }
//!     fn duration(&self) -> Option<Duration> {
//!         None
//!     }
//!     fn seek(&mut self, _position: Duration) {}
//!     fn volume(&self) -> f32 {
//!         self.volume
//!     }
//!     fn set_volume(&mut self, volume: f32) {
//!         self.volume = volume;
//!     }
//! }
//!
//! let catalog = Catalog::fallback();
//! let mut controller = PlaybackController::new(PlayerConfig::default(), Silent::default());
//!
//! controller.select_album(Arc::clone(&catalog.albums()[0]));
//! controller.set_shuffle(true);
//! assert_eq!(controller.cycle_repeat(), RepeatMode::All);
//!
//! // Async hosts await the start
//! // controller.play_track(0).await?;
//! ```

#![forbid(unsafe_code)]

pub mod config;
mod controller;
mod error;
pub mod events;
pub mod keys;
mod output;
mod shuffle;
pub mod time;
pub mod types;
pub mod visualizer;
pub mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use config::{PlayerConfig, VisualizerConfig};
pub use controller::{Pending, PendingPlay, PlaybackController, SettledPlay};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use keys::{KeyCommand, SeekDirection};
pub use output::AudioOutput;
pub use shuffle::pick_other_index;
pub use time::{format_time, ProgressDisplay};
pub use types::{PlayOutcome, PlaybackSnapshot, RepeatMode};
pub use visualizer::{Visualizer, VisualizerSource};
pub use volume::VolumeLevel;
