//! Platform-agnostic audio output trait
//!
//! Abstracts the single audio element the controller drives (an
//! `HtmlAudioElement` in the browser, a mock in tests).

use crate::error::Result;
use std::future::Future;
use std::time::Duration;

/// The one shared audio output
///
/// At most one source is active: `load` replaces the previous source, which
/// implicitly cancels its in-flight load.
pub trait AudioOutput {
    /// Future returned by `start`
    ///
    /// It must not borrow the output so the controller can be released while
    /// the platform decides whether playback may begin.
    type Start: Future<Output = Result<()>> + 'static;

    /// Assign a new source (no validation; an empty locator is accepted)
    fn load(&mut self, locator: &str);

    /// Begin or resume playback
    ///
    /// Resolves to `Err` when the platform refuses (autoplay policy,
    /// undecodable source).
    fn start(&mut self) -> Self::Start;

    /// Pause playback; pausing a paused output is a no-op
    fn pause(&mut self);

    /// Whether the output is currently paused
    fn is_paused(&self) -> bool;

    /// Whether a source has been assigned
    fn has_source(&self) -> bool;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total duration, once metadata has loaded
    fn duration(&self) -> Option<Duration>;

    /// Move the playback position
    fn seek(&mut self, position: Duration);

    /// Linear volume in `[0.0, 1.0]`
    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    /// Restart the current source from the beginning
    ///
    /// Equivalent to `seek(Duration::ZERO)`
    fn rewind(&mut self) {
        self.seek(Duration::ZERO);
    }

    /// Whether frequency data is available to the visualizer
    ///
    /// Checked after a successful start; outputs that build their analysis
    /// graph lazily report the state reached by that start.
    fn has_analysis(&self) -> bool {
        true
    }
}

/// Dummy output for unit tests
///
/// Starts succeed unless `blocked` is set.
#[cfg(test)]
pub(crate) struct DummyOutput {
    pub source: Option<String>,
    pub paused: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
    pub blocked: bool,
    pub analysis: bool,
    pub starts: usize,
}

#[cfg(test)]
impl DummyOutput {
    pub fn new() -> Self {
        Self {
            source: None,
            paused: true,
            position: Duration::ZERO,
            duration: None,
            volume: 1.0,
            blocked: false,
            analysis: true,
            starts: 0,
        }
    }
}

#[cfg(test)]
impl AudioOutput for DummyOutput {
    type Start = std::future::Ready<Result<()>>;

    fn load(&mut self, locator: &str) {
        self.source = Some(locator.to_string());
        self.paused = true;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    fn start(&mut self) -> Self::Start {
        self.starts += 1;
        if self.blocked {
            return std::future::ready(Err(crate::error::PlaybackError::AudioOutput(
                "autoplay blocked".to_string(),
            )));
        }
        self.paused = false;
        std::future::ready(Ok(()))
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn has_source(&self) -> bool {
        self.source.is_some()
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn has_analysis(&self) -> bool {
        self.analysis
    }
}
