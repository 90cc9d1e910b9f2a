//! Playback controller - core orchestration
//!
//! Owns the transport state (current album, current track index, shuffle,
//! repeat, playing flag), decides which track plays next and drives the
//! audio output. Views observe it through `snapshot()` and drained events.
//!
//! Starting playback is asynchronous on every platform that matters, so each
//! transport operation is split in two:
//! 1. `prepare_*` performs every state change synchronously and returns the
//!    in-flight start, if the operation wants one
//! 2. `finish_play` applies the platform's answer
//!
//! The `async` methods (`play`, `next_track`, ...) chain both steps. Hosts
//! that share the controller behind `Rc<RefCell<..>>` call the steps
//! themselves so no borrow is held across the await.

use crate::{
    config::PlayerConfig,
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    keys::{seek_target, KeyCommand, SeekDirection},
    output::AudioOutput,
    shuffle::pick_other_index,
    time::{format_duration, seek_percent, ProgressDisplay},
    types::{PlayOutcome, PlaybackSnapshot, RepeatMode},
    visualizer::{Visualizer, VisualizerSource},
    volume::{clamp_volume, step_volume, VolumeLevel},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use vibes_core::Album;

/// A playback start requested from the audio output but not yet answered
///
/// Carries the load epoch it was issued under so a late answer for a
/// replaced source (or a start overtaken by a pause) can be discarded.
#[must_use = "a pending start does nothing until settled and passed to finish_play"]
pub struct PendingPlay<F> {
    epoch: u64,
    start: Option<F>,
}

impl<F> PendingPlay<F>
where
    F: Future<Output = Result<()>>,
{
    /// Wait for the platform's answer
    pub async fn settle(self) -> SettledPlay {
        let result = match self.start {
            Some(start) => start.await,
            None => Err(PlaybackError::NoTrackLoaded),
        };
        SettledPlay {
            epoch: self.epoch,
            result,
        }
    }
}

/// The platform's answer to a `PendingPlay`
pub struct SettledPlay {
    epoch: u64,
    result: Result<()>,
}

/// Pending start for a given output type
pub type Pending<O> = PendingPlay<<O as AudioOutput>::Start>;

/// Central playback control
///
/// Explicit per-page context: construct one per player and keep it for the
/// session. Nothing here is persisted.
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    config: PlayerConfig,

    // Transport state
    album: Option<Arc<Album>>,
    current_index: Option<usize>,
    shuffle: bool,
    repeat: RepeatMode,
    is_playing: bool,

    // Projections of the output clock
    progress: ProgressDisplay,

    overlay_open: bool,
    visualizer: Visualizer,
    rng: StdRng,

    // Bumped on every load and pause; stale starts are discarded
    epoch: u64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// Create a controller driving `output`
    pub fn new(config: PlayerConfig, output: O) -> Self {
        Self::with_rng(config, output, StdRng::from_entropy())
    }

    /// Create a controller with a deterministic shuffle sequence
    pub fn with_seed(config: PlayerConfig, output: O, seed: u64) -> Self {
        Self::with_rng(config, output, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlayerConfig, mut output: O, rng: StdRng) -> Self {
        output.set_volume(clamp_volume(config.volume));

        Self {
            output,
            album: None,
            current_index: None,
            shuffle: config.shuffle,
            repeat: config.repeat,
            is_playing: false,
            progress: ProgressDisplay::default(),
            overlay_open: false,
            visualizer: Visualizer::new(config.visualizer.clone()),
            rng,
            epoch: 0,
            pending_events: Vec::new(),
            config,
        }
    }

    // ===== Selection =====

    /// Open an album without loading a track
    ///
    /// The album becomes the target of transport operations. Opening a
    /// different album forgets the current index (the playing source, if
    /// any, keeps playing until something else is loaded).
    pub fn select_album(&mut self, album: Arc<Album>) {
        let same = self
            .album
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &album));
        if !same {
            self.current_index = None;
        }

        debug!(album = %album.id, "Album selected");
        self.emit(PlaybackEvent::AlbumSelected {
            album_id: album.id.clone(),
        });
        self.album = Some(album);
        self.overlay_open = true;
    }

    /// Close the album overlay
    ///
    /// Returns `true` if it was open.
    pub fn dismiss_overlay(&mut self) -> bool {
        if !self.overlay_open {
            return false;
        }
        self.overlay_open = false;
        self.emit(PlaybackEvent::OverlayDismissed);
        true
    }

    /// Assign `album.tracks[index]` to the output
    ///
    /// Resets elapsed/total labels and the seek bar. Does not start playback.
    /// The audio locator is not validated.
    pub fn load_track(&mut self, album: Arc<Album>, index: usize) -> Result<()> {
        let track = album.track(index).ok_or(PlaybackError::IndexOutOfBounds {
            index,
            len: album.len(),
        })?;

        self.epoch += 1;
        self.output.load(&track.audio);

        debug!(album = %album.id, index, title = %track.title, "Track loaded");
        self.emit(PlaybackEvent::TrackLoaded {
            album_id: album.id.clone(),
            index,
            title: track.title.clone(),
        });

        self.album = Some(album);
        self.current_index = Some(index);

        // Replacing the source stops whatever was playing
        self.mark_stopped();

        self.progress = ProgressDisplay::default();
        self.emit_progress();
        Ok(())
    }

    // ===== Playback Control =====

    /// Ask the output to start; state changes once the answer arrives
    pub fn prepare_play(&mut self) -> Pending<O> {
        let start = self.output.has_source().then(|| self.output.start());
        PendingPlay {
            epoch: self.epoch,
            start,
        }
    }

    /// Apply the answer to a start request
    ///
    /// Failures are absorbed: the UI stays paused and nothing propagates.
    pub fn finish_play(&mut self, settled: SettledPlay) -> PlayOutcome {
        if settled.epoch != self.epoch {
            debug!(
                issued = settled.epoch,
                current = self.epoch,
                "Discarding superseded playback start"
            );
            return PlayOutcome::Superseded;
        }

        match settled.result {
            Ok(()) => {
                if !self.is_playing {
                    self.is_playing = true;
                    self.emit(PlaybackEvent::StateChanged { is_playing: true });
                }
                if !self.config.visualizer.reduced_motion && !self.output.has_analysis() {
                    self.fall_back_visualizer();
                }
                if self.visualizer.start() {
                    self.emit(PlaybackEvent::VisualizerStarted);
                }
                PlayOutcome::Started
            }
            Err(e) => {
                warn!(error = %e, "Playback start blocked");
                self.mark_stopped();
                self.emit(PlaybackEvent::PlaybackBlocked);
                PlayOutcome::Blocked
            }
        }
    }

    /// Load `index` of the current album and request playback
    ///
    /// No-op (`Ok(None)`) without a current album. The load completes and
    /// the overlay is dismissed before the start is requested.
    pub fn prepare_play_track(&mut self, index: usize) -> Result<Option<Pending<O>>> {
        let Some(album) = self.album.clone() else {
            return Ok(None);
        };
        self.load_track(album, index)?;
        self.dismiss_overlay();
        Ok(Some(self.prepare_play()))
    }

    /// Pause playback
    ///
    /// Always succeeds; also invalidates any start still in flight.
    pub fn pause(&mut self) {
        self.output.pause();
        self.epoch += 1;
        self.mark_stopped();
    }

    /// Flip play/pause, or start the selected album from its first track
    pub fn prepare_toggle(&mut self) -> Option<Pending<O>> {
        if self.output.has_source() {
            if self.output.is_paused() {
                Some(self.prepare_play())
            } else {
                self.pause();
                None
            }
        } else if self.album.is_some() {
            self.prepare_play_track(0).unwrap_or_else(|e| {
                warn!(error = %e, "Selected album has nothing to play");
                None
            })
        } else {
            None
        }
    }

    /// Choose and load the next track under the shuffle/repeat policy
    ///
    /// In priority order: repeat-one restarts the current track; shuffle
    /// picks any other track uniformly; otherwise advance, wrapping under
    /// repeat-all and stopping (index kept) at the end.
    pub fn prepare_next(&mut self) -> Option<Pending<O>> {
        let album = self.album.clone()?;
        let len = album.len();
        if len == 0 {
            return None;
        }

        if self.repeat == RepeatMode::One && self.current_index.is_some() {
            return Some(self.prepare_replay());
        }

        let next = if self.shuffle {
            pick_other_index(&mut self.rng, len, self.current_index)
        } else {
            let next = self.current_index.map_or(0, |i| i + 1);
            if next >= len {
                if self.repeat == RepeatMode::All {
                    0
                } else {
                    info!(album = %album.id, "Reached end of album");
                    self.pause();
                    self.emit(PlaybackEvent::QueueEnded);
                    return None;
                }
            } else {
                next
            }
        };

        self.prepare_play_track(next).unwrap_or_else(|e| {
            warn!(error = %e, "Next track unavailable");
            None
        })
    }

    /// Restart the current track, or move to the previous one
    ///
    /// Past the restart threshold (3 s by default) the current track is
    /// rewound in place. Otherwise move back one track, wrapping to the last
    /// under repeat-all and clamping to the first otherwise.
    pub fn prepare_prev(&mut self) -> Option<Pending<O>> {
        let album = self.album.clone()?;
        let len = album.len();
        if len == 0 {
            return None;
        }

        if self.output.position() > self.config.restart_threshold() {
            self.output.rewind();
            self.handle_time_update();
            return None;
        }

        let prev = match self.current_index {
            Some(i) if i > 0 => i - 1,
            _ if self.repeat == RepeatMode::All => len - 1,
            _ => 0,
        };

        self.prepare_play_track(prev).unwrap_or_else(|e| {
            warn!(error = %e, "Previous track unavailable");
            None
        })
    }

    /// React to the output reaching the end of the current track
    pub fn prepare_ended(&mut self) -> Option<Pending<O>> {
        if self.repeat == RepeatMode::One && self.current_index.is_some() {
            return Some(self.prepare_replay());
        }
        self.prepare_next()
    }

    /// Apply a keyboard command
    pub fn prepare_key(&mut self, command: KeyCommand) -> Option<Pending<O>> {
        match command {
            KeyCommand::TogglePlay => return self.prepare_toggle(),
            KeyCommand::Seek { direction, step } => {
                self.seek_by(direction, step);
            }
            KeyCommand::Volume { delta } => {
                self.adjust_volume(delta);
            }
            KeyCommand::CloseOverlay => {
                self.dismiss_overlay();
            }
        }
        None
    }

    fn prepare_replay(&mut self) -> Pending<O> {
        self.output.rewind();
        self.handle_time_update();
        self.prepare_play()
    }

    // ===== Async transport =====

    /// Settle a pending start and apply the answer
    pub async fn complete(&mut self, pending: Pending<O>) -> PlayOutcome {
        let settled = pending.settle().await;
        self.finish_play(settled)
    }

    async fn run(&mut self, pending: Option<Pending<O>>) -> Option<PlayOutcome> {
        match pending {
            Some(pending) => Some(self.complete(pending).await),
            None => None,
        }
    }

    /// Start or resume playback
    pub async fn play(&mut self) -> PlayOutcome {
        let pending = self.prepare_play();
        self.complete(pending).await
    }

    /// Load and play a track of the current album
    ///
    /// `Ok(None)` when no album is selected.
    pub async fn play_track(&mut self, index: usize) -> Result<Option<PlayOutcome>> {
        let pending = self.prepare_play_track(index)?;
        Ok(self.run(pending).await)
    }

    pub async fn toggle_play(&mut self) -> Option<PlayOutcome> {
        let pending = self.prepare_toggle();
        self.run(pending).await
    }

    pub async fn next_track(&mut self) -> Option<PlayOutcome> {
        let pending = self.prepare_next();
        self.run(pending).await
    }

    pub async fn prev_track(&mut self) -> Option<PlayOutcome> {
        let pending = self.prepare_prev();
        self.run(pending).await
    }

    /// Output reported the end of the current track
    pub async fn handle_ended(&mut self) -> Option<PlayOutcome> {
        let pending = self.prepare_ended();
        self.run(pending).await
    }

    pub async fn handle_key(&mut self, command: KeyCommand) -> Option<PlayOutcome> {
        let pending = self.prepare_key(command);
        self.run(pending).await
    }

    // ===== Shuffle & Repeat =====

    /// Set the shuffle flag; the loaded track is unaffected
    pub fn set_shuffle(&mut self, on: bool) {
        self.shuffle = on;
        self.emit(PlaybackEvent::ShuffleChanged { enabled: on });
    }

    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.shuffle);
    }

    /// Advance repeat through off → all → one → off
    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.set_repeat(self.repeat.cycle());
        self.repeat
    }

    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.emit(PlaybackEvent::RepeatChanged { mode });
    }

    // ===== Seek & Volume =====

    /// Seek-bar input, `percent` in 0-100
    ///
    /// Ignored until the output knows its duration. Returns whether a seek
    /// happened.
    pub fn seek_to_percent(&mut self, percent: f64) -> bool {
        let Some(duration) = self.output.duration() else {
            return false;
        };
        let fraction = if percent.is_finite() {
            (percent / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.output.seek(duration.mul_f64(fraction));
        self.handle_time_update();
        true
    }

    /// Seek relative to the current position, clamped to the track
    pub fn seek_by(&mut self, direction: SeekDirection, step: Duration) {
        let target = seek_target(
            self.output.position(),
            self.output.duration(),
            direction,
            step,
        );
        self.output.seek(target);
        self.handle_time_update();
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        self.output.set_volume(volume);
        self.emit(PlaybackEvent::VolumeChanged {
            volume,
            level: VolumeLevel::from_volume(volume),
        });
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(step_volume(self.output.volume(), delta));
    }

    // ===== Output notifications =====

    /// Duration became known
    pub fn handle_metadata_loaded(&mut self) {
        self.progress.total = self
            .output
            .duration()
            .map_or_else(|| crate::time::ZERO_LABEL.to_string(), format_duration);
        self.emit_progress();
    }

    /// Playback position moved
    pub fn handle_time_update(&mut self) {
        let position = self.output.position();
        let duration = self.output.duration();
        self.progress.elapsed = format_duration(position);
        if duration.is_some() {
            self.progress.seek_percent = seek_percent(position, duration);
        }
        self.emit_progress();
    }

    // ===== State Queries =====

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            album: self.album.clone(),
            current_index: self.current_index,
            shuffle: self.shuffle,
            repeat: self.repeat,
            is_playing: self.is_playing,
            progress: self.progress.clone(),
            volume: self.output.volume(),
            overlay_open: self.overlay_open,
        }
    }

    pub fn album(&self) -> Option<&Arc<Album>> {
        self.album.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn progress(&self) -> &ProgressDisplay {
        &self.progress
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Direct access to the output (host wiring and tests)
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    /// Switch the visualizer to its decorative fallback for the session
    ///
    /// Stops live sampling first if it was running.
    pub fn fall_back_visualizer(&mut self) {
        if self.visualizer.source() == VisualizerSource::Fallback {
            return;
        }
        if self.visualizer.use_fallback() {
            self.emit(PlaybackEvent::VisualizerStopped);
        }
        info!("Frequency analysis unavailable, using fallback visualizer");
        self.emit(PlaybackEvent::VisualizerFallback);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn mark_stopped(&mut self) {
        if self.is_playing {
            self.is_playing = false;
            self.emit(PlaybackEvent::StateChanged { is_playing: false });
        }
        if self.visualizer.stop() {
            self.emit(PlaybackEvent::VisualizerStopped);
        }
    }

    fn emit_progress(&mut self) {
        self.emit(PlaybackEvent::Progress {
            elapsed: self.progress.elapsed.clone(),
            total: self.progress.total.clone(),
            seek_percent: self.progress.seek_percent,
        });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

impl<O: AudioOutput + Default> Default for PlaybackController<O> {
    fn default() -> Self {
        Self::new(PlayerConfig::default(), O::default())
    }
}
