//! Shared helpers for playback integration tests

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use vibes_core::{Album, Track};
use vibes_playback::{AudioOutput, PlaybackController, PlaybackError, PlayerConfig, Result};

/// How the mock answers `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPolicy {
    /// Resolve immediately with success
    Allow,
    /// Resolve immediately with an autoplay refusal
    Block,
    /// Resolve when the test releases the start (see `MockOutput::release`)
    Defer,
}

/// Mock audio element
///
/// Records every source assignment so tests can assert the load order.
pub struct MockOutput {
    pub loads: Vec<String>,
    pub paused: bool,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
    pub policy: StartPolicy,
    pub starts: usize,
    deferred: Vec<oneshot::Sender<Result<()>>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            loads: Vec::new(),
            paused: true,
            position: Duration::ZERO,
            duration: None,
            volume: 1.0,
            policy: StartPolicy::Allow,
            starts: 0,
            deferred: Vec::new(),
        }
    }

    pub fn with_policy(policy: StartPolicy) -> Self {
        Self {
            policy,
            ..Self::new()
        }
    }

    /// Answer the oldest deferred start
    pub fn release(&mut self, result: Result<()>) {
        if !self.deferred.is_empty() {
            let sender = self.deferred.remove(0);
            if result.is_ok() {
                self.paused = false;
            }
            let _ = sender.send(result);
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.loads.last().map(String::as_str)
    }
}

impl AudioOutput for MockOutput {
    type Start = Pin<Box<dyn Future<Output = Result<()>>>>;

    fn load(&mut self, locator: &str) {
        self.loads.push(locator.to_string());
        self.paused = true;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    fn start(&mut self) -> Self::Start {
        self.starts += 1;
        match self.policy {
            StartPolicy::Allow => {
                self.paused = false;
                Box::pin(std::future::ready(Ok(())))
            }
            StartPolicy::Block => Box::pin(std::future::ready(Err(PlaybackError::AudioOutput(
                "NotAllowedError".to_string(),
            )))),
            StartPolicy::Defer => {
                let (tx, rx) = oneshot::channel();
                self.deferred.push(tx);
                Box::pin(async move {
                    rx.await.unwrap_or_else(|_| {
                        Err(PlaybackError::AudioOutput("start dropped".to_string()))
                    })
                })
            }
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn has_source(&self) -> bool {
        !self.loads.is_empty()
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
}

/// Album `id` with `tracks` tracks whose audio locators are `{id}-{i}.mp3`
pub fn album(id: &str, tracks: usize) -> Arc<Album> {
    Arc::new(Album {
        id: id.to_string(),
        title: format!("Album {id}"),
        artist: "Marea".to_string(),
        year: 2024,
        cover: format!("covers/{id}.jpg"),
        tracks: (0..tracks)
            .map(|i| Track::new(format!("Track {i}"), "3:00", format!("{id}-{i}.mp3")))
            .collect(),
    })
}

pub fn controller(output: MockOutput) -> PlaybackController<MockOutput> {
    PlaybackController::with_seed(PlayerConfig::default(), output, 42)
}

/// Controller with `album` open and nothing loaded
pub fn controller_with_album(album: Arc<Album>) -> PlaybackController<MockOutput> {
    let mut controller = controller(MockOutput::new());
    controller.select_album(album);
    controller
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
