//! WASM-compatible player
//!
//! Wraps the catalog and a `PlaybackController` over the page's audio element
//! with a JavaScript-friendly API. Controller events are forwarded to a
//! single `onEvent` callback as plain objects (`{ type: "trackLoaded", ... }`).

use super::output::HtmlAudioOutput;
use super::types::{WasmAlbum, WasmSnapshot};
use crate::config::PlayerConfig;
use crate::controller::{Pending, PlaybackController};
use crate::keys::KeyCommand;
use crate::types::{PlayOutcome, RepeatMode};
use crate::visualizer::{layout_bars, VisualizerSource, GRADIENT};
use js_sys::{Array, Function, Promise};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use vibes_core::{Album, Catalog};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Event, HtmlAudioElement};

type Controller = PlaybackController<HtmlAudioOutput>;

/// State shared between the JS-facing wrapper and the audio element listeners
struct Shared {
    controller: RefCell<Controller>,
    on_event: RefCell<Option<Function>>,
}

impl Shared {
    /// Forward queued controller events to JS
    ///
    /// Holds no borrow while the callback runs, so the callback may call
    /// back into the player.
    fn dispatch(&self) {
        let events = self.controller.borrow_mut().drain_events();
        let callback = self.on_event.borrow().clone();
        if let Some(callback) = callback {
            for event in &events {
                if let Ok(value) = to_js(event) {
                    callback.call1(&JsValue::NULL, &value).ok();
                }
            }
        }
    }

    /// Settle a pending start without holding the controller across the await
    async fn drive(self: Rc<Self>, pending: Option<Pending<HtmlAudioOutput>>) -> Option<PlayOutcome> {
        self.dispatch();
        let settled = pending?.settle().await;
        let outcome = self.controller.borrow_mut().finish_play(settled);
        self.dispatch();
        Some(outcome)
    }
}

/// Expose a pending start to JS as a Promise of the outcome name
fn promise(shared: &Rc<Shared>, pending: Option<Pending<HtmlAudioOutput>>) -> Promise {
    let shared = Rc::clone(shared);
    future_to_promise(async move {
        let outcome = shared.drive(pending).await;
        Ok(outcome.map_or(JsValue::UNDEFINED, |o| JsValue::from_str(outcome_name(o))))
    })
}

fn outcome_name(outcome: PlayOutcome) -> &'static str {
    match outcome {
        PlayOutcome::Started => "started",
        PlayOutcome::Blocked => "blocked",
        PlayOutcome::Superseded => "superseded",
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok().flatten())
        .is_some_and(|query| query.matches())
}

/// WASM-compatible player
#[wasm_bindgen]
pub struct WasmPlayer {
    shared: Rc<Shared>,
    catalog: Catalog,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player driving `audio`
    ///
    /// `config` is an optional JSON document with `PlayerConfig` fields.
    #[wasm_bindgen(constructor)]
    pub fn new(audio: HtmlAudioElement, config: Option<String>) -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let mut config = match config {
            Some(json) => PlayerConfig::from_json(&json)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => PlayerConfig::default(),
        };
        if prefers_reduced_motion() {
            config.visualizer.reduced_motion = true;
        }

        let analysis_fft = (!config.visualizer.reduced_motion).then_some(config.visualizer.fft_size);
        let shared = Rc::new(Shared {
            controller: RefCell::new(PlaybackController::new(
                config,
                HtmlAudioOutput::new(audio.clone(), analysis_fft),
            )),
            on_event: RefCell::new(None),
        });

        let mut player = WasmPlayer {
            shared,
            catalog: Catalog::fallback(),
            listeners: Vec::new(),
        };
        player.listen(&audio)?;
        Ok(player)
    }

    fn listen(&mut self, audio: &HtmlAudioElement) -> Result<(), JsValue> {
        let shared = Rc::clone(&self.shared);
        let ended = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let pending = shared.controller.borrow_mut().prepare_ended();
            let shared = Rc::clone(&shared);
            spawn_local(async move {
                shared.drive(pending).await;
            });
        });

        let shared = Rc::clone(&self.shared);
        let time_update = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            shared.controller.borrow_mut().handle_time_update();
            shared.dispatch();
        });

        let shared = Rc::clone(&self.shared);
        let metadata = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            shared.controller.borrow_mut().handle_metadata_loaded();
            shared.dispatch();
        });

        for (name, closure) in [
            ("ended", ended),
            ("timeupdate", time_update),
            ("loadedmetadata", metadata),
        ] {
            audio.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            self.listeners.push((name, closure));
        }
        Ok(())
    }

    // ===== Catalog =====

    /// Replace the catalog from `albums.json` text
    ///
    /// Unreadable or malformed text installs the one-album fallback catalog.
    #[wasm_bindgen(js_name = loadCatalog)]
    pub fn load_catalog(&mut self, json: &str) -> Result<JsValue, JsValue> {
        self.catalog = Catalog::from_json_or_fallback(json);
        self.albums()
    }

    /// Fallback catalog (network failure on the JS side)
    #[wasm_bindgen(js_name = useFallbackCatalog)]
    pub fn use_fallback_catalog(&mut self) -> Result<JsValue, JsValue> {
        self.catalog = Catalog::fallback();
        self.albums()
    }

    /// All albums, in catalog order
    pub fn albums(&self) -> Result<JsValue, JsValue> {
        Self::album_views(self.catalog.albums())
    }

    /// Filter albums by title or artist; returns the filtered list
    pub fn search(&mut self, query: &str) -> Result<JsValue, JsValue> {
        let filtered = self.catalog.search(query);
        Self::album_views(filtered)
    }

    /// First album in the catalog (seeds the player bar cover)
    pub fn featured(&self) -> Result<JsValue, JsValue> {
        match self.catalog.featured() {
            Some(album) => to_js(&WasmAlbum::from(album.as_ref())),
            None => Ok(JsValue::NULL),
        }
    }

    fn album_views(albums: &[Arc<Album>]) -> Result<JsValue, JsValue> {
        let views: Vec<WasmAlbum> = albums.iter().map(|a| WasmAlbum::from(a.as_ref())).collect();
        to_js(&views)
    }

    /// Open an album's overlay and make it the transport target
    #[wasm_bindgen(js_name = selectAlbum)]
    pub fn select_album(&mut self, id: &str) -> Result<JsValue, JsValue> {
        let album = self
            .catalog
            .require(id)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let view = to_js(&WasmAlbum::from(album.as_ref()))?;

        self.shared.controller.borrow_mut().select_album(Arc::clone(album));
        self.shared.dispatch();
        Ok(view)
    }

    #[wasm_bindgen(js_name = dismissOverlay)]
    pub fn dismiss_overlay(&self) {
        self.shared.controller.borrow_mut().dismiss_overlay();
        self.shared.dispatch();
    }

    // ===== Playback Control =====

    /// Load and play a track of the open album
    ///
    /// Resolves to "started", "blocked", "superseded", or `undefined` when
    /// no album is open.
    #[wasm_bindgen(js_name = playTrack)]
    pub fn play_track(&self, index: usize) -> Result<Promise, JsValue> {
        let pending = self
            .shared
            .controller
            .borrow_mut()
            .prepare_play_track(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(promise(&self.shared, pending))
    }

    /// Start or resume playback
    pub fn play(&self) -> Promise {
        let pending = self.shared.controller.borrow_mut().prepare_play();
        promise(&self.shared, Some(pending))
    }

    /// Pause playback
    pub fn pause(&self) {
        self.shared.controller.borrow_mut().pause();
        self.shared.dispatch();
    }

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&self) -> Promise {
        let pending = self.shared.controller.borrow_mut().prepare_toggle();
        promise(&self.shared, pending)
    }

    /// Skip to next track
    pub fn next(&self) -> Promise {
        let pending = self.shared.controller.borrow_mut().prepare_next();
        promise(&self.shared, pending)
    }

    /// Restart the current track or go to the previous one
    pub fn previous(&self) -> Promise {
        let pending = self.shared.controller.borrow_mut().prepare_prev();
        promise(&self.shared, pending)
    }

    // ===== Shuffle & Repeat =====

    #[wasm_bindgen(js_name = setShuffle)]
    pub fn set_shuffle(&self, enabled: bool) {
        self.shared.controller.borrow_mut().set_shuffle(enabled);
        self.shared.dispatch();
    }

    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&self) -> bool {
        let enabled = {
            let mut controller = self.shared.controller.borrow_mut();
            controller.toggle_shuffle();
            controller.shuffle()
        };
        self.shared.dispatch();
        enabled
    }

    /// Advance repeat (off → all → one → off); returns the new mode
    #[wasm_bindgen(js_name = cycleRepeat)]
    pub fn cycle_repeat(&self) -> String {
        let mode = self.shared.controller.borrow_mut().cycle_repeat();
        self.shared.dispatch();
        mode.to_string()
    }

    /// Set repeat mode ("off" | "all" | "one")
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&self, mode: &str) -> Result<(), JsValue> {
        let mode: RepeatMode = mode.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.shared.controller.borrow_mut().set_repeat(mode);
        self.shared.dispatch();
        Ok(())
    }

    // ===== Seek & Volume =====

    /// Seek-bar input (0-100); ignored until the duration is known
    #[wasm_bindgen(js_name = seekToPercent)]
    pub fn seek_to_percent(&self, percent: f64) -> bool {
        let seeked = self.shared.controller.borrow_mut().seek_to_percent(percent);
        self.shared.dispatch();
        seeked
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f32) {
        self.shared.controller.borrow_mut().set_volume(volume);
        self.shared.dispatch();
    }

    // ===== Keyboard =====

    /// Handle a keydown
    ///
    /// Returns `true` when the key is bound; the caller should then call
    /// `preventDefault()`.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&self, code: &str, key: &str, typing: bool) -> bool {
        let command = {
            let controller = self.shared.controller.borrow();
            KeyCommand::from_key(code, key, typing, controller.config())
        };
        let Some(command) = command else {
            return false;
        };

        let pending = self.shared.controller.borrow_mut().prepare_key(command);
        let shared = Rc::clone(&self.shared);
        spawn_local(async move {
            shared.drive(pending).await;
        });
        true
    }

    // ===== Visualizer =====

    /// Bar rectangles for the current animation frame
    ///
    /// Empty while sampling is stopped or no analyser is connected.
    #[wasm_bindgen(js_name = visualizerFrame)]
    pub fn visualizer_frame(&self, width: f64, height: f64, device_pixel_ratio: f64) -> Result<JsValue, JsValue> {
        let controller = self.shared.controller.borrow();
        let rects = match controller.output().graph() {
            Some(graph) if controller.visualizer().is_running() => {
                let levels = controller.visualizer().sample_bars(&graph.frequency_data());
                layout_bars(&levels, width, height, device_pixel_ratio)
            }
            _ => Vec::new(),
        };
        to_js(&rects)
    }

    /// Whether the decorative fallback should be shown instead of the canvas
    #[wasm_bindgen(js_name = usesFallbackVisualizer)]
    pub fn uses_fallback_visualizer(&self) -> bool {
        self.shared.controller.borrow().visualizer().source() == VisualizerSource::Fallback
    }

    /// Canvas bar gradient stops, top then bottom
    #[wasm_bindgen(js_name = visualizerGradient)]
    pub fn visualizer_gradient() -> Array {
        Array::of2(&JsValue::from_str(GRADIENT.0), &JsValue::from_str(GRADIENT.1))
    }

    /// Bar specs for the fallback animation
    #[wasm_bindgen(js_name = fallbackBars)]
    pub fn fallback_bars(&self) -> Result<JsValue, JsValue> {
        to_js(&self.shared.controller.borrow().visualizer().fallback_bars())
    }

    // ===== State Queries =====

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.shared.controller.borrow().snapshot();
        to_js(&WasmSnapshot::from(&snapshot))
    }

    /// Placeholder cover image as a data URI
    #[wasm_bindgen(js_name = placeholderCover)]
    pub fn placeholder_cover() -> String {
        vibes_core::placeholder_cover()
    }

    // ===== Event Listeners =====

    /// Register the event callback
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        *self.shared.on_event.borrow_mut() = Some(callback);
    }
}

impl Drop for WasmPlayer {
    fn drop(&mut self) {
        let controller = self.shared.controller.borrow();
        let element = controller.output().element();
        for (name, closure) in &self.listeners {
            element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}
