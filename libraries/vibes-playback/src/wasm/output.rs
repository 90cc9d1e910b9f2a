//! `AudioOutput` backed by an `HtmlAudioElement`

use crate::error::{PlaybackError, Result};
use crate::output::AudioOutput;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, AudioContextState, HtmlAudioElement};

/// Web Audio graph feeding the visualizer
///
/// element → media source → analyser → destination. Once connected the
/// element is only audible while the context is running.
pub struct AudioGraph {
    context: AudioContext,
    analyser: AnalyserNode,
}

impl AudioGraph {
    fn connect(element: &HtmlAudioElement, fft_size: u32) -> std::result::Result<Self, JsValue> {
        let context = AudioContext::new()?;
        let analyser = context.create_analyser()?;
        analyser.set_fft_size(fft_size);

        let source = context.create_media_element_source(element)?;
        source.connect_with_audio_node(&analyser)?;
        analyser.connect_with_audio_node(&context.destination())?;

        Ok(Self { context, analyser })
    }

    /// Byte frequency data for the current frame
    pub fn frequency_data(&self) -> Vec<u8> {
        let mut data = vec![0u8; self.analyser.frequency_bin_count() as usize];
        self.analyser.get_byte_frequency_data(&mut data);
        data
    }

    fn resume_if_suspended(&self) -> std::result::Result<Option<js_sys::Promise>, JsValue> {
        if self.context.state() == AudioContextState::Suspended {
            self.context.resume().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// The page's single audio element
pub struct HtmlAudioOutput {
    element: HtmlAudioElement,
    loaded: bool,
    analysis_fft: Option<u32>,
    graph: Option<AudioGraph>,
}

fn js_error(value: JsValue) -> PlaybackError {
    let message = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("name"))
                .ok()
                .and_then(|name| name.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"));
    PlaybackError::AudioOutput(message)
}

fn secs(value: f64) -> Option<Duration> {
    (value.is_finite() && value >= 0.0).then(|| Duration::from_secs_f64(value))
}

impl HtmlAudioOutput {
    /// `analysis_fft` is the analyser size, or `None` to never build the
    /// Web Audio graph (reduced motion).
    pub fn new(element: HtmlAudioElement, analysis_fft: Option<u32>) -> Self {
        Self {
            element,
            loaded: false,
            analysis_fft,
            graph: None,
        }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// Build the analyser graph on first start
    ///
    /// Must run inside the user gesture that started playback. Failure leaves
    /// the graph unset and `has_analysis` false.
    fn ensure_graph(&mut self) {
        let Some(fft_size) = self.analysis_fft else {
            return;
        };
        if self.graph.is_some() {
            return;
        }
        match AudioGraph::connect(&self.element, fft_size) {
            Ok(graph) => self.graph = Some(graph),
            Err(e) => {
                tracing::warn!(error = ?e, "Web Audio unavailable");
                // Do not retry on every start
                self.analysis_fft = None;
            }
        }
    }

    pub fn graph(&self) -> Option<&AudioGraph> {
        self.graph.as_ref()
    }
}

impl AudioOutput for HtmlAudioOutput {
    type Start = Pin<Box<dyn Future<Output = Result<()>>>>;

    fn load(&mut self, locator: &str) {
        self.element.set_src(locator);
        self.loaded = true;
    }

    fn start(&mut self) -> Self::Start {
        self.ensure_graph();
        let resume = self
            .graph
            .as_ref()
            .map(AudioGraph::resume_if_suspended)
            .transpose()
            .map(Option::flatten);
        let element = self.element.clone();

        Box::pin(async move {
            // A connected element is silent until the context runs
            if let Some(resume) = resume.map_err(js_error)? {
                JsFuture::from(resume).await.map_err(js_error)?;
            }
            let promise = element.play().map_err(js_error)?;
            JsFuture::from(promise).await.map_err(js_error)?;
            Ok(())
        })
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            tracing::warn!(error = ?e, "Audio element refused to pause");
        }
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn has_source(&self) -> bool {
        self.loaded
    }

    fn position(&self) -> Duration {
        secs(self.element.current_time()).unwrap_or(Duration::ZERO)
    }

    fn duration(&self) -> Option<Duration> {
        secs(self.element.duration())
    }

    fn seek(&mut self, position: Duration) {
        self.element.set_current_time(position.as_secs_f64());
    }

    fn volume(&self) -> f32 {
        self.element.volume() as f32
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(f64::from(volume));
    }

    fn has_analysis(&self) -> bool {
        self.graph.is_some()
    }
}
