//! Visualizer sampling
//!
//! Reduces analyser frequency data to a handful of bar levels and lays them
//! out for drawing. When audio analysis is unavailable the host shows a
//! decorative fallback animation described by `fallback_bars`.
//!
//! Sampling is a free-running per-frame poll. `Visualizer` only tracks whether
//! it should be running; the host owns the frame callback and must cancel it
//! when sampling stops.

use crate::config::VisualizerConfig;
use serde::{Deserialize, Serialize};

/// Bar palette, cycled across the fallback animation
pub const PALETTE: [&str; 3] = ["var(--turquoise)", "var(--coral)", "var(--orange)"];

/// Gradient stops (top, bottom) for live bars
pub const GRADIENT: (&str, &str) = ("#2ec4b6", "#ffa500");

/// Where bar levels come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualizerSource {
    /// Live frequency data from an analyser
    Analyser,

    /// No audio analysis available; decorative animation only
    Fallback,
}

/// One bar rectangle in device pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One bar of the fallback animation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackBar {
    pub color: &'static str,
    pub period_secs: f64,
    pub delay_secs: f64,
}

/// Visualizer run state
#[derive(Debug, Clone)]
pub struct Visualizer {
    config: VisualizerConfig,
    source: VisualizerSource,
    running: bool,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            config,
            source: VisualizerSource::Analyser,
            running: false,
        }
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn source(&self) -> VisualizerSource {
        self.source
    }

    /// Switch to the decorative animation (no audio analysis on this platform)
    ///
    /// Returns `true` if sampling was running; the host must then cancel its
    /// frame callback.
    pub fn use_fallback(&mut self) -> bool {
        self.source = VisualizerSource::Fallback;
        self.stop()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start per-frame sampling
    ///
    /// Returns `false` when nothing should be scheduled: reduced motion is
    /// preferred, only the fallback animation is available, or sampling is
    /// already running.
    pub fn start(&mut self) -> bool {
        if self.config.reduced_motion || self.source == VisualizerSource::Fallback || self.running
        {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop per-frame sampling
    ///
    /// Returns `true` if a frame callback was running and must be cancelled.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Sample `bars` levels (0.0-1.0) from byte frequency data
    ///
    /// Takes every `len / bars`-th bin starting at bin 0.
    pub fn sample_bars(&self, frequency_data: &[u8]) -> Vec<f32> {
        sample_bars(frequency_data, self.config.bars)
    }

    /// Decorative bars for the fallback animation
    pub fn fallback_bars(&self) -> Vec<FallbackBar> {
        fallback_bars(self.config.fallback_bars)
    }
}

/// Sample `bars` levels (0.0-1.0) from byte frequency data
pub fn sample_bars(frequency_data: &[u8], bars: usize) -> Vec<f32> {
    if bars == 0 {
        return Vec::new();
    }
    let step = frequency_data.len() / bars;
    (0..bars)
        .map(|i| {
            frequency_data
                .get(i * step)
                .map_or(0.0, |&v| f32::from(v) / 255.0)
        })
        .collect()
}

/// Lay out bar levels across a `width` x `height` canvas
///
/// Bars are bottom-aligned with a 2-device-pixel gap; every bar is at least
/// 2 device pixels wide and tall so silence still shows a baseline.
pub fn layout_bars(levels: &[f32], width: f64, height: f64, device_pixel_ratio: f64) -> Vec<BarRect> {
    if levels.is_empty() {
        return Vec::new();
    }
    let min = 2.0 * device_pixel_ratio;
    let slot = width / levels.len() as f64;
    let bar_width = (slot - min).max(min);

    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| {
            let bar_height = (f64::from(level) * height).max(min);
            BarRect {
                x: i as f64 * slot,
                y: height - bar_height,
                width: bar_width,
                height: bar_height,
            }
        })
        .collect()
}

/// Decorative fallback animation: staggered bars cycling through the palette
pub fn fallback_bars(count: usize) -> Vec<FallbackBar> {
    (0..count)
        .map(|i| FallbackBar {
            color: PALETTE[i % PALETTE.len()],
            period_secs: 1.2 + (i % 5) as f64 * 0.1,
            delay_secs: i as f64 * 0.03,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_every_step_bin() {
        let data: Vec<u8> = (0..=255u8).collect::<Vec<_>>().repeat(2); // 512 bins
        let levels = sample_bars(&data, 32);
        assert_eq!(levels.len(), 32);
        assert_eq!(levels[0], 0.0);
        // step = 16 → bin 16 holds 16
        assert!((levels[1] - 16.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn short_data_pads_with_silence() {
        let levels = sample_bars(&[255, 255], 4);
        // step = 0 → always bin 0
        assert_eq!(levels, vec![1.0; 4]);
        assert_eq!(sample_bars(&[], 3), vec![0.0; 3]);
        assert!(sample_bars(&[1, 2, 3], 0).is_empty());
    }

    #[test]
    fn layout_enforces_minimum_size() {
        let rects = layout_bars(&[0.0, 1.0], 100.0, 50.0, 2.0);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].height, 4.0);
        assert_eq!(rects[0].y, 46.0);
        assert_eq!(rects[1].height, 50.0);
        assert_eq!(rects[1].x, 50.0);
        assert_eq!(rects[1].width, 46.0);
    }

    #[test]
    fn fallback_bars_cycle_palette_and_timing() {
        let bars = fallback_bars(24);
        assert_eq!(bars.len(), 24);
        assert_eq!(bars[0].color, PALETTE[0]);
        assert_eq!(bars[4].color, PALETTE[1]);
        assert!((bars[4].period_secs - 1.6).abs() < 1e-9);
        assert!((bars[5].period_secs - 1.2).abs() < 1e-9);
        assert!((bars[10].delay_secs - 0.3).abs() < 1e-9);
    }

    #[test]
    fn start_respects_reduced_motion() {
        let mut viz = Visualizer::new(VisualizerConfig {
            reduced_motion: true,
            ..Default::default()
        });
        assert!(!viz.start());
        assert!(!viz.is_running());
    }

    #[test]
    fn start_stop_pairs() {
        let mut viz = Visualizer::new(VisualizerConfig::default());
        assert!(viz.start());
        assert!(!viz.start());
        assert!(viz.stop());
        assert!(!viz.stop());

        assert!(!viz.use_fallback());
        assert!(!viz.start());
    }

    #[test]
    fn fallback_while_running_stops_sampling() {
        let mut viz = Visualizer::new(VisualizerConfig::default());
        assert!(viz.start());
        assert!(viz.use_fallback());
        assert!(!viz.is_running());
        assert_eq!(viz.source(), VisualizerSource::Fallback);
    }
}
