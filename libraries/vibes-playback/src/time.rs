//! Elapsed/total time labels and seek-bar projections
//!
//! These are pure projections of the audio output's own clock; the
//! controller never owns playback position.

use std::time::Duration;

/// Label shown before metadata is known and after every track load
pub const ZERO_LABEL: &str = "0:00";

/// Format seconds as `M:SS`
///
/// Non-finite or negative input renders as `0:00`.
pub fn format_time(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return ZERO_LABEL.to_string();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Format a duration as `M:SS`
pub fn format_duration(duration: Duration) -> String {
    format_time(duration.as_secs_f64())
}

/// Seek-bar position (0-100) for `position` within `duration`
///
/// Unknown or zero duration keeps the bar at 0.
pub fn seek_percent(position: Duration, duration: Option<Duration>) -> f64 {
    match duration {
        Some(total) if !total.is_zero() => {
            (position.as_secs_f64() / total.as_secs_f64() * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

/// Transport progress as displayed by the player bar
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressDisplay {
    pub elapsed: String,
    pub total: String,
    /// Seek-bar value, 0-100
    pub seek_percent: f64,
}

impl Default for ProgressDisplay {
    fn default() -> Self {
        Self {
            elapsed: ZERO_LABEL.to_string(),
            total: ZERO_LABEL.to_string(),
            seek_percent: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.9), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn non_finite_is_zero() {
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
        assert_eq!(format_time(-3.0), "0:00");
    }

    #[test]
    fn seek_percent_needs_known_duration() {
        let pos = Duration::from_secs(30);
        assert_eq!(seek_percent(pos, None), 0.0);
        assert_eq!(seek_percent(pos, Some(Duration::ZERO)), 0.0);
        assert_eq!(seek_percent(pos, Some(Duration::from_secs(120))), 25.0);
        assert_eq!(seek_percent(pos, Some(Duration::from_secs(10))), 100.0);
    }
}
