//! Derived progress values: bar fill and time labels computed from the
//! engine clock, plus the click-to-seek fraction.

use crate::engine::EngineClock;
use crate::timefmt::{format_duration, format_time};

/// One reconciliation result, ready to be pushed to a projector.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Progress bar fill, `0.0..=100.0`.
    pub fill_percent: f64,
    pub elapsed_text: String,
    pub total_text: String,
}

impl Reconciliation {
    pub fn from_clock(clock: EngineClock) -> Self {
        Self {
            fill_percent: played_fraction(clock) * 100.0,
            elapsed_text: format_time(clock.current_time),
            total_text: format_duration(clock.duration),
        }
    }
}

/// Fraction of the track already played. Zero until the duration is known.
pub fn played_fraction(clock: EngineClock) -> f64 {
    let Some(duration) = clock.duration.filter(|d| d.is_finite() && *d > 0.0) else {
        return 0.0;
    };
    if !clock.current_time.is_finite() {
        return 0.0;
    }
    (clock.current_time / duration).clamp(0.0, 1.0)
}

/// Map a click at `offset_x` on a bar `bar_width` wide to a `0.0..=1.0` fraction.
pub fn seek_fraction(offset_x: f64, bar_width: f64) -> f64 {
    if !bar_width.is_finite() || bar_width <= 0.0 || !offset_x.is_finite() {
        return 0.0;
    }
    (offset_x / bar_width).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(current_time: f64, duration: Option<f64>) -> EngineClock {
        EngineClock {
            current_time,
            duration,
        }
    }

    #[test]
    fn fraction_follows_clock() {
        assert_eq!(played_fraction(clock(30.0, Some(120.0))), 0.25);
        assert_eq!(played_fraction(clock(120.0, Some(120.0))), 1.0);
    }

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(played_fraction(clock(200.0, Some(120.0))), 1.0);
        assert_eq!(played_fraction(clock(-5.0, Some(120.0))), 0.0);
    }

    #[test]
    fn unknown_or_zero_duration_means_empty_bar() {
        assert_eq!(played_fraction(clock(10.0, None)), 0.0);
        assert_eq!(played_fraction(clock(10.0, Some(0.0))), 0.0);
        assert_eq!(played_fraction(clock(10.0, Some(f64::NAN))), 0.0);
        assert_eq!(played_fraction(clock(f64::NAN, Some(10.0))), 0.0);
    }

    #[test]
    fn reconciliation_formats_labels() {
        let r = Reconciliation::from_clock(clock(65.0, Some(130.0)));
        assert_eq!(r.fill_percent, 50.0);
        assert_eq!(r.elapsed_text, "01:05");
        assert_eq!(r.total_text, "02:10");

        let before_metadata = Reconciliation::from_clock(clock(0.0, None));
        assert_eq!(before_metadata.fill_percent, 0.0);
        assert_eq!(before_metadata.total_text, "00:00");
    }

    #[test]
    fn seek_fraction_clamps_and_guards_width() {
        assert_eq!(seek_fraction(50.0, 200.0), 0.25);
        assert_eq!(seek_fraction(250.0, 200.0), 1.0);
        assert_eq!(seek_fraction(-10.0, 200.0), 0.0);
        assert_eq!(seek_fraction(10.0, 0.0), 0.0);
    }
}
