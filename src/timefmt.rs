//! `MM:SS` formatting for the elapsed/total time labels.

const ZERO: &str = "00:00";

/// Format a seconds count as `MM:SS`.
///
/// Unknown clocks (NaN, infinite or negative) render as `00:00`. A component
/// that would need more than two digits' worth of minutes past 59 is shown as
/// `00` instead of overflowing the label.
pub fn format_time(total_seconds: f64) -> String {
    if !total_seconds.is_finite() || total_seconds < 0.0 {
        return ZERO.to_string();
    }

    let minutes = (total_seconds / 60.0).floor() as u64;
    let seconds = (total_seconds % 60.0).floor() as u64;

    format!("{}:{}", pad_component(minutes), pad_component(seconds))
}

/// Format an optional duration; `None` means the metadata has not arrived yet.
pub fn format_duration(duration: Option<f64>) -> String {
    duration.map_or_else(|| ZERO.to_string(), format_time)
}

fn pad_component(value: u64) -> String {
    if value < 60 {
        format!("{value:02}")
    } else {
        "00".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_minutes_and_seconds() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(30.0), "00:30");
        assert_eq!(format_time(3599.0), "59:59");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_time(59.999), "00:59");
        assert_eq!(format_time(125.4), "02:05");
    }

    #[test]
    fn unknown_clock_renders_zero() {
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_duration(None), "00:00");
        assert_eq!(format_duration(Some(61.0)), "01:01");
    }

    #[test]
    fn hour_long_minutes_are_clamped() {
        // 61 minutes: the minute component would read 61.
        assert_eq!(format_time(3660.0), "00:00");
        assert_eq!(format_time(3725.0), "00:05");
    }
}
