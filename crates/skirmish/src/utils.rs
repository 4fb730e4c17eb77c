//! Utility functions.

use std::time::Duration;

/// Steps per second estimated from one step's round-trip time.
///
/// Sub-nanosecond readings are clamped so the estimate stays finite.
pub fn step_rate(dt: Duration) -> u32 {
    let secs = dt.as_secs_f64().max(1e-9);
    (1.0 / secs).round() as u32
}

/// Format duration in human-readable form
pub fn format_duration(seconds: f64) -> String {
    if seconds < 0.0 {
        return "0s".to_string();
    }

    let secs = seconds as u64;
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;

    if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_rate() {
        assert_eq!(step_rate(Duration::from_millis(100)), 10);
        assert_eq!(step_rate(Duration::from_millis(16)), 63);
        assert_eq!(step_rate(Duration::ZERO), 1_000_000_000);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(30.0), "30s");
        assert_eq!(format_duration(90.0), "1m 30s");
        assert_eq!(format_duration(3661.0), "1h 1m 1s");
    }
}
