//! Stage time helpers

/// Round to 2 decimal places
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format seconds as `mm:ss:hh` (minutes, seconds, hundredths)
///
/// Works on whole hundredths so a time already rounded to 2 decimals prints
/// exactly, e.g. `125.4` is `02:05:40` rather than `02:05:39`. Minutes are
/// not capped at 99. Callers must pass a finite, non-negative value.
pub fn format_time(seconds: f64) -> String {
    debug_assert!(
        seconds.is_finite() && seconds >= 0.0,
        "format_time needs a finite non-negative time, got {}",
        seconds
    );
    let total_hundredths = (seconds.max(0.0) * 100.0).round() as u64;
    let minutes = total_hundredths / 6000;
    let secs = (total_hundredths / 100) % 60;
    let hundredths = total_hundredths % 100;
    format!("{:02}:{:02}:{:02}", minutes, secs, hundredths)
}
