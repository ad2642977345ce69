//! Elapsed-duration formatting for the end-of-run summary line.

use std::time::Duration;

/// Render a wall-clock duration the way the run summary shows it:
/// `451ms`, `2.3s`, `1m 05s`, `1h 02m 03s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    if total_ms < 1000 {
        return format!("{total_ms}ms");
    }

    let total_secs = elapsed.as_secs();
    if total_secs < 60 {
        let tenths = (elapsed.subsec_millis() / 100) as u64;
        return format!("{total_secs}.{tenths}s");
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else {
        format!("{minutes}m {seconds:02}s")
    }
}
