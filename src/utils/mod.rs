//! Utility functions and helpers

use std::time::Duration;

/// Binary unit prefixes used by [`with_unit`]
const UNITS: [&str; 5] = ["", "k", "m", "g", "t"];

/// Format a byte count with a binary (1024-based) unit
///
/// Values below 1024 are printed as-is; larger values are scaled and keep two
/// decimals only when they are not whole.
pub fn with_unit(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if value.fract() == 0.0 {
        format!("{} {}B", value, UNITS[unit])
    } else {
        format!("{:.2} {}B", value, UNITS[unit])
    }
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();

    if secs >= 60.0 {
        let mins = (secs / 60.0).floor() as u64;
        let remaining_secs = secs - (mins as f64 * 60.0);
        format!("{}m {:.2}s", mins, remaining_secs)
    } else if secs >= 1.0 {
        format!("{:.2}s", secs)
    } else {
        format!("{:.0}ms", secs * 1000.0)
    }
}
