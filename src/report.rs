//! Human-readable rate and elapsed-time formatting for run summaries.

use std::time::Duration;

/// Format a hash rate with K/M/G units.
pub fn format_rate(hashes_per_second: f64) -> String {
    if hashes_per_second >= 1e9 {
        format!("{:.2} G H/s", hashes_per_second / 1e9)
    } else if hashes_per_second >= 1e6 {
        format!("{:.2} M H/s", hashes_per_second / 1e6)
    } else if hashes_per_second >= 1e3 {
        format!("{:.2} K H/s", hashes_per_second / 1e3)
    } else {
        format!("{:.2} H/s", hashes_per_second)
    }
}

/// Format an elapsed duration as `[Nd ][Nh ][Nm ]Ns Nms`, omitting leading
/// units that are zero.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_ms = elapsed.as_millis();
    let days = total_ms / 86_400_000;
    let hours = (total_ms % 86_400_000) / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{}d ", days));
    }
    if hours > 0 || days > 0 {
        out.push_str(&format!("{}h ", hours));
    }
    if minutes > 0 || hours > 0 || days > 0 {
        out.push_str(&format!("{}m ", minutes));
    }
    out.push_str(&format!("{}s {}ms", seconds, millis));
    out
}
