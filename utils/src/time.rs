//! Human-readable durations for transaction validity windows.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Render `secs` in its largest unit plus the next smaller one when that is
/// non-zero, e.g. `1m 30s` or `2h`.
pub fn format_duration(secs: u64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }
    let mut rest = secs;
    let mut parts = Vec::with_capacity(2);
    for (size, suffix) in UNITS {
        if rest >= size {
            parts.push(format!("{}{suffix}", rest / size));
            rest %= size;
        } else if !parts.is_empty() {
            break;
        }
        if parts.len() == 2 {
            break;
        }
    }
    parts.join(" ")
}
