//! Formatting helpers for elapsed times and percentages.

/// Compact "3m 42s" form shown on the analysis overlay.
pub fn format_elapsed_short(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// Long "3 min 42 sec" form shown on the results summary line.
pub fn format_elapsed_long(seconds: u64) -> String {
    format!("{} min {} sec", seconds / 60, seconds % 60)
}

/// Share of `count` over `total` as a percentage, truncated (not rounded)
/// to one decimal place. Callers guard `total == 0`.
pub fn percent_truncated(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).trunc() / 10.0
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Compacts an ISO-8601 timestamp to "YYYY-MM-DD · HH:MM" for display.
/// Anything that does not look like one is shown as-is.
pub fn format_timestamp_compact(iso: &str) -> String {
    let (date, time_segment) = match iso.split_once('T') {
        Some(parts) => parts,
        None => return iso.to_string(),
    };

    let primary_time = time_segment
        .split(['.', 'Z', '+'])
        .next()
        .unwrap_or(time_segment);
    let time_display: String = primary_time.chars().take(5).collect();

    if time_display.is_empty() {
        date.to_string()
    } else {
        format!("{date} · {time_display}")
    }
}
