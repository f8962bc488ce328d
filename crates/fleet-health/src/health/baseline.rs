use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Mean gap in days between consecutive inspections, newest-first input.
///
/// Returns `None` with fewer than two inspections, or when every inspection shares the same
/// timestamp and no cadence can be derived.
pub(crate) fn baseline_interval(timestamps: &[DateTime<Utc>]) -> Option<f64> {
    if timestamps.len() < 2 {
        return None;
    }

    let total_days: f64 = timestamps
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).num_seconds() as f64 / SECONDS_PER_DAY)
        .sum();
    let mean = total_days / (timestamps.len() - 1) as f64;

    if mean > 0.0 {
        Some(mean)
    } else {
        None
    }
}
