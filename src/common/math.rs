//! Numeric helpers shared by the models and the aggregator.

use std::time::Duration;

/// Round `value` to `places` decimal digits, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Whole milliseconds in `duration`, clamped to `u64::MAX`.
pub fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
