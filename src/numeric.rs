//! Shared numeric and time helpers for the scorers.
//!
//! Every helper maps `NaN` to zero so a malformed input can never leak into a
//! clamped score.

use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: f64 = 86_400.0;

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(100.0)
}

/// Bounded, strictly increasing map from `[0, inf)` onto `[0, 1)`.
pub fn saturate(value: f64, scale: f64) -> f64 {
    if value.is_nan() || value <= 0.0 || scale <= 0.0 {
        return 0.0;
    }
    clamp01(1.0 - (-value / scale).exp())
}

/// Exponential decay in `(0, 1]`: 1 at zero, halving roughly every `0.69 * scale`.
pub fn decay(value: f64, scale: f64) -> f64 {
    if value.is_nan() || scale <= 0.0 {
        return 0.0;
    }
    clamp01((-value.max(0.0) / scale).exp())
}

/// `log10(value + 1) / log10(cap + 1)`, clamped to `[0, 1]`.
pub fn log_ratio(value: f64, cap: f64) -> f64 {
    if value.is_nan() || value <= 0.0 || cap <= 0.0 {
        return 0.0;
    }
    clamp01((value + 1.0).log10() / (cap + 1.0).log10())
}

/// Fractional days from `since` to `now`; timestamps in the future count as zero.
pub fn age_days(since: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match since {
        Some(since) => span_days(since, now),
        None => 0.0,
    }
}

pub fn span_days(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        0.0
    } else {
        seconds as f64 / SECONDS_PER_DAY
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
