//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::indicators::EmaIndicator;

/// EMA over the given closes, seeded with the first close.
pub fn calculate_ema(closes: &[f64], period: usize) -> Option<EmaIndicator> {
    let value = math::ema(closes, period)?;
    if !value.is_finite() {
        return None;
    }

    Some(EmaIndicator { value, period })
}

/// EMA of the `slope_window - 1` bars before the latest one.
///
/// Compared against the current fast EMA to tell whether it is rising.
/// `None` when fewer than `slope_window` closes exist.
pub fn previous_ema(closes: &[f64], slope_window: usize, period: usize) -> Option<EmaIndicator> {
    if slope_window < 2 || closes.len() < slope_window {
        return None;
    }
    let end = closes.len() - 1;
    calculate_ema(&closes[end + 1 - slope_window..end], period)
}
