//! Bearish RSI divergence: price prints an equal-or-higher high while RSI
//! prints a lower one.

use crate::common::math;

/// Check the trailing `window` bars, split into two equal halves.
///
/// Holds when the second half's peak close is at least `price_tolerance`
/// times the first half's peak close, and the RSI at the second peak is at
/// least `rsi_drop` points below the RSI at the first peak.
///
/// Short series, mismatched lengths and `NaN` RSI values all yield `false`.
pub fn bearish_divergence(
    closes: &[f64],
    rsis: &[f64],
    window: usize,
    price_tolerance: f64,
    rsi_drop: f64,
) -> bool {
    if window < 2 || closes.len() < window || rsis.len() != closes.len() {
        return false;
    }

    let prices = math::tail(closes, window);
    let rsi_window = math::tail(rsis, window);
    let half = window / 2;

    let first_peak = match math::argmax(&prices[..half]) {
        Some(i) => i,
        None => return false,
    };
    let second_peak = match math::argmax(&prices[half..]) {
        Some(i) => half + i,
        None => return false,
    };

    let price_higher = prices[second_peak] >= prices[first_peak] * price_tolerance;
    let rsi_lower = rsi_window[second_peak] <= rsi_window[first_peak] - rsi_drop;
    price_higher && rsi_lower
}
