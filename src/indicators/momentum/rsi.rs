//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::RsiIndicator;

/// Substitute for a zero average loss.
pub const RSI_EPSILON: f64 = 1e-9;

/// Calculate RSI over all given closes.
///
/// Average gain/loss start as the simple mean of the first `period` deltas;
/// every later delta is folded in with Wilder smoothing:
/// `avg = (avg * (period - 1) + value) / period`.
///
/// RSI = 100 - (100 / (1 + RS)), RS = avg_gain / avg_loss
///
/// A zero average loss is replaced by `epsilon`, so a series without down
/// days reads close to 100 instead of being undefined.
pub fn calculate_rsi(closes: &[f64], period: usize, epsilon: f64) -> Option<RsiIndicator> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let (seed, rest) = deltas.split_at(period);

    let period_f = period as f64;
    let mut avg_gain = seed.iter().map(|d| d.max(0.0)).sum::<f64>() / period_f;
    let mut avg_loss = seed.iter().map(|d| (-d).max(0.0)).sum::<f64>() / period_f;
    if avg_loss == 0.0 {
        avg_loss = epsilon;
    }

    for &delta in rest {
        avg_gain = (avg_gain * (period_f - 1.0) + delta.max(0.0)) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + (-delta).max(0.0)) / period_f;
    }

    let divisor = if avg_loss == 0.0 { epsilon } else { avg_loss };
    let rs = avg_gain / divisor;
    let value = 100.0 - (100.0 / (1.0 + rs));
    if !value.is_finite() {
        return None;
    }

    Some(RsiIndicator { value, period })
}

/// RSI for every bar, each over that bar's trailing `window` closes.
///
/// Output has the same length as `closes`; bars without enough history hold
/// `NaN`.
pub fn rsi_series(closes: &[f64], period: usize, window: usize, epsilon: f64) -> Vec<f64> {
    (0..closes.len())
        .map(|i| {
            let slice = math::tail(&closes[..=i], window);
            calculate_rsi(slice, period, epsilon)
                .map(|r| r.value)
                .unwrap_or(f64::NAN)
        })
        .collect()
}
