//! Small numeric helpers used by the indicators.

/// Exponential moving average over the whole slice.
///
/// Seeded with the first value, then `ema = v * k + ema * (1 - k)` with
/// `k = 2 / (period + 1)`. Returns `None` for an empty slice or a zero period.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    let (&first, rest) = values.split_first()?;
    if period == 0 {
        return None;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let value = rest.iter().fold(first, |acc, &v| v * k + acc * (1.0 - k));
    Some(value)
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Index of the first maximum. NaN values never win.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

/// Trailing `n` elements (or the whole slice when shorter).
pub fn tail<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}
