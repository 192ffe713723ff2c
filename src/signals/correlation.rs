//! Cross-signal correlation: a filing and a price spike on the same ticker
//! within the trailing window suggest a filing-driven move.

use crate::models::signal::{Signal, SignalKind};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::debug;

fn in_window(signal: &Signal, cutoff: DateTime<Utc>) -> bool {
    signal.ts.map_or(false, |ts| ts >= cutoff)
}

fn partition_key(signal: &Signal) -> Option<String> {
    signal
        .ticker()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
}

/// Tickers whose windowed signals include both a SEC_FILING and a
/// PRICE_SPIKE.
pub fn correlated_tickers(signals: &[Signal], now: DateTime<Utc>, window: Duration) -> Vec<String> {
    let cutoff = now - window;
    let mut kinds: HashMap<String, (bool, bool)> = HashMap::new();

    for signal in signals.iter().filter(|s| in_window(s, cutoff)) {
        let Some(key) = partition_key(signal) else {
            continue;
        };
        let entry = kinds.entry(key).or_insert((false, false));
        match signal.kind() {
            SignalKind::SecFiling => entry.0 = true,
            SignalKind::PriceSpike => entry.1 = true,
            _ => {}
        }
    }

    let mut tickers: Vec<String> = kinds
        .into_iter()
        .filter(|(_, (filing, spike))| *filing && *spike)
        .map(|(ticker, _)| ticker)
        .collect();
    tickers.sort();
    tickers
}

/// Add `boost` to every windowed signal of a correlated ticker.
///
/// Returns the number of boosted signals.
pub fn apply_correlation_boost(
    signals: &mut [Signal],
    now: DateTime<Utc>,
    window: Duration,
    boost: i32,
) -> usize {
    let tickers = correlated_tickers(signals, now, window);
    if tickers.is_empty() {
        return 0;
    }

    let cutoff = now - window;
    let mut boosted = 0;
    for signal in signals.iter_mut() {
        if !in_window(signal, cutoff) {
            continue;
        }
        let correlated = partition_key(signal).map_or(false, |key| tickers.contains(&key));
        if correlated {
            signal.score += boost;
            boosted += 1;
        }
    }

    debug!(tickers = ?tickers, boosted, "applied correlation boost");
    boosted
}
