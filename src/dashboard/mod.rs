//! Dashboard snapshot assembled from one pass.

use crate::models::records::{FeedBatch, PriceQuote};
use crate::models::signal::Signal;
use crate::models::trend::TrendPoint;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Default size of the persisted signals log.
pub const SIGNALS_LOG_LIMIT: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub arxiv: usize,
    pub sec: usize,
    pub patents: usize,
    pub news: usize,
    pub signals: usize,
    pub signals_today: usize,
    pub signals_week: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub generated_at: String,
    pub tickers: Vec<String>,
    pub prices: Vec<PriceQuote>,
    pub trend: Vec<TrendPoint>,
    pub counts: DashboardCounts,
}

/// Signals stamped on the same UTC calendar day as `now`.
pub fn signals_today<'a>(signals: &'a [Signal], now: DateTime<Utc>) -> impl Iterator<Item = &'a Signal> {
    let today = now.date_naive();
    signals
        .iter()
        .filter(move |s| s.ts.map_or(false, |ts| ts.date_naive() == today))
}

/// Signals stamped within `window` before `now` (inclusive).
pub fn signals_within<'a>(
    signals: &'a [Signal],
    now: DateTime<Utc>,
    window: Duration,
) -> impl Iterator<Item = &'a Signal> {
    let cutoff = now - window;
    signals
        .iter()
        .filter(move |s| s.ts.map_or(false, |ts| ts >= cutoff))
}

/// The first `limit` signals of an already ranked list.
pub fn signals_log(signals: &[Signal], limit: usize) -> &[Signal] {
    &signals[..signals.len().min(limit)]
}

pub fn build_dashboard(
    tickers: &[String],
    batch: &FeedBatch,
    signals: &[Signal],
    trend: &[TrendPoint],
    now: DateTime<Utc>,
) -> DashboardData {
    let counts = DashboardCounts {
        arxiv: batch.preprints.len(),
        sec: batch.filings.len(),
        patents: batch.patents.len(),
        news: batch.news.len(),
        signals: signals.len(),
        signals_today: signals_today(signals, now).count(),
        signals_week: signals_within(signals, now, Duration::days(7)).count(),
    };

    DashboardData {
        generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        tickers: tickers.to_vec(),
        prices: batch.quotes.clone(),
        trend: trend.to_vec(),
        counts,
    }
}
