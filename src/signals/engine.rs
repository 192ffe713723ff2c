//! Signal scoring engine: category rules, correlation boost, final ordering.

use crate::config::{ScoringConfig, SignalOrdering};
use crate::models::records::FeedBatch;
use crate::models::signal::Signal;
use crate::signals::categories;
use crate::signals::correlation::apply_correlation_boost;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score every category and return the ranked signals.
    ///
    /// Deterministic for identical `batch` and `now`. Malformed records are
    /// scored with defaults; this never fails.
    pub fn score(&self, batch: &FeedBatch, now: DateTime<Utc>) -> Vec<Signal> {
        let config = &self.config;

        let mut signals = categories::score_filings(&batch.filings, config, now);
        signals.extend(categories::score_patents(&batch.patents, config, now));
        signals.extend(categories::score_preprints(&batch.preprints, config));
        signals.extend(categories::score_news(&batch.news, config));
        signals.extend(categories::score_price_moves(&batch.quotes, config, now));

        let boosted = apply_correlation_boost(
            &mut signals,
            now,
            config.correlation_window(),
            config.correlation_boost,
        );

        sort_signals(&mut signals, config.ordering);

        info!(
            signals = signals.len(),
            boosted,
            filings = batch.filings.len(),
            patents = batch.patents.len(),
            preprints = batch.preprints.len(),
            news = batch.news.len(),
            quotes = batch.quotes.len(),
            "ScoringEngine: scored {} signals",
            signals.len()
        );

        signals
    }
}

/// Compare for the final ranking (greatest first).
pub fn compare_signals(a: &Signal, b: &Signal, ordering: SignalOrdering) -> Ordering {
    match ordering {
        SignalOrdering::TimestampFirst => b.ts.cmp(&a.ts).then_with(|| b.score.cmp(&a.score)),
        SignalOrdering::ScoreFirst => b.score.cmp(&a.score).then_with(|| b.ts.cmp(&a.ts)),
    }
}

/// Stable sort, so equal keys keep category order.
pub fn sort_signals(signals: &mut [Signal], ordering: SignalOrdering) {
    signals.sort_by(|a, b| compare_signals(a, b, ordering));
}

/// Convenience wrapper around [`ScoringEngine::score`].
pub fn score_signals(batch: &FeedBatch, config: &ScoringConfig, now: DateTime<Utc>) -> Vec<Signal> {
    ScoringEngine::new(config.clone()).score(batch, now)
}
