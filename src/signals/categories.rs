//! Per-category scoring rules.
//!
//! Each rule turns raw feed records into base-scored signals. None of them
//! fail: unparsable dates become `None` timestamps (never recent) and missing
//! numbers suppress only the bonus or event they feed.

use crate::common::time::parse_timestamp;
use crate::config::ScoringConfig;
use crate::models::records::{Filing, NewsArticle, Patent, PriceQuote, Preprint};
use crate::models::signal::{Signal, SignalPayload};
use crate::signals::scoring::{contains_any, recency_bonus, sentiment};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::debug;

fn parse_field(kind: &'static str, field: &'static str, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        debug!(kind, field, value = raw, "unparsable date, treating record as not recent");
    }
    parsed
}

/// Filings: deduplicated by accession, priority forms score higher, recent
/// filings get a bonus.
pub fn score_filings(filings: &[Filing], config: &ScoringConfig, now: DateTime<Utc>) -> Vec<Signal> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut signals = Vec::with_capacity(filings.len());

    for filing in filings {
        let accession = filing.accession.trim();
        if !accession.is_empty() && !seen.insert(accession) {
            debug!(accession, ticker = %filing.ticker, "duplicate filing skipped");
            continue;
        }

        let form = filing.form.trim();
        let base = if config
            .priority_forms
            .iter()
            .any(|f| f.eq_ignore_ascii_case(form))
        {
            config.filing_priority_score
        } else {
            config.filing_base_score
        };

        let ts = parse_field("SEC_FILING", "filed", &filing.filed);
        let score = base + recency_bonus(ts, now, config.recency_window(), config.recent_bonus);

        signals.push(Signal::new(
            SignalPayload::SecFiling {
                ticker: filing.ticker.clone(),
                form: filing.form.clone(),
                filed: filing.filed.clone(),
                accession: filing.accession.clone(),
            },
            score,
            ts,
        ));
    }

    signals
}

pub fn score_patents(patents: &[Patent], config: &ScoringConfig, now: DateTime<Utc>) -> Vec<Signal> {
    patents
        .iter()
        .map(|patent| {
            let ts = parse_field("PATENT", "date", &patent.date);
            let score = config.patent_base_score
                + recency_bonus(ts, now, config.recency_window(), config.recent_bonus);
            Signal::new(
                SignalPayload::Patent {
                    title: patent.title.clone(),
                    date: patent.date.clone(),
                },
                score,
                ts,
            )
        })
        .collect()
}

/// Preprints: bonus when the title hits a research keyword.
pub fn score_preprints(preprints: &[Preprint], config: &ScoringConfig) -> Vec<Signal> {
    preprints
        .iter()
        .map(|preprint| {
            let mut score = config.preprint_base_score;
            if contains_any(&preprint.title, &config.preprint_keywords) {
                score += config.preprint_keyword_bonus;
            }
            Signal::new(
                SignalPayload::Arxiv {
                    title: preprint.title.clone(),
                    published: preprint.published.clone(),
                    link: preprint.link.clone(),
                },
                score,
                parse_field("ARXIV", "published", &preprint.published),
            )
        })
        .collect()
}

/// News: base score adjusted by a bounded keyword sentiment of the title.
pub fn score_news(news: &[NewsArticle], config: &ScoringConfig) -> Vec<Signal> {
    let limit = config.news_limit.unwrap_or(usize::MAX);
    news.iter()
        .take(limit)
        .map(|article| {
            let score = config.news_base_score
                + sentiment(
                    &article.title,
                    &config.news_positive_keywords,
                    &config.news_negative_keywords,
                    config.news_sentiment_cap,
                );
            Signal::new(
                SignalPayload::News {
                    title: article.title.clone(),
                    url: article.url.clone(),
                    seen: article.seen_date.clone(),
                },
                score,
                parse_field("NEWS", "seen_date", &article.seen_date),
            )
        })
        .collect()
}

/// Price events: only moves beyond the spike/dip thresholds produce a signal.
///
/// A quote without a timestamp is stamped `now`; one with an unparsable
/// timestamp is left undated.
pub fn score_price_moves(quotes: &[PriceQuote], config: &ScoringConfig, now: DateTime<Utc>) -> Vec<Signal> {
    let mut signals = Vec::new();

    for quote in quotes {
        let change_pct = match quote.change_pct {
            Some(c) if c.is_finite() => c,
            _ => {
                debug!(ticker = %quote.ticker, "quote without usable change_pct");
                continue;
            }
        };

        let (payload, score) = if change_pct >= config.spike_threshold_pct {
            (
                SignalPayload::PriceSpike {
                    ticker: quote.ticker.clone(),
                    change_pct,
                },
                config.spike_score,
            )
        } else if change_pct <= config.dip_threshold_pct {
            (
                SignalPayload::PriceDip {
                    ticker: quote.ticker.clone(),
                    change_pct,
                },
                config.dip_score,
            )
        } else {
            continue;
        };

        let ts = match quote.timestamp.as_deref() {
            Some(raw) => parse_field("PRICE", "timestamp", raw),
            None => Some(now),
        };
        signals.push(Signal::new(payload, score, ts));
    }

    signals
}
