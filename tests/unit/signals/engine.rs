//! Unit tests for the scoring engine

use chrono::{DateTime, Duration, TimeZone, Utc};
use quantum_radar::config::{ScoringConfig, SignalOrdering};
use quantum_radar::models::records::{FeedBatch, Filing, NewsArticle, Patent, PriceQuote, Preprint};
use quantum_radar::models::signal::{Signal, SignalKind};
use quantum_radar::signals::engine::{score_signals, ScoringEngine};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

fn date_ago(days: i64) -> String {
    (now() - Duration::days(days)).format("%Y-%m-%d").to_string()
}

fn create_mixed_batch() -> FeedBatch {
    FeedBatch {
        filings: vec![
            Filing {
                ticker: "IONQ".to_string(),
                accession: "0001824920-24-000010".to_string(),
                form: "8-K".to_string(),
                filed: date_ago(3),
            },
            Filing {
                ticker: "RGTI".to_string(),
                accession: "0001839550-24-000002".to_string(),
                form: "10-Q".to_string(),
                filed: date_ago(20),
            },
            Filing {
                ticker: "QBTS".to_string(),
                accession: "broken".to_string(),
                form: "S-1".to_string(),
                filed: "not a date".to_string(),
            },
        ],
        patents: vec![Patent {
            title: "Superconducting coupler".to_string(),
            date: date_ago(3),
            number: "11999999".to_string(),
        }],
        preprints: vec![
            Preprint {
                title: "Neutral atom arrays at scale".to_string(),
                published: format!("{}T09:00:00Z", date_ago(1)),
                link: "http://arxiv.org/abs/2406.00001".to_string(),
            },
            Preprint {
                title: "Variational algorithms".to_string(),
                published: format!("{}T09:00:00Z", date_ago(3)),
                link: "http://arxiv.org/abs/2406.00002".to_string(),
            },
        ],
        news: vec![NewsArticle {
            title: "IonQ wins record contract".to_string(),
            url: "https://news.example/ionq".to_string(),
            seen_date: "20240607T000000Z".to_string(),
        }],
        quotes: vec![
            PriceQuote::new("IONQ", 16.0),
            PriceQuote::new("RGTI", -18.0),
            PriceQuote::new("QUBT", 2.0),
        ],
    }
}

fn assert_sorted_timestamp_first(signals: &[Signal]) {
    for pair in signals.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.ts, a.score) >= (b.ts, b.score),
            "out of order: {:?} before {:?}",
            (a.ts, a.score),
            (b.ts, b.score)
        );
    }
}

#[test]
fn test_filing_and_spike_example() {
    let batch = FeedBatch {
        filings: vec![Filing {
            ticker: "IONQ".to_string(),
            accession: "A1".to_string(),
            form: "8-K".to_string(),
            filed: date_ago(3),
        }],
        quotes: vec![PriceQuote::new("IONQ", 16.0)],
        ..FeedBatch::default()
    };

    let signals = ScoringEngine::default().score(&batch, now());
    assert_eq!(signals.len(), 2);

    assert_eq!(signals[0].kind(), SignalKind::PriceSpike);
    assert_eq!(signals[0].score, 9);
    assert_eq!(signals[1].kind(), SignalKind::SecFiling);
    assert_eq!(signals[1].score, 8);
}

#[test]
fn test_output_is_sorted_timestamp_first() {
    let signals = ScoringEngine::default().score(&create_mixed_batch(), now());
    assert_eq!(signals.len(), 9);
    assert_sorted_timestamp_first(&signals);

    // The undated filing sinks to the bottom regardless of its score.
    let last = signals.last().unwrap();
    assert!(last.ts.is_none());
    assert_eq!(last.kind(), SignalKind::SecFiling);
}

#[test]
fn test_recency_dominates_score() {
    let batch = FeedBatch {
        preprints: vec![Preprint {
            title: "Plain title".to_string(),
            published: "2024-06-10T11:00:00Z".to_string(),
            link: String::new(),
        }],
        filings: vec![Filing {
            ticker: "IONQ".to_string(),
            accession: "A1".to_string(),
            form: "10-K".to_string(),
            filed: "2024-06-08".to_string(),
        }],
        ..FeedBatch::default()
    };
    let signals = ScoringEngine::default().score(&batch, now());
    assert_eq!(signals[0].kind(), SignalKind::Arxiv);
    assert_eq!(signals[0].score, 3);
    assert_eq!(signals[1].score, 7);
}

#[test]
fn test_score_breaks_timestamp_ties() {
    let batch = FeedBatch {
        quotes: vec![PriceQuote::new("RGTI", -20.0), PriceQuote::new("IONQ", 20.0)],
        ..FeedBatch::default()
    };
    let signals = ScoringEngine::default().score(&batch, now());
    assert_eq!(signals[0].kind(), SignalKind::PriceSpike);
    assert_eq!(signals[1].kind(), SignalKind::PriceDip);
}

#[test]
fn test_score_first_alternative() {
    let config = ScoringConfig {
        ordering: SignalOrdering::ScoreFirst,
        ..ScoringConfig::default()
    };
    let signals = score_signals(&create_mixed_batch(), &config, now());
    for pair in signals.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_scoring_is_idempotent() {
    let engine = ScoringEngine::default();
    let batch = create_mixed_batch();
    let first = engine.score(&batch, now());
    let second = engine.score(&batch, now());
    assert_eq!(first, second);
}

#[test]
fn test_boost_adds_exactly_one() {
    let batch = create_mixed_batch();
    let unboosted = score_signals(
        &batch,
        &ScoringConfig {
            correlation_boost: 0,
            ..ScoringConfig::default()
        },
        now(),
    );
    let boosted = ScoringEngine::default().score(&batch, now());
    assert_eq!(unboosted.len(), boosted.len());

    // Same ordering keys except score, so pair up by idempotency key.
    for signal in &boosted {
        let base = unboosted
            .iter()
            .find(|s| s.idempotency_key() == signal.idempotency_key())
            .unwrap();
        let expected = if signal.ticker() == Some("IONQ") { base.score + 1 } else { base.score };
        assert_eq!(signal.score, expected, "{:?}", signal.payload);
    }
}

#[test]
fn test_empty_batch() {
    assert!(ScoringEngine::default().score(&FeedBatch::default(), now()).is_empty());
}

#[test]
fn test_signal_serializes_flat() {
    let batch = FeedBatch {
        quotes: vec![PriceQuote::new("IONQ", 16.0)],
        ..FeedBatch::default()
    };
    let signals = ScoringEngine::default().score(&batch, now());
    let json = serde_json::to_value(&signals[0]).unwrap();
    assert_eq!(json["type"], "PRICE_SPIKE");
    assert_eq!(json["ticker"], "IONQ");
    assert_eq!(json["score"], 8);
    assert_eq!(json["ts"], "2024-06-10T12:00:00Z");

    let back: Signal = serde_json::from_value(json).unwrap();
    assert_eq!(back, signals[0]);
}
