//! Unit tests for per-category scoring rules

use chrono::{DateTime, Duration, TimeZone, Utc};
use quantum_radar::config::ScoringConfig;
use quantum_radar::models::records::{Filing, NewsArticle, Patent, PriceQuote, Preprint};
use quantum_radar::models::signal::{SignalKind, SignalPayload};
use quantum_radar::signals::categories::{
    score_filings, score_news, score_patents, score_preprints, score_price_moves,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

fn days_ago(days: i64) -> String {
    (now() - Duration::days(days)).format("%Y-%m-%d").to_string()
}

fn filing(accession: &str, form: &str, filed: &str) -> Filing {
    Filing {
        ticker: "IONQ".to_string(),
        accession: accession.to_string(),
        form: form.to_string(),
        filed: filed.to_string(),
    }
}

#[test]
fn test_filing_scores() {
    let config = ScoringConfig::default();
    let filings = vec![
        filing("A1", "8-K", &days_ago(3)),
        filing("A2", "10-Q", &days_ago(30)),
        filing("A3", "4", &days_ago(1)),
        filing("A4", "SC 13G", &days_ago(60)),
    ];
    let scores: Vec<i32> = score_filings(&filings, &config, now())
        .iter()
        .map(|s| s.score)
        .collect();
    assert_eq!(scores, vec![7, 6, 5, 4]);
}

#[test]
fn test_filings_deduplicated_by_accession() {
    let config = ScoringConfig::default();
    let filings = vec![
        filing("A1", "8-K", &days_ago(3)),
        filing("A1", "10-K", &days_ago(2)),
        filing("", "4", "bad"),
        filing("", "4", "bad"),
    ];
    let signals = score_filings(&filings, &config, now());
    assert_eq!(signals.len(), 3);
    match &signals[0].payload {
        SignalPayload::SecFiling { form, .. } => assert_eq!(form, "8-K"),
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn test_unparsable_filing_date_is_not_recent() {
    let config = ScoringConfig::default();
    let signals = score_filings(&[filing("A1", "8-K", "last tuesday")], &config, now());
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].score, 6);
    assert!(signals[0].ts.is_none());
}

#[test]
fn test_patent_recency_bonus() {
    let config = ScoringConfig::default();
    let patents = vec![
        Patent {
            title: "Trapped ion gate".to_string(),
            date: days_ago(2),
            ..Patent::default()
        },
        Patent {
            title: "Old qubit".to_string(),
            date: days_ago(40),
            ..Patent::default()
        },
        Patent::default(),
    ];
    let scores: Vec<i32> = score_patents(&patents, &config, now())
        .iter()
        .map(|s| s.score)
        .collect();
    assert_eq!(scores, vec![6, 5, 5]);
}

#[test]
fn test_preprint_keyword_bonus() {
    let config = ScoringConfig::default();
    let preprints = vec![
        Preprint {
            title: "Fault-Tolerant Logical Qubits".to_string(),
            published: "2024-06-09T17:00:00Z".to_string(),
            link: "http://arxiv.org/abs/1".to_string(),
        },
        Preprint {
            title: "Quantum walks on graphs".to_string(),
            ..Preprint::default()
        },
        Preprint {
            title: "PHOTONIC interconnects".to_string(),
            ..Preprint::default()
        },
    ];
    let signals = score_preprints(&preprints, &config);
    let scores: Vec<i32> = signals.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![5, 3, 5]);
    assert!(signals.iter().all(|s| s.kind() == SignalKind::Arxiv));
    assert!(signals[0].ts.is_some());
}

#[test]
fn test_news_sentiment_is_bounded() {
    let config = ScoringConfig::default();
    let article = |title: &str| NewsArticle {
        title: title.to_string(),
        url: String::new(),
        seen_date: "20240610T080000Z".to_string(),
    };
    let news = vec![
        article("IonQ signs record partnership, shares surge"),
        article("IonQ announces quarterly results"),
        article("Lawsuit and downgrade hit Rigetti"),
        article("Lawsuit, investigation and dilution fears after downgrade"),
    ];
    let signals = score_news(&news, &config);
    let scores: Vec<i32> = signals.iter().map(|s| s.score).collect();
    assert_eq!(scores, vec![5, 3, 1, 1]);
    assert!(signals.iter().all(|s| s.ts.is_some()));
}

#[test]
fn test_news_limit() {
    let config = ScoringConfig {
        news_limit: Some(2),
        ..ScoringConfig::default()
    };
    let news = vec![NewsArticle::default(); 5];
    assert_eq!(score_news(&news, &config).len(), 2);
    assert_eq!(score_news(&news, &ScoringConfig::default()).len(), 5);
}

#[test]
fn test_price_thresholds() {
    let config = ScoringConfig::default();
    let quotes = vec![
        PriceQuote::new("IONQ", 15.0),
        PriceQuote::new("RGTI", 14.99),
        PriceQuote::new("QBTS", -15.0),
        PriceQuote::new("QUBT", -14.99),
        PriceQuote {
            ticker: "NONE".to_string(),
            ..PriceQuote::default()
        },
    ];
    let signals = score_price_moves(&quotes, &config, now());
    assert_eq!(signals.len(), 2);
    assert_eq!(signals[0].kind(), SignalKind::PriceSpike);
    assert_eq!(signals[0].score, 8);
    assert_eq!(signals[0].ts, Some(now()));
    assert_eq!(signals[1].kind(), SignalKind::PriceDip);
    assert_eq!(signals[1].score, 7);
    assert_eq!(signals[1].ticker(), Some("QBTS"));
}

#[test]
fn test_price_quote_timestamp() {
    let config = ScoringConfig::default();
    let quotes = vec![
        PriceQuote::new("IONQ", 20.0).with_timestamp("2024-06-09T20:00:00Z"),
        PriceQuote::new("RGTI", 20.0).with_timestamp("garbage"),
    ];
    let signals = score_price_moves(&quotes, &config, now());
    assert_eq!(
        signals[0].ts,
        Some(Utc.with_ymd_and_hms(2024, 6, 9, 20, 0, 0).unwrap())
    );
    assert!(signals[1].ts.is_none());
}
