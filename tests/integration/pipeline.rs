//! End-to-end radar passes over JSON snapshots

use crate::test_utils::{create_input_dir, write_snapshot};
use chrono::{DateTime, TimeZone, Utc};
use quantum_radar::alerts::{Alert, AlertState};
use quantum_radar::config::RadarConfig;
use quantum_radar::core::RadarRuntime;
use quantum_radar::dashboard::DashboardData;
use quantum_radar::models::signal::{Signal, SignalKind};
use quantum_radar::services::JsonSnapshotProvider;
use quantum_radar::store::JsonStore;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 21, 0, 0).unwrap()
}

fn runtime_with_zones() -> RadarRuntime {
    let mut config = RadarConfig::default();
    config.alerts.buy_zones.insert("RGTI".to_string(), vec![10.0]);
    RadarRuntime::new(config)
}

#[test]
fn test_full_pass_writes_outputs() {
    let input = create_input_dir();
    let output = TempDir::new().unwrap();
    let provider = JsonSnapshotProvider::new(input.path());
    let store = JsonStore::new(output.path().join("docs"), output.path().join("state/state.json"));

    let pass = runtime_with_zones().run_once(&provider, &store, now()).unwrap();

    // 2 filings, 1 patent, 1 preprint, 1 news, 1 spike.
    assert_eq!(pass.signals.len(), 6);
    assert_eq!(pass.signals[0].kind(), SignalKind::PriceSpike);
    assert_eq!(pass.signals[0].score, 9);

    // RGTI has too little history and is left out.
    assert_eq!(pass.trend.len(), 1);
    assert_eq!(pass.trend[0].ticker, "IONQ");

    let data: DashboardData =
        serde_json::from_str(&fs::read_to_string(store.data_path()).unwrap()).unwrap();
    assert_eq!(data.counts.signals, 6);
    assert_eq!(data.counts.sec, 2);
    assert_eq!(data.tickers.len(), 4);
    assert_eq!(data.trend.len(), 1);
    assert_eq!(data.trend[0].status, pass.trend[0].status);
    assert_eq!(data.trend[0].score, pass.trend[0].score);

    let logged: Vec<Signal> =
        serde_json::from_str(&fs::read_to_string(store.signals_path()).unwrap()).unwrap();
    assert_eq!(logged, pass.signals);

    let state: AlertState =
        serde_json::from_str(&fs::read_to_string(store.state_path()).unwrap()).unwrap();
    assert_eq!(state, pass.state);
    assert!(state.was_sent("RGTI_zone_10.00"));
    assert!(state.was_sent("IONQ_mom_up"));
}

#[test]
fn test_second_pass_does_not_repeat_alerts() {
    let input = create_input_dir();
    let output = TempDir::new().unwrap();
    let provider = JsonSnapshotProvider::new(input.path());
    let store = JsonStore::new(output.path(), output.path().join("state.json"));
    let runtime = runtime_with_zones();

    let first = runtime.run_once(&provider, &store, now()).unwrap();
    let top = first
        .alerts
        .iter()
        .filter(|a| matches!(a, Alert::TopSignal { .. }))
        .count();
    assert_eq!(top, 3);

    let second = runtime.run_once(&provider, &store, now()).unwrap();
    assert!(second.alerts.is_empty(), "unexpected alerts: {:?}", second.alerts);
    assert_eq!(second.signals, first.signals);
}

#[test]
fn test_signals_log_is_truncated() {
    let input = create_input_dir();
    let output = TempDir::new().unwrap();
    let provider = JsonSnapshotProvider::new(input.path());
    let store = JsonStore::new(output.path(), output.path().join("state.json"));
    let mut config = RadarConfig::default();
    config.signals_log_limit = 4;

    let pass = RadarRuntime::new(config).run_once(&provider, &store, now()).unwrap();
    let logged: Vec<Signal> =
        serde_json::from_str(&fs::read_to_string(store.signals_path()).unwrap()).unwrap();
    assert_eq!(logged.len(), 4);
    assert_eq!(logged[..], pass.signals[..4]);
    assert_eq!(pass.dashboard.counts.signals, 6);
}

#[test]
fn test_broken_category_is_treated_as_empty() {
    let input = create_input_dir();
    fs::write(input.path().join("news.json"), "{not json").unwrap();
    write_snapshot(input.path(), "patents.json", &json!({"unexpected": "shape"}));
    let output = TempDir::new().unwrap();
    let provider = JsonSnapshotProvider::new(input.path());
    let store = JsonStore::new(output.path(), output.path().join("state.json"));

    let pass = RadarRuntime::new(RadarConfig::default())
        .run_once(&provider, &store, now())
        .unwrap();
    assert_eq!(pass.signals.len(), 4);
    assert!(pass
        .signals
        .iter()
        .all(|s| !matches!(s.kind(), SignalKind::News | SignalKind::Patent)));
}

#[test]
fn test_empty_input_dir() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let provider = JsonSnapshotProvider::new(input.path());
    let store = JsonStore::new(output.path(), output.path().join("state.json"));

    let pass = RadarRuntime::new(RadarConfig::default())
        .run_once(&provider, &store, now())
        .unwrap();
    assert!(pass.signals.is_empty());
    assert!(pass.trend.is_empty());
    assert!(pass.alerts.is_empty());
    assert!(store.data_path().exists());
}

#[test]
fn test_corrupt_state_starts_fresh() {
    let input = create_input_dir();
    let output = TempDir::new().unwrap();
    let provider = JsonSnapshotProvider::new(input.path());
    let state_path = output.path().join("state.json");
    fs::write(&state_path, "garbage").unwrap();
    let store = JsonStore::new(output.path(), &state_path);

    let pass = RadarRuntime::new(RadarConfig::default())
        .run_once(&provider, &store, now())
        .unwrap();
    assert!(!pass.alerts.is_empty());
    let saved: AlertState = serde_json::from_str(&fs::read_to_string(&state_path).unwrap()).unwrap();
    assert_eq!(saved, pass.state);
}

#[test]
fn test_damaged_records_are_still_scored() {
    let input = create_input_dir();
    write_snapshot(
        input.path(),
        "filings.json",
        &json!([
            {"ticker": "IONQ", "accession": "0001824920-24-000010", "form": "8-K", "filed": "2024-06-07"},
            {"ticker": "RGTI", "accession": null, "form": "10-Q", "filed": null},
            "not a record",
        ]),
    );
    write_snapshot(
        input.path(),
        "quotes.json",
        &json!([{"ticker": "IONQ", "price": "21.4", "change_pct": "16.2"}]),
    );
    let output = TempDir::new().unwrap();
    let provider = JsonSnapshotProvider::new(input.path());
    let store = JsonStore::new(output.path(), output.path().join("state.json"));

    let pass = RadarRuntime::new(RadarConfig::default())
        .run_once(&provider, &store, now())
        .unwrap();
    let filings: Vec<&Signal> = pass
        .signals
        .iter()
        .filter(|s| s.kind() == SignalKind::SecFiling)
        .collect();
    assert_eq!(filings.len(), 2);
    // Undated RGTI filing: priority form, no recency bonus, sorted last.
    let last = pass.signals.last().unwrap();
    assert_eq!(last.ticker(), Some("RGTI"));
    assert_eq!(last.score, 6);
    assert!(last.ts.is_none());
    assert!(pass.signals.iter().any(|s| s.kind() == SignalKind::PriceSpike));
    assert_eq!(pass.dashboard.counts.sec, 2);
}

#[test]
fn test_later_pass_does_not_repeat_alerts() {
    let input = create_input_dir();
    let output = TempDir::new().unwrap();
    let provider = JsonSnapshotProvider::new(input.path());
    let store = JsonStore::new(output.path(), output.path().join("state.json"));
    let runtime = runtime_with_zones();

    let first = runtime.run_once(&provider, &store, now()).unwrap();
    assert!(!first.alerts.is_empty());

    let later = now() + chrono::Duration::hours(2);
    let second = runtime.run_once(&provider, &store, later).unwrap();
    assert_ne!(second.signals[0].ts, first.signals[0].ts);
    assert!(second.alerts.is_empty(), "unexpected alerts: {:?}", second.alerts);
}
