//! One radar pass: feeds in, signals, trend, dashboard and alerts out.

use crate::alerts::{evaluate_alerts, Alert, AlertState};
use crate::config::RadarConfig;
use crate::dashboard::{build_dashboard, signals_log, DashboardData};
use crate::error::RadarError;
use crate::models::price::PriceSeries;
use crate::models::records::FeedBatch;
use crate::models::signal::Signal;
use crate::models::trend::TrendPoint;
use crate::services::feeds::{load_batch, FeedProvider};
use crate::signals::engine::ScoringEngine;
use crate::store::JsonStore;
use crate::trend::engine::TrendEngine;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Everything a pass produces.
#[derive(Debug, Clone)]
pub struct PassOutput {
    pub signals: Vec<Signal>,
    pub trend: Vec<TrendPoint>,
    pub dashboard: DashboardData,
    pub alerts: Vec<Alert>,
    pub state: AlertState,
}

pub struct RadarRuntime {
    config: RadarConfig,
    scoring: ScoringEngine,
    trend: TrendEngine,
}

impl RadarRuntime {
    pub fn new(config: RadarConfig) -> Self {
        let scoring = ScoringEngine::new(config.scoring.clone());
        let trend = TrendEngine::new(config.trend.clone());
        Self {
            config,
            scoring,
            trend,
        }
    }

    pub fn config(&self) -> &RadarConfig {
        &self.config
    }

    /// Pure part of a pass; no I/O.
    pub fn evaluate(
        &self,
        batch: &FeedBatch,
        history: &[PriceSeries],
        state: &AlertState,
        now: DateTime<Utc>,
    ) -> PassOutput {
        let signals = self.scoring.score(batch, now);
        let trend = self.trend.compute_trend_all(history, now);
        let dashboard = build_dashboard(&self.config.tickers, batch, &signals, &trend, now);
        let outcome = evaluate_alerts(state, &signals, &batch.quotes, &trend, &self.config.alerts);

        PassOutput {
            signals,
            trend,
            dashboard,
            alerts: outcome.alerts,
            state: outcome.state,
        }
    }

    /// Load feeds, evaluate, persist. Feed failures degrade to empty
    /// categories; only write failures are returned.
    pub fn run_once(
        &self,
        provider: &dyn FeedProvider,
        store: &JsonStore,
        now: DateTime<Utc>,
    ) -> Result<PassOutput, RadarError> {
        let batch = load_batch(provider);
        let history = provider.price_history(&self.config.tickers).unwrap_or_else(|e| {
            warn!(error = %e, "price history unavailable, skipping trend");
            Vec::new()
        });
        let state = store.load_state();

        let output = self.evaluate(&batch, &history, &state, now);

        store.write_dashboard(&output.dashboard)?;
        store.write_signals(signals_log(&output.signals, self.config.signals_log_limit))?;
        store.save_state(&output.state)?;

        info!(
            signals = output.signals.len(),
            trend = output.trend.len(),
            alerts = output.alerts.len(),
            "RadarRuntime: pass complete"
        );
        Ok(output)
    }
}
