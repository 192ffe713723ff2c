//! Trend engine: per-ticker indicator readings, composite score, status.

use crate::common::math;
use crate::config::TrendConfig;
use crate::error::TrendError;
use crate::indicators::momentum::{bearish_divergence, calculate_rsi, rsi_series};
use crate::indicators::trend::{calculate_ema, previous_ema};
use crate::indicators::volume::{calculate_volume, is_distribution_day};
use crate::models::price::PriceSeries;
use crate::models::trend::TrendPoint;
use crate::trend::evaluator::{evaluate, IndicatorSnapshot};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct TrendEngine {
    config: TrendConfig,
}

impl TrendEngine {
    pub fn new(config: TrendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Trend point for one ticker, or `None` when history is too short or
    /// the computation fails.
    pub fn compute_trend(&self, series: &PriceSeries, now: DateTime<Utc>) -> Option<TrendPoint> {
        match self.try_compute_trend(series, now) {
            Ok(point) => Some(point),
            Err(e) => {
                debug!(ticker = %series.ticker, error = %e, "TrendEngine: ticker omitted");
                None
            }
        }
    }

    /// Like [`compute_trend`](Self::compute_trend) but reports why a ticker
    /// was skipped.
    pub fn try_compute_trend(&self, series: &PriceSeries, now: DateTime<Utc>) -> Result<TrendPoint, TrendError> {
        let config = &self.config;
        let need = config.min_history.max(2);
        if series.len() < need {
            return Err(TrendError::InsufficientHistory {
                have: series.len(),
                need,
            });
        }

        let closes = series.closes();
        if let Some(i) = closes.iter().position(|c| !c.is_finite()) {
            return Err(TrendError::MalformedInput(format!(
                "non-finite close at bar {}",
                i
            )));
        }

        let window = math::tail(&closes, config.indicator_window);
        let ema_fast = calculate_ema(window, config.ema_fast_period)
            .ok_or(TrendError::ComputationDegenerate("fast EMA"))?;
        let ema_slow = calculate_ema(window, config.ema_slow_period)
            .ok_or(TrendError::ComputationDegenerate("slow EMA"))?;
        let rsi = calculate_rsi(window, config.rsi_period, config.rsi_epsilon)
            .ok_or(TrendError::ComputationDegenerate("RSI"))?;
        let ema_fast_prev =
            previous_ema(&closes, config.slope_window, config.ema_fast_period).map(|e| e.value);

        let close = closes[closes.len() - 1];
        let prev_close = closes[closes.len() - 2];
        let change_pct = if prev_close != 0.0 {
            (close - prev_close) / prev_close * 100.0
        } else {
            0.0
        };

        let (volume, volume_avg) = calculate_volume(&series.bars, config.volume_avg_period)
            .map(|v| (v.volume, v.volume_ma))
            .unwrap_or((0.0, 0.0));
        let distribution_day = is_distribution_day(
            &series.bars,
            config.volume_avg_period,
            config.distribution_volume_multiple,
        );

        // Only the divergence window needs RSI values, each over its own
        // trailing indicator window.
        let recent = math::tail(&closes, config.divergence_window + config.indicator_window);
        let rsis = rsi_series(recent, config.rsi_period, config.indicator_window, config.rsi_epsilon);
        let divergence = bearish_divergence(
            recent,
            &rsis,
            config.divergence_window,
            config.divergence_price_tolerance,
            config.divergence_rsi_drop,
        );

        let snapshot = IndicatorSnapshot {
            ema_fast: ema_fast.value,
            ema_slow: ema_slow.value,
            ema_fast_prev,
            rsi: rsi.value,
            distribution_day,
            bearish_divergence: divergence,
        };
        let evaluation = evaluate(&snapshot, config);

        debug!(
            ticker = %series.ticker,
            score = evaluation.score,
            status = %evaluation.status,
            rsi = rsi.value,
            "TrendEngine: evaluated {}",
            series.ticker
        );

        Ok(TrendPoint {
            ticker: series.ticker.clone(),
            status: evaluation.status,
            score: evaluation.score,
            rsi: rsi.value,
            ema_fast: ema_fast.value,
            ema_slow: ema_slow.value,
            close,
            change_pct,
            volume,
            volume_avg,
            notes: evaluation.notes,
            asof: now,
        })
    }

    /// Trend points for many tickers, most concerning first.
    ///
    /// Tickers that cannot be computed are left out; the batch never fails.
    pub fn compute_trend_all(&self, series: &[PriceSeries], now: DateTime<Utc>) -> Vec<TrendPoint> {
        let mut points: Vec<TrendPoint> = series
            .iter()
            .filter_map(|s| self.compute_trend(s, now))
            .collect();
        sort_trend_points(&mut points);

        info!(
            requested = series.len(),
            computed = points.len(),
            "TrendEngine: computed {} of {} trend points",
            points.len(),
            series.len()
        );
        points
    }
}

/// DOWN before WATCH before UP, lower score first within a status.
pub fn sort_trend_points(points: &mut [TrendPoint]) {
    points.sort_by_key(|p| (p.status.priority(), p.score));
}
