//! Composite trend scoring from indicator readings.
//!
//! Every rule that fires adds its contribution to the score and a note
//! explaining it, so a dashboard reader can audit the classification.

use crate::config::TrendConfig;
use crate::models::trend::TrendStatus;

const EMA_CROSS_WEIGHT: i32 = 2;
const EMA_SLOPE_WEIGHT: i32 = 1;
const RSI_OVERHEATED_PENALTY: i32 = -2;
const RSI_HIGH_PENALTY: i32 = -1;
const RSI_HEALTHY_BONUS: i32 = 1;
const DISTRIBUTION_PENALTY: i32 = -2;
const DIVERGENCE_PENALTY: i32 = -2;

/// Indicator readings for the latest bar.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub ema_fast: f64,
    pub ema_slow: f64,
    /// Fast EMA one bar back; the slope rule is skipped without it.
    pub ema_fast_prev: Option<f64>,
    pub rsi: f64,
    pub distribution_day: bool,
    pub bearish_divergence: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendEvaluation {
    pub score: i32,
    pub status: TrendStatus,
    pub notes: Vec<String>,
}

impl TrendEvaluation {
    fn new() -> Self {
        Self {
            score: 0,
            status: TrendStatus::Watch,
            notes: Vec::new(),
        }
    }

    fn apply(&mut self, contribution: i32, note: String) {
        self.score += contribution;
        self.notes.push(note);
    }
}

/// Score a snapshot and classify it.
pub fn evaluate(snapshot: &IndicatorSnapshot, config: &TrendConfig) -> TrendEvaluation {
    let fast = config.ema_fast_period;
    let slow = config.ema_slow_period;
    let mut eval = TrendEvaluation::new();

    if snapshot.ema_fast > snapshot.ema_slow {
        eval.apply(EMA_CROSS_WEIGHT, format!("EMA{}>EMA{} (uptrend)", fast, slow));
    } else {
        eval.apply(-EMA_CROSS_WEIGHT, format!("EMA{}<EMA{} (downtrend)", fast, slow));
    }

    if let Some(prev) = snapshot.ema_fast_prev {
        if snapshot.ema_fast > prev {
            eval.apply(EMA_SLOPE_WEIGHT, format!("EMA{} rising", fast));
        } else {
            eval.apply(-EMA_SLOPE_WEIGHT, format!("EMA{} falling", fast));
        }
    }

    let rsi = snapshot.rsi;
    if rsi >= config.rsi_overheated {
        eval.apply(RSI_OVERHEATED_PENALTY, format!("RSI {:.0} (overbought)", rsi));
    } else if rsi >= config.rsi_high {
        eval.apply(RSI_HIGH_PENALTY, format!("RSI {:.0} (elevated)", rsi));
    } else if rsi >= config.rsi_healthy {
        eval.apply(RSI_HEALTHY_BONUS, format!("RSI {:.0} (healthy)", rsi));
    }

    if snapshot.distribution_day {
        eval.apply(
            DISTRIBUTION_PENALTY,
            "Red day on heavy volume (distribution)".to_string(),
        );
    }

    if snapshot.bearish_divergence {
        eval.apply(
            DIVERGENCE_PENALTY,
            "Bearish divergence (price up, RSI down)".to_string(),
        );
    }

    eval.status = TrendStatus::from_score(eval.score, config.up_min_score, config.down_max_score);
    eval
}
