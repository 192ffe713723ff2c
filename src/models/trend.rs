use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendStatus {
    Up,
    Watch,
    Down,
}

impl TrendStatus {
    /// Classify a composite score.
    pub fn from_score(score: i32, up_min: i32, down_max: i32) -> Self {
        if score >= up_min {
            TrendStatus::Up
        } else if score <= down_max {
            TrendStatus::Down
        } else {
            TrendStatus::Watch
        }
    }

    /// Batch ordering: most concerning first.
    pub fn priority(&self) -> u8 {
        match self {
            TrendStatus::Down => 0,
            TrendStatus::Watch => 1,
            TrendStatus::Up => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendStatus::Up => "UP",
            TrendStatus::Watch => "WATCH",
            TrendStatus::Down => "DOWN",
        }
    }
}

impl fmt::Display for TrendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub ticker: String,
    pub status: TrendStatus,
    pub score: i32,
    pub rsi: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub close: f64,
    pub change_pct: f64,
    pub volume: f64,
    pub volume_avg: f64,
    pub notes: Vec<String>,
    pub asof: DateTime<Utc>,
}
