//! Engine thresholds and pipeline settings.
//!
//! Defaults carry the production constants; every field can be overridden by
//! callers, and `RadarConfig::from_env` applies the common overrides from the
//! environment (optionally via a `.env` file).

use crate::error::RadarError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Final ordering of the scored signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOrdering {
    /// Newest first, score breaks ties.
    #[default]
    TimestampFirst,
    /// Highest score first, newest breaks ties. Kept for comparison only.
    ScoreFirst,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub recency_window_days: i64,
    pub correlation_window_days: i64,
    pub correlation_boost: i32,
    pub recent_bonus: i32,

    pub priority_forms: Vec<String>,
    pub filing_priority_score: i32,
    pub filing_base_score: i32,

    pub patent_base_score: i32,

    pub preprint_base_score: i32,
    pub preprint_keyword_bonus: i32,
    pub preprint_keywords: Vec<String>,

    pub news_base_score: i32,
    pub news_positive_keywords: Vec<String>,
    pub news_negative_keywords: Vec<String>,
    pub news_sentiment_cap: i32,
    /// Only the first N news records are scored when set.
    pub news_limit: Option<usize>,

    pub spike_threshold_pct: f64,
    pub dip_threshold_pct: f64,
    pub spike_score: i32,
    pub dip_score: i32,

    pub ordering: SignalOrdering,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recency_window_days: 7,
            correlation_window_days: 7,
            correlation_boost: 1,
            recent_bonus: 1,
            priority_forms: strings(&["10-K", "10-Q", "8-K", "S-1", "6-K"]),
            filing_priority_score: 6,
            filing_base_score: 4,
            patent_base_score: 5,
            preprint_base_score: 3,
            preprint_keyword_bonus: 2,
            preprint_keywords: strings(&[
                "fault",
                "error",
                "superconduct",
                "ion",
                "neutral atom",
                "photonic",
            ]),
            news_base_score: 3,
            news_positive_keywords: strings(&[
                "breakthrough",
                "record",
                "partnership",
                "contract",
                "award",
                "milestone",
                "beats",
                "surge",
                "soar",
                "expands",
            ]),
            news_negative_keywords: strings(&[
                "lawsuit",
                "downgrade",
                "misses",
                "plunge",
                "delay",
                "investigation",
                "short seller",
                "dilution",
                "offering",
                "layoff",
            ]),
            news_sentiment_cap: 2,
            news_limit: None,
            spike_threshold_pct: 15.0,
            dip_threshold_pct: -15.0,
            spike_score: 8,
            dip_score: 7,
            ordering: SignalOrdering::TimestampFirst,
        }
    }
}

impl ScoringConfig {
    pub fn recency_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.recency_window_days)
    }

    pub fn correlation_window(&self) -> chrono::Duration {
        chrono::Duration::days(self.correlation_window_days)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Fewer bars than this and no trend point is produced.
    pub min_history: usize,
    /// Trailing slice the EMAs and RSI are computed over.
    pub indicator_window: usize,
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    /// Bars used for the fast-EMA slope check (the last one is excluded).
    pub slope_window: usize,

    pub rsi_period: usize,
    pub rsi_epsilon: f64,
    pub rsi_overheated: f64,
    pub rsi_high: f64,
    pub rsi_healthy: f64,

    pub volume_avg_period: usize,
    pub distribution_volume_multiple: f64,

    pub divergence_window: usize,
    pub divergence_price_tolerance: f64,
    pub divergence_rsi_drop: f64,

    pub up_min_score: i32,
    pub down_max_score: i32,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_history: 25,
            indicator_window: 25,
            ema_fast_period: 5,
            ema_slow_period: 20,
            slope_window: 7,
            rsi_period: 14,
            rsi_epsilon: 1e-9,
            rsi_overheated: 80.0,
            rsi_high: 70.0,
            rsi_healthy: 50.0,
            volume_avg_period: 20,
            distribution_volume_multiple: 1.5,
            divergence_window: 20,
            divergence_price_tolerance: 0.995,
            divergence_rsi_drop: 2.0,
            up_min_score: 2,
            down_max_score: -2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// How many of the top-ranked signals are considered for notification.
    pub top_signals: usize,
    /// Price levels per ticker worth a heads-up when approached.
    pub buy_zones: BTreeMap<String, Vec<f64>>,
    /// Relative band around a buy-zone level, e.g. 0.004 = 0.4%.
    pub near_band_pct: f64,
    pub momentum_up_pct: f64,
    pub momentum_down_pct: f64,
    pub confirm_rsi_min: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            top_signals: 3,
            buy_zones: BTreeMap::new(),
            near_band_pct: 0.004,
            momentum_up_pct: 5.0,
            momentum_down_pct: -7.0,
            confirm_rsi_min: 50.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub tickers: Vec<String>,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub state_path: PathBuf,
    pub signals_log_limit: usize,
    pub scoring: ScoringConfig,
    pub trend: TrendConfig,
    pub alerts: AlertConfig,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            tickers: strings(&["RGTI", "IONQ", "QBTS", "QUBT"]),
            input_dir: PathBuf::from("data/input"),
            output_dir: PathBuf::from("docs"),
            state_path: PathBuf::from("data/state.json"),
            signals_log_limit: 200,
            scoring: ScoringConfig::default(),
            trend: TrendConfig::default(),
            alerts: AlertConfig::default(),
        }
    }
}

impl RadarConfig {
    /// Defaults overridden by `RADAR_*` environment variables.
    pub fn from_env() -> Result<Self, RadarError> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Some(tickers) = env_var("RADAR_TICKERS") {
            config.tickers = parse_list(&tickers);
        }
        if let Some(dir) = env_var("RADAR_INPUT_DIR") {
            config.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env_var("RADAR_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(path) = env_var("RADAR_STATE_PATH") {
            config.state_path = PathBuf::from(path);
        }
        if let Some(limit) = env_parse("RADAR_SIGNALS_LOG_LIMIT")? {
            config.signals_log_limit = limit;
        }
        if let Some(days) = env_parse("RADAR_RECENCY_DAYS")? {
            config.scoring.recency_window_days = days;
            config.scoring.correlation_window_days = days;
        }
        if let Some(pct) = env_parse("RADAR_SPIKE_PCT")? {
            config.scoring.spike_threshold_pct = pct;
        }
        if let Some(pct) = env_parse::<f64>("RADAR_DIP_PCT")? {
            config.scoring.dip_threshold_pct = -pct.abs();
        }
        if let Some(zones) = env_var("RADAR_BUY_ZONES") {
            config.alerts.buy_zones = parse_buy_zones(&zones)?;
        }

        Ok(config)
    }
}

/// Deployment environment name (`RADAR_ENV`, then `ENVIRONMENT`, else `sandbox`).
pub fn get_environment() -> String {
    env_var("RADAR_ENV")
        .or_else(|| env_var("ENVIRONMENT"))
        .unwrap_or_else(|| "sandbox".to_string())
        .to_lowercase()
}

fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, RadarError> {
    match env_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RadarError::Config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(None),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse `RGTI:52,50;QBTS:38` into per-ticker levels.
pub fn parse_buy_zones(raw: &str) -> Result<BTreeMap<String, Vec<f64>>, RadarError> {
    let mut zones = BTreeMap::new();
    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (ticker, levels) = entry
            .split_once(':')
            .ok_or_else(|| RadarError::Config(format!("buy zone '{}' lacks ':'", entry)))?;
        let levels = levels
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| {
                l.parse::<f64>()
                    .map_err(|_| RadarError::Config(format!("buy zone level '{}' is not a number", l)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        zones.insert(ticker.trim().to_uppercase(), levels);
    }
    Ok(zones)
}
