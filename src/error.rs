//! Error types.
//!
//! The scoring and trend engines are total: malformed records degrade to
//! defaults and per-ticker failures are dropped from the batch. `TrendError`
//! names why a ticker was dropped; `RadarError` covers the I/O adapters.

use thiserror::Error;

/// Reasons a trend point could not be computed for one ticker.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    #[error("insufficient history: {have} bars, need {need}")]
    InsufficientHistory { have: usize, need: usize },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("degenerate computation: {0}")]
    ComputationDegenerate(&'static str),
}

/// Failures of the orchestration layer (files, JSON, configuration).
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RadarError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
