//! Quantum Radar: ranks research, filing, patent, news and price events into
//! signals and classifies per-ticker price trends.

pub mod alerts;
pub mod common;
pub mod config;
pub mod core;
pub mod dashboard;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
pub mod store;
pub mod trend;

pub use error::{RadarError, TrendError};
