//! JSON persistence for dashboard data, the signals log and alert state.

use crate::alerts::AlertState;
use crate::dashboard::DashboardData;
use crate::error::RadarError;
use crate::models::signal::Signal;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DATA_FILE: &str = "data.json";
pub const SIGNALS_FILE: &str = "signals.json";

#[derive(Debug, Clone)]
pub struct JsonStore {
    output_dir: PathBuf,
    state_path: PathBuf,
}

impl JsonStore {
    pub fn new(output_dir: impl Into<PathBuf>, state_path: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            state_path: state_path.into(),
        }
    }

    pub fn data_path(&self) -> PathBuf {
        self.output_dir.join(DATA_FILE)
    }

    pub fn signals_path(&self) -> PathBuf {
        self.output_dir.join(SIGNALS_FILE)
    }

    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    pub fn write_dashboard(&self, data: &DashboardData) -> Result<(), RadarError> {
        write_json_atomic(&self.data_path(), data)
    }

    /// Persist an already truncated signals log.
    pub fn write_signals(&self, signals: &[Signal]) -> Result<(), RadarError> {
        write_json_atomic(&self.signals_path(), signals)?;
        info!(count = signals.len(), path = %self.signals_path().display(), "wrote signals log");
        Ok(())
    }

    /// Previous alert state; a missing or unreadable file yields a fresh one.
    pub fn load_state(&self) -> AlertState {
        let raw = match fs::read_to_string(&self.state_path) {
            Ok(raw) => raw,
            Err(_) => return AlertState::default(),
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.state_path.display(), error = %e, "corrupt alert state, starting fresh");
            AlertState::default()
        })
    }

    pub fn save_state(&self, state: &AlertState) -> Result<(), RadarError> {
        write_json_atomic(&self.state_path, state)
    }
}

/// Pretty-printed JSON written to a temp file and renamed into place.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), RadarError> {
    let display = path.display().to_string();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RadarError::io(display.clone(), e))?;
    }

    let body = serde_json::to_string_pretty(value).map_err(|e| RadarError::json(display.clone(), e))?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, body).map_err(|e| RadarError::io(tmp.display().to_string(), e))?;
    fs::rename(&tmp, path).map_err(|e| RadarError::io(display, e))?;
    Ok(())
}
