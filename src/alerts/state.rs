use crate::models::trend::TrendStatus;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Notification memory carried between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertState {
    /// Idempotency keys of signals already pushed, plus trend-change keys.
    pub notified_ids: BTreeSet<String>,
    /// Status per ticker from the previous run.
    pub trend_status: BTreeMap<String, TrendStatus>,
    /// One-shot rule keys (buy zones, momentum, confirmations).
    pub sent_alerts: BTreeSet<String>,
}

impl AlertState {
    pub fn was_notified(&self, key: &str) -> bool {
        self.notified_ids.contains(key)
    }

    pub fn was_sent(&self, key: &str) -> bool {
        self.sent_alerts.contains(key)
    }
}
