use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeIndicator {
    /// Volume of the latest bar (0 when the feed had none).
    pub volume: f64,
    /// Mean over the trailing `volume_ma_period` bars that carry a volume.
    pub volume_ma: f64,
    pub volume_ma_period: usize,
}
