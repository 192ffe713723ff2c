//! Volume average and distribution-day detection

use crate::common::math;
use crate::models::indicators::VolumeIndicator;
use crate::models::price::PriceBar;

/// Latest volume and its trailing average over `period` bars.
///
/// Bars without a volume are skipped in the average. `None` when no bar in
/// the window carries a volume.
pub fn calculate_volume(bars: &[PriceBar], period: usize) -> Option<VolumeIndicator> {
    let window = math::tail(bars, period);
    let volumes: Vec<f64> = window.iter().filter_map(|b| b.volume).collect();
    let volume_ma = math::mean(&volumes)?;
    let volume = bars.last().and_then(|b| b.volume).unwrap_or(0.0);

    Some(VolumeIndicator {
        volume,
        volume_ma,
        volume_ma_period: period,
    })
}

/// A down session (close below open) on volume above `multiple` times the
/// trailing average. A zero average is treated as 1.
///
/// `false` when the last bar lacks an open or a volume.
pub fn is_distribution_day(bars: &[PriceBar], period: usize, multiple: f64) -> bool {
    let last = match bars.last() {
        Some(bar) => bar,
        None => return false,
    };
    let (open, volume) = match (last.open, last.volume) {
        (Some(open), Some(volume)) => (open, volume),
        _ => return false,
    };
    let average = match calculate_volume(bars, period) {
        Some(v) if v.volume_ma != 0.0 => v.volume_ma,
        _ => 1.0,
    };

    last.close < open && volume > multiple * average
}
