//! Stabilization detector: tight-range consolidation in the trailing closes.
//!
//! A window is stabilized when (max(close) - min(close)) / min(close) stays
//! at or below the configured range. Tier 3 uses this as a precondition for
//! buying after a sharp decline; the scan engine hands it the slice ending at
//! the prior bar so the reclaim day itself is not part of the window.

use crate::domain::error::DipscanError;
use crate::domain::indicator::Indicator;
use crate::domain::ohlcv::DailyBar;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizationState {
    pub window_days: usize,
    pub observed: bool,
}

/// Check the trailing `window_days` closes of `bars` against `range_pct`.
pub fn detect(
    bars: &[DailyBar],
    window_days: usize,
    range_pct: f64,
) -> Result<StabilizationState, DipscanError> {
    if bars.len() < window_days {
        return Err(DipscanError::InsufficientHistory {
            indicator: Indicator::Stabilization,
            required: window_days,
            available: bars.len(),
        });
    }

    let window = &bars[bars.len() - window_days..];
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for bar in window {
        min = min.min(bar.close);
        max = max.max(bar.close);
    }

    Ok(StabilizationState {
        window_days,
        observed: (max - min) / min <= range_pct,
    })
}
