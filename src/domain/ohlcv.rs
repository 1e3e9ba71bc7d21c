//! Daily OHLCV bar representation and series ingestion checks.

use crate::domain::error::DipscanError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

impl DailyBar {
    /// close > open
    pub fn bullish_close(&self) -> bool {
        self.close > self.open
    }
}

/// Rejects malformed input before it reaches the indicator calculator:
/// dates must be strictly increasing, prices positive, volume non-negative.
pub fn validate_series(bars: &[DailyBar]) -> Result<(), DipscanError> {
    for (i, bar) in bars.iter().enumerate() {
        if bar.open <= 0.0 || bar.high <= 0.0 || bar.low <= 0.0 || bar.close <= 0.0 {
            return Err(DipscanError::MalformedSeries {
                reason: format!("non-positive price on {}", bar.date),
            });
        }
        if bar.volume < 0 {
            return Err(DipscanError::MalformedSeries {
                reason: format!("negative volume on {}", bar.date),
            });
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(DipscanError::MalformedSeries {
                reason: format!(
                    "dates not strictly increasing: {} follows {}",
                    bar.date,
                    bars[i - 1].date
                ),
            });
        }
    }
    Ok(())
}
