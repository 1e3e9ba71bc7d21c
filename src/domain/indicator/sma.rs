//! Simple Moving Average indicator.
//!
//! Unweighted mean of the trailing n closes, including the current bar.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{Indicator, IndicatorPoint, IndicatorSeries};
use crate::domain::ohlcv::DailyBar;

pub fn calculate_sma(bars: &[DailyBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            indicator: Indicator::Sma(period),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        sum += bar.close;
        if i >= period {
            sum -= bars[i - period].close;
        }
        if i < period - 1 {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: 0.0,
            });
        } else {
            values.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: sum / period as f64,
            });
        }
    }

    IndicatorSeries {
        indicator: Indicator::Sma(period),
        values,
    }
}
