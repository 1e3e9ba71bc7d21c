//! Exponential Moving Average indicator.
//!
//! α = 2/(n+1), seed with SMA(n) at the n-th bar, then
//! EMA[i] = C[i]*α + EMA[i-1]*(1-α) through the full history.
//! Warmup: first (n-1) bars are invalid.

use crate::domain::indicator::{Indicator, IndicatorPoint, IndicatorSeries};
use crate::domain::ohlcv::DailyBar;

pub fn calculate_ema(bars: &[DailyBar], period: usize) -> IndicatorSeries {
    if period == 0 || bars.is_empty() {
        return IndicatorSeries {
            indicator: Indicator::Ema(period),
            values: Vec::new(),
        };
    }

    let mut values = Vec::with_capacity(bars.len());
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;
    let mut sum = 0.0;

    for (i, bar) in bars.iter().enumerate() {
        if i < period - 1 {
            sum += bar.close;
            values.push(IndicatorPoint {
                date: bar.date,
                valid: false,
                value: 0.0,
            });
        } else if i == period - 1 {
            sum += bar.close;
            ema = sum / period as f64;
            values.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: ema,
            });
        } else {
            ema = bar.close * alpha + ema * (1.0 - alpha);
            values.push(IndicatorPoint {
                date: bar.date,
                valid: true,
                value: ema,
            });
        }
    }

    IndicatorSeries {
        indicator: Indicator::Ema(period),
        values,
    }
}
