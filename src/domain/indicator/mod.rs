//! Technical indicator implementations.
//!
//! Each calculator produces a full series of dated points with a validity
//! flag covering the warmup window; [`compute_snapshot`] assembles the
//! trailing values for the most recent bar into an [`IndicatorSnapshot`] or
//! fails with `InsufficientHistory` naming the indicator that fell short.

pub mod sma;
pub mod ema;
pub mod rsi;

use crate::domain::error::DipscanError;
use crate::domain::ohlcv::DailyBar;
use chrono::NaiveDate;
use std::fmt;

pub const EMA_PERIOD: usize = 20;
pub const SMA_FAST_PERIOD: usize = 50;
pub const SMA_SLOW_PERIOD: usize = 200;
pub const RSI_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Indicator {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    SmaSlope(usize),
    Stabilization,
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Indicator::Sma(period) => write!(f, "SMA({})", period),
            Indicator::Ema(period) => write!(f, "EMA({})", period),
            Indicator::Rsi(period) => write!(f, "RSI({})", period),
            Indicator::SmaSlope(period) => write!(f, "SMA({}) slope", period),
            Indicator::Stabilization => write!(f, "stabilization window"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator: Indicator,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value at index `i` if it is past the warmup window.
    pub fn value_at(&self, i: usize) -> Option<f64> {
        self.values.get(i).filter(|p| p.valid).map(|p| p.value)
    }

    /// Trailing value if the series has any valid point.
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().filter(|p| p.valid).map(|p| p.value)
    }
}

/// Direction of the slow SMA over the trailing comparison window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slope {
    Rising,
    Flat,
    Falling,
}

/// Indicator values for the most recent bar, recomputed fully each run.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    pub as_of: NaiveDate,
    pub ema20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub sma200_slope: Slope,
    pub rsi14: f64,
    pub bullish_close: bool,
}

fn require(
    available: usize,
    required: usize,
    indicator: Indicator,
) -> Result<(), DipscanError> {
    if available < required {
        return Err(DipscanError::InsufficientHistory {
            indicator,
            required,
            available,
        });
    }
    Ok(())
}

/// Compute the snapshot for the last bar of `bars`.
///
/// `slope_lookback` is the number of trading days between the two SMA200
/// readings compared for the slope classification.
pub fn compute_snapshot(
    bars: &[DailyBar],
    slope_lookback: usize,
) -> Result<IndicatorSnapshot, DipscanError> {
    let n = bars.len();

    require(n, EMA_PERIOD, Indicator::Ema(EMA_PERIOD))?;
    require(n, SMA_FAST_PERIOD, Indicator::Sma(SMA_FAST_PERIOD))?;
    require(n, SMA_SLOW_PERIOD, Indicator::Sma(SMA_SLOW_PERIOD))?;
    require(
        n,
        SMA_SLOW_PERIOD + slope_lookback,
        Indicator::SmaSlope(SMA_SLOW_PERIOD),
    )?;
    require(n, RSI_PERIOD + 1, Indicator::Rsi(RSI_PERIOD))?;

    let ema20_series = ema::calculate_ema(bars, EMA_PERIOD);
    let sma50_series = sma::calculate_sma(bars, SMA_FAST_PERIOD);
    let sma200_series = sma::calculate_sma(bars, SMA_SLOW_PERIOD);
    let rsi14_series = rsi::calculate_rsi(bars, RSI_PERIOD);

    // The length checks above guarantee every trailing value is valid.
    let ema20 = ema20_series
        .last_value()
        .ok_or(missing(Indicator::Ema(EMA_PERIOD), EMA_PERIOD, n))?;
    let sma50 = sma50_series
        .last_value()
        .ok_or(missing(Indicator::Sma(SMA_FAST_PERIOD), SMA_FAST_PERIOD, n))?;
    let sma200 = sma200_series
        .last_value()
        .ok_or(missing(Indicator::Sma(SMA_SLOW_PERIOD), SMA_SLOW_PERIOD, n))?;
    let rsi14 = rsi14_series
        .last_value()
        .ok_or(missing(Indicator::Rsi(RSI_PERIOD), RSI_PERIOD + 1, n))?;
    let sma200_earlier = sma200_series.value_at(n - 1 - slope_lookback).ok_or(missing(
        Indicator::SmaSlope(SMA_SLOW_PERIOD),
        SMA_SLOW_PERIOD + slope_lookback,
        n,
    ))?;

    let sma200_slope = if sma200 > sma200_earlier {
        Slope::Rising
    } else if sma200 < sma200_earlier {
        Slope::Falling
    } else {
        Slope::Flat
    };

    let last = &bars[n - 1];
    Ok(IndicatorSnapshot {
        as_of: last.date,
        ema20,
        sma50,
        sma200,
        sma200_slope,
        rsi14,
        bullish_close: last.bullish_close(),
    })
}

fn missing(indicator: Indicator, required: usize, available: usize) -> DipscanError {
    DipscanError::InsufficientHistory {
        indicator,
        required,
        available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_bars(prices: &[f64]) -> Vec<DailyBar> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| DailyBar {
                date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
                    + chrono::Days::new(i as u64),
                open: close,
                high: close + 0.5,
                low: close - 0.5,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn indicator_display() {
        assert_eq!(Indicator::Sma(200).to_string(), "SMA(200)");
        assert_eq!(Indicator::Ema(20).to_string(), "EMA(20)");
        assert_eq!(Indicator::Rsi(14).to_string(), "RSI(14)");
        assert_eq!(Indicator::SmaSlope(200).to_string(), "SMA(200) slope");
    }

    #[test]
    fn constant_series_snapshot() {
        let bars = make_bars(&[250.0; 260]);
        let snapshot = compute_snapshot(&bars, 7).unwrap();

        assert_relative_eq!(snapshot.ema20, 250.0);
        assert_relative_eq!(snapshot.sma50, 250.0);
        assert_relative_eq!(snapshot.sma200, 250.0);
        assert_relative_eq!(snapshot.rsi14, 100.0);
        assert_eq!(snapshot.sma200_slope, Slope::Flat);
        assert!(!snapshot.bullish_close);
        assert_eq!(snapshot.as_of, bars.last().unwrap().date);
    }

    #[test]
    fn insufficient_history_names_sma200() {
        let bars = make_bars(&[100.0; 150]);
        let err = compute_snapshot(&bars, 7).unwrap_err();
        match err {
            DipscanError::InsufficientHistory {
                indicator,
                required,
                available,
            } => {
                assert_eq!(indicator, Indicator::Sma(200));
                assert_eq!(required, 200);
                assert_eq!(available, 150);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn insufficient_history_for_slope_lookback() {
        // Enough for SMA200 itself but not for the slope comparison.
        let bars = make_bars(&[100.0; 203]);
        let err = compute_snapshot(&bars, 7).unwrap_err();
        match err {
            DipscanError::InsufficientHistory {
                indicator,
                required,
                ..
            } => {
                assert_eq!(indicator, Indicator::SmaSlope(200));
                assert_eq!(required, 207);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn slope_rising_on_uptrend() {
        let prices: Vec<f64> = (0..260).map(|i| 100.0 + i as f64 * 0.5).collect();
        let snapshot = compute_snapshot(&make_bars(&prices), 7).unwrap();
        assert_eq!(snapshot.sma200_slope, Slope::Rising);
    }

    #[test]
    fn slope_falling_on_downtrend() {
        let prices: Vec<f64> = (0..260).map(|i| 400.0 - i as f64 * 0.5).collect();
        let snapshot = compute_snapshot(&make_bars(&prices), 7).unwrap();
        assert_eq!(snapshot.sma200_slope, Slope::Falling);
    }

    #[test]
    fn bullish_close_reflects_last_bar() {
        let mut bars = make_bars(&[100.0; 260]);
        let last = bars.last_mut().unwrap();
        last.open = 99.0;
        last.close = 101.0;
        let snapshot = compute_snapshot(&bars, 7).unwrap();
        assert!(snapshot.bullish_close);
    }
}
