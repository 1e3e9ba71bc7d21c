#![allow(dead_code)]

use chrono::NaiveDate;
use dipscan::domain::error::DipscanError;
pub use dipscan::domain::ohlcv::DailyBar;
use dipscan::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<DailyBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<DailyBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_daily_bars(&self, symbol: &str) -> Result<Vec<DailyBar>, DipscanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(DipscanError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DipscanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(DipscanError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Bar on the `i`-th trading day after 2023-01-01, moving open → close with a
/// half-point wick on each side.
pub fn make_bar(i: usize, open: f64, close: f64) -> DailyBar {
    DailyBar {
        date: date(2023, 1, 1) + chrono::Days::new(i as u64),
        open,
        high: open.max(close) + 0.5,
        low: open.min(close) - 0.5,
        close,
        volume: 1_000_000,
    }
}

pub fn flat_series(len: usize, price: f64) -> Vec<DailyBar> {
    (0..len).map(|i| make_bar(i, price, price)).collect()
}

/// Long flat stretch, a sharp decline into oversold territory, a few
/// stabilized days, then a bullish reclaim closing above the prior high.
/// Triggers Tier 3 with default thresholds.
pub fn tier3_series() -> Vec<DailyBar> {
    let mut bars = Vec::new();
    let mut i = 0;
    let mut price = 300.0;
    for _ in 0..166 {
        bars.push(make_bar(i, price, price));
        i += 1;
    }
    for _ in 0..40 {
        let next = price - 2.0;
        bars.push(make_bar(i, price, next));
        price = next;
        i += 1;
    }
    for _ in 0..3 {
        bars.push(make_bar(i, price, price));
        i += 1;
    }
    bars.push(make_bar(i, price, price + 3.0));
    bars
}

/// Serialize a bar series into the CSV layout the CsvAdapter reads.
pub fn to_csv(bars: &[DailyBar]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for bar in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            bar.date, bar.open, bar.high, bar.low, bar.close, bar.volume
        ));
    }
    out
}
