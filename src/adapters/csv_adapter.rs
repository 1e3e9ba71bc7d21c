//! CSV file data adapter.
//!
//! Reads daily OHLCV export files with a Date,Open,High,Low,Close,Volume
//! header (the Stooq daily export layout). One file per symbol,
//! `<SYMBOL>.csv` under the base path.

use crate::domain::error::DipscanError;
use crate::domain::ohlcv::DailyBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, DipscanError>
where
    T::Err: std::fmt::Display,
{
    let raw = record.get(index).ok_or_else(|| DipscanError::Data {
        reason: format!("missing {} column", name),
    })?;
    raw.trim().parse().map_err(|e| DipscanError::Data {
        reason: format!("invalid {} value {:?}: {}", name, raw, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_daily_bars(&self, symbol: &str) -> Result<Vec<DailyBar>, DipscanError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| DipscanError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| DipscanError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| DipscanError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                DipscanError::Data {
                    reason: format!("invalid date {:?}: {}", date_str, e),
                }
            })?;

            bars.push(DailyBar {
                date,
                open: parse_field(&record, 1, "open")?,
                high: parse_field(&record, 2, "high")?,
                low: parse_field(&record, 3, "low")?,
                close: parse_field(&record, 4, "close")?,
                volume: parse_field(&record, 5, "volume")?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DipscanError> {
        let bars = self.fetch_daily_bars(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}
