//! Data access port trait.

use crate::domain::error::DipscanError;
use crate::domain::ohlcv::DailyBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Fetch the full daily history for `symbol`, oldest bar first.
    fn fetch_daily_bars(&self, symbol: &str) -> Result<Vec<DailyBar>, DipscanError>;

    /// (first date, last date, bar count) for `symbol`, if any data exists.
    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DipscanError>;
}
