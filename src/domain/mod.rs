//! Core domain types and logic.

pub mod ohlcv;
pub mod indicator;
pub mod stabilize;
pub mod tier;
pub mod sizing;
pub mod scan;
pub mod config_validation;
pub mod error;
