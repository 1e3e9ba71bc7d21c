//! Markdown scan report adapter.
//!
//! Renders one ScanOutcome into the plain-text report consumed by the
//! notification job: indicator readout, signal line, sizing, and a short
//! per-tier rationale.

use crate::domain::error::DipscanError;
use crate::domain::scan::{ScanConfig, ScanOutcome};
use crate::domain::tier::Tier;
use crate::ports::report_port::ReportPort;
use std::fs;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, symbol: &str, outcome: &ScanOutcome, config: &ScanConfig) -> String {
        let snapshot = &outcome.snapshot;
        let mut lines = Vec::new();

        lines.push(format!("{} Dip Buy Scan", symbol));
        lines.push("--------------------------------".to_string());
        lines.push(format!("Date: {}", snapshot.as_of));
        lines.push(format!("Close: {:.2}", outcome.close));
        lines.push(format!(
            "EMA20: {:.2} | SMA50: {:.2} | SMA200: {:.2}",
            snapshot.ema20, snapshot.sma50, snapshot.sma200
        ));
        lines.push(format!("RSI14: {:.2}", snapshot.rsi14));
        lines.push(String::new());
        lines.push(format!("Core Value (info): {}", fmt_money(config.spy_core_value)));
        lines.push(format!("Dip Add Capital Pool: {}", fmt_money(config.add_capital)));
        lines.push(String::new());

        if !outcome.signal.triggered {
            lines.push("Signal: no tier buy signal today.".to_string());
        } else {
            lines.push(format!("Signal: {} BUY THE DIP", outcome.signal.tier));
            lines.push(format!(
                "Recommended Buy Amount: {}",
                fmt_money(outcome.recommendation.dollar_amount)
            ));
            lines.push(format!(
                "Approx Shares @ close: {}",
                outcome.recommendation.share_count
            ));
            lines.push(String::new());
            lines.push(rationale(outcome.signal.tier).to_string());
        }

        let mut report = lines.join("\n");
        report.push('\n');
        report
    }
}

fn rationale(tier: Tier) -> &'static str {
    match tier {
        Tier::Tier1 => "Tier 1 rationale: bull trend + pullback to EMA20 + RSI 40-50 + bullish day.",
        Tier::Tier2 => "Tier 2 rationale: above SMA200 + touch of SMA50 + RSI 30-40 + reclaim day.",
        Tier::Tier3 => "Tier 3 rationale: RSI <= 30 + stabilization + strong reclaim day.",
        Tier::None => "",
    }
}

/// $1,234,567.89
fn fmt_money(value: f64) -> String {
    let cents = format!("{:.2}", value.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        symbol: &str,
        outcome: &ScanOutcome,
        config: &ScanConfig,
        output_path: &str,
    ) -> Result<(), DipscanError> {
        let report = self.render(symbol, outcome, config);
        fs::write(output_path, report)?;
        Ok(())
    }
}
