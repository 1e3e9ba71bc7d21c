//! Three-tier dip classification.
//!
//! Rules are evaluated as an ordered first-match-wins list, strict precedence
//! Tier 3 → Tier 2 → Tier 1, so an overlapping weaker tier can never mask the
//! rarer, higher-conviction one. At most one tier triggers per run; no match
//! is a normal outcome, not an error.

use crate::domain::indicator::{IndicatorSnapshot, Slope};
use crate::domain::ohlcv::DailyBar;
use crate::domain::scan::ScanConfig;
use crate::domain::stabilize::StabilizationState;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    None,
    Tier1,
    Tier2,
    Tier3,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::None => write!(f, "none"),
            Tier::Tier1 => write!(f, "Tier 1"),
            Tier::Tier2 => write!(f, "Tier 2"),
            Tier::Tier3 => write!(f, "Tier 3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSignal {
    pub tier: Tier,
    pub allocation_fraction: f64,
    pub triggered: bool,
}

impl TierSignal {
    pub fn none() -> Self {
        Self {
            tier: Tier::None,
            allocation_fraction: 0.0,
            triggered: false,
        }
    }
}

/// Shallow dip in a confirmed bull trend: price holds above the fast SMA,
/// pulls back to within tolerance of the EMA20, momentum cooled to 40-50.
fn tier1_matched(snapshot: &IndicatorSnapshot, bar: &DailyBar, config: &ScanConfig) -> bool {
    snapshot.bullish_close
        && bar.close > snapshot.sma50
        && snapshot.ema20 > snapshot.sma50
        && snapshot.sma200_slope == Slope::Rising
        && (bar.close - snapshot.ema20).abs() / snapshot.ema20 <= config.pullback_within_pct
        && (40.0..=50.0).contains(&snapshot.rsi14)
}

/// Meaningful pullback: still above the slow SMA, touching or slightly
/// undercutting the fast SMA, RSI 30-40, closing back above at least one of
/// the two averages.
fn tier2_matched(snapshot: &IndicatorSnapshot, bar: &DailyBar, config: &ScanConfig) -> bool {
    snapshot.bullish_close
        && bar.close > snapshot.sma200
        && bar.close <= snapshot.sma50 * (1.0 + config.pullback_within_pct)
        && snapshot.rsi14 >= 30.0
        && snapshot.rsi14 < 40.0
        && (bar.close >= snapshot.ema20 || bar.close >= snapshot.sma50)
}

/// Deep fear: oversold RSI, prices already stabilized in a tight range, and a
/// reclaim day that closes above the prior bar's high.
fn tier3_matched(
    snapshot: &IndicatorSnapshot,
    bar: &DailyBar,
    prev_bar: &DailyBar,
    stabilization: &StabilizationState,
) -> bool {
    snapshot.bullish_close
        && snapshot.rsi14 <= 30.0
        && stabilization.observed
        && bar.close > prev_bar.high
}

/// Evaluate the three rule sets against the latest snapshot and bar.
pub fn evaluate(
    snapshot: &IndicatorSnapshot,
    bar: &DailyBar,
    prev_bar: &DailyBar,
    stabilization: &StabilizationState,
    config: &ScanConfig,
) -> TierSignal {
    let rules = [
        (
            tier3_matched(snapshot, bar, prev_bar, stabilization),
            Tier::Tier3,
            config.tier3_alloc,
        ),
        (
            tier2_matched(snapshot, bar, config),
            Tier::Tier2,
            config.tier2_alloc,
        ),
        (
            tier1_matched(snapshot, bar, config),
            Tier::Tier1,
            config.tier1_alloc,
        ),
    ];

    for (matched, tier, allocation_fraction) in rules {
        if matched {
            return TierSignal {
                tier,
                allocation_fraction,
                triggered: true,
            };
        }
    }
    TierSignal::none()
}
