//! Scan engine: one evaluation of a bar series against the tier rule set.
//!
//! Single-pass batch computation. Each run validates the series, recomputes
//! every indicator from the full history, evaluates the tiers and sizes the
//! allocation. Nothing is carried between runs; identical input and
//! configuration give an identical outcome.

use crate::domain::error::DipscanError;
use crate::domain::indicator::{self, IndicatorSnapshot};
use crate::domain::ohlcv::{self, DailyBar};
use crate::domain::sizing::{self, Recommendation};
use crate::domain::stabilize::{self, StabilizationState};
use crate::domain::tier::{self, TierSignal};

/// Immutable per-run configuration, passed explicitly at call time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Informational only; echoed into the report, never computed with.
    pub spy_core_value: f64,
    /// Capital pool earmarked for dip buys.
    pub add_capital: f64,
    pub tier1_alloc: f64,
    pub tier2_alloc: f64,
    pub tier3_alloc: f64,
    /// Tier 1 EMA20 proximity tolerance, also the Tier 2 undercut tolerance.
    pub pullback_within_pct: f64,
    pub stabilize_days: usize,
    pub stabilize_range_pct: f64,
    pub sma200_slope_lookback: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            spy_core_value: 127_000.0,
            add_capital: 30_000.0,
            tier1_alloc: 0.10,
            tier2_alloc: 0.25,
            tier3_alloc: 0.40,
            pullback_within_pct: 0.005,
            stabilize_days: 3,
            stabilize_range_pct: 0.02,
            sma200_slope_lookback: 7,
        }
    }
}

/// Terminal output of one run, handed to the report layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub snapshot: IndicatorSnapshot,
    pub signal: TierSignal,
    pub recommendation: Recommendation,
    /// Present only when the Tier 3 RSI gate was evaluated.
    pub stabilization: Option<StabilizationState>,
    pub close: f64,
}

/// Run one evaluation over `bars` (oldest first).
pub fn run_scan(bars: &[DailyBar], config: &ScanConfig) -> Result<ScanOutcome, DipscanError> {
    ohlcv::validate_series(bars)?;

    let snapshot = indicator::compute_snapshot(bars, config.sma200_slope_lookback)?;

    // The snapshot requires far more history than two bars, so the prior bar
    // always exists here.
    let n = bars.len();
    let bar = &bars[n - 1];
    let prev_bar = &bars[n - 2];

    // Stabilization only matters behind the Tier 3 RSI gate; the window ends
    // at the prior bar so the reclaim day itself is excluded.
    let stabilization = if snapshot.rsi14 <= 30.0 {
        Some(stabilize::detect(
            &bars[..n - 1],
            config.stabilize_days,
            config.stabilize_range_pct,
        )?)
    } else {
        None
    };

    let gate_state = stabilization.unwrap_or(StabilizationState {
        window_days: config.stabilize_days,
        observed: false,
    });

    let signal = tier::evaluate(&snapshot, bar, prev_bar, &gate_state, config);
    let recommendation = sizing::size_position(&signal, config.add_capital, bar.close)?;

    Ok(ScanOutcome {
        snapshot,
        signal,
        recommendation,
        stabilization,
        close: bar.close,
    })
}
