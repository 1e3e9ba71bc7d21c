//! Position sizing: tier signal → dollar amount and whole-share count.

use crate::domain::error::DipscanError;
use crate::domain::tier::TierSignal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recommendation {
    pub dollar_amount: f64,
    pub share_count: u64,
}

impl Recommendation {
    pub fn zero() -> Self {
        Self {
            dollar_amount: 0.0,
            share_count: 0,
        }
    }
}

/// Size the allocation for a triggered signal.
///
/// An untriggered signal sizes to zero deterministically, without touching
/// capital or price, so a no-signal day can never fail here.
pub fn size_position(
    signal: &TierSignal,
    add_capital: f64,
    close: f64,
) -> Result<Recommendation, DipscanError> {
    if !signal.triggered {
        return Ok(Recommendation::zero());
    }
    if add_capital <= 0.0 {
        return Err(DipscanError::InvalidCapital { value: add_capital });
    }
    if close <= 0.0 {
        return Err(DipscanError::InvalidPrice { value: close });
    }

    let dollar_amount = add_capital * signal.allocation_fraction;
    let share_count = (dollar_amount / close).floor() as u64;

    Ok(Recommendation {
        dollar_amount,
        share_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tier::{Tier, TierSignal};

    fn triggered(tier: Tier, fraction: f64) -> TierSignal {
        TierSignal {
            tier,
            allocation_fraction: fraction,
            triggered: true,
        }
    }

    #[test]
    fn tier2_sizing_example() {
        let signal = triggered(Tier::Tier2, 0.25);
        let rec = size_position(&signal, 30_000.0, 450.0).unwrap();
        assert_eq!(rec.dollar_amount, 7_500.0);
        assert_eq!(rec.share_count, 16);
    }

    #[test]
    fn untriggered_sizes_to_zero() {
        let rec = size_position(&TierSignal::none(), 30_000.0, 450.0).unwrap();
        assert_eq!(rec, Recommendation::zero());
    }

    #[test]
    fn untriggered_ignores_bad_capital() {
        // No sizing error is possible on a no-signal day.
        let rec = size_position(&TierSignal::none(), -1.0, 0.0).unwrap();
        assert_eq!(rec, Recommendation::zero());
    }

    #[test]
    fn non_positive_capital_fails() {
        let signal = triggered(Tier::Tier1, 0.10);
        let err = size_position(&signal, 0.0, 450.0).unwrap_err();
        assert!(matches!(err, DipscanError::InvalidCapital { .. }));
    }

    #[test]
    fn non_positive_price_fails() {
        let signal = triggered(Tier::Tier1, 0.10);
        let err = size_position(&signal, 30_000.0, 0.0).unwrap_err();
        assert!(matches!(err, DipscanError::InvalidPrice { .. }));
    }

    #[test]
    fn share_count_floors() {
        let signal = triggered(Tier::Tier3, 0.40);
        // 12000 / 449.99 = 26.667 -> 26 shares
        let rec = size_position(&signal, 30_000.0, 449.99).unwrap();
        assert_eq!(rec.share_count, 26);
    }

    #[test]
    fn zero_fraction_triggered_sizes_to_zero_shares() {
        let signal = triggered(Tier::Tier1, 0.0);
        let rec = size_position(&signal, 30_000.0, 450.0).unwrap();
        assert_eq!(rec.dollar_amount, 0.0);
        assert_eq!(rec.share_count, 0);
    }
}
