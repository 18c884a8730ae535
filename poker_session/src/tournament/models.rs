//! Tournament prize structures.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::errors::PrizeStructureError;
use crate::money::{MINOR_UNIT_DIGITS, Money, round_money};

/// Prize structure for a tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeStructure {
    /// Total prize pool
    pub total_pool: Money,
    /// Payouts by position (1st, 2nd, 3rd, etc.)
    pub payouts: Vec<Money>,
}

impl PrizeStructure {
    /// Standard prize structure for a field of `entrants`
    ///
    /// Standard structures:
    /// - up to 5 entrants: Winner takes all
    /// - 6-9 entrants: 60/40 split
    /// - 10+ entrants: 50/30/20 split
    pub fn standard(entrants: usize, total_pool: Money) -> Self {
        let percentages = match entrants {
            0..=5 => vec![Decimal::ONE],
            6..=9 => vec![Decimal::new(60, 2), Decimal::new(40, 2)],
            _ => vec![Decimal::new(50, 2), Decimal::new(30, 2), Decimal::new(20, 2)],
        };
        Self::split(total_pool, &percentages)
    }

    /// Custom prize structure from per-position shares of the pool
    ///
    /// Each payout is rounded down to minor units and the rounding leftover
    /// goes to first place, so payouts always sum to the pool even when the
    /// shares don't divide it evenly.
    ///
    /// # Errors
    ///
    /// * `PrizeStructureError::NoPaidPositions` - `percentages` is empty
    /// * `PrizeStructureError::InvalidShare` - A share is zero, negative or above 1
    /// * `PrizeStructureError::SharesDontSumToOne` - Shares don't add up to exactly 1
    pub fn custom(
        total_pool: Money,
        percentages: &[Decimal],
    ) -> Result<Self, PrizeStructureError> {
        if percentages.is_empty() {
            return Err(PrizeStructureError::NoPaidPositions);
        }
        for (index, share) in percentages.iter().enumerate() {
            if *share <= Decimal::ZERO || *share > Decimal::ONE {
                return Err(PrizeStructureError::InvalidShare {
                    position: index + 1,
                    share: *share,
                });
            }
        }
        let total: Decimal = percentages.iter().copied().sum();
        if total != Decimal::ONE {
            return Err(PrizeStructureError::SharesDontSumToOne(total));
        }
        Ok(Self::split(total_pool, percentages))
    }

    fn split(total_pool: Money, percentages: &[Decimal]) -> Self {
        let total_pool = round_money(total_pool);
        let mut payouts: Vec<Money> = percentages
            .iter()
            .map(|pct| {
                (total_pool * pct)
                    .round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::ToZero)
            })
            .collect();

        let paid: Money = payouts.iter().copied().sum();
        if let Some(first) = payouts.first_mut() {
            *first = round_money(*first + total_pool - paid);
        }

        Self {
            total_pool,
            payouts,
        }
    }

    /// Get payout for a specific position (1-indexed)
    pub fn payout_for_position(&self, position: usize) -> Option<Money> {
        position
            .checked_sub(1)
            .and_then(|index| self.payouts.get(index))
            .copied()
    }

    /// Number of paid positions
    pub fn places_paid(&self) -> usize {
        self.payouts.len()
    }
}
