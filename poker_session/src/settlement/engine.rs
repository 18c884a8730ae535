//! Debt netting: reducing signed balances to a short list of payments.
//!
//! Debtors (most negative first) are matched against creditors (most
//! positive first) with two cursors. Every step zeroes out at least one side,
//! so the result never holds more than `debtors + creditors - 1` transfers.

use log::{debug, warn};
use rust_decimal::Decimal;

use super::models::{PlayerRef, Settlement, Transfer};
use crate::ledger::Player;
use crate::money::{EPSILON, Money, approx_zero, round_money};

/// Computes pairwise transfers that zero out player balances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementEngine {
    tolerance: Money,
}

impl SettlementEngine {
    pub fn new(tolerance: Money) -> Self {
        Self { tolerance }
    }

    /// Settle `players` by their current balances.
    ///
    /// Never fails: an input that doesn't sum to zero still gets the
    /// transfers the available credit allows, and the gap is reported in
    /// [`Settlement::discrepancy`] instead of being pushed into a transfer.
    pub fn settle(&self, players: &[Player]) -> Settlement {
        // Working copies: (original position, who, outstanding magnitude)
        let mut debtors: Vec<(usize, PlayerRef, Money)> = Vec::new();
        let mut creditors: Vec<(usize, PlayerRef, Money)> = Vec::new();
        let mut discrepancy = Decimal::ZERO;

        for (position, player) in players.iter().enumerate() {
            let balance = round_money(player.balance);
            discrepancy = round_money(discrepancy + balance);
            if self.is_settled(balance) {
                continue;
            }
            if balance < Decimal::ZERO {
                debtors.push((position, player.into(), -balance));
            } else {
                creditors.push((position, player.into(), balance));
            }
        }

        debtors.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        creditors.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));

        let mut transfers = Vec::with_capacity((debtors.len() + creditors.len()).saturating_sub(1));
        let (mut i, mut j) = (0, 0);
        while i < debtors.len() && j < creditors.len() {
            let amount = round_money(debtors[i].2.min(creditors[j].2));
            transfers.push(Transfer {
                from: debtors[i].1.clone(),
                to: creditors[j].1.clone(),
                amount,
            });
            debtors[i].2 = round_money(debtors[i].2 - amount);
            creditors[j].2 = round_money(creditors[j].2 - amount);

            if self.is_settled(debtors[i].2) {
                i += 1;
            }
            if self.is_settled(creditors[j].2) {
                j += 1;
            }
        }

        if approx_zero(discrepancy, self.tolerance) {
            debug!(
                "Settled {} player(s) with {} transfer(s)",
                players.len(),
                transfers.len()
            );
        } else {
            warn!(
                "Balances of {} player(s) are off by {}; settlement is partial",
                players.len(),
                discrepancy
            );
        }

        Settlement {
            transfers,
            discrepancy,
        }
    }

    /// Within the tolerance band: joins neither side, or closes a cursor
    fn is_settled(&self, value: Money) -> bool {
        approx_zero(value, self.tolerance)
    }
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(EPSILON)
    }
}

/// Settle `players` with the default tolerance
pub fn settle(players: &[Player]) -> Settlement {
    SettlementEngine::default().settle(players)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn roster(balances: &[(&str, Money)]) -> Vec<Player> {
        balances
            .iter()
            .enumerate()
            .map(|(i, (name, balance))| Player::with_balance(i as u32 + 1, *name, *balance))
            .collect()
    }

    fn pairs(settlement: &Settlement) -> Vec<(String, String, Money)> {
        settlement
            .transfers
            .iter()
            .map(|t| (t.from.name.clone(), t.to.name.clone(), t.amount))
            .collect()
    }

    #[test]
    fn test_two_debtors_one_creditor() {
        let players = roster(&[("A", dec!(-30)), ("B", dec!(-10)), ("C", dec!(40))]);
        let settlement = settle(&players);
        assert_eq!(
            pairs(&settlement),
            vec![
                ("A".to_string(), "C".to_string(), dec!(30)),
                ("B".to_string(), "C".to_string(), dec!(10)),
            ]
        );
        assert_eq!(settlement.discrepancy, dec!(0));
        assert!(settlement.reconciliation_error().is_none());
    }

    #[test]
    fn test_imbalance_is_reported_not_absorbed() {
        let players = roster(&[("A", dec!(-20)), ("B", dec!(15)), ("C", dec!(3))]);
        let settlement = settle(&players);
        assert_eq!(
            pairs(&settlement),
            vec![
                ("A".to_string(), "B".to_string(), dec!(15)),
                ("A".to_string(), "C".to_string(), dec!(3)),
            ]
        );
        assert_eq!(settlement.discrepancy, dec!(-2));
        assert_eq!(
            settlement.reconciliation_error().map(|e| e.discrepancy),
            Some(dec!(-2))
        );
    }

    #[test]
    fn test_empty_and_all_zero() {
        assert_eq!(settle(&[]), Settlement::empty());

        let players = roster(&[("A", dec!(0)), ("B", dec!(0.004)), ("C", dec!(-0.01))]);
        let settlement = settle(&players);
        assert!(settlement.transfers.is_empty());

        let players = roster(&[("A", dec!(-0.01)), ("B", dec!(0.01))]);
        let settlement = settle(&players);
        assert!(settlement.transfers.is_empty());
        assert!(settlement.is_balanced());
    }

    #[test]
    fn test_cursor_closes_on_tolerance_band() {
        // D's cent is inside the band, so B's last cent is left unpaid
        let players = roster(&[("B", dec!(-10)), ("C", dec!(9.99)), ("D", dec!(0.01))]);
        let settlement = settle(&players);
        assert_eq!(
            pairs(&settlement),
            vec![("B".to_string(), "C".to_string(), dec!(9.99))]
        );
        assert!(settlement.is_balanced());
    }

    #[test]
    fn test_zero_tolerance_pays_every_cent() {
        let engine = SettlementEngine::new(dec!(0));
        let players = roster(&[("A", dec!(-0.01)), ("B", dec!(0.01))]);
        let settlement = engine.settle(&players);
        assert_eq!(
            pairs(&settlement),
            vec![("A".to_string(), "B".to_string(), dec!(0.01))]
        );
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let players = roster(&[
            ("A", dec!(-10)),
            ("B", dec!(-10)),
            ("C", dec!(10)),
            ("D", dec!(10)),
        ]);
        let settlement = settle(&players);
        assert_eq!(
            pairs(&settlement),
            vec![
                ("A".to_string(), "C".to_string(), dec!(10)),
                ("B".to_string(), "D".to_string(), dec!(10)),
            ]
        );
    }

    #[test]
    fn test_one_debtor_split_across_creditors() {
        let players = roster(&[("A", dec!(5.5)), ("B", dec!(-12.75)), ("C", dec!(7.25))]);
        let settlement = settle(&players);
        assert_eq!(
            pairs(&settlement),
            vec![
                ("B".to_string(), "C".to_string(), dec!(7.25)),
                ("B".to_string(), "A".to_string(), dec!(5.5)),
            ]
        );
        assert_eq!(settlement.total_transferred(), dec!(12.75));
        assert!(settlement.is_balanced());
    }

    #[test]
    fn test_settle_leaves_players_untouched() {
        let players = roster(&[("A", dec!(-30)), ("C", dec!(30))]);
        let before = players.clone();
        let _ = settle(&players);
        assert_eq!(players, before);
    }
}
