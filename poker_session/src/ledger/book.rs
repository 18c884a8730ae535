//! Recording transactions against a player's ledger.
//!
//! Both operations take the player by reference and return an updated copy.

use rust_decimal::Decimal;

use super::errors::{LedgerError, LedgerResult};
use super::models::{Player, Transaction, TransactionKind};
use crate::chips::Distribution;
use crate::money::{Money, round_money};

/// Append a transaction and update the running balance.
///
/// `amount` is the positive magnitude of the movement. Buy-ins, rebuys and
/// add-ons are recorded as negative contributions and must carry the chips
/// handed out for them; prizes and cash-outs are recorded as positive.
///
/// # Errors
///
/// * `LedgerError::NonPositiveAmount` - `amount` is zero or negative
/// * `LedgerError::MissingDistribution` - Inbound kind without chips
/// * `LedgerError::UnexpectedDistribution` - Outbound kind with chips
pub fn apply_transaction(
    player: &Player,
    kind: TransactionKind,
    amount: Money,
    distribution: Option<Distribution>,
) -> LedgerResult<Player> {
    let amount = round_money(amount);
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount { kind, amount });
    }

    let signed = match (kind.is_inbound(), distribution.is_some()) {
        (true, false) => return Err(LedgerError::MissingDistribution(kind)),
        (false, true) => return Err(LedgerError::UnexpectedDistribution(kind)),
        (true, true) => -amount,
        (false, false) => amount,
    };

    let mut updated = player.clone();
    updated.transactions.push(Transaction {
        kind,
        amount: signed,
        round: player.round,
        distribution,
    });
    updated.balance = round_money(updated.balance + signed);
    match kind {
        TransactionKind::Rebuy => updated.round_rebuys += 1,
        TransactionKind::AddOn => updated.round_add_ons += 1,
        _ => {}
    }
    Ok(updated)
}

/// Close the current round: per-round counters start over, balance and
/// history carry forward.
pub fn end_round(player: &Player) -> Player {
    Player {
        round_rebuys: 0,
        round_add_ons: 0,
        round: player.round + 1,
        ..player.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn chips(id: u32, count: u64) -> Option<Distribution> {
        Some([(id, count)].into_iter().collect())
    }

    #[test]
    fn test_buy_in_is_negative_contribution() {
        let player = Player::new(1, "Ana");
        let updated =
            apply_transaction(&player, TransactionKind::BuyIn, dec!(50), chips(4, 5)).unwrap();
        assert_eq!(updated.balance, dec!(-50));
        assert_eq!(updated.transactions.len(), 1);
        assert_eq!(updated.transactions[0].amount, dec!(-50));
        // Input untouched
        assert_eq!(player.balance, dec!(0));
        assert!(!player.has_transactions());
    }

    #[test]
    fn test_prize_is_positive_contribution() {
        let player = Player::new(1, "Ana");
        let player =
            apply_transaction(&player, TransactionKind::BuyIn, dec!(20), chips(4, 2)).unwrap();
        let player = apply_transaction(&player, TransactionKind::Prize, dec!(60), None).unwrap();
        assert_eq!(player.balance, dec!(40));
        assert_eq!(player.total_in(), dec!(20));
        assert_eq!(player.total_out(), dec!(60));
    }

    #[test]
    fn test_round_counters_and_reset() {
        let player = Player::new(1, "Ana");
        let player =
            apply_transaction(&player, TransactionKind::BuyIn, dec!(10), chips(4, 1)).unwrap();
        let player =
            apply_transaction(&player, TransactionKind::Rebuy, dec!(10), chips(4, 1)).unwrap();
        let player =
            apply_transaction(&player, TransactionKind::AddOn, dec!(5), chips(3, 5)).unwrap();
        assert_eq!(player.round_rebuys, 1);
        assert_eq!(player.round_add_ons, 1);

        let next = end_round(&player);
        assert_eq!(next.round, 2);
        assert_eq!(next.round_rebuys, 0);
        assert_eq!(next.round_add_ons, 0);
        assert_eq!(next.balance, dec!(-25));
        assert_eq!(next.transactions.len(), 3);

        let next =
            apply_transaction(&next, TransactionKind::Rebuy, dec!(10), chips(4, 1)).unwrap();
        assert_eq!(next.transactions[3].round, 2);
        assert_eq!(next.count_of(TransactionKind::Rebuy), 2);
    }

    #[test]
    fn test_chips_merge_inbound_distributions() {
        let player = Player::new(1, "Ana");
        let player =
            apply_transaction(&player, TransactionKind::BuyIn, dec!(10), chips(4, 1)).unwrap();
        let player =
            apply_transaction(&player, TransactionKind::Rebuy, dec!(12), chips(3, 12)).unwrap();
        let stack = player.chips();
        assert_eq!(stack.count(4), 1);
        assert_eq!(stack.count(3), 12);
    }

    #[test]
    fn test_invalid_transactions_rejected() {
        let player = Player::new(1, "Ana");
        assert_eq!(
            apply_transaction(&player, TransactionKind::BuyIn, dec!(0), chips(4, 1)),
            Err(LedgerError::NonPositiveAmount {
                kind: TransactionKind::BuyIn,
                amount: dec!(0),
            })
        );
        assert_eq!(
            apply_transaction(&player, TransactionKind::Rebuy, dec!(10), None),
            Err(LedgerError::MissingDistribution(TransactionKind::Rebuy))
        );
        assert_eq!(
            apply_transaction(&player, TransactionKind::CashOut, dec!(10), chips(4, 1)),
            Err(LedgerError::UnexpectedDistribution(TransactionKind::CashOut))
        );
    }

    #[test]
    fn test_sub_cent_amounts_are_rounded() {
        let player = Player::new(1, "Ana");
        let player =
            apply_transaction(&player, TransactionKind::Prize, dec!(10.005), None).unwrap();
        assert_eq!(player.balance, dec!(10.01));
    }
}
