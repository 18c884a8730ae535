//! Settlement data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Player, PlayerId};
use crate::money::{EPSILON, Money, approx_zero};

/// Identifies a player in settlement output
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

impl From<&Player> for PlayerRef {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
        }
    }
}

impl std::fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// One payment from a debtor to a creditor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: PlayerRef,
    pub to: PlayerRef,
    /// Always positive
    pub amount: Money,
}

/// Balances that don't net to zero, pointing at a bookkeeping gap upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationMismatch {
    /// Total credits minus total debits
    pub discrepancy: Money,
}

impl std::fmt::Display for ReconciliationMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "balances are off by {}", self.discrepancy)
    }
}

/// Settlement outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Transfers in emission order
    pub transfers: Vec<Transfer>,
    /// Total credits minus total debits of the input balances
    pub discrepancy: Money,
}

impl Settlement {
    /// Settlement with nothing to pay
    pub fn empty() -> Self {
        Self {
            transfers: Vec::new(),
            discrepancy: Decimal::ZERO,
        }
    }

    /// Whether the input balances summed to zero
    pub fn is_balanced(&self) -> bool {
        approx_zero(self.discrepancy, EPSILON)
    }

    pub fn reconciliation_error(&self) -> Option<ReconciliationMismatch> {
        (!self.is_balanced()).then_some(ReconciliationMismatch {
            discrepancy: self.discrepancy,
        })
    }

    /// Sum of all transfer amounts
    pub fn total_transferred(&self) -> Money {
        self.transfers.iter().map(|t| t.amount).sum()
    }
}
