//! Ledger data models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chips::Distribution;
use crate::money::{Money, round_money};

/// Player ID type
pub type PlayerId = u32;

/// Key used to compare player names: trimmed and lowercased (Unicode-aware)
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    BuyIn,
    Rebuy,
    AddOn,
    Prize,
    CashOut,
}

impl TransactionKind {
    /// Money the player puts on the table (recorded as a negative amount)
    pub fn is_inbound(self) -> bool {
        matches!(self, Self::BuyIn | Self::Rebuy | Self::AddOn)
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::BuyIn => write!(f, "buy_in"),
            TransactionKind::Rebuy => write!(f, "rebuy"),
            TransactionKind::AddOn => write!(f, "add_on"),
            TransactionKind::Prize => write!(f, "prize"),
            TransactionKind::CashOut => write!(f, "cash_out"),
        }
    }
}

/// One recorded money movement for a player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub kind: TransactionKind,
    /// Signed contribution to the player's balance
    pub amount: Money,
    /// Round the transaction was recorded in (tournament mode)
    pub round: u32,
    /// Chips handed out, for inbound cash
    pub distribution: Option<Distribution>,
}

/// A seated player and their transaction history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub transactions: Vec<Transaction>,
    /// Signed running total of transaction amounts
    pub balance: Money,
    pub round_rebuys: u32,
    pub round_add_ons: u32,
    pub round: u32,
}

impl Player {
    /// Create a player with no transactions
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            transactions: Vec::new(),
            balance: Decimal::ZERO,
            round_rebuys: 0,
            round_add_ons: 0,
            round: 1,
        }
    }

    /// Create a player with a fixed balance and no history, for settling
    /// balances computed elsewhere
    pub fn with_balance(id: PlayerId, name: impl Into<String>, balance: Money) -> Self {
        Self {
            balance: round_money(balance),
            ..Self::new(id, name)
        }
    }

    pub fn has_transactions(&self) -> bool {
        !self.transactions.is_empty()
    }

    /// Total cash the player has put on the table
    pub fn total_in(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.kind.is_inbound())
            .fold(Decimal::ZERO, |total, t| round_money(total - t.amount))
    }

    /// Total cash paid out to the player
    pub fn total_out(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| !t.kind.is_inbound())
            .fold(Decimal::ZERO, |total, t| round_money(total + t.amount))
    }

    /// All chips handed to the player across buy-ins, rebuys and add-ons
    pub fn chips(&self) -> Distribution {
        self.transactions
            .iter()
            .filter_map(|t| t.distribution.as_ref())
            .fold(Distribution::empty(), |total, d| total.merge(d))
    }

    /// Number of transactions of `kind`
    pub fn count_of(&self, kind: TransactionKind) -> usize {
        self.transactions.iter().filter(|t| t.kind == kind).count()
    }
}
