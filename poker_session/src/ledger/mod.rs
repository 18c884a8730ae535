//! Ledger module tracking each player's signed running balance.
//!
//! Buy-ins, rebuys and add-ons are money the player put in (negative);
//! prizes and cash-outs are money paid out (positive). The balance is never
//! derived from chip counts.

pub mod book;
pub mod errors;
pub mod models;

pub use book::{apply_transaction, end_round};
pub use errors::{LedgerError, LedgerResult};
pub use models::{Player, PlayerId, Transaction, TransactionKind, normalize_name};
