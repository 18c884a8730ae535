//! Ledger error types.

use thiserror::Error;

use super::models::TransactionKind;
use crate::money::Money;

/// Ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Transaction amounts are given as positive magnitudes
    #[error("Invalid {kind} amount: {amount}")]
    NonPositiveAmount { kind: TransactionKind, amount: Money },

    /// Inbound cash must carry the chips handed out for it
    #[error("{0} requires a chip distribution")]
    MissingDistribution(TransactionKind),

    /// Outbound cash never carries a chip distribution
    #[error("{0} cannot carry a chip distribution")]
    UnexpectedDistribution(TransactionKind),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
