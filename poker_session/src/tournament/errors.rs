//! Tournament error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building a prize structure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrizeStructureError {
    /// At least one position must be paid
    #[error("Prize structure pays no positions")]
    NoPaidPositions,

    /// Shares are fractions of the pool
    #[error("Invalid share for position {position}: {share}")]
    InvalidShare { position: usize, share: Decimal },

    /// Shares must cover the whole pool, no more and no less
    #[error("Shares sum to {0}, expected 1")]
    SharesDontSumToOne(Decimal),
}
