//! Chip set and distribution error types.

use thiserror::Error;

use crate::money::Money;

/// Errors raised while building a chip set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChipSetError {
    /// Two denominations share an id
    #[error("Duplicate denomination id: {0}")]
    DuplicateId(u32),

    /// Face value must be strictly positive
    #[error("Invalid face value for denomination {id}: {face_value}")]
    InvalidFaceValue { id: u32, face_value: Money },

    /// No denomination with the given id
    #[error("Denomination not found: {0}")]
    DenominationNotFound(u32),
}

/// Errors raised by the chip distributor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    /// Requested amount is zero or negative
    #[error("Invalid amount: {0}")]
    InvalidAmount(Money),

    /// No denominations configured
    #[error("No denominations configured")]
    EmptyDenominationSet,

    /// Neither the heuristic nor the greedy fallback reached the amount
    #[error("Cannot express {amount} with the available chips ({residual} left over)")]
    DistributionUnreachable { amount: Money, residual: Money },
}

/// Result type for distribution operations
pub type DistributionResult<T> = Result<T, DistributionError>;
