//! Chip module: denominations, chip sets and the chip distributor.
//!
//! This module implements:
//! - Denominations and chip sets (unique ids, positive face values)
//! - Distributions (chip counts per denomination)
//! - The seed / proportional / greedy / mop-up distribution pipeline
//! - A greedy fallback and an exact-value gate on every result
//!
//! ## Example
//!
//! ```
//! use poker_session::chips::{ChipSet, distribute};
//! use rust_decimal::Decimal;
//!
//! let chips = ChipSet::default();
//! let stack = distribute(Decimal::from(37), &chips).unwrap();
//! assert_eq!(chips.value_of(&stack).unwrap(), Decimal::from(37));
//! ```

pub mod distributor;
pub mod errors;
pub mod models;

pub use distributor::{
    Allocation, AllocationPhase, ChipDistributor, DenominationTier, GreedyFillPhase, MopUpPhase,
    Phase, ProportionPolicy, ProportionalPhase, SeedPhase, distribute,
};
pub use errors::{ChipSetError, DistributionError, DistributionResult};
pub use models::{ChipSet, Denomination, DenominationId, Distribution};
