//! Settlement module: netting final balances into pairwise transfers.

pub mod engine;
pub mod models;

pub use engine::{SettlementEngine, settle};
pub use models::{PlayerRef, ReconciliationMismatch, Settlement, Transfer};
