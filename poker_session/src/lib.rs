//! # Poker Session
//!
//! Money bookkeeping for live home poker sessions, in cash-game and
//! tournament mode.
//!
//! The crate has two pure engines and a controller around them:
//!
//! - **Chip distribution**: turns a buy-in, rebuy or add-on amount into a
//!   count of physical chips per denomination. A heuristic pipeline favors
//!   color variety and sensible proportions; a greedy fallback and an exact
//!   value check guarantee the stack is worth precisely what was paid, or
//!   the request fails.
//! - **Settlement**: nets every player's final balance into a short list of
//!   pairwise transfers, reporting any imbalance instead of hiding it.
//! - **Session controller**: owns the chip set and roster and enforces the
//!   rules that depend on session state.
//!
//! ## Core Modules
//!
//! - [`chips`]: Denominations, chip sets, distributions and the distributor
//! - [`ledger`]: Player transaction histories and running balances
//! - [`settlement`]: Debt netting
//! - [`tournament`]: Prize pool payout structures
//! - [`session`]: The session controller
//! - [`money`]: Decimal money and minor-unit rounding
//!
//! ## Example
//!
//! ```
//! use poker_session::{ChipSet, Player, distribute, settle};
//! use rust_decimal::Decimal;
//!
//! let stack = distribute(Decimal::from(37), &ChipSet::default()).unwrap();
//! assert!(stack.total_chips() > 0);
//!
//! let players = vec![
//!     Player::with_balance(1, "A", Decimal::from(-30)),
//!     Player::with_balance(2, "B", Decimal::from(30)),
//! ];
//! let settlement = settle(&players);
//! assert_eq!(settlement.transfers.len(), 1);
//! ```

pub mod chips;
pub mod ledger;
pub mod money;
pub mod session;
pub mod settlement;
pub mod tournament;

pub use chips::{ChipDistributor, ChipSet, Denomination, Distribution, DistributionError, distribute};
pub use ledger::{Player, PlayerId, Transaction, TransactionKind, apply_transaction};
pub use money::{EPSILON, Money};
pub use session::{SessionConfig, SessionController, SessionError, SessionMode};
pub use settlement::{Settlement, SettlementEngine, Transfer, settle};
pub use tournament::{PrizeStructure, PrizeStructureError};
