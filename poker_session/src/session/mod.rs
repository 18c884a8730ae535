//! Session module: the stateful controller around the pure engines.
//!
//! This module provides:
//! - Session configuration (cash or tournament mode, tolerance, round limits)
//! - Player seating, rebuys, add-ons, prizes and cash-outs
//! - Chip set edits, locked while players are seated
//! - Round resets, full resets and end-of-session settlement
//!
//! ## Example
//!
//! ```
//! use poker_session::session::{SessionConfig, SessionController};
//! use rust_decimal::Decimal;
//!
//! let mut session = SessionController::new(SessionConfig::default()).unwrap();
//! let ana = session.add_player("Ana", Decimal::from(30)).unwrap();
//! let bia = session.add_player("Bia", Decimal::from(10)).unwrap();
//!
//! session.cash_out_amount(ana, Decimal::from(5)).unwrap();
//! session.cash_out_amount(bia, Decimal::from(35)).unwrap();
//!
//! let settlement = session.settle();
//! assert_eq!(settlement.transfers.len(), 1);
//! assert_eq!(settlement.transfers[0].amount, Decimal::from(25));
//! ```

pub mod config;
pub mod errors;
pub mod manager;

pub use config::{SessionConfig, SessionMode};
pub use errors::{SessionError, SessionResult};
pub use manager::SessionController;
