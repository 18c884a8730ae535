//! Session error types.

use thiserror::Error;

use super::config::SessionMode;
use crate::chips::{ChipSetError, DistributionError};
use crate::ledger::{LedgerError, PlayerId, TransactionKind};

/// Session controller errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Chip distribution failed
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// Ledger rejected the transaction
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Chip set edit rejected
    #[error("Chip set error: {0}")]
    ChipSet(#[from] ChipSetError),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No player with this id
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// A player with this name is already seated
    #[error("Player already seated: {0}")]
    DuplicatePlayer(String),

    /// Player names can't be blank
    #[error("Player name cannot be empty")]
    InvalidName,

    /// Denominations can't change while chips are in play
    #[error("Chip set is locked while {seated} player(s) are seated")]
    ChipSetLocked { seated: usize },

    /// A player buys in once; later money goes through rebuys and add-ons
    #[error("Player {0} has already bought in")]
    AlreadyBoughtIn(PlayerId),

    /// Players with history can only be cleared by a reset
    #[error("Player {0} has recorded transactions")]
    PlayerHasTransactions(PlayerId),

    /// Per-round limit hit
    #[error("{kind} limit of {limit} per round reached for player {player_id}")]
    LimitReached {
        player_id: PlayerId,
        kind: TransactionKind,
        limit: u32,
    },

    /// Operation not available in this mode
    #[error("Operation requires {expected} mode, session is {actual}")]
    WrongMode {
        expected: SessionMode,
        actual: SessionMode,
    },
}

impl SessionError {
    /// Short message suitable for showing to the person running the table
    pub fn client_message(&self) -> String {
        match self {
            SessionError::Distribution(DistributionError::DistributionUnreachable {
                amount, ..
            }) => format!("{amount} can't be paid out with the current chips"),
            SessionError::Distribution(err) => err.to_string(),
            SessionError::Ledger(err) => err.to_string(),
            SessionError::ChipSet(err) => err.to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
