//! Session configuration models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chips::ProportionPolicy;
use crate::money::{EPSILON, Money};

/// Session game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Cash,
    Tournament,
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMode::Cash => write!(f, "cash"),
            SessionMode::Tournament => write!(f, "tournament"),
        }
    }
}

impl std::str::FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "tournament" => Ok(Self::Tournament),
            other => Err(format!("Unknown session mode: {other}")),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: SessionMode,

    /// Accepted gap between a chip stack and its cash value (default: 0.01)
    pub tolerance: Money,

    /// Rebuys allowed per player per round (tournament only, `None` = unlimited)
    pub max_rebuys_per_round: Option<u32>,

    /// Add-ons allowed per player per round (tournament only, `None` = unlimited)
    pub max_add_ons_per_round: Option<u32>,

    /// Proportional pass shares for the chip distributor
    pub proportion_policy: ProportionPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::Cash,
            tolerance: EPSILON,
            max_rebuys_per_round: None,
            max_add_ons_per_round: None,
            proportion_policy: ProportionPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Tournament defaults
    pub fn tournament() -> Self {
        Self {
            mode: SessionMode::Tournament,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tolerance < Decimal::ZERO || self.tolerance > Decimal::ONE {
            return Err("Tolerance must be between 0 and 1".to_string());
        }

        if self.mode == SessionMode::Cash
            && (self.max_rebuys_per_round.is_some() || self.max_add_ons_per_round.is_some())
        {
            return Err("Per-round limits only apply to tournaments".to_string());
        }

        self.proportion_policy.validate()
    }
}
