//! Session scripts: a chip set plus an ordered list of table events.
//!
//! Scripts are JSON. Players are referred to by name; the replay maps names
//! to the ids handed out by the controller.

use log::info;
use poker_session::{
    chips::{ChipSet, Distribution},
    ledger::normalize_name,
    money::Money,
    session::{SessionConfig, SessionController, SessionError},
};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// A session to replay
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Chip set for the session (default set when absent)
    #[serde(default)]
    pub chips: Option<ChipSet>,
    pub events: Vec<Event>,
}

/// One thing that happened at the table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    AddPlayer { name: String, buy_in: Money },
    /// Take a seat now, buy in later
    SeatPlayer { name: String },
    BuyIn { player: String, amount: Money },
    RemovePlayer { player: String },
    Rebuy { player: String, amount: Money },
    AddOn { player: String, amount: Money },
    Prize { player: String, amount: Money },
    /// Cash out exactly one of a counted stack or a fixed amount
    CashOut {
        player: String,
        #[serde(default)]
        chips: Option<Distribution>,
        #[serde(default)]
        amount: Option<Money>,
    },
    EndRound,
}

/// Script replay errors
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Step {step}: {source}")]
    Session {
        step: usize,
        #[source]
        source: SessionError,
    },

    #[error("Step {step}: unknown player {name}")]
    UnknownPlayer { step: usize, name: String },

    #[error("Step {step}: cash-out needs exactly one of chips or amount")]
    CashOutValue { step: usize },
}

/// Run every event of `script` through a fresh session
///
/// # Returns
///
/// * `Result<(SessionController, Vec<String>), ScriptError>` - The final
///   session and one human-readable line per event
pub fn replay(
    script: &Script,
    config: SessionConfig,
) -> Result<(SessionController, Vec<String>), ScriptError> {
    let chips = script.chips.clone().unwrap_or_default();
    let mut session = SessionController::with_chips(config, chips)
        .map_err(|source| ScriptError::Session { step: 0, source })?;
    let mut ids: HashMap<String, u32> = HashMap::new();
    let mut lines = Vec::with_capacity(script.events.len());

    for (index, event) in script.events.iter().enumerate() {
        let step = index + 1;
        let wrap = move |source: SessionError| ScriptError::Session { step, source };

        let line = match event {
            Event::AddPlayer { name, buy_in } => {
                let id = session.add_player(name, *buy_in).map_err(wrap)?;
                let stack = session.player(id).map_err(wrap)?.chips();
                ids.insert(normalize_name(name), id);
                format!(
                    "{name} buys in for {buy_in}: {}",
                    describe_stack(session.chips(), &stack)
                )
            }
            Event::SeatPlayer { name } => {
                let id = session.seat_player(name).map_err(wrap)?;
                ids.insert(normalize_name(name), id);
                format!("{name} takes a seat")
            }
            Event::BuyIn { player, amount } => {
                let id = player_id(&ids, player, step)?;
                let stack = session.buy_in(id, *amount).map_err(wrap)?;
                format!(
                    "{player} buys in for {amount}: {}",
                    describe_stack(session.chips(), &stack)
                )
            }
            Event::RemovePlayer { player } => {
                let id = player_id(&ids, player, step)?;
                session.remove_player(id).map_err(wrap)?;
                ids.remove(&normalize_name(player));
                format!("{player} leaves the table")
            }
            Event::Rebuy { player, amount } => {
                let id = player_id(&ids, player, step)?;
                let stack = session.rebuy(id, *amount).map_err(wrap)?;
                format!(
                    "{player} rebuys for {amount}: {}",
                    describe_stack(session.chips(), &stack)
                )
            }
            Event::AddOn { player, amount } => {
                let id = player_id(&ids, player, step)?;
                let stack = session.add_on(id, *amount).map_err(wrap)?;
                format!(
                    "{player} adds on {amount}: {}",
                    describe_stack(session.chips(), &stack)
                )
            }
            Event::Prize { player, amount } => {
                let id = player_id(&ids, player, step)?;
                let balance = session.award_prize(id, *amount).map_err(wrap)?;
                format!("{player} wins {amount} (balance {balance})")
            }
            Event::CashOut {
                player,
                chips,
                amount,
            } => {
                let id = player_id(&ids, player, step)?;
                let paid = match (chips, amount) {
                    (Some(counted), None) => session.cash_out(id, counted).map_err(wrap)?,
                    (None, Some(amount)) => {
                        session.cash_out_amount(id, *amount).map_err(wrap)?;
                        *amount
                    }
                    _ => return Err(ScriptError::CashOutValue { step }),
                };
                format!("{player} cashes out {paid}")
            }
            Event::EndRound => {
                let round = session.end_round().map_err(wrap)?;
                format!("Round {round} begins")
            }
        };

        info!("{line}");
        lines.push(line);
    }

    Ok((session, lines))
}

fn player_id(ids: &HashMap<String, u32>, name: &str, step: usize) -> Result<u32, ScriptError> {
    ids.get(&normalize_name(name))
        .copied()
        .ok_or_else(|| ScriptError::UnknownPlayer {
            step,
            name: name.to_string(),
        })
}

/// `3 x Preta, 7 x Branca` style summary of a chip stack
pub fn describe_stack(chips: &ChipSet, stack: &Distribution) -> String {
    let parts: Vec<String> = chips
        .descending()
        .into_iter()
        .filter(|d| stack.count(d.id) > 0)
        .map(|d| format!("{} x {} ({})", stack.count(d.id), d.name, d.face_value))
        .collect();
    if parts.is_empty() {
        "no chips".to_string()
    } else {
        parts.join(", ")
    }
}
