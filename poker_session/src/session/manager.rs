//! Session controller owning the chip set and the player roster.
//!
//! The engines are pure; every precondition that depends on session state
//! (chip set locked while players are seated, per-round limits, removal only
//! without history) is checked here before calling into them.

use log::{debug, info};
use rust_decimal::Decimal;

use super::config::{SessionConfig, SessionMode};
use super::errors::{SessionError, SessionResult};
use crate::chips::{ChipDistributor, ChipSet, Denomination, DenominationId, Distribution};
use crate::ledger::{
    Player, PlayerId, TransactionKind, apply_transaction, end_round, normalize_name,
};
use crate::money::{Money, round_money};
use crate::settlement::{Settlement, SettlementEngine};
use crate::tournament::PrizeStructure;

/// Stateful controller for one cash game or tournament
#[derive(Debug, Clone)]
pub struct SessionController {
    config: SessionConfig,
    distributor: ChipDistributor,
    engine: SettlementEngine,
    chips: ChipSet,
    players: Vec<Player>,
    next_player_id: PlayerId,
    round: u32,
}

impl SessionController {
    /// Create a session with the default chip set
    ///
    /// # Errors
    ///
    /// * `SessionError::InvalidConfig` - `config` failed validation
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        Self::with_chips(config, ChipSet::default())
    }

    /// Create a session with a custom chip set
    pub fn with_chips(config: SessionConfig, chips: ChipSet) -> SessionResult<Self> {
        config.validate().map_err(SessionError::InvalidConfig)?;

        let distributor =
            ChipDistributor::new(config.proportion_policy.clone()).with_tolerance(config.tolerance);
        let engine = SettlementEngine::new(config.tolerance);

        Ok(Self {
            config,
            distributor,
            engine,
            chips,
            players: Vec::new(),
            next_player_id: 1,
            round: 1,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> SessionMode {
        self.config.mode
    }

    pub fn chips(&self) -> &ChipSet {
        &self.chips
    }

    /// Seated players in the order they joined
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> SessionResult<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(SessionError::PlayerNotFound(id))
    }

    /// Current round (tournament mode)
    pub fn round(&self) -> u32 {
        self.round
    }

    fn index_of(&self, id: PlayerId) -> SessionResult<usize> {
        self.players
            .iter()
            .position(|p| p.id == id)
            .ok_or(SessionError::PlayerNotFound(id))
    }

    fn ensure_chips_unlocked(&self) -> SessionResult<()> {
        if self.players.is_empty() {
            Ok(())
        } else {
            Err(SessionError::ChipSetLocked {
                seated: self.players.len(),
            })
        }
    }

    /// Swap the whole chip set
    ///
    /// # Errors
    ///
    /// * `SessionError::ChipSetLocked` - Players are seated
    pub fn replace_chip_set(&mut self, chips: ChipSet) -> SessionResult<()> {
        self.ensure_chips_unlocked()?;
        info!("Chip set replaced ({} denominations)", chips.len());
        self.chips = chips;
        Ok(())
    }

    pub fn add_denomination(&mut self, denomination: Denomination) -> SessionResult<()> {
        self.ensure_chips_unlocked()?;
        self.chips.insert(denomination)?;
        Ok(())
    }

    pub fn update_denomination(&mut self, denomination: Denomination) -> SessionResult<()> {
        self.ensure_chips_unlocked()?;
        self.chips.update(denomination)?;
        Ok(())
    }

    pub fn remove_denomination(&mut self, id: DenominationId) -> SessionResult<Denomination> {
        self.ensure_chips_unlocked()?;
        Ok(self.chips.remove(id)?)
    }

    /// Seat a new player with their buy-in
    ///
    /// The buy-in is distributed before the player is seated, so an amount
    /// the chips can't express seats nobody.
    ///
    /// # Errors
    ///
    /// * `SessionError::InvalidName` - Blank name
    /// * `SessionError::DuplicatePlayer` - Name already seated (case-insensitive)
    /// * `SessionError::Distribution` - Buy-in can't be paid out in chips
    pub fn add_player(&mut self, name: &str, buy_in: Money) -> SessionResult<PlayerId> {
        let name = self.check_name(name)?;
        let distribution = self.distributor.distribute(buy_in, &self.chips)?;
        let mut player = Player::new(self.next_player_id, name);
        player.round = self.round;
        let player = apply_transaction(
            &player,
            TransactionKind::BuyIn,
            buy_in,
            Some(distribution),
        )?;

        let id = player.id;
        info!("{} joined with {}", player.name, round_money(buy_in));
        self.players.push(player);
        self.next_player_id += 1;
        Ok(id)
    }

    /// Seat a player without any money on the table yet
    ///
    /// Seated players lock the chip set like any other; until their first
    /// [`Self::buy_in`] they can still be removed.
    pub fn seat_player(&mut self, name: &str) -> SessionResult<PlayerId> {
        let name = self.check_name(name)?;
        let mut player = Player::new(self.next_player_id, name);
        player.round = self.round;

        let id = player.id;
        info!("{} took a seat", player.name);
        self.players.push(player);
        self.next_player_id += 1;
        Ok(id)
    }

    /// Record the first buy-in of a seated player and return their chips
    ///
    /// # Errors
    ///
    /// * `SessionError::AlreadyBoughtIn` - The player already has a buy-in
    /// * `SessionError::Distribution` - Buy-in can't be paid out in chips
    pub fn buy_in(&mut self, id: PlayerId, amount: Money) -> SessionResult<Distribution> {
        let index = self.index_of(id)?;
        if self.players[index].count_of(TransactionKind::BuyIn) > 0 {
            return Err(SessionError::AlreadyBoughtIn(id));
        }
        self.take_cash(id, TransactionKind::BuyIn, amount)
    }

    fn check_name(&self, name: &str) -> SessionResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::InvalidName);
        }
        let key = normalize_name(name);
        if self.players.iter().any(|p| normalize_name(&p.name) == key) {
            return Err(SessionError::DuplicatePlayer(name.to_string()));
        }
        Ok(name.to_string())
    }

    /// Record a rebuy and return the chips handed out for it
    pub fn rebuy(&mut self, id: PlayerId, amount: Money) -> SessionResult<Distribution> {
        self.take_cash(id, TransactionKind::Rebuy, amount)
    }

    /// Record an add-on and return the chips handed out for it
    pub fn add_on(&mut self, id: PlayerId, amount: Money) -> SessionResult<Distribution> {
        self.take_cash(id, TransactionKind::AddOn, amount)
    }

    fn take_cash(
        &mut self,
        id: PlayerId,
        kind: TransactionKind,
        amount: Money,
    ) -> SessionResult<Distribution> {
        let index = self.index_of(id)?;
        self.check_round_limit(&self.players[index], kind)?;

        let distribution = self.distributor.distribute(amount, &self.chips)?;
        let updated = apply_transaction(
            &self.players[index],
            kind,
            amount,
            Some(distribution.clone()),
        )?;
        info!("{} {} of {}", updated.name, kind, round_money(amount));
        self.players[index] = updated;
        Ok(distribution)
    }

    fn check_round_limit(&self, player: &Player, kind: TransactionKind) -> SessionResult<()> {
        if self.config.mode != SessionMode::Tournament {
            return Ok(());
        }
        let (limit, used) = match kind {
            TransactionKind::Rebuy => (self.config.max_rebuys_per_round, player.round_rebuys),
            TransactionKind::AddOn => (self.config.max_add_ons_per_round, player.round_add_ons),
            _ => (None, 0),
        };
        match limit {
            Some(limit) if used >= limit => Err(SessionError::LimitReached {
                player_id: player.id,
                kind,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Pay a prize to a player, returning their new balance
    pub fn award_prize(&mut self, id: PlayerId, amount: Money) -> SessionResult<Money> {
        self.pay_out(id, TransactionKind::Prize, amount)
    }

    /// Cash out a counted stack of chips, returning the cash value paid
    ///
    /// # Errors
    ///
    /// * `SessionError::ChipSet` - The stack holds an unknown denomination
    /// * `SessionError::Ledger` - The stack is worth nothing
    pub fn cash_out(&mut self, id: PlayerId, counted: &Distribution) -> SessionResult<Money> {
        let amount = self.chips.value_of(counted)?;
        self.pay_out(id, TransactionKind::CashOut, amount)?;
        Ok(amount)
    }

    /// Cash out a fixed amount, returning the player's new balance
    pub fn cash_out_amount(&mut self, id: PlayerId, amount: Money) -> SessionResult<Money> {
        self.pay_out(id, TransactionKind::CashOut, amount)
    }

    fn pay_out(&mut self, id: PlayerId, kind: TransactionKind, amount: Money) -> SessionResult<Money> {
        let index = self.index_of(id)?;
        let updated = apply_transaction(&self.players[index], kind, amount, None)?;
        info!("{} {} of {}", updated.name, kind, round_money(amount));
        let balance = updated.balance;
        self.players[index] = updated;
        Ok(balance)
    }

    /// Remove a player who never put money on the table
    ///
    /// # Errors
    ///
    /// * `SessionError::PlayerHasTransactions` - Only a reset clears players with history
    pub fn remove_player(&mut self, id: PlayerId) -> SessionResult<Player> {
        let index = self.index_of(id)?;
        if self.players[index].has_transactions() {
            return Err(SessionError::PlayerHasTransactions(id));
        }
        Ok(self.players.remove(index))
    }

    /// Close the current tournament round, returning the new round number
    ///
    /// # Errors
    ///
    /// * `SessionError::WrongMode` - Cash games have no rounds
    pub fn end_round(&mut self) -> SessionResult<u32> {
        if self.config.mode != SessionMode::Tournament {
            return Err(SessionError::WrongMode {
                expected: SessionMode::Tournament,
                actual: self.config.mode,
            });
        }
        self.players = self.players.iter().map(end_round).collect();
        self.round += 1;
        debug!("Round {} started", self.round);
        Ok(self.round)
    }

    /// Purge the roster and start over at round one
    pub fn reset(&mut self) {
        info!("Session reset, {} player(s) purged", self.players.len());
        self.players.clear();
        self.next_player_id = 1;
        self.round = 1;
    }

    /// Total cash put on the table by all players
    pub fn prize_pool(&self) -> Money {
        self.players
            .iter()
            .fold(Decimal::ZERO, |total, p| round_money(total + p.total_in()))
    }

    /// Standard payout split of the current prize pool
    pub fn prize_structure(&self) -> SessionResult<PrizeStructure> {
        if self.config.mode != SessionMode::Tournament {
            return Err(SessionError::WrongMode {
                expected: SessionMode::Tournament,
                actual: self.config.mode,
            });
        }
        Ok(PrizeStructure::standard(
            self.players.len(),
            self.prize_pool(),
        ))
    }

    /// Chips handed out across all players
    pub fn chips_in_play(&self) -> Distribution {
        self.players
            .iter()
            .fold(Distribution::empty(), |total, p| total.merge(&p.chips()))
            .normalized(&self.chips)
    }

    /// Net the roster's balances into transfers
    pub fn settle(&self) -> Settlement {
        self.engine.settle(&self.players)
    }
}
