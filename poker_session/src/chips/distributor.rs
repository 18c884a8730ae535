//! Chip distribution: turning a cash amount into a stack of physical chips.
//!
//! The distributor runs an ordered pipeline of allocation phases over a
//! running [`Allocation`]. Each phase only takes chips whose value still fits
//! in the remaining amount, so the pipeline can undershoot but never overshoot.
//! A final gate checks the stack against the requested amount; when the
//! heuristic strands residue, a plain greedy pass is tried before giving up.

use enum_dispatch::enum_dispatch;
use log::{debug, warn};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use super::errors::{DistributionError, DistributionResult};
use super::models::{ChipSet, Denomination, Distribution};
use crate::money::{EPSILON, Money, approx_eq, round_money};

/// Running state threaded through the allocation phases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Amount originally requested
    pub target: Money,
    /// Value still to be handed out
    pub remaining: Money,
    pub counts: Distribution,
}

impl Allocation {
    pub fn new(target: Money) -> Self {
        Self {
            target,
            remaining: round_money(target),
            counts: Distribution::empty(),
        }
    }

    /// Hand out `count` chips and deduct their value from `remaining`
    fn allocate(&mut self, denomination: &Denomination, count: u64) {
        if count == 0 {
            return;
        }
        self.counts.add(denomination.id, count);
        self.remaining =
            round_money(self.remaining - denomination.face_value * Decimal::from(count));
    }

    /// Whether `count` chips of `denomination` still fit in `remaining`
    fn fits(&self, denomination: &Denomination, count: u64) -> bool {
        denomination.face_value * Decimal::from(count) <= self.remaining
    }

    fn allocated_value(&self, chips: &ChipSet) -> Money {
        chips.iter().fold(Decimal::ZERO, |total, d| {
            round_money(total + d.face_value * Decimal::from(self.counts.count(d.id)))
        })
    }
}

/// How many whole chips of `face_value` fit in `remaining`
fn whole_units(remaining: Money, face_value: Money) -> u64 {
    if remaining < face_value {
        return 0;
    }
    remaining
        .checked_div(face_value)
        .and_then(|quotient| quotient.floor().to_u64())
        .unwrap_or(0)
}

/// One step of the distribution pipeline
#[enum_dispatch]
pub trait AllocationPhase {
    /// Extend `allocation` with chips from `chips`
    fn apply(&self, allocation: Allocation, chips: &ChipSet) -> Allocation;
}

/// Pipeline step variants
#[enum_dispatch(AllocationPhase)]
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Seed(SeedPhase),
    Proportional(ProportionalPhase),
    GreedyFill(GreedyFillPhase),
    MopUp(MopUpPhase),
}

/// One chip of every small denomination, so even a tiny buy-in shows color variety.
///
/// A denomination counts as small when its face value is below a quarter of
/// the requested amount; a unit is only handed out while at least two units'
/// worth of value remains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedPhase;

impl AllocationPhase for SeedPhase {
    fn apply(&self, mut allocation: Allocation, chips: &ChipSet) -> Allocation {
        let threshold = allocation.target / Decimal::from(4);
        for denomination in chips.ascending() {
            let face = denomination.face_value;
            if face < threshold && allocation.remaining >= face * Decimal::TWO {
                allocation.allocate(denomination, 1);
            }
        }
        allocation
    }
}

/// Size tier of a denomination within its chip set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenominationTier {
    Large,
    Mid,
    Small,
}

impl DenominationTier {
    /// Tier of the denomination at `rank` (0 = largest) in a set of `len`
    pub fn for_rank(rank: usize, len: usize) -> Self {
        match (rank * 3).checked_div(len).unwrap_or(0) {
            0 => Self::Large,
            1 => Self::Mid,
            _ => Self::Small,
        }
    }
}

/// Share of the remaining amount each tier aims for in the proportional pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProportionPolicy {
    pub large_share: Money,
    pub mid_share: Money,
    pub small_share: Money,
}

impl ProportionPolicy {
    pub fn share(&self, tier: DenominationTier) -> Money {
        match tier {
            DenominationTier::Large => self.large_share,
            DenominationTier::Mid => self.mid_share,
            DenominationTier::Small => self.small_share,
        }
    }

    /// Validate policy shares
    pub fn validate(&self) -> Result<(), String> {
        for share in [self.large_share, self.mid_share, self.small_share] {
            if share < Decimal::ZERO || share > Decimal::ONE {
                return Err(format!("Share {share} must be between 0 and 1"));
            }
        }
        Ok(())
    }
}

impl Default for ProportionPolicy {
    fn default() -> Self {
        Self {
            large_share: Decimal::new(50, 2),
            mid_share: Decimal::new(30, 2),
            small_share: Decimal::new(10, 2),
        }
    }
}

/// Spread the remaining amount over denominations by tier, largest first.
///
/// Sub-unit denominations are handed out in multiples of five.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProportionalPhase {
    pub policy: ProportionPolicy,
}

impl AllocationPhase for ProportionalPhase {
    fn apply(&self, mut allocation: Allocation, chips: &ChipSet) -> Allocation {
        let descending = chips.descending();
        let len = descending.len();
        for (rank, denomination) in descending.into_iter().enumerate() {
            let share = self.policy.share(DenominationTier::for_rank(rank, len));
            let target = round_money(allocation.remaining * share);
            let mut count = whole_units(target, denomination.face_value);
            if denomination.face_value < Decimal::ONE {
                count = count.saturating_add(2) / 5 * 5;
            }
            if count > 0 && allocation.fits(denomination, count) {
                allocation.allocate(denomination, count);
            }
        }
        allocation
    }
}

/// As many chips as fit, largest denomination first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyFillPhase;

impl AllocationPhase for GreedyFillPhase {
    fn apply(&self, mut allocation: Allocation, chips: &ChipSet) -> Allocation {
        for denomination in chips.descending() {
            let count = whole_units(allocation.remaining, denomination.face_value);
            allocation.allocate(denomination, count);
        }
        allocation
    }
}

/// Greedy pass from the smallest denomination up, catching leftover residue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MopUpPhase;

impl AllocationPhase for MopUpPhase {
    fn apply(&self, mut allocation: Allocation, chips: &ChipSet) -> Allocation {
        for denomination in chips.ascending() {
            let count = whole_units(allocation.remaining, denomination.face_value);
            allocation.allocate(denomination, count);
        }
        allocation
    }
}

/// Converts cash amounts into chip stacks
#[derive(Debug, Clone, PartialEq)]
pub struct ChipDistributor {
    phases: Vec<Phase>,
    tolerance: Money,
}

impl ChipDistributor {
    /// Standard seed / proportional / greedy / mop-up pipeline
    pub fn new(policy: ProportionPolicy) -> Self {
        Self {
            phases: vec![
                SeedPhase.into(),
                ProportionalPhase { policy }.into(),
                GreedyFillPhase.into(),
                MopUpPhase.into(),
            ],
            tolerance: EPSILON,
        }
    }

    /// Custom pipeline
    pub fn with_phases(phases: Vec<Phase>) -> Self {
        Self {
            phases,
            tolerance: EPSILON,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Money) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> Money {
        self.tolerance
    }

    /// Break `amount` into chips of `chips`.
    ///
    /// The result holds an entry for every denomination, zero where none were
    /// handed out, and its value is within the tolerance of `amount`.
    ///
    /// # Errors
    ///
    /// * `DistributionError::InvalidAmount` - `amount` is zero or negative
    /// * `DistributionError::EmptyDenominationSet` - `chips` is empty
    /// * `DistributionError::DistributionUnreachable` - Neither the pipeline nor
    ///   the greedy fallback reproduces `amount`
    pub fn distribute(&self, amount: Money, chips: &ChipSet) -> DistributionResult<Distribution> {
        if amount <= Decimal::ZERO {
            return Err(DistributionError::InvalidAmount(amount));
        }
        if chips.is_empty() {
            return Err(DistributionError::EmptyDenominationSet);
        }

        let heuristic = self
            .phases
            .iter()
            .fold(Allocation::new(amount), |allocation, phase| {
                phase.apply(allocation, chips)
            });
        if self.reaches(&heuristic, chips) {
            return Ok(heuristic.counts.normalized(chips));
        }

        debug!(
            "Heuristic left {} of {} unallocated, falling back to greedy",
            heuristic.remaining, amount
        );
        let fallback = GreedyFillPhase.apply(Allocation::new(amount), chips);
        if self.reaches(&fallback, chips) {
            return Ok(fallback.counts.normalized(chips));
        }

        warn!(
            "Cannot distribute {} with {} denomination(s): {} left over",
            amount,
            chips.len(),
            fallback.remaining
        );
        Err(DistributionError::DistributionUnreachable {
            amount,
            residual: fallback.remaining,
        })
    }

    fn reaches(&self, allocation: &Allocation, chips: &ChipSet) -> bool {
        approx_eq(
            allocation.allocated_value(chips),
            allocation.target,
            self.tolerance,
        )
    }
}

impl Default for ChipDistributor {
    fn default() -> Self {
        Self::new(ProportionPolicy::default())
    }
}

/// Distribute `amount` over `chips` with the default pipeline
pub fn distribute(amount: Money, chips: &ChipSet) -> DistributionResult<Distribution> {
    ChipDistributor::default().distribute(amount, chips)
}
