//! Monetary amounts and minor-unit rounding.
//!
//! All money in a session is a [`Decimal`] rounded to [`MINOR_UNIT_DIGITS`]
//! after every arithmetic step, so repeated subtraction across allocation
//! phases never drifts the way binary floats do.

use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary amount (currency units, e.g. 37.25).
pub type Money = Decimal;

/// Number of minor-unit digits kept after every operation.
pub const MINOR_UNIT_DIGITS: u32 = 2;

/// Tolerance used when comparing two amounts (one minor unit).
pub const EPSILON: Money = Decimal::from_parts(1, 0, 0, false, 2);

/// Round an amount to minor units, midpoints away from zero.
#[must_use]
pub fn round_money(value: Money) -> Money {
    value.round_dp_with_strategy(MINOR_UNIT_DIGITS, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether `value` is within `tolerance` of zero.
#[must_use]
pub fn approx_zero(value: Money, tolerance: Money) -> bool {
    value.abs() <= tolerance
}

/// Whether two amounts differ by no more than `tolerance`.
#[must_use]
pub fn approx_eq(a: Money, b: Money, tolerance: Money) -> bool {
    approx_zero(a - b, tolerance)
}
