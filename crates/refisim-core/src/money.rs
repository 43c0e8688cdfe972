//! Fixed-scale rounding for money, ratios and probabilities.
//!
//! Every value leaving the engine is rounded half-up (midpoint away from
//! zero) and then carries exactly its contractual number of fractional
//! digits, so `1150` is reported as `1150.00`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits carried by money amounts.
pub const MONEY_SCALE: u32 = 2;

/// Fractional digits carried by ratios such as debt-to-income.
pub const RATIO_SCALE: u32 = 4;

/// Fractional digits carried by approval probabilities.
pub const PROBABILITY_SCALE: u32 = 2;

/// Fractional digits carried by annual interest rates (percent units).
pub const RATE_SCALE: u32 = 2;

/// Rounds half-up to `scale` digits and pads to exactly that scale.
#[must_use]
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

/// Rounds a money amount to cents.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    round_half_up(value, MONEY_SCALE)
}

/// Rounds a ratio to four fractional digits.
#[must_use]
pub fn round_ratio(value: Decimal) -> Decimal {
    round_half_up(value, RATIO_SCALE)
}

/// Rounds a probability to two fractional digits.
#[must_use]
pub fn round_probability(value: Decimal) -> Decimal {
    round_half_up(value, PROBABILITY_SCALE)
}

/// Rounds an annual rate (percent units) to two fractional digits.
#[must_use]
pub fn round_rate(value: Decimal) -> Decimal {
    round_half_up(value, RATE_SCALE)
}

/// Returns true when `value` has no more than `scale` fractional digits.
#[must_use]
pub fn fits_scale(value: Decimal, scale: u32) -> bool {
    value.normalize().scale() <= scale
}
