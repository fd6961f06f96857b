//! Rate function: principal → hourly reward rate.
//!
//! The curve is a progressive tier table, like tax brackets: each slice of
//! principal earns at the per-token rate of the tier it falls in. Every tier
//! rate is non-negative, so the absolute hourly reward never decreases as
//! principal grows, while the per-token yield falls for larger positions.
//!
//! Stored rates are scaled by [`RATE_SCALE`]: a rate `r` pays `r / 1e8` whole
//! tokens per hour for the entire principal.

use stakeable_types::{TokenAmount, RATE_SCALE, STAKING_YEAR_HOURS, TOKEN_UNIT};

use crate::accrual::reward_for_hours;

/// One bracket of the rate table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateTier {
    /// Upper bound of the bracket in raw units (exclusive of later tiers).
    pub up_to: u128,
    /// Hourly rate per whole token in this bracket, scaled by 1e8.
    pub rate_per_token: u128,
}

/// The rate table, ordered by `up_to`.
///
/// First 100 tokens: 1 400; up to 1 000: 441; up to 10 000: 300; beyond: 150.
pub const RATE_TIERS: [RateTier; 4] = [
    RateTier {
        up_to: 100 * TOKEN_UNIT,
        rate_per_token: 1_400,
    },
    RateTier {
        up_to: 1_000 * TOKEN_UNIT,
        rate_per_token: 441,
    },
    RateTier {
        up_to: 10_000 * TOKEN_UNIT,
        rate_per_token: 300,
    },
    RateTier {
        up_to: u128::MAX,
        rate_per_token: 150,
    },
];

/// Hourly reward rate for `principal`, scaled by 1e8.
///
/// `rate = floor(Σ slice_i × r_i / 1e18)`. Whole-token and fractional parts of
/// each slice are accumulated separately so the sum is exact and cannot
/// overflow for any `u128` principal.
pub fn rate_for(principal: TokenAmount) -> u128 {
    let p = principal.raw();
    let mut lower = 0u128;
    let mut whole_part = 0u128;
    let mut fraction_part = 0u128;

    for tier in RATE_TIERS.iter() {
        if p <= lower {
            break;
        }
        let slice = TokenAmount::new(p.min(tier.up_to) - lower);
        whole_part += slice.whole_tokens() * tier.rate_per_token;
        fraction_part += slice.fraction_raw() * tier.rate_per_token;
        lower = tier.up_to;
    }

    whole_part + fraction_part / TOKEN_UNIT
}

/// Reward one staking year (8670 h) of uninterrupted accrual pays at `rate`.
///
/// Display only; accrual itself always works in whole hours.
pub fn projected_annual_reward(rate: u128) -> Option<TokenAmount> {
    reward_for_hours(rate, STAKING_YEAR_HOURS)
}

/// Effective annual yield of `principal` in basis points, for display.
pub fn annual_yield_bps(principal: TokenAmount) -> Option<u128> {
    if principal.is_zero() {
        return Some(0);
    }
    let annual = projected_annual_reward(rate_for(principal))?;
    annual.raw().checked_mul(10_000).map(|v| v / principal.raw())
}

// Keeps the rate scale a whole divisor of the token unit so rewards are exact.
const _: () = assert!(TOKEN_UNIT % RATE_SCALE == 0);
