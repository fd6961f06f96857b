//! Staking parameters and domain constants.

use crate::time::SECS_PER_HOUR;
use serde::{Deserialize, Serialize};

/// Fixed-point scale of stored reward rates (1e8).
///
/// A stored rate `r` means `r / RATE_SCALE` whole tokens of reward per hour
/// for the whole principal it was computed from.
pub const RATE_SCALE: u128 = 100_000_000;

/// Hours in one staking year.
///
/// This is the product's convention (not the calendar 8760) and is only used
/// for human-facing yield projections, never in per-hour accrual.
pub const STAKING_YEAR_HOURS: u64 = 8_670;

/// Delay between queueing a withdrawal and being allowed to release it.
pub const WITHDRAW_DELAY_SECS: u64 = 24 * SECS_PER_HOUR;

/// Tunables of the staking engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingParams {
    /// Seconds a queued withdrawal stays locked.
    #[serde(default = "default_withdraw_delay")]
    pub withdraw_delay_secs: u64,
}

fn default_withdraw_delay() -> u64 {
    WITHDRAW_DELAY_SECS
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            withdraw_delay_secs: default_withdraw_delay(),
        }
    }
}
