//! Hourly accrual.
//!
//! Reward accrues in whole hours only. Settling moves `accrual_start` forward
//! by the hours actually paid, so a partial hour is never lost: it stays
//! between `accrual_start` and `now` and is picked up once it completes.

use stakeable_types::{Timestamp, TokenAmount, RATE_SCALE, SECS_PER_HOUR, TOKEN_UNIT};

use crate::error::StakeError;
use crate::record::StakeRecord;

/// Raw reward units paid per unit of rate per hour (`1e18 / 1e8`).
const RAW_PER_RATE_HOUR: u128 = TOKEN_UNIT / RATE_SCALE;

/// Outcome of one settlement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Whole hours consumed.
    pub hours: u64,
    /// Reward added to `unclaimed_reward`.
    pub reward: TokenAmount,
}

/// `floor(rate × hours / 1e8)` tokens, in raw units. `None` on overflow.
pub fn reward_for_hours(rate: u128, hours: u64) -> Option<TokenAmount> {
    rate.checked_mul(hours as u128)?
        .checked_mul(RAW_PER_RATE_HOUR)
        .map(TokenAmount::new)
}

/// Reward earned since `accrual_start` that has not been settled yet.
pub fn accrued_since(record: &StakeRecord, now: Timestamp) -> Option<TokenAmount> {
    reward_for_hours(record.rate, record.accrual_start.whole_hours_since(now))
}

/// Settle accrued reward into `unclaimed_reward` and advance `accrual_start`
/// by the whole hours consumed.
///
/// On error the record is left untouched.
pub fn settle(record: &mut StakeRecord, now: Timestamp) -> Result<Settlement, StakeError> {
    let hours = record.accrual_start.whole_hours_since(now);
    if hours == 0 {
        return Ok(Settlement {
            hours: 0,
            reward: TokenAmount::ZERO,
        });
    }

    let reward = reward_for_hours(record.rate, hours).ok_or(StakeError::Overflow)?;
    let unclaimed = record
        .unclaimed_reward
        .checked_add(reward)
        .ok_or(StakeError::Overflow)?;
    let advanced = hours
        .checked_mul(SECS_PER_HOUR)
        .and_then(|secs| record.accrual_start.checked_add_secs(secs))
        .ok_or(StakeError::Overflow)?;

    record.unclaimed_reward = unclaimed;
    record.accrual_start = advanced;
    tracing::debug!(hours, %reward, unclaimed = %unclaimed, "accrual settled");

    Ok(Settlement { hours, reward })
}
