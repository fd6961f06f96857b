//! Per-account stake record.

use serde::{Deserialize, Serialize};
use stakeable_types::{Timestamp, TokenAmount};

use crate::rate::rate_for;

/// Staking state of one account.
///
/// Created on the first stake and never deleted: once principal returns to
/// zero the record is dormant but keeps its audit fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    /// Currently staked capital.
    pub principal: TokenAmount,
    /// Hourly rate for `principal`, scaled by 1e8. Always `rate_for(principal)`.
    pub rate: u128,
    /// Last point up to which reward has been settled.
    pub accrual_start: Timestamp,
    /// Settled reward not yet withdrawn or compounded.
    pub unclaimed_reward: TokenAmount,
    /// Everything ever moved into the pending bucket (never decreases).
    pub withdrawn_total: TokenAmount,
    /// Amount queued for release; zero when nothing is in flight.
    pub pending_withdraw: TokenAmount,
    /// When `pending_withdraw` may be released. Meaningless when it is zero.
    pub unlock_at: Timestamp,
}

/// Where an account sits in the stake lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeState {
    /// Nothing staked and nothing owed.
    Unstaked,
    /// Principal or reward is being tracked.
    Active,
    /// A withdrawal is queued; principal and reward tracking continue.
    WithdrawalPending,
}

impl StakeRecord {
    /// Fresh record for a first stake of `amount` at `now`.
    pub fn open(amount: TokenAmount, now: Timestamp) -> Self {
        Self {
            principal: amount,
            rate: rate_for(amount),
            accrual_start: now,
            ..Self::default()
        }
    }

    pub fn state(&self) -> StakeState {
        if !self.pending_withdraw.is_zero() {
            StakeState::WithdrawalPending
        } else if !self.principal.is_zero() || !self.unclaimed_reward.is_zero() {
            StakeState::Active
        } else {
            StakeState::Unstaked
        }
    }

    /// Principal plus settled reward: the most `claim_and_withdraw` can take.
    pub fn withdrawable(&self) -> Option<TokenAmount> {
        self.principal.checked_add(self.unclaimed_reward)
    }

    pub fn view(&self) -> StakeRecordView {
        StakeRecordView {
            principal: self.principal,
            rate: self.rate,
            accrual_start: self.accrual_start,
            withdrawn_total: self.withdrawn_total,
            pending_withdraw: self.pending_withdraw,
            unclaimed_reward: self.unclaimed_reward,
        }
    }
}

/// Read-only snapshot returned by `get_stake`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecordView {
    pub principal: TokenAmount,
    pub rate: u128,
    pub accrual_start: Timestamp,
    pub withdrawn_total: TokenAmount,
    pub pending_withdraw: TokenAmount,
    pub unclaimed_reward: TokenAmount,
}

impl StakeRecordView {
    /// Positional form:
    /// `(principal, rate, accrual_start, withdrawn_total, pending_withdraw, unclaimed_reward)`.
    pub fn into_tuple(
        self,
    ) -> (TokenAmount, u128, Timestamp, TokenAmount, TokenAmount, TokenAmount) {
        (
            self.principal,
            self.rate,
            self.accrual_start,
            self.withdrawn_total,
            self.pending_withdraw,
            self.unclaimed_reward,
        )
    }
}
