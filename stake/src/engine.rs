//! Core stake accounting engine.

use crate::accrual;
use crate::error::StakeError;
use crate::rate::rate_for;
use crate::record::{StakeRecord, StakeRecordView, StakeState};
use serde::{Deserialize, Serialize};
use stakeable_ledger::Ledger;
use stakeable_types::{AccountId, Clock, StakingParams, TokenAmount};
use std::collections::{BTreeMap, HashMap};

/// The staking engine. Owns every stake record and drives the ledger.
///
/// Time comes from the injected clock `C`, balances from the injected ledger
/// `L`. Every operation reads the clock once at entry, builds the new record on
/// a copy, performs at most one ledger mutation, and only then commits the
/// record. A failed operation therefore changes neither the ledger nor the
/// record.
pub struct StakeEngine<L, C> {
    ledger: L,
    clock: C,
    params: StakingParams,
    records: HashMap<AccountId, StakeRecord>,
}

/// Serializable engine state, for persistence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    #[serde(default)]
    pub params: StakingParams,
    #[serde(default)]
    pub records: BTreeMap<AccountId, StakeRecord>,
}

impl<L: Ledger, C: Clock> StakeEngine<L, C> {
    pub fn new(ledger: L, clock: C) -> Self {
        Self::with_params(ledger, clock, StakingParams::default())
    }

    pub fn with_params(ledger: L, clock: C, params: StakingParams) -> Self {
        Self {
            ledger,
            clock,
            params,
            records: HashMap::new(),
        }
    }

    /// Rebuild an engine from persisted state.
    pub fn from_snapshot(ledger: L, clock: C, snapshot: EngineSnapshot) -> Self {
        Self {
            ledger,
            clock,
            params: snapshot.params,
            records: snapshot.records.into_iter().collect(),
        }
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            params: self.params.clone(),
            records: self
                .records
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Tear the engine down into its ledger and persisted state.
    pub fn into_parts(self) -> (L, EngineSnapshot) {
        let snapshot = self.snapshot();
        (self.ledger, snapshot)
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Direct access for plain ledger operations (transfers, approvals).
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn params(&self) -> &StakingParams {
        &self.params
    }

    /// Lock `amount` of `account`'s balance as principal.
    ///
    /// On an existing record, accrued reward is settled first and then
    /// compounded: `principal' = principal + unclaimed + amount`, the rate is
    /// recomputed for the new principal, and accrual restarts at `now`.
    pub fn stake(&mut self, account: &AccountId, amount: TokenAmount) -> Result<(), StakeError> {
        if amount.is_zero() {
            return Err(StakeError::InvalidAmount);
        }
        let available = self.ledger.balance_of(account);
        if available < amount {
            return Err(StakeError::InsufficientBalance {
                needed: amount,
                available,
            });
        }

        let now = self.clock.now();
        let mut next = match self.records.get(account) {
            Some(existing) => existing.clone(),
            None => StakeRecord::open(TokenAmount::ZERO, now),
        };
        accrual::settle(&mut next, now)?;

        let compounded = next.unclaimed_reward;
        let principal = next
            .principal
            .checked_add(compounded)
            .and_then(|p| p.checked_add(amount))
            .ok_or(StakeError::Overflow)?;
        next.principal = principal;
        next.unclaimed_reward = TokenAmount::ZERO;
        next.rate = rate_for(principal);
        next.accrual_start = now;

        self.ledger.debit(account, amount)?;
        tracing::info!(
            %account,
            %amount,
            %compounded,
            %principal,
            rate = next.rate,
            "stake"
        );
        self.records.insert(account.clone(), next);
        Ok(())
    }

    /// Settle accrued reward and return the account's unclaimed reward.
    ///
    /// Moves no tokens. Calling it again at the same instant returns the same
    /// value.
    pub fn claim(&mut self, account: &AccountId) -> Result<TokenAmount, StakeError> {
        let now = self.clock.now();
        let mut next = self
            .records
            .get(account)
            .cloned()
            .ok_or_else(|| StakeError::NoStake(account.clone()))?;
        accrual::settle(&mut next, now)?;

        let unclaimed = next.unclaimed_reward;
        self.records.insert(account.clone(), next);
        Ok(unclaimed)
    }

    /// Queue `amount` for release after the withdrawal delay.
    ///
    /// Reward is consumed before principal. If a withdrawal is already
    /// pending, `amount` is added to it and the whole bucket's timelock
    /// restarts from `now`.
    pub fn claim_and_withdraw(
        &mut self,
        account: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), StakeError> {
        if amount.is_zero() {
            return Err(StakeError::InvalidAmount);
        }

        let now = self.clock.now();
        let mut next = self.records.get(account).cloned().unwrap_or_default();
        accrual::settle(&mut next, now)?;

        let available = next.withdrawable().ok_or(StakeError::Overflow)?;
        if amount > available {
            return Err(StakeError::InsufficientStake {
                requested: amount,
                available,
            });
        }

        let from_reward = amount.min(next.unclaimed_reward);
        let from_principal = amount
            .checked_sub(from_reward)
            .ok_or(StakeError::Overflow)?;
        next.unclaimed_reward = next
            .unclaimed_reward
            .checked_sub(from_reward)
            .ok_or(StakeError::Overflow)?;
        if !from_principal.is_zero() {
            next.principal = next
                .principal
                .checked_sub(from_principal)
                .ok_or(StakeError::Overflow)?;
            next.rate = rate_for(next.principal);
        }

        next.pending_withdraw = next
            .pending_withdraw
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;
        next.withdrawn_total = next
            .withdrawn_total
            .checked_add(amount)
            .ok_or(StakeError::Overflow)?;
        next.unlock_at = now
            .checked_add_secs(self.params.withdraw_delay_secs)
            .ok_or(StakeError::Overflow)?;

        tracing::info!(
            %account,
            %amount,
            %from_reward,
            %from_principal,
            pending = %next.pending_withdraw,
            unlock_at = next.unlock_at.as_secs(),
            "claim and withdraw"
        );
        self.records.insert(account.clone(), next);
        Ok(())
    }

    /// Release the pending withdrawal to the account's spendable balance.
    ///
    /// Returns the amount credited.
    pub fn withdraw(&mut self, account: &AccountId) -> Result<TokenAmount, StakeError> {
        let now = self.clock.now();
        let record = self
            .records
            .get(account)
            .ok_or(StakeError::NothingToWithdraw)?;
        if record.pending_withdraw.is_zero() {
            return Err(StakeError::NothingToWithdraw);
        }
        if !record.unlock_at.is_reached_by(now) {
            return Err(StakeError::WithdrawalLocked {
                unlock_at: record.unlock_at,
                now,
            });
        }

        let amount = record.pending_withdraw;
        self.ledger.credit(account, amount)?;
        if let Some(record) = self.records.get_mut(account) {
            record.pending_withdraw = TokenAmount::ZERO;
        }
        tracing::info!(%account, %amount, "withdraw");
        Ok(amount)
    }

    /// The record as last settled. Does not run accrual.
    pub fn get_stake(&self, account: &AccountId) -> StakeRecordView {
        self.records
            .get(account)
            .map(StakeRecord::view)
            .unwrap_or_default()
    }

    pub fn record(&self, account: &AccountId) -> Option<&StakeRecord> {
        self.records.get(account)
    }

    /// Current principal.
    pub fn stake_of(&self, account: &AccountId) -> TokenAmount {
        self.records
            .get(account)
            .map(|r| r.principal)
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Unclaimed reward as `claim` would report it now, without settling.
    pub fn pending_reward(&self, account: &AccountId) -> Result<TokenAmount, StakeError> {
        let Some(record) = self.records.get(account) else {
            return Ok(TokenAmount::ZERO);
        };
        let accrued =
            accrual::accrued_since(record, self.clock.now()).ok_or(StakeError::Overflow)?;
        record
            .unclaimed_reward
            .checked_add(accrued)
            .ok_or(StakeError::Overflow)
    }

    pub fn state_of(&self, account: &AccountId) -> StakeState {
        self.records
            .get(account)
            .map(StakeRecord::state)
            .unwrap_or(StakeState::Unstaked)
    }

    /// Number of accounts that have ever staked.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}
