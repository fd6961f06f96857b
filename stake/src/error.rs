//! Staking errors.

use stakeable_ledger::LedgerError;
use stakeable_types::{AccountId, Timestamp, TokenAmount};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StakeError {
    #[error("amount must be non-zero")]
    InvalidAmount,

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("insufficient stake: requested {requested}, principal plus reward is {available}")]
    InsufficientStake {
        requested: TokenAmount,
        available: TokenAmount,
    },

    #[error("withdrawal locked until {unlock_at} (now {now})")]
    WithdrawalLocked { unlock_at: Timestamp, now: Timestamp },

    #[error("no pending withdrawal")]
    NothingToWithdraw,

    #[error("account {0} has never staked")]
    NoStake(AccountId),

    #[error("arithmetic overflow in stake computation")]
    Overflow,

    #[error("ledger: {0}")]
    Ledger(#[from] LedgerError),
}
