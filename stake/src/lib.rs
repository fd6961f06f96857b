//! Stake accounting engine.
//!
//! Holders lock part of their ledger balance as principal. Principal earns a
//! reward at a per-hour rate derived from the principal itself:
//!
//! `reward = floor(rate × whole_hours / 1e8)` tokens
//!
//! This crate handles:
//! - The tiered rate function (principal → hourly rate)
//! - Hourly accrual with fractional-hour carry-over
//! - Compounding unclaimed reward into principal on restake
//! - Claim-and-withdraw into a timelocked settlement bucket
//! - Releasing settled withdrawals back to the ledger

pub mod accrual;
pub mod engine;
pub mod error;
pub mod rate;
pub mod record;

pub use engine::{EngineSnapshot, StakeEngine};
pub use error::StakeError;
pub use rate::{projected_annual_reward, rate_for, RateTier, RATE_TIERS};
pub use record::{StakeRecord, StakeRecordView, StakeState};
