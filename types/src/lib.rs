//! Fundamental types for the stakeable token.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, 18-decimal token amounts, timestamps and the injectable
//! clock, plus the staking parameters and domain constants.

pub mod account;
pub mod amount;
pub mod error;
pub mod params;
pub mod time;

pub use account::AccountId;
pub use amount::{TokenAmount, TOKEN_DECIMALS, TOKEN_UNIT};
pub use error::TypesError;
pub use params::{StakingParams, RATE_SCALE, STAKING_YEAR_HOURS, WITHDRAW_DELAY_SECS};
pub use time::{Clock, SystemClock, Timestamp, SECS_PER_HOUR};
