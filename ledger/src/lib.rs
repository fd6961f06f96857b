//! Token ledger.
//!
//! The staking engine only needs a narrow view of the ledger (see [`Ledger`]):
//! read a spendable balance, take tokens out of circulation when they are
//! staked, and put tokens back when a withdrawal settles. [`TokenLedger`] is
//! the in-memory ERC20-style implementation used by the CLI and the tests.

pub mod error;
pub mod ledger;
pub mod ownership;
pub mod token;

pub use error::LedgerError;
pub use ledger::Ledger;
pub use ownership::Ownership;
pub use token::{TokenLedger, TokenMetadata};
