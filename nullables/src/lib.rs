//! Nullable infrastructure for deterministic testing.
//!
//! The staking engine reaches the outside world through two traits: `Clock`
//! and `Ledger`. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Can be told to fail, to exercise all-or-nothing error paths
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod ledger;

pub use clock::NullClock;
pub use ledger::NullLedger;
