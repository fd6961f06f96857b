//! The ledger interface consumed by the staking engine.

use crate::LedgerError;
use stakeable_types::{AccountId, TokenAmount};

/// Balance bookkeeping the staking engine depends on.
///
/// `debit` and `credit` are all-or-nothing: on error the implementation must
/// leave every balance exactly as it was.
pub trait Ledger {
    /// Spendable balance of `account` (zero for unknown accounts).
    fn balance_of(&self, account: &AccountId) -> TokenAmount;

    /// Remove `amount` from the spendable balance of `account`.
    fn debit(&mut self, account: &AccountId, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Add `amount` to the spendable balance of `account`.
    fn credit(&mut self, account: &AccountId, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Holder of the single owner capability.
    fn owner(&self) -> &AccountId;
}
