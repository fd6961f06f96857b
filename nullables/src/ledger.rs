//! Nullable ledger: in-memory balances with injectable failures.

use stakeable_ledger::{Ledger, LedgerError};
use stakeable_types::{AccountId, TokenAmount};
use std::collections::HashMap;

/// An in-memory ledger for testing.
///
/// Behaves like a plain balance map until told to fail; a failing operation
/// leaves every balance untouched.
#[derive(Debug)]
pub struct NullLedger {
    owner: AccountId,
    balances: HashMap<AccountId, TokenAmount>,
    fail_debits: bool,
    fail_credits: bool,
}

impl NullLedger {
    pub fn new(owner: AccountId) -> Self {
        Self {
            owner,
            balances: HashMap::new(),
            fail_debits: false,
            fail_credits: false,
        }
    }

    /// Seed a balance directly.
    pub fn with_balance(mut self, account: AccountId, amount: TokenAmount) -> Self {
        self.balances.insert(account, amount);
        self
    }

    /// Make every subsequent `debit` fail with `Overflow`.
    pub fn fail_debits(&mut self, fail: bool) {
        self.fail_debits = fail;
    }

    /// Make every subsequent `credit` fail with `Overflow`.
    pub fn fail_credits(&mut self, fail: bool) {
        self.fail_credits = fail;
    }
}

impl Ledger for NullLedger {
    fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.balances
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    fn debit(&mut self, account: &AccountId, amount: TokenAmount) -> Result<(), LedgerError> {
        if self.fail_debits {
            return Err(LedgerError::Overflow);
        }
        let available = self.balance_of(account);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        self.balances.insert(account.clone(), remaining);
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, amount: TokenAmount) -> Result<(), LedgerError> {
        if self.fail_credits {
            return Err(LedgerError::Overflow);
        }
        let total = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(account.clone(), total);
        Ok(())
    }

    fn owner(&self) -> &AccountId {
        &self.owner
    }
}
