//! In-memory ERC20-style token ledger.

use crate::{Ledger, LedgerError, Ownership};
use serde::{Deserialize, Serialize};
use stakeable_types::{AccountId, TokenAmount, TOKEN_DECIMALS};
use std::collections::BTreeMap;

/// Human-facing token identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
}

/// Balances, allowances and supply of a single token.
///
/// Staking takes tokens out of circulation (`debit` burns) and settled
/// withdrawals put them back (`credit` mints), so `total_supply` grows by every
/// reward that is paid out.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    metadata: TokenMetadata,
    ownership: Ownership,
    total_supply: TokenAmount,
    balances: BTreeMap<AccountId, TokenAmount>,
    /// owner -> spender -> remaining allowance
    allowances: BTreeMap<AccountId, BTreeMap<AccountId, TokenAmount>>,
}

impl TokenLedger {
    /// Create the ledger and mint `initial_supply` to `owner`.
    pub fn new(metadata: TokenMetadata, owner: AccountId, initial_supply: TokenAmount) -> Self {
        let mut balances = BTreeMap::new();
        if !initial_supply.is_zero() {
            balances.insert(owner.clone(), initial_supply);
        }
        tracing::info!(
            symbol = %metadata.symbol,
            owner = %owner,
            supply = %initial_supply,
            "token ledger created"
        );
        Self {
            metadata,
            ownership: Ownership::new(owner),
            total_supply: initial_supply,
            balances,
            allowances: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u32 {
        TOKEN_DECIMALS
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<(), LedgerError> {
        self.ownership.transfer(caller, new_owner)
    }

    /// Move `amount` from `from` to `to`.
    pub fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let from_balance = self.balance_of(from);
        let new_from = from_balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount,
                available: from_balance,
            })?;
        if from == to {
            return Ok(());
        }
        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(from, new_from);
        self.set_balance(to, new_to);
        tracing::debug!(%from, %to, %amount, "transfer");
        Ok(())
    }

    /// Let `spender` move up to `amount` out of `holder`'s balance.
    pub fn approve(&mut self, holder: &AccountId, spender: &AccountId, amount: TokenAmount) {
        self.allowances
            .entry(holder.clone())
            .or_default()
            .insert(spender.clone(), amount);
        tracing::debug!(%holder, %spender, %amount, "approve");
    }

    pub fn allowance(&self, holder: &AccountId, spender: &AccountId) -> TokenAmount {
        self.allowances
            .get(holder)
            .and_then(|m| m.get(spender))
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    /// Move `amount` from `holder` to `to` on behalf of `spender`.
    pub fn transfer_from(
        &mut self,
        spender: &AccountId,
        holder: &AccountId,
        to: &AccountId,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let allowed = self.allowance(holder, spender);
        let remaining = allowed
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            })?;
        self.transfer(holder, to, amount)?;
        self.approve(holder, spender, remaining);
        Ok(())
    }

    fn set_balance(&mut self, account: &AccountId, amount: TokenAmount) {
        if amount.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), amount);
        }
    }
}

impl Ledger for TokenLedger {
    fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.balances
            .get(account)
            .copied()
            .unwrap_or(TokenAmount::ZERO)
    }

    fn debit(&mut self, account: &AccountId, amount: TokenAmount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let balance = self.balance_of(account);
        let new_balance = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount,
                available: balance,
            })?;
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(account, new_balance);
        self.total_supply = new_supply;
        Ok(())
    }

    fn credit(&mut self, account: &AccountId, amount: TokenAmount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }
        let new_balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(account, new_balance);
        self.total_supply = new_supply;
        Ok(())
    }

    fn owner(&self) -> &AccountId {
        self.ownership.owner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(n: u128) -> TokenAmount {
        TokenAmount::from_tokens(n).unwrap()
    }

    fn alice() -> AccountId {
        AccountId::new("alice")
    }

    fn bob() -> AccountId {
        AccountId::new("bob")
    }

    fn make_ledger() -> TokenLedger {
        TokenLedger::new(
            TokenMetadata {
                name: "MyCoolToken".into(),
                symbol: "MCT".into(),
            },
            alice(),
            tokens(1000),
        )
    }

    #[test]
    fn construction_mints_to_owner() {
        let ledger = make_ledger();
        assert_eq!(ledger.name(), "MyCoolToken");
        assert_eq!(ledger.symbol(), "MCT");
        assert_eq!(ledger.decimals(), 18);
        assert_eq!(ledger.balance_of(&alice()), tokens(1000));
        assert_eq!(ledger.total_supply(), tokens(1000));
        assert_eq!(ledger.owner(), &alice());
    }

    #[test]
    fn transfer_moves_balance() {
        let mut ledger = make_ledger();
        ledger.transfer(&alice(), &bob(), tokens(250)).unwrap();
        assert_eq!(ledger.balance_of(&alice()), tokens(750));
        assert_eq!(ledger.balance_of(&bob()), tokens(250));
        assert_eq!(ledger.total_supply(), tokens(1000));
    }

    #[test]
    fn transfer_over_balance_fails_without_change() {
        let mut ledger = make_ledger();
        let err = ledger.transfer(&bob(), &alice(), tokens(1)).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(ledger.balance_of(&alice()), tokens(1000));
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let mut ledger = make_ledger();
        ledger.approve(&alice(), &bob(), tokens(100));
        ledger
            .transfer_from(&bob(), &alice(), &bob(), tokens(60))
            .unwrap();
        assert_eq!(ledger.allowance(&alice(), &bob()), tokens(40));
        assert_eq!(ledger.balance_of(&bob()), tokens(60));

        let err = ledger
            .transfer_from(&bob(), &alice(), &bob(), tokens(41))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));
        assert_eq!(ledger.allowance(&alice(), &bob()), tokens(40));
    }

    #[test]
    fn debit_and_credit_adjust_supply() {
        let mut ledger = make_ledger();
        ledger.debit(&alice(), tokens(100)).unwrap();
        assert_eq!(ledger.balance_of(&alice()), tokens(900));
        assert_eq!(ledger.total_supply(), tokens(900));

        ledger.credit(&alice(), tokens(101)).unwrap();
        assert_eq!(ledger.balance_of(&alice()), tokens(1001));
        assert_eq!(ledger.total_supply(), tokens(1001));
    }

    #[test]
    fn debit_over_balance_is_rejected() {
        let mut ledger = make_ledger();
        let err = ledger.debit(&alice(), tokens(1001)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                needed: tokens(1001),
                available: tokens(1000),
            }
        );
        assert_eq!(ledger.total_supply(), tokens(1000));
    }

    #[test]
    fn ownership_transfer_is_owner_gated() {
        let mut ledger = make_ledger();
        assert!(matches!(
            ledger.transfer_ownership(&bob(), bob()),
            Err(LedgerError::Unauthorized { .. })
        ));
        ledger.transfer_ownership(&alice(), bob()).unwrap();
        assert_eq!(ledger.owner(), &bob());
    }

    #[test]
    fn ledger_round_trips_through_json() {
        let mut ledger = make_ledger();
        ledger.transfer(&alice(), &bob(), tokens(5)).unwrap();
        ledger.approve(&alice(), &bob(), tokens(7));
        let json = serde_json::to_string(&ledger).unwrap();
        let restored: TokenLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.balance_of(&bob()), tokens(5));
        assert_eq!(restored.allowance(&alice(), &bob()), tokens(7));
        assert_eq!(restored.owner(), &alice());
    }
}
