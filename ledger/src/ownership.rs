//! Single-owner capability.

use crate::LedgerError;
use serde::{Deserialize, Serialize};
use stakeable_types::AccountId;

/// The owner role, held by exactly one account at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    owner: AccountId,
}

impl Ownership {
    pub fn new(owner: AccountId) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> &AccountId {
        &self.owner
    }

    /// Fail with `Unauthorized` unless `caller` holds the role.
    pub fn require_owner(&self, caller: &AccountId) -> Result<(), LedgerError> {
        if *caller != self.owner {
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// Hand the role to `new_owner`. Only the current owner may call this.
    pub fn transfer(&mut self, caller: &AccountId, new_owner: AccountId) -> Result<(), LedgerError> {
        self.require_owner(caller)?;
        tracing::info!(from = %self.owner, to = %new_owner, "ownership transferred");
        self.owner = new_owner;
        Ok(())
    }
}
