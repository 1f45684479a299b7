//! # Settlement Holder
//!
//! A custody sub-account for the settlement asset. Conversion proceeds land
//! here; reflection claims and settlement payouts are released from here.
//! Only the holder's owner may release funds, and ownership is handed to the
//! ledger after deployment.

use crate::errors::HolderError;
use crate::ports::outbound::SettlementAsset;
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// Ownable settlement-asset custody account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementHolder {
    address: Address,
    owner: Address,
}

impl SettlementHolder {
    /// Holder at `address`, initially owned by `owner`.
    #[must_use]
    pub fn new(address: Address, owner: Address) -> Self {
        Self { address, owner }
    }

    /// Custody address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Hands ownership to `new_owner`. Returns the previous owner.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<Address, HolderError> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(HolderError::ZeroOwner);
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }

    /// Settlement balance in custody.
    pub fn balance<S: SettlementAsset + ?Sized>(&self, asset: &S) -> U256 {
        asset.balance_of(self.address)
    }

    /// Sends `amount` of the settlement asset to `to`.
    pub fn release<S: SettlementAsset + ?Sized>(
        &self,
        caller: Address,
        asset: &S,
        to: Address,
        amount: U256,
    ) -> Result<(), HolderError> {
        self.ensure_owner(caller)?;
        asset.transfer(self.address, to, amount)?;
        Ok(())
    }

    fn ensure_owner(&self, caller: Address) -> Result<(), HolderError> {
        if caller != self.owner {
            return Err(HolderError::NotOwner { caller });
        }
        Ok(())
    }
}
