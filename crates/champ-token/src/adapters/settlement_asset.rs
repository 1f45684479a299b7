//! # Settlement Asset Adapter
//!
//! In-memory wrapped-native asset. `deposit` mints (wrapping), `withdraw`
//! burns (unwrapping).

use crate::errors::AssetError;
use crate::ports::outbound::SettlementAsset;
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;

/// In-memory WETH-like asset.
#[derive(Debug)]
pub struct InMemorySettlementAsset {
    address: Address,
    balances: RwLock<HashMap<Address, U256>>,
    total_supply: RwLock<U256>,
}

impl InMemorySettlementAsset {
    /// Create an empty asset at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balances: RwLock::new(HashMap::new()),
            total_supply: RwLock::new(U256::zero()),
        }
    }

    /// Wrapped supply.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        *self.total_supply.read()
    }
}

impl SettlementAsset for InMemorySettlementAsset {
    fn asset_address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.balances
            .read()
            .get(&account)
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&self, from: Address, to: Address, amount: U256) -> Result<(), AssetError> {
        let mut balances = self.balances.write();
        let available = balances.get(&from).copied().unwrap_or_default();
        if available < amount {
            return Err(AssetError::InsufficientBalance {
                account: from,
                required: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let credited = balances
            .get(&to)
            .copied()
            .unwrap_or_default()
            .checked_add(amount)
            .ok_or(AssetError::Overflow)?;
        balances.insert(from, available - amount);
        balances.insert(to, credited);
        Ok(())
    }

    fn deposit(&self, account: Address, amount: U256) -> Result<(), AssetError> {
        let mut supply = self.total_supply.write();
        let new_supply = supply.checked_add(amount).ok_or(AssetError::Overflow)?;
        let mut balances = self.balances.write();
        let balance = balances.entry(account).or_default();
        *balance = balance.checked_add(amount).ok_or(AssetError::Overflow)?;
        *supply = new_supply;
        Ok(())
    }

    fn withdraw(&self, account: Address, amount: U256) -> Result<(), AssetError> {
        let mut supply = self.total_supply.write();
        let mut balances = self.balances.write();
        let balance = balances.entry(account).or_default();
        if *balance < amount {
            return Err(AssetError::InsufficientBalance {
                account,
                required: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        *supply = supply.saturating_sub(amount);
        Ok(())
    }
}
