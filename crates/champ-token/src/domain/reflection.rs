//! # Reflection Accounting
//!
//! Distributes settlement-asset rewards pro rata to eligible balances without
//! iterating holders. A global accumulator of reward per reflective unit
//! (scaled by [`REWARD_SCALE`]) grows on every accrual; each holder keeps the
//! accumulator value it last settled against.
//!
//! ```text
//! claimable = accrued_unclaimed
//!           + reflective_balance * (accumulator - checkpoint) / REWARD_SCALE
//! ```
//!
//! Callers must `settle` an account before changing its balance or
//! eligibility, then `sync_eligibility` after.

use crate::domain::entities::HolderAccount;
use crate::errors::TokenError;
use serde::{Deserialize, Serialize};
use shared_types::U256;

/// Fixed-point scale of the accumulator (1e18).
pub const REWARD_SCALE: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// What happened to an accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accrual {
    /// Accumulator advanced by `reward_per_share_delta`.
    Distributed {
        /// Scaled increase of the accumulator.
        reward_per_share_delta: U256,
    },
    /// Nobody is eligible; the amount waits for the next accrual.
    Deferred {
        /// Total now waiting.
        pending: U256,
    },
}

/// Global reflection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionPool {
    accumulated_reward_per_share: U256,
    total_reflectable_supply: U256,
    minimum_holding: U256,
    /// Accruals received while the reflectable supply was zero.
    pending_accrual: U256,
    /// Division remainder, in `settlement * REWARD_SCALE` units.
    carry: U256,
    total_accrued: U256,
    /// Accrued minus claimed. Reserved in the settlement holder.
    outstanding: U256,
}

impl ReflectionPool {
    /// Empty pool with the given eligibility threshold.
    #[must_use]
    pub fn new(minimum_holding: U256) -> Self {
        Self {
            accumulated_reward_per_share: U256::zero(),
            total_reflectable_supply: U256::zero(),
            minimum_holding,
            pending_accrual: U256::zero(),
            carry: U256::zero(),
            total_accrued: U256::zero(),
            outstanding: U256::zero(),
        }
    }

    /// Current accumulator.
    #[must_use]
    pub fn accumulated_reward_per_share(&self) -> U256 {
        self.accumulated_reward_per_share
    }

    /// Sum of reflective balances.
    #[must_use]
    pub fn total_reflectable_supply(&self) -> U256 {
        self.total_reflectable_supply
    }

    /// Eligibility threshold.
    #[must_use]
    pub fn minimum_holding(&self) -> U256 {
        self.minimum_holding
    }

    /// Funds waiting for an eligible holder.
    #[must_use]
    pub fn pending_accrual(&self) -> U256 {
        self.pending_accrual
    }

    /// Lifetime accruals.
    #[must_use]
    pub fn total_accrued(&self) -> U256 {
        self.total_accrued
    }

    /// Accrued but not yet claimed.
    #[must_use]
    pub fn outstanding_liability(&self) -> U256 {
        self.outstanding
    }

    /// Changes the threshold. Accounts are re-evaluated on their next touch.
    pub fn set_minimum_holding(&mut self, amount: U256) {
        self.minimum_holding = amount;
    }

    /// Whether `account` should currently earn reflections.
    #[must_use]
    pub fn is_eligible(&self, account: &HolderAccount) -> bool {
        !account.reflection_excluded
            && !account.balance.is_zero()
            && account.balance >= self.minimum_holding
    }

    /// Reward earned since the last settlement.
    pub fn pending_reward(&self, account: &HolderAccount) -> Result<U256, TokenError> {
        let delta = self
            .accumulated_reward_per_share
            .checked_sub(account.reward_checkpoint)
            .ok_or(TokenError::ArithmeticOverflow)?;
        if delta.is_zero() || account.reflective_balance.is_zero() {
            return Ok(U256::zero());
        }
        Ok(account
            .reflective_balance
            .checked_mul(delta)
            .ok_or(TokenError::ArithmeticOverflow)?
            / REWARD_SCALE)
    }

    /// Settled plus pending reward.
    pub fn claimable(&self, account: &HolderAccount) -> Result<U256, TokenError> {
        account
            .accrued_unclaimed
            .checked_add(self.pending_reward(account)?)
            .ok_or(TokenError::ArithmeticOverflow)
    }

    /// Moves pending reward into `accrued_unclaimed` and advances the checkpoint.
    /// Returns the amount credited.
    pub fn settle(&self, account: &mut HolderAccount) -> Result<U256, TokenError> {
        let pending = self.pending_reward(account)?;
        account.accrued_unclaimed = account
            .accrued_unclaimed
            .checked_add(pending)
            .ok_or(TokenError::ArithmeticOverflow)?;
        account.reward_checkpoint = self.accumulated_reward_per_share;
        Ok(pending)
    }

    /// Recomputes the account's reflective balance and the reflectable total.
    /// The account must already be settled.
    ///
    /// Returns true when the account's share changed.
    pub fn sync_eligibility(&mut self, account: &mut HolderAccount) -> Result<bool, TokenError> {
        let target = if self.is_eligible(account) {
            account.balance
        } else {
            U256::zero()
        };
        if target == account.reflective_balance {
            return Ok(false);
        }
        self.total_reflectable_supply = self
            .total_reflectable_supply
            .checked_sub(account.reflective_balance)
            .and_then(|t| t.checked_add(target))
            .ok_or(TokenError::ArithmeticOverflow)?;
        account.reflective_balance = target;
        Ok(true)
    }

    /// Records `amount` of new settlement funds.
    pub fn accrue(&mut self, amount: U256) -> Result<Accrual, TokenError> {
        self.total_accrued = self
            .total_accrued
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.outstanding = self
            .outstanding
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;

        let funds = self
            .pending_accrual
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;

        if self.total_reflectable_supply.is_zero() {
            self.pending_accrual = funds;
            return Ok(Accrual::Deferred { pending: funds });
        }

        let numerator = funds
            .checked_mul(REWARD_SCALE)
            .and_then(|n| n.checked_add(self.carry))
            .ok_or(TokenError::ArithmeticOverflow)?;
        let delta = numerator / self.total_reflectable_supply;
        self.carry = numerator % self.total_reflectable_supply;
        self.accumulated_reward_per_share = self
            .accumulated_reward_per_share
            .checked_add(delta)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.pending_accrual = U256::zero();

        Ok(Accrual::Distributed {
            reward_per_share_delta: delta,
        })
    }

    /// Settles `account`, zeroes and returns its claimable amount.
    pub fn take_claimable(&mut self, account: &mut HolderAccount) -> Result<U256, TokenError> {
        self.settle(account)?;
        let amount = std::mem::take(&mut account.accrued_unclaimed);
        account.total_claimed = account
            .total_claimed
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.outstanding = self.outstanding.saturating_sub(amount);
        Ok(amount)
    }
}
