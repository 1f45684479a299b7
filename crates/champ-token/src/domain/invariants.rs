//! # Ledger Invariants
//!
//! Full-scan checks over the account arena. These are O(holders) and are
//! meant for tests and audits, never for the transfer path.

use crate::domain::entities::HolderAccount;
use crate::domain::reflection::ReflectionPool;
use shared_types::{Address, U256};
use thiserror::Error;

/// A broken ledger invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// Sum of balances differs from total supply.
    #[error("conservation violated: balances sum to {sum}, total supply {total_supply}")]
    Conservation {
        /// Recomputed sum.
        sum: U256,
        /// Recorded total supply.
        total_supply: U256,
    },

    /// Sum of reflective balances differs from the pool total.
    #[error("reflectable supply drift: accounts sum to {sum}, pool has {recorded}")]
    ReflectableSupply {
        /// Recomputed sum.
        sum: U256,
        /// Pool total.
        recorded: U256,
    },

    /// An account counts a share it is not entitled to.
    #[error("account {account} counts {counted} but holds {balance}")]
    OverCounted {
        /// Account concerned.
        account: Address,
        /// Reflective balance counted.
        counted: U256,
        /// Token balance.
        balance: U256,
    },

    /// An excluded account still counts a share.
    #[error("excluded account {0} earns reflections")]
    ExcludedEarning(Address),
}

/// `sum(balances) == total_supply`.
pub fn check_conservation<'a>(
    accounts: impl IntoIterator<Item = (&'a Address, &'a HolderAccount)>,
    total_supply: U256,
) -> Result<(), InvariantViolation> {
    let sum = accounts
        .into_iter()
        .fold(U256::zero(), |acc, (_, a)| acc.saturating_add(a.balance));
    if sum != total_supply {
        return Err(InvariantViolation::Conservation { sum, total_supply });
    }
    Ok(())
}

/// Reflective balances are bounded by balances, zero for excluded accounts,
/// and sum to the pool's reflectable supply.
pub fn check_reflectable_supply<'a>(
    accounts: impl IntoIterator<Item = (&'a Address, &'a HolderAccount)>,
    pool: &ReflectionPool,
) -> Result<(), InvariantViolation> {
    let mut sum = U256::zero();
    for (address, account) in accounts {
        if account.reflective_balance > account.balance {
            return Err(InvariantViolation::OverCounted {
                account: *address,
                counted: account.reflective_balance,
                balance: account.balance,
            });
        }
        if account.reflection_excluded && !account.reflective_balance.is_zero() {
            return Err(InvariantViolation::ExcludedEarning(*address));
        }
        sum = sum.saturating_add(account.reflective_balance);
    }
    if sum != pool.total_reflectable_supply() {
        return Err(InvariantViolation::ReflectableSupply {
            sum,
            recorded: pool.total_reflectable_supply(),
        });
    }
    Ok(())
}
