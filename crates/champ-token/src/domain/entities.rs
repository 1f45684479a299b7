//! # Domain Entities
//!
//! Records the ledger stores and the small context/receipt types that flow
//! through entry points.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, U256};

// =============================================================================
// HOLDER ACCOUNT
// =============================================================================

/// Everything the ledger tracks for one address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderAccount {
    /// Token balance.
    pub balance: U256,
    /// Share counted in the reflectable supply: the balance while eligible, else zero.
    pub reflective_balance: U256,
    /// Accumulator value at the last settlement.
    pub reward_checkpoint: U256,
    /// Settled but unclaimed reflections, in settlement units.
    pub accrued_unclaimed: U256,
    /// Lifetime reflections paid out.
    pub total_claimed: U256,
    /// Next expected voucher nonce.
    pub voucher_nonce: U256,
    /// Exempt from transfer tax.
    pub fee_excluded: bool,
    /// Never earns reflections.
    pub reflection_excluded: bool,
}

// =============================================================================
// CALL CONTEXT
// =============================================================================

/// Who is calling and when. Supplied by the host for every entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Authenticated caller.
    pub caller: Address,
    /// Current time in seconds.
    pub timestamp: Timestamp,
}

impl CallContext {
    /// Creates a context.
    #[must_use]
    pub const fn new(caller: Address, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }

    /// Same time, different caller.
    #[must_use]
    pub const fn with_caller(&self, caller: Address) -> Self {
        Self {
            caller,
            timestamp: self.timestamp,
        }
    }
}

// =============================================================================
// METADATA AND RECEIPTS
// =============================================================================

/// ERC-20 style metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places of one whole token.
    pub decimals: u8,
}

/// Which asset a reward payout used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutAsset {
    /// Ledger tokens from the contract's own balance.
    Token,
    /// Settlement asset from the holder's free reserve.
    Settlement,
}

/// Result of a reward-point claim or grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPayout {
    /// Address paid.
    pub recipient: Address,
    /// Amount requested by the voucher or grant.
    pub amount: U256,
    /// Amount actually received after transfer tax.
    pub received: U256,
    /// Asset used.
    pub asset: PayoutAsset,
    /// Voucher nonce consumed; `None` for admin grants.
    pub nonce: Option<U256>,
}

/// Result of converting the reflection treasury.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionReceipt {
    /// Ledger tokens sold.
    pub tokens_in: U256,
    /// Settlement asset received by the holder.
    pub settlement_out: U256,
    /// True when no holder was eligible and the accrual was carried forward.
    pub deferred: bool,
}

/// `whole * 10^decimals`.
#[must_use]
pub fn to_base_units(whole: u64, decimals: u8) -> U256 {
    U256::from(whole) * U256::exp10(usize::from(decimals))
}
