//! # Outbound Ports (Driven Ports)
//!
//! Collaborators the ledger calls but does not implement: the exchange used
//! to convert collected tax and the settlement asset reflections are paid in.
//!
//! Calls are synchronous and either complete or fail without effect.

use crate::errors::{AssetError, ExchangeError};
use shared_types::{Address, U256};

// =============================================================================
// SETTLEMENT ASSET
// =============================================================================

/// A wrapped-native fungible asset.
///
/// `transfer` takes an explicit `from`: the ledger only moves funds out of
/// accounts it controls (itself and the settlement holder), and the exchange
/// only out of its pair.
pub trait SettlementAsset: Send + Sync {
    /// Address of the asset, used in swap paths.
    fn asset_address(&self) -> Address;

    /// Balance of `account`.
    fn balance_of(&self, account: Address) -> U256;

    /// Moves `amount` from `from` to `to`.
    fn transfer(&self, from: Address, to: Address, amount: U256) -> Result<(), AssetError>;

    /// Wraps native currency into `account`.
    fn deposit(&self, account: Address, amount: U256) -> Result<(), AssetError>;

    /// Unwraps `amount` from `account`.
    fn withdraw(&self, account: Address, amount: U256) -> Result<(), AssetError>;
}

// =============================================================================
// EXCHANGE
// =============================================================================

/// Outcome of adding liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityReceipt {
    /// Ledger tokens added.
    pub token_amount: U256,
    /// Settlement asset added.
    pub settlement_amount: U256,
    /// LP units minted.
    pub liquidity: U256,
}

/// A token/settlement liquidity pair with router-style quoting.
///
/// Token-side amounts are expected to already sit at [`Exchange::pair_address`]
/// in the ledger before `swap_exact_tokens_for_settlement` or `add_liquidity`
/// is called.
pub trait Exchange: Send + Sync {
    /// Pool address; a liquidity venue for direction detection.
    fn pair_address(&self) -> Address;

    /// Amounts along `path` for an exact input.
    fn get_amounts_out(
        &self,
        amount_in: U256,
        path: &[Address],
    ) -> Result<Vec<U256>, ExchangeError>;

    /// Amounts along `path` for an exact output.
    fn get_amounts_in(
        &self,
        amount_out: U256,
        path: &[Address],
    ) -> Result<Vec<U256>, ExchangeError>;

    /// Sells `amount_in` tokens, paying settlement asset to `to`. Returns the output.
    fn swap_exact_tokens_for_settlement(
        &self,
        amount_in: U256,
        amount_out_min: U256,
        to: Address,
    ) -> Result<U256, ExchangeError>;

    /// Adds liquidity, pulling `settlement_amount` from `settlement_from`
    /// and minting LP units to `lp_recipient`.
    fn add_liquidity(
        &self,
        token_amount: U256,
        settlement_amount: U256,
        settlement_from: Address,
        lp_recipient: Address,
    ) -> Result<LiquidityReceipt, ExchangeError>;

    /// Sells `swap_amount` tokens and pairs the proceeds with a further
    /// `token_amount` tokens as liquidity, minting LP units to `lp_recipient`.
    /// The proceeds stay in the pool; either both legs apply or neither does.
    fn swap_and_add_liquidity(
        &self,
        swap_amount: U256,
        amount_out_min: U256,
        token_amount: U256,
        lp_recipient: Address,
    ) -> Result<LiquidityReceipt, ExchangeError>;
}
