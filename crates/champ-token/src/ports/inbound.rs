//! # Driving Ports (API - Inbound)
//!
//! The public entry points of the ledger. Every call carries a
//! [`CallContext`] with the authenticated caller and the current time;
//! mutating calls either apply completely or leave no trace.

use crate::domain::entities::{CallContext, RewardPayout};
use crate::domain::tax::TaxBreakdown;
use crate::errors::TokenError;
use shared_types::{Address, Timestamp, U256};

/// Ledger entry points.
///
/// Object-safe, so hosts can drive a ledger behind `dyn ChampTokenApi`
/// without naming the collaborator types.
pub trait ChampTokenApi {
    /// Taxed transfer from the caller.
    fn transfer(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: U256,
    ) -> Result<TaxBreakdown, TokenError>;

    /// Taxed transfer on behalf of `from`, spending the caller's allowance.
    fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TaxBreakdown, TokenError>;

    /// Sets the caller's allowance for `spender`.
    fn approve(&mut self, ctx: &CallContext, spender: Address, amount: U256)
        -> Result<(), TokenError>;

    /// Token balance.
    fn balance_of(&self, account: Address) -> U256;

    /// Owner-only. Rates are percentages, each at most 10.
    fn set_taxes(&mut self, ctx: &CallContext, buy: u8, sell: u8) -> Result<(), TokenError>;

    /// Owner-only. Liquidity/reflection split weights.
    fn set_tax_allocations(
        &mut self,
        ctx: &CallContext,
        liquidity: u8,
        reflection: u8,
    ) -> Result<(), TokenError>;

    /// Owner-only. Toggles tax exemption.
    fn exclude_from_fees(
        &mut self,
        ctx: &CallContext,
        account: Address,
        excluded: bool,
    ) -> Result<(), TokenError>;

    /// Owner-only. Changes the reflection eligibility threshold.
    fn change_minimum_holding_for_reflection(
        &mut self,
        ctx: &CallContext,
        amount: U256,
    ) -> Result<(), TokenError>;

    /// Settlement amount `holder` could claim now.
    fn calculate_claimable(&self, holder: Address) -> Result<U256, TokenError>;

    /// Pays `holder` its accrued reflections.
    fn claim_reflections(&mut self, ctx: &CallContext, holder: Address)
        -> Result<U256, TokenError>;

    /// Redeems a signed voucher for ledger tokens.
    fn claim_reward_points_with_chp(
        &mut self,
        ctx: &CallContext,
        encoded_message: &[u8],
        signature: &[u8],
    ) -> Result<RewardPayout, TokenError>;

    /// Redeems a signed voucher for settlement asset.
    fn claim_reward_points_with_eth(
        &mut self,
        ctx: &CallContext,
        encoded_message: &[u8],
        signature: &[u8],
    ) -> Result<RewardPayout, TokenError>;

    /// Next voucher nonce for `account`.
    fn user_nonce(&self, account: Address) -> U256;

    /// Owner-only. Starts a pause.
    fn pause(&mut self, ctx: &CallContext) -> Result<(), TokenError>;

    /// Owner-only. Ends a pause.
    fn unpause(&mut self, ctx: &CallContext) -> Result<(), TokenError>;

    /// Logical pause state at `now`.
    fn paused(&self, now: Timestamp) -> bool;
}
