//! # Claims
//!
//! Three ways value leaves the ledger toward a holder:
//!
//! | Entry point | Authorization | Paid from |
//! |-------------|---------------|-----------|
//! | `claim_reflections` | anyone, paid to `holder` | settlement holder, accrued reflections |
//! | `claim_reward_points_with_*` | signed voucher | ledger token balance / holder free reserve |
//! | `grant_reward_points_with_*` | owner | ledger token balance / holder free reserve |
//!
//! Voucher checks run in a fixed order (nonce, expiry, signature, amount)
//! and the nonce advances before any payout. Settlement payouts are the
//! last step of each call.

use crate::domain::entities::{CallContext, PayoutAsset, RewardPayout};
use crate::domain::voucher::Voucher;
use crate::errors::TokenError;
use crate::events::LedgerEvent;
use crate::ports::outbound::{Exchange, SettlementAsset};
use crate::service::ChampToken;
use shared_types::{Address, U256};
use tracing::{info, instrument};

impl<X: Exchange, S: SettlementAsset> ChampToken<X, S> {
    // =========================================================================
    // REFLECTIONS
    // =========================================================================

    /// Pays `holder` everything it has accrued. Any caller may trigger it.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn claim_reflections(
        &mut self,
        ctx: &CallContext,
        holder: Address,
    ) -> Result<U256, TokenError> {
        self.atomically("claim_reflections", |token| token.pay_reflections(holder))
    }

    pub(crate) fn pay_reflections(&mut self, holder: Address) -> Result<U256, TokenError> {
        self.ensure_holder_controlled()?;

        let mut account = self.storage.account(&holder);
        let pool = &mut self.storage.globals_mut().reflection;
        let amount = pool.take_claimable(&mut account)?;
        if amount.is_zero() {
            return Err(TokenError::NothingToClaim { holder });
        }
        pool.sync_eligibility(&mut account)?;
        self.storage.put_account(holder, account);
        self.storage
            .emit(LedgerEvent::ReflectionsClaimed { holder, amount });

        let custody = self.storage.globals().holder.clone();
        custody.release(self.address(), self.asset.as_ref(), holder, amount)?;
        info!(%holder, %amount, "reflections claimed");
        Ok(amount)
    }

    /// Pays `account`'s reflections if it has any, swallowing failures.
    pub(crate) fn distribute_opportunistically(&mut self, account: Address) {
        let record = self.storage.account(&account);
        if record.reflection_excluded {
            return;
        }
        let claimable = self
            .storage
            .globals()
            .reflection
            .claimable(&record)
            .unwrap_or_default();
        if claimable.is_zero() {
            return;
        }
        self.attempt("auto_distribute", |token| token.pay_reflections(account));
    }

    fn ensure_holder_controlled(&self) -> Result<(), TokenError> {
        let owner = self.storage.globals().holder.owner();
        if owner != self.address() {
            return Err(TokenError::SettlementHolderNotControlled { owner });
        }
        Ok(())
    }

    /// Settlement asset in custody not owed to reflection claimants.
    #[must_use]
    pub fn free_settlement_reserve(&self) -> U256 {
        let globals = self.storage.globals();
        globals
            .holder
            .balance(self.asset.as_ref())
            .saturating_sub(globals.reflection.outstanding_liability())
    }

    // =========================================================================
    // VOUCHERS
    // =========================================================================

    /// Redeems a voucher for ledger tokens out of the ledger's own balance.
    /// Tokens move like a transfer, so tax applies unless the recipient is
    /// exempt.
    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub fn claim_reward_points_with_chp(
        &mut self,
        ctx: &CallContext,
        encoded_message: &[u8],
        signature: &[u8],
    ) -> Result<RewardPayout, TokenError> {
        self.atomically("claim_reward_points_with_chp", |token| {
            let voucher = token.redeem_voucher(ctx, encoded_message, signature)?;
            token.pay_tokens(voucher.recipient, voucher.amount, Some(voucher.nonce))
        })
    }

    /// Redeems a voucher for settlement asset out of the holder's free reserve.
    #[instrument(skip_all, fields(caller = %ctx.caller))]
    pub fn claim_reward_points_with_eth(
        &mut self,
        ctx: &CallContext,
        encoded_message: &[u8],
        signature: &[u8],
    ) -> Result<RewardPayout, TokenError> {
        self.atomically("claim_reward_points_with_eth", |token| {
            let voucher = token.redeem_voucher(ctx, encoded_message, signature)?;
            token.pay_settlement(voucher.recipient, voucher.amount, Some(voucher.nonce))
        })
    }

    /// Decodes and verifies a voucher, then consumes the recipient's nonce.
    fn redeem_voucher(
        &mut self,
        ctx: &CallContext,
        encoded_message: &[u8],
        signature: &[u8],
    ) -> Result<Voucher, TokenError> {
        let voucher = Voucher::decode(encoded_message)?;

        let expected = self.storage.account(&voucher.recipient).voucher_nonce;
        if voucher.nonce != expected {
            return Err(TokenError::WrongNonce {
                expected,
                provided: voucher.nonce,
            });
        }
        if voucher.is_expired(ctx.timestamp) {
            return Err(TokenError::SessionTimedOut {
                expiry: voucher.expiry,
                now: ctx.timestamp,
            });
        }
        let signer = voucher
            .recover_signer(signature)
            .map_err(|_| TokenError::InvalidSignature)?;
        if signer != self.storage.globals().voucher_signer {
            return Err(TokenError::InvalidSignature);
        }
        if voucher.recipient.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if voucher.amount.is_zero() {
            return Err(TokenError::ZeroAmount);
        }

        let next = expected
            .checked_add(U256::one())
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.storage.account_mut(voucher.recipient).voucher_nonce = next;
        Ok(voucher)
    }

    // =========================================================================
    // ADMIN GRANTS
    // =========================================================================

    /// Owner-issued token payout, no voucher needed.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn grant_reward_points_with_chp(
        &mut self,
        ctx: &CallContext,
        recipient: Address,
        amount: U256,
    ) -> Result<RewardPayout, TokenError> {
        self.check_grant(ctx, recipient, amount)?;
        self.atomically("grant_reward_points_with_chp", |token| {
            token.pay_tokens(recipient, amount, None)
        })
    }

    /// Owner-issued settlement payout from the free reserve.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn grant_reward_points_with_eth(
        &mut self,
        ctx: &CallContext,
        recipient: Address,
        amount: U256,
    ) -> Result<RewardPayout, TokenError> {
        self.check_grant(ctx, recipient, amount)?;
        self.atomically("grant_reward_points_with_eth", |token| {
            token.pay_settlement(recipient, amount, None)
        })
    }

    fn check_grant(
        &self,
        ctx: &CallContext,
        recipient: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        if recipient.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        if amount.is_zero() {
            return Err(TokenError::ZeroAmount);
        }
        Ok(())
    }

    // =========================================================================
    // PAYOUTS
    // =========================================================================

    fn pay_tokens(
        &mut self,
        recipient: Address,
        amount: U256,
        nonce: Option<U256>,
    ) -> Result<RewardPayout, TokenError> {
        let breakdown = self.execute_transfer(self.address(), recipient, amount, false)?;
        self.storage.emit(LedgerEvent::RewardPointsPaid {
            recipient,
            amount,
            asset: PayoutAsset::Token,
            nonce,
        });
        info!(%recipient, %amount, received = %breakdown.net_amount, ?nonce, "reward points paid in tokens");
        Ok(RewardPayout {
            recipient,
            amount,
            received: breakdown.net_amount,
            asset: PayoutAsset::Token,
            nonce,
        })
    }

    fn pay_settlement(
        &mut self,
        recipient: Address,
        amount: U256,
        nonce: Option<U256>,
    ) -> Result<RewardPayout, TokenError> {
        self.ensure_holder_controlled()?;
        let available = self.free_settlement_reserve();
        if amount > available {
            return Err(TokenError::InsufficientSettlementReserve {
                required: amount,
                available,
            });
        }

        self.storage.emit(LedgerEvent::RewardPointsPaid {
            recipient,
            amount,
            asset: PayoutAsset::Settlement,
            nonce,
        });
        let custody = self.storage.globals().holder.clone();
        custody.release(self.address(), self.asset.as_ref(), recipient, amount)?;
        info!(%recipient, %amount, ?nonce, "reward points paid in settlement asset");
        Ok(RewardPayout {
            recipient,
            amount,
            received: amount,
            asset: PayoutAsset::Settlement,
            nonce,
        })
    }
}
