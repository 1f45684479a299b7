//! # Conversion Pipeline
//!
//! Turns collected tax into settlement value:
//!
//! - **Reflection treasury**: sold whole for the settlement asset, paid into
//!   the settlement holder, then accrued to eligible holders.
//! - **Liquidity treasury**: half is sold, the other half is paired with the
//!   proceeds and added to the pool in a single exchange call; LP units go to
//!   the liquidity recipient.
//!
//! Both run on demand (`process_reflections`, `process_liquidity`) and
//! opportunistically after non-buy transfers once their threshold is met.
//! Swaps are guarded by the configured slippage against a fresh quote.

use crate::domain::entities::{CallContext, ConversionReceipt};
use crate::domain::reflection::Accrual;
use crate::errors::TokenError;
use crate::events::LedgerEvent;
use crate::ports::outbound::{Exchange, LiquidityReceipt, SettlementAsset};
use crate::service::ChampToken;
use shared_types::{Address, U256};
use tracing::{debug, info, instrument};

impl<X: Exchange, S: SettlementAsset> ChampToken<X, S> {
    /// Sells the reflection treasury and accrues the proceeds. Any caller.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn process_reflections(
        &mut self,
        ctx: &CallContext,
    ) -> Result<ConversionReceipt, TokenError> {
        self.atomically("process_reflections", |token| {
            token.convert_reflection_treasury()
        })
    }

    /// Adds the liquidity treasury to the pool. Any caller.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn process_liquidity(
        &mut self,
        ctx: &CallContext,
    ) -> Result<LiquidityReceipt, TokenError> {
        self.atomically("process_liquidity", |token| {
            token.add_treasury_liquidity()
        })
    }

    /// Runs whichever conversions have reached their threshold. Failures are
    /// rolled back and logged; the enclosing transfer proceeds.
    pub(crate) fn convert_opportunistically(&mut self) {
        let settings = self.storage.globals().conversion.clone();

        let reflection_balance = self.storage.balance(&self.reflection_treasury());
        if !reflection_balance.is_zero() && reflection_balance >= settings.reflection_swap_threshold {
            self.attempt("auto_convert_reflections", |token| {
                token.convert_reflection_treasury()
            });
        }

        let liquidity_balance = self.storage.balance(&self.liquidity_treasury());
        if !liquidity_balance.is_zero() && liquidity_balance >= settings.liquidity_swap_threshold {
            self.attempt("auto_add_liquidity", |token| token.add_treasury_liquidity());
        }
    }

    fn swap_path(&self) -> [Address; 2] {
        [self.address(), self.asset.asset_address()]
    }

    /// Fresh quote for selling `amount` and the slippage floor derived from it.
    fn quote_settlement(&self, amount: U256) -> Result<(U256, U256), TokenError> {
        let amounts = self.exchange.get_amounts_out(amount, &self.swap_path())?;
        let quoted = amounts.last().copied().unwrap_or_default();
        let minimum = self.storage.globals().conversion.minimum_output(quoted);
        Ok((quoted, minimum))
    }

    /// Moves `amount` from `source` into the pair and sells it, paying the
    /// settlement asset to `recipient`.
    fn swap_to_settlement(
        &mut self,
        source: Address,
        amount: U256,
        recipient: Address,
    ) -> Result<U256, TokenError> {
        let (quoted, minimum) = self.quote_settlement(amount)?;

        let pair = self.exchange.pair_address();
        self.move_tokens(source, pair, amount)?;
        let received = self
            .exchange
            .swap_exact_tokens_for_settlement(amount, minimum, recipient)?;
        debug!(%amount, %quoted, %minimum, %received, "treasury swap");
        Ok(received)
    }

    pub(crate) fn convert_reflection_treasury(&mut self) -> Result<ConversionReceipt, TokenError> {
        let treasury = self.reflection_treasury();
        let tokens_in = self.storage.balance(&treasury);
        if tokens_in.is_zero() {
            return Err(TokenError::NothingToConvert);
        }

        let holder = self.storage.globals().holder.address();
        let settlement_out = self.swap_to_settlement(treasury, tokens_in, holder)?;

        let pool = &mut self.storage.globals_mut().reflection;
        let accrual = pool.accrue(settlement_out)?;
        let accumulated = pool.accumulated_reward_per_share();
        let deferred = matches!(accrual, Accrual::Deferred { .. });

        self.storage.emit(LedgerEvent::ReflectionTaxConverted {
            tokens_in,
            settlement_out,
        });
        self.storage.emit(LedgerEvent::ReflectionsAccrued {
            amount: settlement_out,
            accumulated_reward_per_share: accumulated,
            deferred,
        });
        info!(%tokens_in, %settlement_out, deferred, "reflection tax converted");

        Ok(ConversionReceipt {
            tokens_in,
            settlement_out,
            deferred,
        })
    }

    pub(crate) fn add_treasury_liquidity(&mut self) -> Result<LiquidityReceipt, TokenError> {
        let treasury = self.liquidity_treasury();
        let balance = self.storage.balance(&treasury);
        let half = balance / 2;
        let rest = balance - half;
        if half.is_zero() {
            return Err(TokenError::NothingToConvert);
        }

        let (quoted, minimum) = self.quote_settlement(half)?;
        let pair = self.exchange.pair_address();
        let recipient = self.storage.globals().liquidity_recipient;

        // the only external call, and the last step
        self.move_tokens(treasury, pair, balance)?;
        let receipt = self
            .exchange
            .swap_and_add_liquidity(half, minimum, rest, recipient)?;
        debug!(
            swapped = %half,
            %quoted,
            %minimum,
            settlement = %receipt.settlement_amount,
            "treasury swap"
        );

        self.storage.emit(LedgerEvent::LiquidityAdded {
            tokens: receipt.token_amount,
            settlement: receipt.settlement_amount,
            liquidity: receipt.liquidity,
        });
        info!(
            tokens = %receipt.token_amount,
            settlement = %receipt.settlement_amount,
            liquidity = %receipt.liquidity,
            %recipient,
            "liquidity added"
        );
        Ok(receipt)
    }
}
