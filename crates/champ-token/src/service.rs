//! # CHAMP Token Service
//!
//! `ChampToken` owns the journaled store and the two outbound collaborators
//! and orchestrates every entry point: taxed transfers, allowances,
//! administration, pause control and queries. Reward claims live in
//! [`crate::claims`], tax conversion in [`crate::conversion`].
//!
//! ## Atomicity
//!
//! Every mutating entry point runs through [`ChampToken::atomically`]: a
//! store transaction that commits on `Ok` and rolls back on `Err`.
//! Opportunistic steps (auto-convert, auto-distribute) run in a nested
//! transaction whose failure is logged and swallowed.
//!
//! ## Transfer Flow
//!
//! ```text
//! gate(pause) -> classify(venues) -> compute_tax
//!   -> settle + debit sender -> settle + credit recipient
//!   -> credit treasuries -> events -> opportunistic conversion
//! ```

use crate::config::{ConversionConfig, TokenConfig};
use crate::domain::entities::{CallContext, HolderAccount, RewardPayout, TokenMetadata};
use crate::domain::invariants::{check_conservation, check_reflectable_supply, InvariantViolation};
use crate::domain::pause::{PauseGate, PauseState};
use crate::domain::reflection::ReflectionPool;
use crate::domain::tax::{classify, compute_tax, NonVenuePolicy, TaxBreakdown, TaxSchedule, TransferDirection};
use crate::errors::TokenError;
use crate::events::LedgerEvent;
use crate::holder::SettlementHolder;
use crate::ports::inbound::ChampTokenApi;
use crate::ports::outbound::{Exchange, SettlementAsset};
use crate::storage::{Globals, LedgerStorage};
use shared_types::{Address, Timestamp, U256};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Label hashed with the ledger address to derive the liquidity treasury.
pub const LIQUIDITY_TREASURY_LABEL: &str = "liquidity-treasury";

/// Label hashed with the ledger address to derive the reflection treasury.
pub const REFLECTION_TREASURY_LABEL: &str = "reflection-treasury";

/// Addresses and roles fixed at deployment.
#[derive(Debug, Clone)]
pub struct DeployParams {
    /// The ledger's own address. Holds voucher-payable tokens.
    pub address: Address,
    /// Deployer; receives the initial supply and becomes the owner.
    pub owner: Address,
    /// Address whose signatures authorize vouchers.
    pub voucher_signer: Address,
    /// Settlement custody, usually still owned by the deployer.
    pub settlement_holder: SettlementHolder,
}

/// The fee-bearing, reflection-paying ledger.
pub struct ChampToken<X: Exchange, S: SettlementAsset> {
    address: Address,
    metadata: TokenMetadata,
    liquidity_treasury: Address,
    reflection_treasury: Address,
    pub(crate) storage: LedgerStorage,
    pub(crate) exchange: Arc<X>,
    pub(crate) asset: Arc<S>,
}

impl<X: Exchange, S: SettlementAsset> std::fmt::Debug for ChampToken<X, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChampToken")
            .field("address", &self.address)
            .field("symbol", &self.metadata.symbol)
            .field("total_supply", &self.storage.globals().total_supply)
            .finish_non_exhaustive()
    }
}

impl<X: Exchange, S: SettlementAsset> ChampToken<X, S> {
    // =========================================================================
    // DEPLOYMENT
    // =========================================================================

    /// Validates `config`, mints the initial supply to the owner and wires
    /// the exchange pair in as a liquidity venue.
    #[instrument(skip_all, fields(token = %params.address, owner = %params.owner))]
    pub fn deploy(
        config: TokenConfig,
        params: DeployParams,
        exchange: Arc<X>,
        asset: Arc<S>,
    ) -> Result<Self, TokenError> {
        config.validate()?;
        if params.address.is_zero() || params.owner.is_zero() || params.voucher_signer.is_zero() {
            return Err(TokenError::ZeroAddress);
        }

        let pair = exchange.pair_address();
        let liquidity_treasury = params.address.derive(LIQUIDITY_TREASURY_LABEL);
        let reflection_treasury = params.address.derive(REFLECTION_TREASURY_LABEL);
        let holder_address = params.settlement_holder.address();

        let globals = Globals {
            owner: params.owner,
            voucher_signer: params.voucher_signer,
            total_supply: config.initial_supply,
            taxes: config.taxes.clone(),
            reflection: ReflectionPool::new(config.minimum_holding_for_reflection),
            pause: PauseState::new(config.pause),
            venues: BTreeSet::from([pair]),
            conversion: config.conversion.clone(),
            holder: params.settlement_holder,
            liquidity_recipient: params.owner,
        };

        let mut token = Self {
            address: params.address,
            metadata: TokenMetadata {
                name: config.name.clone(),
                symbol: config.symbol.clone(),
                decimals: config.decimals,
            },
            liquidity_treasury,
            reflection_treasury,
            storage: LedgerStorage::new(globals),
            exchange,
            asset,
        };

        for internal in [
            params.address,
            liquidity_treasury,
            reflection_treasury,
            holder_address,
            pair,
            Address::ZERO,
        ] {
            token.storage.account_mut(internal).reflection_excluded = true;
        }
        for treasury in [liquidity_treasury, reflection_treasury] {
            token.storage.account_mut(treasury).fee_excluded = true;
        }

        token.update_account(params.owner, |account| {
            account.balance = config.initial_supply;
            Ok(())
        })?;
        token.storage.emit(LedgerEvent::Transfer {
            from: Address::ZERO,
            to: params.owner,
            value: config.initial_supply,
        });

        info!(
            name = %config.name,
            symbol = %config.symbol,
            supply = %config.initial_supply,
            %pair,
            "token deployed"
        );
        Ok(token)
    }

    // =========================================================================
    // INTERNAL PLUMBING
    // =========================================================================

    /// Runs `f` inside a store transaction.
    pub(crate) fn atomically<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, TokenError>,
    ) -> Result<T, TokenError> {
        self.storage.begin();
        match f(self) {
            Ok(value) => {
                self.storage.commit();
                Ok(value)
            }
            Err(error) => {
                self.storage.rollback();
                if self.storage.in_transaction() {
                    debug!(operation, %error, "nested step reverted");
                } else {
                    warn!(operation, %error, "call reverted");
                }
                Err(error)
            }
        }
    }

    /// Like [`Self::atomically`], but a failure is logged and dropped.
    pub(crate) fn attempt<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, TokenError>,
    ) -> Option<T> {
        match self.atomically(operation, f) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(operation, %error, "opportunistic step skipped");
                None
            }
        }
    }

    pub(crate) fn only_owner(&self, ctx: &CallContext) -> Result<(), TokenError> {
        if ctx.caller != self.storage.globals().owner {
            return Err(TokenError::Unauthorized { caller: ctx.caller });
        }
        Ok(())
    }

    /// Settles `address`, applies `update`, then re-syncs its reflective share.
    ///
    /// Returns true when the share changed.
    pub(crate) fn update_account(
        &mut self,
        address: Address,
        update: impl FnOnce(&mut HolderAccount) -> Result<(), TokenError>,
    ) -> Result<bool, TokenError> {
        let mut account = self.storage.account(&address);
        let pool = &mut self.storage.globals_mut().reflection;
        pool.settle(&mut account)?;
        update(&mut account)?;
        let changed = pool.sync_eligibility(&mut account)?;
        self.storage.put_account(address, account);
        Ok(changed)
    }

    fn debit(&mut self, address: Address, amount: U256) -> Result<(), TokenError> {
        self.update_account(address, |account| {
            account.balance = account.balance.checked_sub(amount).ok_or(
                TokenError::InsufficientBalance {
                    account: address,
                    required: amount,
                    available: account.balance,
                },
            )?;
            Ok(())
        })?;
        Ok(())
    }

    fn credit(&mut self, address: Address, amount: U256) -> Result<(), TokenError> {
        if amount.is_zero() {
            return Ok(());
        }
        self.update_account(address, |account| {
            account.balance = account
                .balance
                .checked_add(amount)
                .ok_or(TokenError::ArithmeticOverflow)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Untaxed, ungated move with a `Transfer` event.
    pub(crate) fn move_tokens(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        self.debit(from, amount)?;
        self.credit(to, amount)?;
        self.storage.emit(LedgerEvent::Transfer {
            from,
            to,
            value: amount,
        });
        Ok(())
    }

    /// Applies the pause gate for a transfer out of `from`. Only the owner
    /// moving its own tokens is privileged; spenders of its allowance are not.
    fn check_pause(
        &mut self,
        ctx: &CallContext,
        from: Address,
    ) -> Result<PauseGate, TokenError> {
        let now = ctx.timestamp;
        let owner = self.storage.globals().owner;
        let privileged = from == owner && ctx.caller == owner;
        let gate = self.storage.globals_mut().pause.gate(now, privileged)?;
        if let PauseGate::AutoExpired { paused_at } = gate {
            info!(paused_at, now, "pause expired, transfers resumed");
            self.storage.emit(LedgerEvent::Unpaused {
                at: now,
                automatic: true,
            });
        }
        Ok(gate)
    }

    /// The ledger, its treasuries, the settlement holder, the exchange pair
    /// and the zero address.
    fn is_protocol_account(&self, account: &Address) -> bool {
        account.is_zero()
            || *account == self.address
            || *account == self.liquidity_treasury
            || *account == self.reflection_treasury
            || *account == self.storage.globals().holder.address()
            || *account == self.exchange.pair_address()
    }

    /// Taxed balance move, without the pause gate.
    pub(crate) fn execute_transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
        bypass_tax: bool,
    ) -> Result<TaxBreakdown, TokenError> {
        if to.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let sender = self.storage.account(&from);
        if sender.balance < amount {
            return Err(TokenError::InsufficientBalance {
                account: from,
                required: amount,
                available: sender.balance,
            });
        }

        let recipient_exempt = self.storage.account(&to).fee_excluded;
        let globals = self.storage.globals();
        let direction = classify(&from, &to, &globals.venues);
        let exempt = bypass_tax || sender.fee_excluded || recipient_exempt;
        let breakdown = compute_tax(&globals.taxes, amount, direction, exempt);

        self.debit(from, amount)?;
        self.credit(to, breakdown.net_amount)?;
        self.credit(self.liquidity_treasury, breakdown.liquidity_tax)?;
        self.credit(self.reflection_treasury, breakdown.reflection_tax)?;

        self.storage.emit(LedgerEvent::Transfer {
            from,
            to,
            value: breakdown.net_amount,
        });
        if !breakdown.liquidity_tax.is_zero() {
            self.storage.emit(LedgerEvent::Transfer {
                from,
                to: self.liquidity_treasury,
                value: breakdown.liquidity_tax,
            });
        }
        if !breakdown.reflection_tax.is_zero() {
            self.storage.emit(LedgerEvent::Transfer {
                from,
                to: self.reflection_treasury,
                value: breakdown.reflection_tax,
            });
        }

        debug!(
            %from,
            %to,
            %amount,
            net = %breakdown.net_amount,
            tax = %breakdown.total_tax(),
            ?direction,
            "transfer applied"
        );
        Ok(breakdown)
    }

    /// Gated, taxed transfer followed by the opportunistic steps.
    fn transfer_gated(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TaxBreakdown, TokenError> {
        let gate = self.check_pause(ctx, from)?;
        let breakdown =
            self.execute_transfer(from, to, amount, gate == PauseGate::AdminBypass)?;
        self.after_transfer(from, to, breakdown.direction);
        Ok(breakdown)
    }

    fn after_transfer(&mut self, from: Address, to: Address, direction: TransferDirection) {
        let settings = self.storage.globals().conversion.clone();
        if !settings.auto_convert || direction == TransferDirection::Buy {
            return;
        }
        self.convert_opportunistically();
        if settings.auto_distribute {
            for account in [from, to] {
                self.distribute_opportunistically(account);
            }
        }
    }

    // =========================================================================
    // ERC-20
    // =========================================================================

    /// Moves `amount` from the caller to `to`, net of tax.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn transfer(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: U256,
    ) -> Result<TaxBreakdown, TokenError> {
        let from = ctx.caller;
        self.atomically("transfer", |token| {
            token.transfer_gated(ctx, from, to, amount)
        })
    }

    /// Spends the caller's allowance from `from`. A `U256::MAX` allowance is
    /// never decremented.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TaxBreakdown, TokenError> {
        let spender = ctx.caller;
        self.atomically("transfer_from", |token| {
            let allowance = token.storage.allowance(&from, &spender);
            if allowance < amount {
                return Err(TokenError::InsufficientAllowance {
                    required: amount,
                    available: allowance,
                });
            }
            if allowance != U256::MAX {
                token
                    .storage
                    .set_allowance(from, spender, allowance - amount);
            }
            token.transfer_gated(ctx, from, to, amount)
        })
    }

    /// Sets the caller's allowance for `spender`.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn approve(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        if spender.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let owner = ctx.caller;
        self.atomically("approve", |token| {
            token.storage.set_allowance(owner, spender, amount);
            token.storage.emit(LedgerEvent::Approval {
                owner,
                spender,
                value: amount,
            });
            Ok(())
        })
    }

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================

    /// Sets buy and sell rates. Both are validated before either changes.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn set_taxes(&mut self, ctx: &CallContext, buy: u8, sell: u8) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        self.atomically("set_taxes", |token| {
            token.storage.globals_mut().taxes.set_rates(buy, sell)?;
            token.storage.emit(LedgerEvent::TaxesUpdated {
                buy_percent: buy,
                sell_percent: sell,
            });
            info!(buy, sell, "tax rates updated");
            Ok(())
        })
    }

    /// Sets the liquidity/reflection split weights.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn set_tax_allocations(
        &mut self,
        ctx: &CallContext,
        liquidity: u8,
        reflection: u8,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        self.atomically("set_tax_allocations", |token| {
            token
                .storage
                .globals_mut()
                .taxes
                .set_allocations(liquidity, reflection)?;
            token.storage.emit(LedgerEvent::TaxAllocationsUpdated {
                liquidity,
                reflection,
            });
            info!(liquidity, reflection, "tax allocations updated");
            Ok(())
        })
    }

    /// Exempts `account` from transfer tax, or revokes the exemption.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn exclude_from_fees(
        &mut self,
        ctx: &CallContext,
        account: Address,
        excluded: bool,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        self.atomically("exclude_from_fees", |token| {
            token.storage.account_mut(account).fee_excluded = excluded;
            token
                .storage
                .emit(LedgerEvent::FeeExclusionUpdated { account, excluded });
            Ok(())
        })
    }

    /// Stops or resumes reflection earnings for `account`. Rewards earned so
    /// far are settled first and stay claimable.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn exclude_from_reflections(
        &mut self,
        ctx: &CallContext,
        account: Address,
        excluded: bool,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        self.atomically("exclude_from_reflections", |token| {
            token.update_account(account, |a| {
                a.reflection_excluded = excluded;
                Ok(())
            })?;
            token
                .storage
                .emit(LedgerEvent::ReflectionExclusionUpdated { account, excluded });
            Ok(())
        })
    }

    /// Changes the eligibility threshold. Existing holders are re-evaluated
    /// on their next balance change or via
    /// [`Self::refresh_reflection_eligibility`].
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn change_minimum_holding_for_reflection(
        &mut self,
        ctx: &CallContext,
        amount: U256,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        self.atomically("change_minimum_holding_for_reflection", |token| {
            token
                .storage
                .globals_mut()
                .reflection
                .set_minimum_holding(amount);
            token
                .storage
                .emit(LedgerEvent::MinimumHoldingUpdated { amount });
            info!(%amount, "minimum holding for reflection updated");
            Ok(())
        })
    }

    /// Re-evaluates eligibility of `accounts` against the current threshold.
    /// Open to any caller. Returns how many shares changed.
    #[instrument(skip(self, ctx, accounts), fields(caller = %ctx.caller, count = accounts.len()))]
    pub fn refresh_reflection_eligibility(
        &mut self,
        ctx: &CallContext,
        accounts: &[Address],
    ) -> Result<usize, TokenError> {
        self.atomically("refresh_reflection_eligibility", |token| {
            let mut changed = 0;
            for account in accounts {
                if token.update_account(*account, |_| Ok(()))? {
                    changed += 1;
                }
            }
            Ok(changed)
        })
    }

    /// Adds or removes a liquidity venue. New venues stop earning reflections;
    /// removed ones earn again unless they are one of the ledger's own accounts.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn set_liquidity_venue(
        &mut self,
        ctx: &CallContext,
        venue: Address,
        is_venue: bool,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        if venue.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.atomically("set_liquidity_venue", |token| {
            if is_venue {
                token.storage.globals_mut().venues.insert(venue);
                token.update_account(venue, |a| {
                    a.reflection_excluded = true;
                    Ok(())
                })?;
            } else {
                token.storage.globals_mut().venues.remove(&venue);
                if !token.is_protocol_account(&venue) {
                    token.update_account(venue, |a| {
                        a.reflection_excluded = false;
                        Ok(())
                    })?;
                }
            }
            token
                .storage
                .emit(LedgerEvent::LiquidityVenueUpdated { venue, is_venue });
            Ok(())
        })
    }

    /// Chooses the rate for transfers that touch no venue.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn set_non_venue_policy(
        &mut self,
        ctx: &CallContext,
        policy: NonVenuePolicy,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        self.atomically("set_non_venue_policy", |token| {
            token.storage.globals_mut().taxes.non_venue_policy = policy;
            token
                .storage
                .emit(LedgerEvent::NonVenuePolicyUpdated { policy });
            Ok(())
        })
    }

    /// Replaces the conversion thresholds and toggles.
    #[instrument(skip(self, ctx, settings), fields(caller = %ctx.caller))]
    pub fn set_conversion_settings(
        &mut self,
        ctx: &CallContext,
        settings: ConversionConfig,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        settings.validate()?;
        self.atomically("set_conversion_settings", |token| {
            token.storage.emit(LedgerEvent::ConversionSettingsUpdated {
                reflection_swap_threshold: settings.reflection_swap_threshold,
                liquidity_swap_threshold: settings.liquidity_swap_threshold,
                auto_convert: settings.auto_convert,
                auto_distribute: settings.auto_distribute,
            });
            token.storage.globals_mut().conversion = settings;
            Ok(())
        })
    }

    /// Address that receives LP units from liquidity adds.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn set_liquidity_recipient(
        &mut self,
        ctx: &CallContext,
        recipient: Address,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        if recipient.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.atomically("set_liquidity_recipient", |token| {
            token.storage.globals_mut().liquidity_recipient = recipient;
            token
                .storage
                .emit(LedgerEvent::LiquidityRecipientUpdated { recipient });
            Ok(())
        })
    }

    /// Rotates the voucher signing key.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn set_voucher_signer(
        &mut self,
        ctx: &CallContext,
        signer: Address,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        if signer.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.atomically("set_voucher_signer", |token| {
            let previous = std::mem::replace(&mut token.storage.globals_mut().voucher_signer, signer);
            token
                .storage
                .emit(LedgerEvent::VoucherSignerUpdated { previous, signer });
            info!(%previous, %signer, "voucher signer rotated");
            Ok(())
        })
    }

    /// Hands administration to `new_owner`.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn transfer_ownership(
        &mut self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        if new_owner.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.atomically("transfer_ownership", |token| {
            let previous = std::mem::replace(&mut token.storage.globals_mut().owner, new_owner);
            token.storage.emit(LedgerEvent::OwnershipTransferred {
                previous,
                owner: new_owner,
            });
            info!(%previous, owner = %new_owner, "ownership transferred");
            Ok(())
        })
    }

    /// Hands the settlement holder to `new_owner`. The caller must own the
    /// holder; passing the ledger address gives the ledger custody.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller))]
    pub fn transfer_holder_ownership(
        &mut self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> Result<(), TokenError> {
        self.atomically("transfer_holder_ownership", |token| {
            let previous = token
                .storage
                .globals_mut()
                .holder
                .transfer_ownership(ctx.caller, new_owner)?;
            token.storage.emit(LedgerEvent::HolderOwnershipTransferred {
                previous,
                owner: new_owner,
            });
            info!(%previous, owner = %new_owner, "settlement holder handed over");
            Ok(())
        })
    }

    // =========================================================================
    // PAUSE
    // =========================================================================

    /// `Active -> Paused`.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, now = ctx.timestamp))]
    pub fn pause(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        self.atomically("pause", |token| {
            token.storage.globals_mut().pause.pause(ctx.timestamp)?;
            token.storage.emit(LedgerEvent::Paused { at: ctx.timestamp });
            info!(at = ctx.timestamp, "transfers paused");
            Ok(())
        })
    }

    /// Explicit `Paused -> Active`.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller, now = ctx.timestamp))]
    pub fn unpause(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        self.only_owner(ctx)?;
        self.atomically("unpause", |token| {
            token.storage.globals_mut().pause.unpause()?;
            token.storage.emit(LedgerEvent::Unpaused {
                at: ctx.timestamp,
                automatic: false,
            });
            info!(at = ctx.timestamp, "transfers resumed");
            Ok(())
        })
    }

    /// Logical pause state at `now`; false once a pause has expired.
    #[must_use]
    pub fn paused(&self, now: Timestamp) -> bool {
        self.storage.globals().pause.is_paused(now)
    }

    /// Full pause state machine.
    #[must_use]
    pub fn pause_state(&self) -> &PauseState {
        &self.storage.globals().pause
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Ledger address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Decimal places.
    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Total supply. Fixed after deployment.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.storage.globals().total_supply
    }

    /// Token balance.
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.storage.balance(&account)
    }

    /// Remaining allowance.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.storage.allowance(&owner, &spender)
    }

    /// Administrator.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.storage.globals().owner
    }

    /// Authorized voucher signer.
    #[must_use]
    pub fn voucher_signer(&self) -> Address {
        self.storage.globals().voucher_signer
    }

    /// Exchange pair address.
    #[must_use]
    pub fn liquidity_pool(&self) -> Address {
        self.exchange.pair_address()
    }

    /// Where liquidity tax accumulates.
    #[must_use]
    pub fn liquidity_treasury(&self) -> Address {
        self.liquidity_treasury
    }

    /// Where reflection tax accumulates.
    #[must_use]
    pub fn reflection_treasury(&self) -> Address {
        self.reflection_treasury
    }

    /// Settlement custody.
    #[must_use]
    pub fn settlement_holder(&self) -> &SettlementHolder {
        &self.storage.globals().holder
    }

    /// Receives LP units.
    #[must_use]
    pub fn liquidity_recipient(&self) -> Address {
        self.storage.globals().liquidity_recipient
    }

    /// Current buy rate.
    #[must_use]
    pub fn buy_tax(&self) -> u8 {
        self.storage.globals().taxes.buy_percent
    }

    /// Current sell rate.
    #[must_use]
    pub fn sell_tax(&self) -> u8 {
        self.storage.globals().taxes.sell_percent
    }

    /// Rates, split and non-venue policy.
    #[must_use]
    pub fn tax_schedule(&self) -> &TaxSchedule {
        &self.storage.globals().taxes
    }

    /// Conversion thresholds and toggles.
    #[must_use]
    pub fn conversion_settings(&self) -> &ConversionConfig {
        &self.storage.globals().conversion
    }

    /// Tax exemption flag.
    #[must_use]
    pub fn is_excluded_from_fees(&self, account: Address) -> bool {
        self.storage.account(&account).fee_excluded
    }

    /// Reflection exclusion flag.
    #[must_use]
    pub fn is_excluded_from_reflections(&self, account: Address) -> bool {
        self.storage.account(&account).reflection_excluded
    }

    /// Venue membership.
    #[must_use]
    pub fn is_liquidity_venue(&self, account: Address) -> bool {
        self.storage.globals().venues.contains(&account)
    }

    /// Eligibility threshold.
    #[must_use]
    pub fn minimum_holding_for_reflection(&self) -> U256 {
        self.storage.globals().reflection.minimum_holding()
    }

    /// Reflection accumulator.
    #[must_use]
    pub fn reflection_pool(&self) -> &ReflectionPool {
        &self.storage.globals().reflection
    }

    /// Settlement amount `holder` could claim right now.
    pub fn calculate_claimable(&self, holder: Address) -> Result<U256, TokenError> {
        let account = self.storage.account(&holder);
        self.storage.globals().reflection.claimable(&account)
    }

    /// Next voucher nonce expected for `account`.
    #[must_use]
    pub fn user_nonce(&self, account: Address) -> U256 {
        self.storage.account(&account).voucher_nonce
    }

    /// Full holder record.
    #[must_use]
    pub fn account(&self, address: Address) -> HolderAccount {
        self.storage.account(&address)
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        self.storage.events()
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        self.storage.take_events()
    }

    /// Recomputes supply conservation and the reflectable-supply sum.
    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        check_conservation(self.storage.accounts(), self.total_supply())?;
        check_reflectable_supply(self.storage.accounts(), self.reflection_pool())
    }
}

// =============================================================================
// INBOUND PORT
// =============================================================================

impl<X: Exchange, S: SettlementAsset> ChampTokenApi for ChampToken<X, S> {
    fn transfer(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: U256,
    ) -> Result<TaxBreakdown, TokenError> {
        Self::transfer(self, ctx, to, amount)
    }

    fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<TaxBreakdown, TokenError> {
        Self::transfer_from(self, ctx, from, to, amount)
    }

    fn approve(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        amount: U256,
    ) -> Result<(), TokenError> {
        Self::approve(self, ctx, spender, amount)
    }

    fn balance_of(&self, account: Address) -> U256 {
        Self::balance_of(self, account)
    }

    fn set_taxes(&mut self, ctx: &CallContext, buy: u8, sell: u8) -> Result<(), TokenError> {
        Self::set_taxes(self, ctx, buy, sell)
    }

    fn set_tax_allocations(
        &mut self,
        ctx: &CallContext,
        liquidity: u8,
        reflection: u8,
    ) -> Result<(), TokenError> {
        Self::set_tax_allocations(self, ctx, liquidity, reflection)
    }

    fn exclude_from_fees(
        &mut self,
        ctx: &CallContext,
        account: Address,
        excluded: bool,
    ) -> Result<(), TokenError> {
        Self::exclude_from_fees(self, ctx, account, excluded)
    }

    fn change_minimum_holding_for_reflection(
        &mut self,
        ctx: &CallContext,
        amount: U256,
    ) -> Result<(), TokenError> {
        Self::change_minimum_holding_for_reflection(self, ctx, amount)
    }

    fn calculate_claimable(&self, holder: Address) -> Result<U256, TokenError> {
        Self::calculate_claimable(self, holder)
    }

    fn claim_reflections(
        &mut self,
        ctx: &CallContext,
        holder: Address,
    ) -> Result<U256, TokenError> {
        Self::claim_reflections(self, ctx, holder)
    }

    fn claim_reward_points_with_chp(
        &mut self,
        ctx: &CallContext,
        encoded_message: &[u8],
        signature: &[u8],
    ) -> Result<RewardPayout, TokenError> {
        Self::claim_reward_points_with_chp(self, ctx, encoded_message, signature)
    }

    fn claim_reward_points_with_eth(
        &mut self,
        ctx: &CallContext,
        encoded_message: &[u8],
        signature: &[u8],
    ) -> Result<RewardPayout, TokenError> {
        Self::claim_reward_points_with_eth(self, ctx, encoded_message, signature)
    }

    fn user_nonce(&self, account: Address) -> U256 {
        Self::user_nonce(self, account)
    }

    fn pause(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        Self::pause(self, ctx)
    }

    fn unpause(&mut self, ctx: &CallContext) -> Result<(), TokenError> {
        Self::unpause(self, ctx)
    }

    fn paused(&self, now: Timestamp) -> bool {
        Self::paused(self, now)
    }
}
