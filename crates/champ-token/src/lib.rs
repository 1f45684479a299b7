//! # CHAMP Token - Fee-Bearing Reflection Ledger
//!
//! A fungible token ledger that taxes buys and sells, pays holders
//! reflections in a settlement asset, and redeems off-chain signed reward
//! vouchers.
//!
//! ## Purpose
//!
//! - Every taxed transfer splits its tax between a liquidity treasury and a
//!   reflection treasury.
//! - The reflection treasury is sold for the settlement asset through an
//!   exchange; proceeds are spread over eligible holders with a scaled
//!   reward-per-share accumulator, so no operation iterates holders.
//! - Reward points are paid against a voucher signed by the voucher signer,
//!   or granted directly by the owner.
//! - The owner may pause transfers; a pause expires on its own.
//!
//! ## Ledger Guarantees
//!
//! | Guarantee | Enforcement Location |
//! |-----------|---------------------|
//! | Balances sum to total supply | `service.rs` debit/credit pairs, `domain/invariants.rs` |
//! | Equal eligible balances earn equally | `domain/reflection.rs` accumulator |
//! | A voucher pays at most once | `claims.rs` nonce check and increment |
//! | Transfers never reduce claimable rewards | `service.rs` settle-before-mutate |
//! | Failed calls leave no trace | `storage.rs` journal, `service.rs` `atomically` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `Exchange` | Quotes, swaps and liquidity adds for tax conversion |
//! | `SettlementAsset` | Wrapped-native asset reflections are paid in |
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Tax calculator | `domain/tax.rs` | Direction and split |
//! | Reflection pool | `domain/reflection.rs` | Accumulator, settlement, carry |
//! | Pause machine | `domain/pause.rs` | Cooldown and auto-expiry |
//! | Voucher | `domain/voucher.rs` | Encoding, digest, signer recovery |
//! | Store | `storage.rs` | Journaled accounts, allowances, globals, events |
//! | Service | `service.rs` | Transfers, administration, queries |
//! | Claims | `claims.rs` | Reflection claims, vouchers, grants |
//! | Conversion | `conversion.rs` | Treasury swaps and liquidity adds |
//!
//! ## Usage Example
//!
//! ```ignore
//! use champ_token::prelude::*;
//!
//! let mut token = ChampToken::deploy(TokenConfig::default(), params, exchange, asset)?;
//! let ctx = CallContext::new(owner, now);
//! token.transfer(&ctx, recipient, amount)?;
//! token.process_reflections(&ctx)?;
//! let owed = token.calculate_claimable(recipient)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod claims;
pub mod config;
pub mod conversion;
pub mod domain;
pub mod errors;
pub mod events;
pub mod holder;
pub mod ports;
pub mod service;
pub mod storage;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        Accrual, CallContext, ConversionReceipt, HolderAccount, NonVenuePolicy, PauseConfig,
        PauseGate, PauseState, PayoutAsset, ReflectionPool, RewardPayout, TaxBreakdown,
        TaxSchedule, TokenMetadata, TransferDirection, Voucher, MAX_TAX_PERCENT, REWARD_SCALE,
    };

    // Configuration and errors
    pub use crate::config::{ConversionConfig, TokenConfig};
    pub use crate::errors::{ConfigError, ErrorKind, TokenError};

    // Service
    pub use crate::events::LedgerEvent;
    pub use crate::holder::SettlementHolder;
    pub use crate::service::{ChampToken, DeployParams};

    // Ports and adapters
    pub use crate::adapters::{ConstantProductExchange, InMemorySettlementAsset};
    pub use crate::ports::{ChampTokenApi, Exchange, LiquidityReceipt, SettlementAsset};

    // Shared primitives
    pub use shared_types::{Address, Timestamp, U256};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
