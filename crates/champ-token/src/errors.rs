//! # Error Types
//!
//! All error types for the ledger, its collaborators and configuration.
//! Every failing entry point leaves the ledger unchanged.

use shared_crypto::CryptoError;
use shared_types::{AbiError, Address, Timestamp, U256};
use thiserror::Error;

// =============================================================================
// ERROR TAXONOMY
// =============================================================================

/// Coarse classification used by callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected settings.
    Configuration,
    /// Caller lacks the capability, or a voucher signature is wrong.
    Authorization,
    /// Time-dependent rejection: cooldowns, pauses, expired vouchers.
    Temporal,
    /// Balances, allowances, nonces or reserves do not permit the call.
    Consistency,
    /// A collaborator (exchange, settlement asset, holder) refused.
    External,
}

// =============================================================================
// CONFIGURATION ERRORS
// =============================================================================

/// Invalid tax, pause or conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Buy or sell rate above the hard cap.
    #[error("Tax cannot exceed {max}%")]
    TaxExceedsLimit {
        /// Rate asked for.
        requested: u8,
        /// Hard cap.
        max: u8,
    },

    /// Allocation weights must be non-zero and sum to at most 100.
    #[error("Tax allocations must sum to between 1 and 100, got {liquidity} + {reflection}")]
    InvalidAllocation {
        /// Liquidity weight.
        liquidity: u8,
        /// Reflection weight.
        reflection: u8,
    },

    /// Maximum pause duration must be positive.
    #[error("Maximum pause duration must be greater than zero")]
    ZeroPauseDuration,

    /// Slippage is expressed in basis points.
    #[error("Slippage {0} bps exceeds 10000")]
    SlippageOutOfRange(u16),

    /// Decimals beyond what 256-bit supply can represent comfortably.
    #[error("Decimals {0} exceed 36")]
    DecimalsOutOfRange(u8),

    /// Configuration text could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(String),
}

// =============================================================================
// COLLABORATOR ERRORS
// =============================================================================

/// Settlement asset failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    /// Account cannot cover the transfer or withdrawal.
    #[error("settlement asset: insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        /// Account short of funds.
        account: Address,
        /// Amount needed.
        required: U256,
        /// Amount present.
        available: U256,
    },

    /// Balance or supply overflow.
    #[error("settlement asset: arithmetic overflow")]
    Overflow,
}

/// Exchange failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    /// Path is not the supported token/settlement pair.
    #[error("exchange: invalid path")]
    InvalidPath,

    /// Zero input amount.
    #[error("exchange: insufficient input amount")]
    InsufficientInputAmount,

    /// Pool reserves cannot satisfy the trade.
    #[error("exchange: insufficient liquidity")]
    InsufficientLiquidity,

    /// Output below the caller's minimum.
    #[error("exchange: insufficient output amount: minimum {minimum}, quoted {quoted}")]
    InsufficientOutputAmount {
        /// Caller's minimum.
        minimum: U256,
        /// Output the pool would give.
        quoted: U256,
    },

    /// Deposit too small to mint any LP units.
    #[error("exchange: insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// Reserve arithmetic overflow.
    #[error("exchange: arithmetic overflow")]
    Overflow,

    /// Settlement asset transfer failed.
    #[error("exchange: {0}")]
    Asset(#[from] AssetError),
}

/// Settlement holder failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HolderError {
    /// Caller is not the holder's owner.
    #[error("holder: caller {caller} is not the owner")]
    NotOwner {
        /// Rejected caller.
        caller: Address,
    },

    /// Ownership cannot be renounced to the zero address.
    #[error("holder: new owner is the zero address")]
    ZeroOwner,

    /// The release transfer failed.
    #[error("holder: {0}")]
    Asset(#[from] AssetError),
}

/// Voucher decoding and signature failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoucherError {
    /// Encoded message is malformed.
    #[error("voucher encoding: {0}")]
    Encoding(#[from] AbiError),

    /// Signature bytes are malformed or recovery failed.
    #[error("voucher signature: {0}")]
    Signature(#[from] CryptoError),
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors returned by ledger entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Rejected settings; prior settings are kept.
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigError),

    /// Caller lacks the required role.
    #[error("Unauthorized: {caller}")]
    Unauthorized {
        /// Rejected caller.
        caller: Address,
    },

    /// Voucher was not signed by the authorized signer.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Voucher message could not be decoded.
    #[error("Invalid voucher: {0}")]
    InvalidVoucher(#[from] VoucherError),

    /// Voucher nonce differs from the recipient's next nonce.
    #[error("Wrong Nonces: expected {expected}, provided {provided}")]
    WrongNonce {
        /// Next unused nonce.
        expected: U256,
        /// Nonce carried by the voucher.
        provided: U256,
    },

    /// Voucher expiry has passed.
    #[error("Session time out: expired at {expiry}, now {now}")]
    SessionTimedOut {
        /// Voucher expiry.
        expiry: U256,
        /// Time of the call.
        now: Timestamp,
    },

    /// Pause requested before the cooldown elapsed.
    #[error("Pause cooldown active: {remaining}s remaining")]
    CooldownActive {
        /// Seconds until a pause is allowed.
        remaining: u64,
    },

    /// Transfer attempted while paused and before auto-expiry.
    #[error("Paused and time limit not reached: transfers resume after {resumes_after}")]
    PausedAndTimeLimitNotReached {
        /// Last second of the pause.
        resumes_after: Timestamp,
    },

    /// Pause requested while already paused.
    #[error("Already paused")]
    AlreadyPaused,

    /// Unpause requested while not paused.
    #[error("Not paused")]
    NotPaused,

    /// Sender balance too small.
    #[error("Insufficient balance for {account}: required {required}, available {available}")]
    InsufficientBalance {
        /// Account short of funds.
        account: Address,
        /// Amount needed.
        required: U256,
        /// Amount present.
        available: U256,
    },

    /// Spender allowance too small.
    #[error("Insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        /// Amount needed.
        required: U256,
        /// Amount present.
        available: U256,
    },

    /// Free settlement reserve cannot cover a payout.
    #[error("Insufficient settlement reserve: required {required}, available {available}")]
    InsufficientSettlementReserve {
        /// Amount needed.
        required: U256,
        /// Amount present.
        available: U256,
    },

    /// No reflections owed.
    #[error("Nothing to claim for {holder}")]
    NothingToClaim {
        /// Holder with nothing owed.
        holder: Address,
    },

    /// Treasury is empty.
    #[error("Nothing to convert")]
    NothingToConvert,

    /// Amount must be positive.
    #[error("Amount must be greater than zero")]
    ZeroAmount,

    /// Zero address where a real account is required.
    #[error("Zero address not allowed")]
    ZeroAddress,

    /// The ledger does not own the settlement holder yet.
    #[error("Settlement holder is owned by {owner}, not the ledger")]
    SettlementHolderNotControlled {
        /// Current holder owner.
        owner: Address,
    },

    /// Checked 256-bit arithmetic failed.
    #[error("Arithmetic overflow")]
    ArithmeticOverflow,

    /// Exchange call failed.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// Settlement asset call failed.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Settlement holder call failed.
    #[error(transparent)]
    Holder(#[from] HolderError),
}

impl TokenError {
    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfiguration(_) | Self::ZeroAddress => ErrorKind::Configuration,
            Self::Unauthorized { .. } | Self::InvalidSignature | Self::InvalidVoucher(_) => {
                ErrorKind::Authorization
            }
            Self::SessionTimedOut { .. }
            | Self::CooldownActive { .. }
            | Self::PausedAndTimeLimitNotReached { .. }
            | Self::AlreadyPaused
            | Self::NotPaused => ErrorKind::Temporal,
            Self::WrongNonce { .. }
            | Self::InsufficientBalance { .. }
            | Self::InsufficientAllowance { .. }
            | Self::InsufficientSettlementReserve { .. }
            | Self::NothingToClaim { .. }
            | Self::NothingToConvert
            | Self::ZeroAmount
            | Self::ArithmeticOverflow => ErrorKind::Consistency,
            Self::SettlementHolderNotControlled { .. }
            | Self::Exchange(_)
            | Self::Asset(_)
            | Self::Holder(_) => ErrorKind::External,
        }
    }
}
