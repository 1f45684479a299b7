//! # Ledger Events
//!
//! Every state change appends one or more events. The log lives in the
//! journaled store, so a reverted call leaves no events behind.
//!
//! | Group | Events |
//! |-------|--------|
//! | ERC-20 | `Transfer`, `Approval` |
//! | Administration | `TaxesUpdated`, `TaxAllocationsUpdated`, `FeeExclusionUpdated`, ... |
//! | Reflections | `ReflectionTaxConverted`, `ReflectionsAccrued`, `ReflectionsClaimed` |
//! | Rewards | `RewardPointsPaid` |
//! | Pause | `Paused`, `Unpaused` |

use crate::domain::entities::PayoutAsset;
use crate::domain::tax::NonVenuePolicy;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, U256};

/// A recorded state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    // =========================================================================
    // ERC-20
    // =========================================================================
    /// Tokens moved. `from` is zero for the initial mint.
    Transfer {
        /// Sender.
        from: Address,
        /// Recipient.
        to: Address,
        /// Amount moved.
        value: U256,
    },
    /// Allowance set.
    Approval {
        /// Token owner.
        owner: Address,
        /// Approved spender.
        spender: Address,
        /// New allowance.
        value: U256,
    },

    // =========================================================================
    // ADMINISTRATION
    // =========================================================================
    /// Buy/sell rates changed.
    TaxesUpdated {
        /// Buy rate.
        buy_percent: u8,
        /// Sell rate.
        sell_percent: u8,
    },
    /// Liquidity/reflection split changed.
    TaxAllocationsUpdated {
        /// Liquidity weight.
        liquidity: u8,
        /// Reflection weight.
        reflection: u8,
    },
    /// Fee exemption toggled.
    FeeExclusionUpdated {
        /// Account concerned.
        account: Address,
        /// New exclusion state.
        excluded: bool,
    },
    /// Reflection exclusion toggled.
    ReflectionExclusionUpdated {
        /// Account concerned.
        account: Address,
        /// New exclusion state.
        excluded: bool,
    },
    /// Eligibility threshold changed.
    MinimumHoldingUpdated {
        /// New threshold.
        amount: U256,
    },
    /// Venue set changed.
    LiquidityVenueUpdated {
        /// Venue address.
        venue: Address,
        /// Whether it is now a venue.
        is_venue: bool,
    },
    /// Wallet-to-wallet rate policy changed.
    NonVenuePolicyUpdated {
        /// New policy.
        policy: NonVenuePolicy,
    },
    /// Conversion thresholds or toggles changed.
    ConversionSettingsUpdated {
        /// Reflection treasury threshold.
        reflection_swap_threshold: U256,
        /// Liquidity treasury threshold.
        liquidity_swap_threshold: U256,
        /// Opportunistic conversion enabled.
        auto_convert: bool,
        /// Opportunistic payout enabled.
        auto_distribute: bool,
    },
    /// LP token recipient changed.
    LiquidityRecipientUpdated {
        /// New LP recipient.
        recipient: Address,
    },
    /// Voucher signer changed.
    VoucherSignerUpdated {
        /// Previous signer.
        previous: Address,
        /// New signer.
        signer: Address,
    },
    /// Ledger ownership changed.
    OwnershipTransferred {
        /// Previous holder of the role.
        previous: Address,
        /// New owner.
        owner: Address,
    },
    /// Settlement holder ownership changed.
    HolderOwnershipTransferred {
        /// Previous holder of the role.
        previous: Address,
        /// New owner.
        owner: Address,
    },

    // =========================================================================
    // REFLECTIONS
    // =========================================================================
    /// Reflection treasury sold for settlement asset.
    ReflectionTaxConverted {
        /// Tokens sold.
        tokens_in: U256,
        /// Settlement asset received.
        settlement_out: U256,
    },
    /// Accumulator advanced, or funds carried forward.
    ReflectionsAccrued {
        /// Settlement amount accrued.
        amount: U256,
        /// Accumulator after the accrual.
        accumulated_reward_per_share: U256,
        /// Carried forward for lack of eligible holders.
        deferred: bool,
    },
    /// Liquidity treasury paired into the pool.
    LiquidityAdded {
        /// Tokens added.
        tokens: U256,
        /// Settlement asset added.
        settlement: U256,
        /// LP units minted.
        liquidity: U256,
    },
    /// Reflections paid to a holder.
    ReflectionsClaimed {
        /// Holder paid.
        holder: Address,
        /// Amount paid.
        amount: U256,
    },

    // =========================================================================
    // REWARDS AND PAUSE
    // =========================================================================
    /// Reward points paid by voucher or grant.
    RewardPointsPaid {
        /// Address paid.
        recipient: Address,
        /// Amount requested.
        amount: U256,
        /// Asset used.
        asset: PayoutAsset,
        /// Voucher nonce; `None` for grants.
        nonce: Option<U256>,
    },
    /// Transfers paused.
    Paused {
        /// Pause start.
        at: Timestamp,
    },
    /// Transfers resumed; `automatic` when a pause expired.
    Unpaused {
        /// Resume time.
        at: Timestamp,
        /// True when the pause expired.
        automatic: bool,
    },
}
