//! # Tax Calculator
//!
//! Pure transfer-tax math. Direction comes from the venue set, the rate from
//! the schedule, and the collected tax is split between the liquidity and
//! reflection treasuries with the rounding remainder going to reflections.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use std::collections::BTreeSet;

/// Hard cap on buy and sell rates, in percent.
pub const MAX_TAX_PERCENT: u8 = 10;

/// Denominator for percentage rates.
pub const PERCENT_DENOMINATOR: u64 = 100;

// =============================================================================
// DIRECTION
// =============================================================================

/// Rate applied to transfers where neither side is a venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonVenuePolicy {
    /// Charge the sell rate.
    #[default]
    Sell,
    /// Charge the buy rate.
    Buy,
    /// No tax.
    Untaxed,
}

/// Classification of a transfer relative to the liquidity venues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    /// Tokens leave a venue.
    Buy,
    /// Tokens enter a venue.
    Sell,
    /// Neither side is a venue.
    WalletToWallet,
}

/// Classifies a transfer. A transfer out of a venue is a buy even if the
/// recipient is also a venue.
#[must_use]
pub fn classify(from: &Address, to: &Address, venues: &BTreeSet<Address>) -> TransferDirection {
    if venues.contains(from) {
        TransferDirection::Buy
    } else if venues.contains(to) {
        TransferDirection::Sell
    } else {
        TransferDirection::WalletToWallet
    }
}

// =============================================================================
// SCHEDULE
// =============================================================================

/// Rates and the liquidity/reflection split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSchedule {
    /// Percent charged on buys.
    pub buy_percent: u8,
    /// Percent charged on sells.
    pub sell_percent: u8,
    /// Weight of the liquidity share.
    pub liquidity_allocation: u8,
    /// Weight of the reflection share.
    pub reflection_allocation: u8,
    /// Rate used for wallet-to-wallet transfers.
    pub non_venue_policy: NonVenuePolicy,
}

impl Default for TaxSchedule {
    fn default() -> Self {
        Self {
            buy_percent: 5,
            sell_percent: 5,
            liquidity_allocation: 2,
            reflection_allocation: 3,
            non_venue_policy: NonVenuePolicy::Sell,
        }
    }
}

impl TaxSchedule {
    /// Checks rates and allocations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_rates(self.buy_percent, self.sell_percent)?;
        validate_allocations(self.liquidity_allocation, self.reflection_allocation)
    }

    /// Replaces both rates, or nothing.
    pub fn set_rates(&mut self, buy: u8, sell: u8) -> Result<(), ConfigError> {
        validate_rates(buy, sell)?;
        self.buy_percent = buy;
        self.sell_percent = sell;
        Ok(())
    }

    /// Replaces both allocation weights, or nothing.
    pub fn set_allocations(&mut self, liquidity: u8, reflection: u8) -> Result<(), ConfigError> {
        validate_allocations(liquidity, reflection)?;
        self.liquidity_allocation = liquidity;
        self.reflection_allocation = reflection;
        Ok(())
    }

    /// Percent charged for `direction`.
    #[must_use]
    pub fn rate_for(&self, direction: TransferDirection) -> u8 {
        match direction {
            TransferDirection::Buy => self.buy_percent,
            TransferDirection::Sell => self.sell_percent,
            TransferDirection::WalletToWallet => match self.non_venue_policy {
                NonVenuePolicy::Sell => self.sell_percent,
                NonVenuePolicy::Buy => self.buy_percent,
                NonVenuePolicy::Untaxed => 0,
            },
        }
    }
}

fn validate_rates(buy: u8, sell: u8) -> Result<(), ConfigError> {
    for requested in [buy, sell] {
        if requested > MAX_TAX_PERCENT {
            return Err(ConfigError::TaxExceedsLimit {
                requested,
                max: MAX_TAX_PERCENT,
            });
        }
    }
    Ok(())
}

fn validate_allocations(liquidity: u8, reflection: u8) -> Result<(), ConfigError> {
    let sum = u16::from(liquidity) + u16::from(reflection);
    if sum == 0 || sum > 100 {
        return Err(ConfigError::InvalidAllocation {
            liquidity,
            reflection,
        });
    }
    Ok(())
}

// =============================================================================
// COMPUTATION
// =============================================================================

/// How one transfer amount is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBreakdown {
    /// Amount debited from the sender.
    pub gross_amount: U256,
    /// Amount credited to the recipient.
    pub net_amount: U256,
    /// Credited to the liquidity treasury.
    pub liquidity_tax: U256,
    /// Credited to the reflection treasury.
    pub reflection_tax: U256,
    /// Classification used.
    pub direction: TransferDirection,
    /// Rate applied, zero when exempt.
    pub rate_percent: u8,
}

impl TaxBreakdown {
    /// Whole amount passes through.
    #[must_use]
    pub fn untaxed(amount: U256, direction: TransferDirection) -> Self {
        Self {
            gross_amount: amount,
            net_amount: amount,
            liquidity_tax: U256::zero(),
            reflection_tax: U256::zero(),
            direction,
            rate_percent: 0,
        }
    }

    /// Liquidity plus reflection tax.
    #[must_use]
    pub fn total_tax(&self) -> U256 {
        self.liquidity_tax + self.reflection_tax
    }
}

/// `floor(value * numerator / denominator)` without forming `value * numerator`.
fn mul_div_small(value: U256, numerator: u64, denominator: u64) -> U256 {
    let den = U256::from(denominator);
    let num = U256::from(numerator);
    (value / den) * num + (value % den) * num / den
}

/// Splits `amount` according to `schedule`.
#[must_use]
pub fn compute_tax(
    schedule: &TaxSchedule,
    amount: U256,
    direction: TransferDirection,
    exempt: bool,
) -> TaxBreakdown {
    let rate = schedule.rate_for(direction);
    if exempt || rate == 0 || amount.is_zero() {
        return TaxBreakdown::untaxed(amount, direction);
    }

    let total_tax = mul_div_small(amount, u64::from(rate), PERCENT_DENOMINATOR);
    let weights =
        u64::from(schedule.liquidity_allocation) + u64::from(schedule.reflection_allocation);
    let liquidity_tax = mul_div_small(
        total_tax,
        u64::from(schedule.liquidity_allocation),
        weights,
    );

    TaxBreakdown {
        gross_amount: amount,
        net_amount: amount - total_tax,
        liquidity_tax,
        reflection_tax: total_tax - liquidity_tax,
        direction,
        rate_percent: rate,
    }
}
