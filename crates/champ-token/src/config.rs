//! # Ledger Configuration
//!
//! Deployment-time settings with CHAMP defaults. Everything except token
//! metadata and initial supply can later be changed by the owner.
//!
//! | Setting | Default |
//! |---------|---------|
//! | name / symbol / decimals | `CHAMP` / `CHP$` / 18 |
//! | initial supply | 1,000,000,000 tokens |
//! | buy / sell tax | 5% / 5% |
//! | liquidity / reflection split | 2 / 3 |
//! | minimum holding for reflections | 250 tokens |
//! | pause cooldown / max duration | 7 days / 3 days |
//! | swap thresholds | 100,000 tokens |

use crate::domain::entities::to_base_units;
use crate::domain::pause::PauseConfig;
use crate::domain::tax::TaxSchedule;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use shared_types::U256;

/// Default decimals.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Largest accepted decimals value.
pub const MAX_DECIMALS: u8 = 36;

/// Basis-point denominator for slippage.
pub const BPS_DENOMINATOR: u16 = 10_000;

// =============================================================================
// CONVERSION
// =============================================================================

/// When and how collected tax is converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Reflection treasury balance that triggers an opportunistic swap.
    pub reflection_swap_threshold: U256,
    /// Liquidity treasury balance that triggers an opportunistic add-liquidity.
    pub liquidity_swap_threshold: U256,
    /// Run conversions after non-buy transfers.
    pub auto_convert: bool,
    /// Pay sender and recipient reflections after each transfer.
    pub auto_distribute: bool,
    /// Accepted shortfall against the quote, in basis points.
    pub max_slippage_bps: u16,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            reflection_swap_threshold: to_base_units(100_000, DEFAULT_DECIMALS),
            liquidity_swap_threshold: to_base_units(100_000, DEFAULT_DECIMALS),
            auto_convert: true,
            auto_distribute: false,
            max_slippage_bps: 500,
        }
    }
}

impl ConversionConfig {
    /// Rejects slippage above 100%.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_slippage_bps > BPS_DENOMINATOR {
            return Err(ConfigError::SlippageOutOfRange(self.max_slippage_bps));
        }
        Ok(())
    }

    /// Lowest acceptable output for `quote`.
    #[must_use]
    pub fn minimum_output(&self, quote: U256) -> U256 {
        let kept = u64::from(BPS_DENOMINATOR.saturating_sub(self.max_slippage_bps));
        let den = U256::from(BPS_DENOMINATOR);
        (quote / den) * U256::from(kept) + (quote % den) * U256::from(kept) / den
    }
}

// =============================================================================
// TOKEN CONFIG
// =============================================================================

/// Full deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Token name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Decimal places.
    pub decimals: u8,
    /// Minted to the owner at deployment, in base units.
    pub initial_supply: U256,
    /// Rates and split.
    pub taxes: TaxSchedule,
    /// Reflection eligibility threshold, in base units.
    pub minimum_holding_for_reflection: U256,
    /// Pause timing.
    pub pause: PauseConfig,
    /// Tax conversion.
    pub conversion: ConversionConfig,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "CHAMP".to_string(),
            symbol: "CHP$".to_string(),
            decimals: DEFAULT_DECIMALS,
            initial_supply: to_base_units(1_000_000_000, DEFAULT_DECIMALS),
            taxes: TaxSchedule::default(),
            minimum_holding_for_reflection: to_base_units(250, DEFAULT_DECIMALS),
            pause: PauseConfig::default(),
            conversion: ConversionConfig::default(),
        }
    }
}

impl TokenConfig {
    /// Parse from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::DecimalsOutOfRange(self.decimals));
        }
        self.taxes.validate()?;
        self.pause.validate()?;
        self.conversion.validate()
    }

    /// `whole` tokens in base units.
    #[must_use]
    pub fn units(&self, whole: u64) -> U256 {
        to_base_units(whole, self.decimals)
    }
}
