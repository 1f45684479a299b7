//! # Constant-Product Exchange Adapter
//!
//! An in-memory `x * y = k` pair between the ledger token and the settlement
//! asset with a 0.3% input fee. Token reserves are tracked here; the ledger
//! moves the tokens to the pair address before calling in. Settlement
//! reserves are real balances of the pair in the settlement asset.

use crate::errors::ExchangeError;
use crate::ports::outbound::{Exchange, LiquidityReceipt, SettlementAsset};
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Fee numerator out of [`FEE_DENOMINATOR`] kept by the input side.
const FEE_RETAINED: u64 = 997;
const FEE_DENOMINATOR: u64 = 1_000;

#[derive(Debug, Default)]
struct PoolState {
    token_reserve: U256,
    settlement_reserve: U256,
    lp_supply: U256,
    lp_balances: HashMap<Address, U256>,
}

/// In-memory token/settlement pair.
#[derive(Debug)]
pub struct ConstantProductExchange<S: SettlementAsset> {
    pair: Address,
    token: Address,
    asset: Arc<S>,
    pool: RwLock<PoolState>,
}

impl<S: SettlementAsset> ConstantProductExchange<S> {
    /// Pair at `pair` trading `token` against `asset`.
    pub fn new(pair: Address, token: Address, asset: Arc<S>) -> Self {
        Self {
            pair,
            token,
            asset,
            pool: RwLock::new(PoolState::default()),
        }
    }

    /// `(token_reserve, settlement_reserve)`.
    #[must_use]
    pub fn reserves(&self) -> (U256, U256) {
        let pool = self.pool.read();
        (pool.token_reserve, pool.settlement_reserve)
    }

    /// LP units held by `account`.
    #[must_use]
    pub fn lp_balance_of(&self, account: Address) -> U256 {
        self.pool
            .read()
            .lp_balances
            .get(&account)
            .copied()
            .unwrap_or_default()
    }

    /// Records initial reserves. The caller funds the pair in both assets.
    pub fn seed(&self, token_amount: U256, settlement_amount: U256, lp_recipient: Address) {
        let mut pool = self.pool.write();
        pool.token_reserve = pool.token_reserve.saturating_add(token_amount);
        pool.settlement_reserve = pool.settlement_reserve.saturating_add(settlement_amount);
        let minted = (token_amount.saturating_mul(settlement_amount)).integer_sqrt();
        pool.lp_supply = pool.lp_supply.saturating_add(minted);
        *pool.lp_balances.entry(lp_recipient).or_default() += minted;
    }

    /// Reserves ordered by `path`: `(reserve_in, reserve_out)`.
    fn ordered_reserves(&self, path: &[Address]) -> Result<(U256, U256), ExchangeError> {
        let settlement = self.asset.asset_address();
        let pool = self.pool.read();
        match path {
            [a, b] if *a == self.token && *b == settlement => {
                Ok((pool.token_reserve, pool.settlement_reserve))
            }
            [a, b] if *a == settlement && *b == self.token => {
                Ok((pool.settlement_reserve, pool.token_reserve))
            }
            _ => Err(ExchangeError::InvalidPath),
        }
    }

    fn token_path(&self) -> [Address; 2] {
        [self.token, self.asset.asset_address()]
    }
}

fn amount_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> Result<U256, ExchangeError> {
    if amount_in.is_zero() {
        return Err(ExchangeError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(ExchangeError::InsufficientLiquidity);
    }
    let with_fee = amount_in
        .checked_mul(U256::from(FEE_RETAINED))
        .ok_or(ExchangeError::Overflow)?;
    let numerator = with_fee
        .checked_mul(reserve_out)
        .ok_or(ExchangeError::Overflow)?;
    let denominator = reserve_in
        .checked_mul(U256::from(FEE_DENOMINATOR))
        .and_then(|d| d.checked_add(with_fee))
        .ok_or(ExchangeError::Overflow)?;
    Ok(numerator / denominator)
}

fn amount_in(amount_out: U256, reserve_in: U256, reserve_out: U256) -> Result<U256, ExchangeError> {
    if amount_out.is_zero() {
        return Err(ExchangeError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || amount_out >= reserve_out {
        return Err(ExchangeError::InsufficientLiquidity);
    }
    let numerator = reserve_in
        .checked_mul(amount_out)
        .and_then(|n| n.checked_mul(U256::from(FEE_DENOMINATOR)))
        .ok_or(ExchangeError::Overflow)?;
    let denominator = (reserve_out - amount_out)
        .checked_mul(U256::from(FEE_RETAINED))
        .ok_or(ExchangeError::Overflow)?;
    Ok(numerator / denominator + U256::one())
}

/// LP units for a deposit against the given reserves.
fn minted_liquidity(
    lp_supply: U256,
    token_reserve: U256,
    settlement_reserve: U256,
    token_amount: U256,
    settlement_amount: U256,
) -> Result<U256, ExchangeError> {
    let liquidity = if lp_supply.is_zero() {
        token_amount
            .checked_mul(settlement_amount)
            .ok_or(ExchangeError::Overflow)?
            .integer_sqrt()
    } else {
        let by_token = token_amount
            .checked_mul(lp_supply)
            .ok_or(ExchangeError::Overflow)?
            / token_reserve.max(U256::one());
        let by_settlement = settlement_amount
            .checked_mul(lp_supply)
            .ok_or(ExchangeError::Overflow)?
            / settlement_reserve.max(U256::one());
        by_token.min(by_settlement)
    };
    if liquidity.is_zero() {
        return Err(ExchangeError::InsufficientLiquidityMinted);
    }
    Ok(liquidity)
}

impl<S: SettlementAsset> Exchange for ConstantProductExchange<S> {
    fn pair_address(&self) -> Address {
        self.pair
    }

    fn get_amounts_out(
        &self,
        amount_in_value: U256,
        path: &[Address],
    ) -> Result<Vec<U256>, ExchangeError> {
        let (reserve_in, reserve_out) = self.ordered_reserves(path)?;
        Ok(vec![
            amount_in_value,
            amount_out(amount_in_value, reserve_in, reserve_out)?,
        ])
    }

    fn get_amounts_in(
        &self,
        amount_out_value: U256,
        path: &[Address],
    ) -> Result<Vec<U256>, ExchangeError> {
        let (reserve_in, reserve_out) = self.ordered_reserves(path)?;
        Ok(vec![
            amount_in(amount_out_value, reserve_in, reserve_out)?,
            amount_out_value,
        ])
    }

    fn swap_exact_tokens_for_settlement(
        &self,
        amount_in_value: U256,
        amount_out_min: U256,
        to: Address,
    ) -> Result<U256, ExchangeError> {
        let (reserve_in, reserve_out) = self.ordered_reserves(&self.token_path())?;
        let out = amount_out(amount_in_value, reserve_in, reserve_out)?;
        if out.is_zero() || out < amount_out_min {
            return Err(ExchangeError::InsufficientOutputAmount {
                minimum: amount_out_min,
                quoted: out,
            });
        }

        self.asset.transfer(self.pair, to, out)?;

        let mut pool = self.pool.write();
        pool.token_reserve = pool
            .token_reserve
            .checked_add(amount_in_value)
            .ok_or(ExchangeError::Overflow)?;
        pool.settlement_reserve = pool.settlement_reserve.saturating_sub(out);
        debug!(tokens_in = %amount_in_value, settlement_out = %out, "swap executed");
        Ok(out)
    }

    fn add_liquidity(
        &self,
        token_amount: U256,
        settlement_amount: U256,
        settlement_from: Address,
        lp_recipient: Address,
    ) -> Result<LiquidityReceipt, ExchangeError> {
        if token_amount.is_zero() || settlement_amount.is_zero() {
            return Err(ExchangeError::InsufficientInputAmount);
        }

        let liquidity = {
            let pool = self.pool.read();
            minted_liquidity(
                pool.lp_supply,
                pool.token_reserve,
                pool.settlement_reserve,
                token_amount,
                settlement_amount,
            )?
        };

        self.asset
            .transfer(settlement_from, self.pair, settlement_amount)?;

        let mut pool = self.pool.write();
        pool.token_reserve = pool.token_reserve.saturating_add(token_amount);
        pool.settlement_reserve = pool.settlement_reserve.saturating_add(settlement_amount);
        pool.lp_supply = pool.lp_supply.saturating_add(liquidity);
        *pool.lp_balances.entry(lp_recipient).or_default() += liquidity;

        Ok(LiquidityReceipt {
            token_amount,
            settlement_amount,
            liquidity,
        })
    }

    fn swap_and_add_liquidity(
        &self,
        swap_amount: U256,
        amount_out_min: U256,
        token_amount: U256,
        lp_recipient: Address,
    ) -> Result<LiquidityReceipt, ExchangeError> {
        if token_amount.is_zero() {
            return Err(ExchangeError::InsufficientInputAmount);
        }

        let mut pool = self.pool.write();
        let settlement = amount_out(swap_amount, pool.token_reserve, pool.settlement_reserve)?;
        if settlement.is_zero() || settlement < amount_out_min {
            return Err(ExchangeError::InsufficientOutputAmount {
                minimum: amount_out_min,
                quoted: settlement,
            });
        }

        // Reserves between the two legs. Nothing is written until both pass.
        let token_reserve = pool
            .token_reserve
            .checked_add(swap_amount)
            .ok_or(ExchangeError::Overflow)?;
        let settlement_reserve = pool.settlement_reserve.saturating_sub(settlement);
        let liquidity = minted_liquidity(
            pool.lp_supply,
            token_reserve,
            settlement_reserve,
            token_amount,
            settlement,
        )?;
        let final_token_reserve = token_reserve
            .checked_add(token_amount)
            .ok_or(ExchangeError::Overflow)?;
        let lp_supply = pool
            .lp_supply
            .checked_add(liquidity)
            .ok_or(ExchangeError::Overflow)?;

        // The swap output is deposited straight back, so the settlement
        // reserve and the pair's asset balance are unchanged.
        pool.token_reserve = final_token_reserve;
        pool.lp_supply = lp_supply;
        *pool.lp_balances.entry(lp_recipient).or_default() += liquidity;
        debug!(
            swapped = %swap_amount,
            %settlement,
            paired = %token_amount,
            %liquidity,
            "swap and add liquidity"
        );

        Ok(LiquidityReceipt {
            token_amount,
            settlement_amount: settlement,
            liquidity,
        })
    }
}
