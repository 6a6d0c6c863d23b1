use crate::error::{DensityError, Result};
use crate::fee_tier::FeeTier;
use crate::price::Token;
use crate::serde_decimal;
use crate::tick_math::{get_sqrt_ratio_at_tick, MAX_SQRT_RATIO, MAX_TICK, MIN_SQRT_RATIO, MIN_TICK};
use alloy::primitives::U256;
use cosmwasm_schema::cw_serde;

/// Pool state the density chart is computed from, supplied per query.
#[cw_serde]
pub struct PoolSnapshot {
    pub address: String,
    #[schemars(with = "u32")]
    pub fee: FeeTier,
    // the current tick
    pub tick: i32,
    // the current price
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub sqrt_price_x96: U256,
    // the current in range liquidity
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub liquidity: u128,
    pub token0: Token,
    pub token1: Token,
}

impl PoolSnapshot {
    pub fn tick_spacing(&self) -> i32 {
        self.fee.tick_spacing()
    }

    /// The initializable tick at or below the current tick. May lie below
    /// `MIN_TICK` when the pool sits at the bottom of the domain.
    pub fn active_tick_index(&self) -> i32 {
        active_tick_index(self.tick, self.tick_spacing())
    }

    /// Checks that tick and sqrt price are inside the domain and agree with
    /// each other: `sqrt_ratio(tick) <= sqrt_price < sqrt_ratio(tick + 1)`.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TICK..=MAX_TICK).contains(&self.tick) {
            return Err(DensityError::TickOutOfBounds(self.tick));
        }
        if self.sqrt_price_x96 < MIN_SQRT_RATIO || self.sqrt_price_x96 >= MAX_SQRT_RATIO {
            return Err(DensityError::SqrtPriceOutOfBounds);
        }
        let below = get_sqrt_ratio_at_tick(self.tick)? > self.sqrt_price_x96;
        // MAX_TICK has no tick above, the bound check already caps the price
        let above = self.tick < MAX_TICK
            && get_sqrt_ratio_at_tick(self.tick + 1)? <= self.sqrt_price_x96;
        if below || above {
            return Err(DensityError::TickPriceMismatch(self.tick));
        }
        Ok(())
    }
}

pub fn active_tick_index(current_tick: i32, tick_spacing: i32) -> i32 {
    current_tick.div_euclid(tick_spacing) * tick_spacing
}
