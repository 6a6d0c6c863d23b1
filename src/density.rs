//! Token reserves per bucket of the liquidity walk.
//!
//! Each bucket is simulated as a one-range pool holding its active liquidity,
//! with the bucket's own tick and a mirrored tick one spacing below it. Draining
//! token1 down to the previous bucket's price gives the reserves locked between
//! the two. The results are then shifted one bucket left so every bucket shows
//! the reserves of the range that starts at it.

use crate::error::{DensityError, Result};
use crate::fee_tier::FeeTier;
use crate::price::{to_uint256, FixedPrice, Token};
use crate::serde_decimal;
use crate::swap::{swap, Slot0, MAX_SWAP_INPUT};
use crate::tick::{InitializedTick, TickSet};
use crate::tick_math::{clamp_tick, get_sqrt_ratio_at_tick, MIN_SQRT_RATIO};
use crate::walk::{PoolTickData, TickProcessed};
use alloy::primitives::U256;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::Decimal256;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cw_serde]
pub struct ProcessedBucket {
    pub tick_index: i32,
    pub is_current: bool,
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub liquidity_gross: u128,
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub liquidity_net: i128,
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub liquidity_active: u128,
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub price0: FixedPrice,
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub price1: FixedPrice,
    pub tvl_token0: Decimal256,
    pub tvl_token1: Decimal256,
}

/// Buckets ascending by tick index, exactly one of them current.
#[cw_serde]
pub struct BucketSequence {
    pub buckets: Vec<ProcessedBucket>,
    #[schemars(with = "u32")]
    pub fee_tier: FeeTier,
    pub tick_spacing: i32,
    pub active_tick_index: i32,
}

impl BucketSequence {
    pub fn current(&self) -> Option<&ProcessedBucket> {
        self.buckets.iter().find(|bucket| bucket.is_current)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Reserves {
    tvl_token0: Decimal256,
    tvl_token1: Decimal256,
}

impl Reserves {
    const ZERO: Reserves = Reserves {
        tvl_token0: Decimal256::zero(),
        tvl_token1: Decimal256::zero(),
    };
}

fn min_price_limit() -> U256 {
    MIN_SQRT_RATIO + U256::from(1u8)
}

// Reserves between `tick` and `lower`, or down to the bottom of the domain.
fn bucket_reserves(
    tick: &TickProcessed,
    lower: Option<&TickProcessed>,
    tick_spacing: i32,
    fee: FeeTier,
    token1: &Token,
) -> Result<Reserves> {
    let sqrt_price = get_sqrt_ratio_at_tick(clamp_tick(tick.tick_index))?;
    if sqrt_price <= min_price_limit() {
        return Ok(Reserves::ZERO);
    }
    let sqrt_price_limit = match lower {
        Some(lower) => {
            Some(get_sqrt_ratio_at_tick(clamp_tick(lower.tick_index))?.max(min_price_limit()))
        }
        None => None,
    };

    let mirrored_net = tick
        .liquidity_net
        .checked_neg()
        .ok_or(DensityError::LiquiditySub)?;
    let schedule: TickSet = [
        InitializedTick::new(tick.tick_index - tick_spacing, tick.liquidity_gross, mirrored_net),
        InitializedTick::new(tick.tick_index, tick.liquidity_gross, tick.liquidity_net),
    ]
    .into_iter()
    .collect();
    let slot0 = Slot0 {
        sqrt_price,
        liquidity: tick.liquidity_active,
        tick: clamp_tick(tick.tick_index),
    };

    let result = swap(
        &schedule,
        tick_spacing,
        true,
        MAX_SWAP_INPUT,
        sqrt_price_limit,
        &slot0,
        fee.pips(),
    )?;
    trace!(tick_index = tick.tick_index, amount_out = %result.amount_out, "simulated bucket");

    let tvl_token1 =
        Decimal256::from_atomics(to_uint256(result.amount_out), u32::from(token1.decimals))
            .map_err(|_| DensityError::DecimalRange)?;
    let tvl_token0 = tvl_token1
        .checked_mul(tick.price1.decimal())
        .unwrap_or(Decimal256::MAX);
    Ok(Reserves {
        tvl_token0,
        tvl_token1,
    })
}

fn raw_reserves(
    data: &PoolTickData,
    token1: &Token,
    parallel: bool,
) -> Result<Vec<Reserves>> {
    let ticks = &data.ticks_processed;
    let reserves_at = |i: usize| {
        let lower = i.checked_sub(1).map(|j| &ticks[j]);
        bucket_reserves(&ticks[i], lower, data.tick_spacing, data.fee_tier, token1)
    };

    #[cfg(feature = "parallel")]
    if parallel {
        return (0..ticks.len()).into_par_iter().map(reserves_at).collect();
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..ticks.len()).map(reserves_at).collect()
}

/// Attaches reserves to every tick of `data`. `token1` is the pool's token1,
/// whose decimals scale the simulated amounts.
pub fn assemble_buckets(
    data: &PoolTickData,
    token1: &Token,
    parallel: bool,
) -> Result<BucketSequence> {
    let mut reserves = raw_reserves(data, token1, parallel)?;
    // bucket i shows the range [i, i + 1], the last one keeps its own value
    if reserves.len() > 1 {
        reserves.copy_within(1.., 0);
    }

    let buckets: Vec<ProcessedBucket> = data
        .ticks_processed
        .iter()
        .zip(reserves)
        .map(|(tick, reserves)| ProcessedBucket {
            tick_index: tick.tick_index,
            is_current: tick.tick_index == data.active_tick_index,
            liquidity_gross: tick.liquidity_gross,
            liquidity_net: tick.liquidity_net,
            liquidity_active: tick.liquidity_active,
            price0: tick.price0,
            price1: tick.price1,
            tvl_token0: reserves.tvl_token0,
            tvl_token1: reserves.tvl_token1,
        })
        .collect();
    debug!(buckets = buckets.len(), parallel, "assembled density buckets");

    Ok(BucketSequence {
        buckets,
        fee_tier: data.fee_tier,
        tick_spacing: data.tick_spacing,
        active_tick_index: data.active_tick_index,
    })
}
