//! Reconstructs active liquidity around the current price from the sparse set
//! of initialized ticks.
//!
//! Starting from the active tick the walk steps one tick spacing at a time in
//! each direction. Going up, a tick's net liquidity applies at the tick itself.
//! Going down, the net of the tick just left is removed, so the change shows
//! one bucket later. Both rules yield the liquidity in range
//! `[tick_index, tick_index + tick_spacing)` for every bucket.

use crate::error::Result;
use crate::fee_tier::FeeTier;
use crate::liquidity_math::{add_delta, sub_delta};
use crate::pool::PoolSnapshot;
use crate::price::{tick_to_price, FixedPrice, Token};
use crate::serde_decimal;
use crate::tick::TickSet;
use crate::tick_math::{clamp_tick, MAX_TICK, MIN_TICK};
use cosmwasm_schema::cw_serde;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A tick on the walk with its gross/net liquidity (zero when not initialized)
/// and the liquidity active from it up to the next tick.
#[cw_serde]
pub struct TickProcessed {
    pub tick_index: i32,
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
}

impl TickProcessed {
    fn at(
        ticks: &TickSet,
        token0: &Token,
        token1: &Token,
        tick_index: i32,
        liquidity_active: u128,
    ) -> Result<Self> {
        // prices never leave the domain even when the index does
        let price_index = clamp_tick(tick_index);
        let (liquidity_gross, liquidity_net) = ticks
            .get(tick_index)
            .map_or((0, 0), |tick| (tick.liquidity_gross, tick.liquidity_net));
        Ok(Self {
            tick_index,
            liquidity_gross,
            liquidity_net,
            liquidity_active,
            price0: tick_to_price(token0, token1, price_index)?,
            price1: tick_to_price(token1, token0, price_index)?,
        })
    }
}

#[cw_serde]
pub struct PoolTickData {
    pub ticks_processed: Vec<TickProcessed>,
    #[schemars(with = "u32")]
    pub fee_tier: FeeTier,
    pub tick_spacing: i32,
    pub active_tick_index: i32,
}

/// Up to `num_surrounding_ticks` ticks above or below `active`, ordered by
/// ascending tick index. Stops early at the edge of the tick domain.
pub fn compute_surrounding_ticks(
    active: &TickProcessed,
    ticks: &TickSet,
    token0: &Token,
    token1: &Token,
    tick_spacing: i32,
    num_surrounding_ticks: usize,
    direction: Direction,
) -> Result<Vec<TickProcessed>> {
    let mut previous_index = active.tick_index;
    let mut previous_active = active.liquidity_active;
    let mut previous_net = active.liquidity_net;

    let mut processed = Vec::with_capacity(num_surrounding_ticks);
    for _ in 0..num_surrounding_ticks {
        let tick_index = match direction {
            Direction::Asc => previous_index + tick_spacing,
            Direction::Desc => previous_index - tick_spacing,
        };
        if !(MIN_TICK..=MAX_TICK).contains(&tick_index) {
            debug!(
                ?direction,
                tick_index,
                emitted = processed.len(),
                "surrounding tick walk stopped at the tick domain bound"
            );
            break;
        }

        let liquidity_active = match direction {
            Direction::Asc => match ticks.get(tick_index) {
                Some(initialized) => add_delta(previous_active, initialized.liquidity_net)?,
                None => previous_active,
            },
            Direction::Desc => sub_delta(previous_active, previous_net)?,
        };
        let current = TickProcessed::at(ticks, token0, token1, tick_index, liquidity_active)?;

        previous_index = current.tick_index;
        previous_active = current.liquidity_active;
        previous_net = current.liquidity_net;
        processed.push(current);
    }

    if direction == Direction::Desc {
        processed.reverse();
    }
    Ok(processed)
}

/// The active tick of `pool` surrounded by `num_surrounding_ticks` ticks on
/// each side, ascending by tick index.
pub fn ticks_surrounding_price(
    pool: &PoolSnapshot,
    ticks: &TickSet,
    num_surrounding_ticks: usize,
) -> Result<PoolTickData> {
    let tick_spacing = pool.tick_spacing();
    let active_tick_index = pool.active_tick_index();
    let active = TickProcessed::at(
        ticks,
        &pool.token0,
        &pool.token1,
        active_tick_index,
        pool.liquidity,
    )?;

    let walk = |direction| {
        compute_surrounding_ticks(
            &active,
            ticks,
            &pool.token0,
            &pool.token1,
            tick_spacing,
            num_surrounding_ticks,
            direction,
        )
    };
    let subsequent_ticks = walk(Direction::Asc)?;
    let mut ticks_processed = walk(Direction::Desc)?;
    ticks_processed.reserve(subsequent_ticks.len() + 1);
    ticks_processed.push(active);
    ticks_processed.extend(subsequent_ticks);

    Ok(PoolTickData {
        ticks_processed,
        fee_tier: pool.fee,
        tick_spacing,
        active_tick_index,
    })
}
