use crate::error::{DensityError, Result};
use crate::liquidity_math;
use crate::swap_math;
use crate::tick::TickSet;
use crate::tick_math;
use alloy::primitives::U256;

/// Input used to drain a range: the largest amount of token0 a position can hold.
pub const MAX_SWAP_INPUT: U256 = U256::from_limbs([u64::MAX, u64::MAX, 0, 0]);

// the current state of the pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot0 {
    // the current price
    pub sqrt_price: U256,
    pub liquidity: u128,
    // the current tick
    pub tick: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapResult {
    pub amount_in: U256,
    pub amount_out: U256,
    pub fee_amount: U256,
    pub sqrt_price_after: U256,
    pub liquidity_after: u128,
    pub tick_after: i32,
}

// the top level state of the swap
struct SwapState {
    amount_remaining: U256,
    amount_in: U256,
    amount_out: U256,
    fee_amount: U256,
    sqrt_price_x96: U256,
    tick: i32,
    liquidity: u128,
}

#[derive(Default)]
struct StepComputations {
    sqrt_price_start_x96: U256,
    tick_next: i32,
    initialized: bool,
    sqrt_price_next_x96: U256,
    amount_in: U256,
    amount_out: U256,
    fee_amount: U256,
}

/// Exact-input swap of `amount_in` against `ticks`, crossing initialized ticks
/// until the input is spent or `sqrt_price_limit` is reached. Without a limit the
/// swap may run to the edge of the price domain.
///
/// Liquidity that is zero along a segment simply yields no output for it.
pub fn swap(
    ticks: &TickSet,
    tick_spacing: i32,
    zero_for_one: bool,
    amount_in: U256,
    sqrt_price_limit: Option<U256>,
    slot0: &Slot0,
    fee: u32,
) -> Result<SwapResult> {
    let sqrt_price_limit = match sqrt_price_limit {
        Some(limit) => limit,
        None if zero_for_one => tick_math::MIN_SQRT_RATIO + U256::from(1u8),
        None => tick_math::MAX_SQRT_RATIO - U256::from(1u8),
    };
    if sqrt_price_limit <= tick_math::MIN_SQRT_RATIO || sqrt_price_limit >= tick_math::MAX_SQRT_RATIO
    {
        return Err(DensityError::PriceLimitOutOfRange);
    }
    let limit_ahead = if zero_for_one {
        sqrt_price_limit < slot0.sqrt_price
    } else {
        sqrt_price_limit > slot0.sqrt_price
    };
    if !limit_ahead {
        return Err(DensityError::SimulationUnderflow);
    }

    let mut state = SwapState {
        amount_remaining: amount_in,
        amount_in: U256::ZERO,
        amount_out: U256::ZERO,
        fee_amount: U256::ZERO,
        sqrt_price_x96: slot0.sqrt_price,
        tick: slot0.tick,
        liquidity: slot0.liquidity,
    };
    while !state.amount_remaining.is_zero() && state.sqrt_price_x96 != sqrt_price_limit {
        let mut step = StepComputations {
            sqrt_price_start_x96: state.sqrt_price_x96,
            ..Default::default()
        };
        (step.tick_next, step.initialized) =
            ticks.next_initialized_tick_within_one_word(state.tick, tick_spacing, zero_for_one);
        step.tick_next = tick_math::clamp_tick(step.tick_next);
        step.sqrt_price_next_x96 = tick_math::get_sqrt_ratio_at_tick(step.tick_next)?;

        let hit_to_limit = if zero_for_one {
            step.sqrt_price_next_x96 < sqrt_price_limit
        } else {
            step.sqrt_price_next_x96 > sqrt_price_limit
        };
        let target_price = if hit_to_limit {
            sqrt_price_limit
        } else {
            step.sqrt_price_next_x96
        };
        // swap to the target tick, price limit, or until the input is exhausted
        (
            state.sqrt_price_x96,
            step.amount_in,
            step.amount_out,
            step.fee_amount,
        ) = swap_math::compute_swap_step(
            state.sqrt_price_x96,
            target_price,
            state.liquidity,
            state.amount_remaining,
            fee,
        )?;
        state.amount_remaining -= step.amount_in + step.fee_amount;
        state.amount_in += step.amount_in;
        state.amount_out += step.amount_out;
        state.fee_amount += step.fee_amount;

        if state.sqrt_price_x96 == step.sqrt_price_next_x96 {
            if step.initialized {
                let liquidity_net = ticks
                    .get(step.tick_next)
                    .map_or(0, |tick| tick.liquidity_net);
                // crossing downward removes what crossing upward added
                state.liquidity = if zero_for_one {
                    liquidity_math::sub_delta(state.liquidity, liquidity_net)?
                } else {
                    liquidity_math::add_delta(state.liquidity, liquidity_net)?
                };
            }
            state.tick = if zero_for_one {
                step.tick_next - 1
            } else {
                step.tick_next
            };
        } else if state.sqrt_price_x96 != step.sqrt_price_start_x96 {
            state.tick = tick_math::get_tick_at_sqrt_ratio(state.sqrt_price_x96)?;
        }
    }

    Ok(SwapResult {
        amount_in: state.amount_in,
        amount_out: state.amount_out,
        fee_amount: state.fee_amount,
        sqrt_price_after: state.sqrt_price_x96,
        liquidity_after: state.liquidity,
        tick_after: state.tick,
    })
}
