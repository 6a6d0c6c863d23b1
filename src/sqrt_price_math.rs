use crate::error::{DensityError, Result};
use crate::full_math::{div_rounding_up, mul_div, mul_div_rounding_up};
use crate::tick_math::Q96;
use alloy::primitives::U256;

const RESOLUTION: usize = 96;

fn sorted(a: U256, b: U256) -> (U256, U256) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

/// Token0 amount between two sqrt prices: L * (sqrt_upper - sqrt_lower) / (sqrt_upper * sqrt_lower).
pub fn get_amount0_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    if sqrt_ratio_lower.is_zero() {
        return Err(DensityError::SqrtPriceIsZero);
    }

    let numerator1 = U256::from(liquidity) << RESOLUTION;
    let numerator2 = sqrt_ratio_upper - sqrt_ratio_lower;

    if round_up {
        div_rounding_up(
            mul_div_rounding_up(numerator1, numerator2, sqrt_ratio_upper)?,
            sqrt_ratio_lower,
        )
    } else {
        Ok(mul_div(numerator1, numerator2, sqrt_ratio_upper)? / sqrt_ratio_lower)
    }
}

/// Token1 amount between two sqrt prices: L * (sqrt_upper - sqrt_lower).
pub fn get_amount1_delta(
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: u128,
    round_up: bool,
) -> Result<U256> {
    let (sqrt_ratio_lower, sqrt_ratio_upper) = sorted(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let liquidity = U256::from(liquidity);
    if round_up {
        mul_div_rounding_up(liquidity, sqrt_ratio_upper - sqrt_ratio_lower, Q96)
    } else {
        mul_div(liquidity, sqrt_ratio_upper - sqrt_ratio_lower, Q96)
    }
}

fn check_u160(sqrt_price_x96: U256) -> Result<U256> {
    if sqrt_price_x96 >> 160 != U256::ZERO {
        return Err(DensityError::SqrtPriceOverflow);
    }
    Ok(sqrt_price_x96)
}

// Always rounds up so the price moves no further than the input pays for.
fn get_next_sqrt_price_from_amount0_rounding_up(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
) -> Result<U256> {
    if amount.is_zero() {
        return Ok(sqrt_price_x96);
    }
    let numerator1 = U256::from(liquidity) << RESOLUTION;

    if let Some(product) = amount.checked_mul(sqrt_price_x96) {
        if let Some(denominator) = numerator1.checked_add(product) {
            return mul_div_rounding_up(numerator1, sqrt_price_x96, denominator);
        }
    }
    // product overflowed, fall back to the less precise form
    div_rounding_up(numerator1, (numerator1 / sqrt_price_x96).saturating_add(amount))
}

fn get_next_sqrt_price_from_amount1_rounding_down(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount: U256,
) -> Result<U256> {
    let quotient = if amount >> 160 == U256::ZERO {
        (amount << RESOLUTION) / U256::from(liquidity)
    } else {
        mul_div(amount, Q96, U256::from(liquidity))?
    };
    let next = sqrt_price_x96
        .checked_add(quotient)
        .ok_or(DensityError::SqrtPriceOverflow)?;
    check_u160(next)
}

/// Sqrt price reached after adding `amount_in` of the input token.
pub fn get_next_sqrt_price_from_input(
    sqrt_price_x96: U256,
    liquidity: u128,
    amount_in: U256,
    zero_for_one: bool,
) -> Result<U256> {
    if sqrt_price_x96.is_zero() {
        return Err(DensityError::SqrtPriceIsZero);
    }
    if liquidity == 0 {
        return Err(DensityError::LiquidityIsZero);
    }
    if zero_for_one {
        get_next_sqrt_price_from_amount0_rounding_up(sqrt_price_x96, liquidity, amount_in)
    } else {
        get_next_sqrt_price_from_amount1_rounding_down(sqrt_price_x96, liquidity, amount_in)
    }
}
