use crate::error::Result;
use crate::full_math::{mul_div, mul_div_rounding_up};
use crate::sqrt_price_math::{get_amount0_delta, get_amount1_delta, get_next_sqrt_price_from_input};
use alloy::primitives::U256;

const FEE_DENOMINATOR: u32 = 1_000_000;

/// One exact-input step of a swap within a single liquidity range.
///
/// The direction is inferred from the prices: `sqrt_ratio_current >= sqrt_ratio_target`
/// swaps token0 for token1. Returns `(sqrt_ratio_next, amount_in, amount_out, fee_amount)`;
/// `amount_in + fee_amount` never exceeds `amount_remaining`.
pub fn compute_swap_step(
    sqrt_ratio_current_x96: U256,
    sqrt_ratio_target_x96: U256,
    liquidity: u128,
    amount_remaining: U256,
    fee_pips: u32,
) -> Result<(U256, U256, U256, U256)> {
    let zero_for_one = sqrt_ratio_current_x96 >= sqrt_ratio_target_x96;
    let fee = U256::from(fee_pips);
    let fee_complement = U256::from(FEE_DENOMINATOR - fee_pips);

    let amount_remaining_less_fee =
        mul_div(amount_remaining, fee_complement, U256::from(FEE_DENOMINATOR))?;
    let mut amount_in = if zero_for_one {
        get_amount0_delta(sqrt_ratio_target_x96, sqrt_ratio_current_x96, liquidity, true)?
    } else {
        get_amount1_delta(sqrt_ratio_current_x96, sqrt_ratio_target_x96, liquidity, true)?
    };
    let sqrt_ratio_next_x96 = if amount_remaining_less_fee >= amount_in {
        sqrt_ratio_target_x96
    } else {
        get_next_sqrt_price_from_input(
            sqrt_ratio_current_x96,
            liquidity,
            amount_remaining_less_fee,
            zero_for_one,
        )?
    };

    let max = sqrt_ratio_target_x96 == sqrt_ratio_next_x96;
    let amount_out = if zero_for_one {
        if !max {
            amount_in =
                get_amount0_delta(sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, true)?;
        }
        get_amount1_delta(sqrt_ratio_next_x96, sqrt_ratio_current_x96, liquidity, false)?
    } else {
        if !max {
            amount_in =
                get_amount1_delta(sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, true)?;
        }
        get_amount0_delta(sqrt_ratio_current_x96, sqrt_ratio_next_x96, liquidity, false)?
    };

    let fee_amount = if max {
        mul_div_rounding_up(amount_in, fee, fee_complement)?
    } else {
        // the target was not reached, the remainder is all fee
        amount_remaining - amount_in
    };

    Ok((sqrt_ratio_next_x96, amount_in, amount_out, fee_amount))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tick_math::{get_sqrt_ratio_at_tick, Q96};
    use std::str::FromStr;

    #[test]
    fn test_exact_in_capped_at_target_one_for_zero() -> eyre::Result<()> {
        let price = Q96;
        let target = U256::from_str("79623317895830914510639640423")?; // sqrt(101/100)
        let liquidity = 2 * 10u128.pow(18);
        let amount = U256::from(10u128.pow(18));
        let (next, amount_in, amount_out, fee_amount) =
            compute_swap_step(price, target, liquidity, amount, 600)?;

        assert_eq!(next, target);
        assert_eq!(amount_in, U256::from_str("9975124224178055")?);
        assert_eq!(fee_amount, U256::from_str("5988667735148")?);
        assert_eq!(amount_out, U256::from_str("9925619580021728")?);
        assert!(amount_in + fee_amount < amount);
        Ok(())
    }

    #[test]
    fn test_exact_in_fully_spent_zero_for_one() -> eyre::Result<()> {
        let price = get_sqrt_ratio_at_tick(0)?;
        let target = get_sqrt_ratio_at_tick(-1000)?;
        let amount = U256::from(1000u32);
        let (next, amount_in, amount_out, fee_amount) =
            compute_swap_step(price, target, 10u128.pow(18), amount, 3000)?;

        assert!(next < price && next > target);
        assert_eq!(amount_in + fee_amount, amount);
        assert!(amount_out <= amount_in);
        Ok(())
    }

    #[test]
    fn test_zero_liquidity_reaches_target_for_free() -> eyre::Result<()> {
        let price = get_sqrt_ratio_at_tick(0)?;
        let target = get_sqrt_ratio_at_tick(-600)?;
        let (next, amount_in, amount_out, fee_amount) =
            compute_swap_step(price, target, 0, U256::from(u128::MAX), 3000)?;
        assert_eq!(next, target);
        assert_eq!(amount_in, U256::ZERO);
        assert_eq!(amount_out, U256::ZERO);
        assert_eq!(fee_amount, U256::ZERO);
        Ok(())
    }

    #[test]
    fn test_target_equal_to_current_is_a_no_op() -> eyre::Result<()> {
        let price = get_sqrt_ratio_at_tick(-51840)?;
        let (next, amount_in, amount_out, fee_amount) =
            compute_swap_step(price, price, 5651347183, U256::from(u128::MAX), 3000)?;
        assert_eq!(next, price);
        assert_eq!((amount_in, amount_out, fee_amount), (U256::ZERO, U256::ZERO, U256::ZERO));
        Ok(())
    }
}
