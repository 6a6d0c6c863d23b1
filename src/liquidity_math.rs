use crate::error::{DensityError, Result};

/// Adds a signed liquidity delta, failing instead of wrapping below zero or past u128::MAX.
pub fn add_delta(x: u128, y: i128) -> Result<u128> {
    if y < 0 {
        x.checked_sub(y.unsigned_abs()).ok_or(DensityError::LiquiditySub)
    } else {
        x.checked_add(y as u128).ok_or(DensityError::LiquidityAdd)
    }
}

/// Removes a signed liquidity delta, the inverse of [`add_delta`].
pub fn sub_delta(x: u128, y: i128) -> Result<u128> {
    if y < 0 {
        x.checked_add(y.unsigned_abs()).ok_or(DensityError::LiquidityAdd)
    } else {
        x.checked_sub(y as u128).ok_or(DensityError::LiquiditySub)
    }
}
