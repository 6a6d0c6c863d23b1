//! Decimal prices for tick indices.
//!
//! Prices are derived from the Q64.96 sqrt ratio of a tick rather than from
//! `1.0001^tick` directly, so they agree exactly with what the pool would quote.
//! They are adjusted for the decimals of both tokens and truncated to
//! [`PRICE_FIXED_DIGITS`] fractional digits.

use crate::error::{DensityError, Result};
use crate::full_math::{narrow, widen};
use crate::tick_math::{get_sqrt_ratio_at_tick, MAX_TICK, MIN_TICK};
use alloy::primitives::{U256, U512};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Decimal256, StdError, Uint256};
use std::{fmt, str::FromStr};

pub const PRICE_FIXED_DIGITS: u32 = 18;

#[cw_serde]
pub struct Token {
    pub address: String,
    pub decimals: u8,
    pub symbol: String,
}

impl Token {
    pub fn new(address: impl Into<String>, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            decimals,
            symbol: symbol.into(),
        }
    }

    /// Pool token ordering: the token with the lower address is token0.
    pub fn sorts_before(&self, other: &Token) -> bool {
        self.address.to_lowercase() < other.address.to_lowercase()
    }
}

/// A price with exactly [`PRICE_FIXED_DIGITS`] fractional digits. Displays and
/// serializes as a fixed point decimal string, e.g. `"0.005606992400063709"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FixedPrice(pub Decimal256);

impl FixedPrice {
    pub fn decimal(&self) -> Decimal256 {
        self.0
    }
}

impl fmt::Display for FixedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let atomics = self.0.atomics();
        let unit = Uint256::from(10u128.pow(PRICE_FIXED_DIGITS));
        let fraction = (atomics % unit).to_string();
        write!(
            f,
            "{}.{:0>width$}",
            atomics / unit,
            fraction,
            width = PRICE_FIXED_DIGITS as usize
        )
    }
}

impl FromStr for FixedPrice {
    type Err = StdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal256::from_str(s).map(FixedPrice)
    }
}

fn pow10(exponent: u32) -> Result<U512> {
    U512::from(10u8)
        .checked_pow(U512::from(exponent))
        .ok_or(DensityError::PriceOverflow)
}

pub(crate) fn to_uint256(value: U256) -> Uint256 {
    Uint256::from_be_bytes(value.to_be_bytes::<32>())
}

/// Price of one whole `base` token denominated in `quote` at `tick`.
pub fn tick_to_price(base: &Token, quote: &Token, tick: i32) -> Result<FixedPrice> {
    let sqrt_ratio = widen(get_sqrt_ratio_at_tick(tick)?);
    let ratio_x192 = sqrt_ratio * sqrt_ratio;
    let q192 = U512::from(1u8) << 192;

    let (numerator, denominator) = if base.sorts_before(quote) {
        (ratio_x192, q192)
    } else {
        (q192, ratio_x192)
    };
    let numerator = numerator
        .checked_mul(pow10(u32::from(base.decimals) + PRICE_FIXED_DIGITS)?)
        .ok_or(DensityError::PriceOverflow)?;
    let denominator = denominator
        .checked_mul(pow10(u32::from(quote.decimals))?)
        .ok_or(DensityError::PriceOverflow)?;

    let atomics = narrow(numerator / denominator).map_err(|_| DensityError::PriceOverflow)?;
    Ok(FixedPrice(Decimal256::new(to_uint256(atomics))))
}

/// Inverse of [`tick_to_price`]. Returns the tick whose truncated price is the
/// last one not exceeding `price` when walking the domain in the direction the
/// price grows. Where truncation maps several ticks to the same price (the far
/// tail of the domain) the tick closest to the growing end is returned.
pub fn price_to_tick(base: &Token, quote: &Token, price: FixedPrice) -> Result<i32> {
    let mut low = MIN_TICK;
    let mut high = MAX_TICK;

    if base.sorts_before(quote) {
        // price grows with the tick
        while low < high {
            let mid = low + (high - low + 1) / 2;
            if tick_to_price(base, quote, mid)? <= price {
                low = mid;
            } else {
                high = mid - 1;
            }
        }
    } else {
        while low < high {
            let mid = low + (high - low) / 2;
            if tick_to_price(base, quote, mid)? <= price {
                high = mid;
            } else {
                low = mid + 1;
            }
        }
    }
    Ok(low)
}
