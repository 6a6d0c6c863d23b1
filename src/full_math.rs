use crate::error::{DensityError, Result};
use alloy::primitives::{U256, U512};

pub(crate) fn widen(x: U256) -> U512 {
    U512::from_limbs_slice(x.as_limbs())
}

pub(crate) fn narrow(x: U512) -> Result<U256> {
    U256::checked_from_limbs_slice(x.as_limbs()).ok_or(DensityError::MulDivOverflow)
}

/// floor(a * b / denominator) with a 512 bit intermediate product.
pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(DensityError::DenominatorIsZero);
    }
    narrow(widen(a) * widen(b) / widen(denominator))
}

/// ceil(a * b / denominator) with a 512 bit intermediate product.
pub fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(DensityError::DenominatorIsZero);
    }
    let product = widen(a) * widen(b);
    let denominator = widen(denominator);
    let mut result = product / denominator;
    if !(product % denominator).is_zero() {
        result += U512::from(1u8);
    }
    narrow(result)
}

pub fn div_rounding_up(a: U256, b: U256) -> Result<U256> {
    if b.is_zero() {
        return Err(DensityError::DenominatorIsZero);
    }
    let quotient = a / b;
    if (a % b).is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::from(1u8))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mul_div_full_precision() -> eyre::Result<()> {
        let q128 = U256::from(1u8) << 128;
        // (2^128 * 2^128) / 2^128 overflows 256 bits in the middle only
        assert_eq!(mul_div(q128, q128, q128)?, q128);
        assert_eq!(mul_div(U256::from(7u8), U256::from(3u8), U256::from(2u8))?, U256::from(10u8));
        Ok(())
    }

    #[test]
    fn test_mul_div_rounding_up() -> eyre::Result<()> {
        assert_eq!(
            mul_div_rounding_up(U256::from(7u8), U256::from(3u8), U256::from(2u8))?,
            U256::from(11u8)
        );
        assert_eq!(
            mul_div_rounding_up(U256::from(4u8), U256::from(3u8), U256::from(2u8))?,
            U256::from(6u8)
        );
        Ok(())
    }

    #[test]
    fn test_overflow_and_zero_denominator() {
        assert_eq!(
            mul_div(U256::MAX, U256::from(2u8), U256::from(1u8)),
            Err(DensityError::MulDivOverflow)
        );
        assert_eq!(
            mul_div(U256::from(1u8), U256::from(1u8), U256::ZERO),
            Err(DensityError::DenominatorIsZero)
        );
        assert_eq!(div_rounding_up(U256::from(1u8), U256::ZERO), Err(DensityError::DenominatorIsZero));
    }

    #[test]
    fn test_div_rounding_up() -> eyre::Result<()> {
        assert_eq!(div_rounding_up(U256::from(10u8), U256::from(5u8))?, U256::from(2u8));
        assert_eq!(div_rounding_up(U256::from(11u8), U256::from(5u8))?, U256::from(3u8));
        Ok(())
    }
}
