use thiserror::Error;

pub type Result<T, E = DensityError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DensityError {
    #[error("Tick spacing for fee tier {0} undefined")]
    InvalidFeeTier(u32),
    #[error("Tick {0} is outside [MIN_TICK, MAX_TICK]")]
    TickOutOfBounds(i32),
    #[error("Sqrt price is outside [MIN_SQRT_RATIO, MAX_SQRT_RATIO)")]
    SqrtPriceOutOfBounds,
    #[error("Sqrt price does not lie within tick {0}")]
    TickPriceMismatch(i32),
    #[error("Initialized tick {0} is not a multiple of the tick spacing")]
    TickMisaligned(i32),
    // sqrt price limit is on the wrong side of the start price
    #[error("Price limit does not lie ahead of the start price")]
    SimulationUnderflow,
    #[error("Sqrt price limit is outside (MIN_SQRT_RATIO, MAX_SQRT_RATIO)")]
    PriceLimitOutOfRange,
    #[error("Denominator is 0")]
    DenominatorIsZero,
    #[error("Result of mul div does not fit in 256 bits")]
    MulDivOverflow,
    #[error("Sqrt price is 0")]
    SqrtPriceIsZero,
    #[error("Liquidity is 0")]
    LiquidityIsZero,
    #[error("Liquidity Sub")]
    LiquiditySub,
    #[error("Liquidity Add")]
    LiquidityAdd,
    #[error("Sqrt price does not fit in 160 bits")]
    SqrtPriceOverflow,
    #[error("Price does not fit in a 256 bit decimal")]
    PriceOverflow,
    #[error("Token amount exceeds decimal range")]
    DecimalRange,
}
