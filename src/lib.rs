//! Liquidity density and reserve curves for Uniswap V3 style pools.
//!
//! Given a pool snapshot and its initialized ticks, [`DensityEngine`] rebuilds
//! the active liquidity of every tick around the current price and the token
//! reserves each tick range holds, ready to be drawn as a density chart.

pub mod config;
pub mod density;
pub mod engine;
pub mod error;
pub mod fee_tier;
pub mod full_math;
pub mod liquidity_math;
pub mod pool;
pub mod price;
pub mod serde_decimal;
pub mod session;
pub mod sqrt_price_math;
pub mod swap;
pub mod swap_math;
pub mod tick;
pub mod tick_math;
pub mod walk;

#[cfg(test)]
mod fixtures;

pub use config::{EngineConfig, DEFAULT_SURROUNDING_TICKS};
pub use density::{assemble_buckets, BucketSequence, ProcessedBucket};
pub use engine::DensityEngine;
pub use error::{DensityError, Result};
pub use fee_tier::{tick_spacing_for_fee, FeeTier};
pub use pool::PoolSnapshot;
pub use price::{price_to_tick, tick_to_price, FixedPrice, Token, PRICE_FIXED_DIGITS};
pub use session::{ChartSession, Generation};
pub use tick::{InitializedTick, TickSet};
pub use walk::{compute_surrounding_ticks, ticks_surrounding_price, Direction, PoolTickData, TickProcessed};
