use crate::fee_tier::FeeTier;
use crate::pool::PoolSnapshot;
use crate::price::Token;
use alloy::primitives::U256;

pub fn icp() -> Token {
    Token::new("ryjl3-tyaaa-aaaaa-aaaba-cai", 8, "ICP")
}

pub fn sns1() -> Token {
    Token::new("zfcdd-tqaaa-aaaaq-aaaga-cai", 8, "SNS1")
}

pub fn icp_sns1_pool() -> PoolSnapshot {
    PoolSnapshot {
        address: "3ejs3-eaaaa-aaaag-qbl2a-cai".to_string(),
        fee: FeeTier::Medium,
        tick: -51810,
        sqrt_price_x96: U256::from(5941537413636030270973434565u128),
        liquidity: 5651347183,
        token0: icp(),
        token1: sns1(),
    }
}
