use crate::error::{DensityError, Result};
use crate::serde_decimal;
use crate::tick_math::{MAX_TICK, MIN_TICK};
use cosmwasm_schema::cw_serde;
use std::collections::BTreeMap;

#[cw_serde]
#[derive(Eq)]
pub struct InitializedTick {
    pub tick_index: i32,
    // the total position liquidity that references this tick
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub liquidity_gross: u128,
    // amount of net liquidity added (subtracted) when tick is crossed from left to right (right to left)
    #[serde(with = "serde_decimal")]
    #[schemars(with = "String")]
    pub liquidity_net: i128,
}

impl InitializedTick {
    pub fn new(tick_index: i32, liquidity_gross: u128, liquidity_net: i128) -> Self {
        Self {
            tick_index,
            liquidity_gross,
            liquidity_net,
        }
    }
}

/// Initialized ticks keyed by tick index. Inserting an index twice keeps the last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSet {
    ticks: BTreeMap<i32, InitializedTick>,
}

impl TickSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tick: InitializedTick) -> Option<InitializedTick> {
        self.ticks.insert(tick.tick_index, tick)
    }

    pub fn get(&self, tick_index: i32) -> Option<&InitializedTick> {
        self.ticks.get(&tick_index)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InitializedTick> {
        self.ticks.values()
    }

    /// Every initialized tick must be a multiple of `tick_spacing` inside the
    /// tick domain, otherwise the walk would step over it.
    pub fn check_spacing(&self, tick_spacing: i32) -> Result<()> {
        for &tick_index in self.ticks.keys() {
            if !(MIN_TICK..=MAX_TICK).contains(&tick_index) {
                return Err(DensityError::TickOutOfBounds(tick_index));
            }
            if tick_index.rem_euclid(tick_spacing) != 0 {
                return Err(DensityError::TickMisaligned(tick_index));
            }
        }
        Ok(())
    }

    /// Next initialized tick at or below (`lte`) or strictly above `tick`, looking
    /// no further than the 256 compressed ticks of the current bitmap word. When
    /// nothing is initialized there the word boundary is returned with `false`.
    pub fn next_initialized_tick_within_one_word(
        &self,
        tick: i32,
        tick_spacing: i32,
        lte: bool,
    ) -> (i32, bool) {
        let compressed = tick.div_euclid(tick_spacing);
        if lte {
            let word_start = (compressed >> 8) << 8;
            let min_tick = word_start * tick_spacing;
            match self.ticks.range(min_tick..=tick).next_back() {
                Some((&next, _)) => (next, true),
                None => (min_tick, false),
            }
        } else {
            let first = compressed + 1;
            let word_end = ((first >> 8) << 8) + 255;
            let max_tick = word_end * tick_spacing;
            match self.ticks.range(first * tick_spacing..=max_tick).next() {
                Some((&next, _)) => (next, true),
                None => (max_tick, false),
            }
        }
    }
}

impl FromIterator<InitializedTick> for TickSet {
    fn from_iter<I: IntoIterator<Item = InitializedTick>>(iter: I) -> Self {
        Self {
            ticks: iter.into_iter().map(|tick| (tick.tick_index, tick)).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn init_test_ticks() -> TickSet {
        [-200, -55, -4, 70, 78, 84, 139, 240, 535]
            .into_iter()
            .map(|index| InitializedTick::new(index, 1, 1))
            .collect()
    }

    #[test]
    fn test_next_initialized_tick_to_the_right() {
        let ticks = init_test_ticks();
        // returns tick to right if at initialized tick
        assert_eq!(ticks.next_initialized_tick_within_one_word(78, 1, false), (84, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(-55, 1, false), (-4, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(77, 1, false), (78, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(-56, 1, false), (-55, true));
        // does not exceed the word boundary
        assert_eq!(ticks.next_initialized_tick_within_one_word(255, 1, false), (511, false));
        assert_eq!(ticks.next_initialized_tick_within_one_word(-257, 1, false), (-200, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(340, 1, false), (511, false));
        assert_eq!(ticks.next_initialized_tick_within_one_word(508, 1, false), (511, false));
    }

    #[test]
    fn test_next_initialized_tick_to_the_left() {
        let ticks = init_test_ticks();
        // returns same tick if initialized
        assert_eq!(ticks.next_initialized_tick_within_one_word(78, 1, true), (78, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(79, 1, true), (78, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(258, 1, true), (256, false));
        assert_eq!(ticks.next_initialized_tick_within_one_word(256, 1, true), (256, false));
        assert_eq!(ticks.next_initialized_tick_within_one_word(72, 1, true), (70, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(-257, 1, true), (-512, false));
        assert_eq!(ticks.next_initialized_tick_within_one_word(1023, 1, true), (768, false));
        assert_eq!(ticks.next_initialized_tick_within_one_word(900, 1, true), (768, false));
    }

    #[test]
    fn test_next_initialized_tick_with_spacing() {
        let ticks: TickSet = [InitializedTick::new(-51900, 5, -5), InitializedTick::new(-51840, 5, 5)]
            .into_iter()
            .collect();
        assert_eq!(ticks.next_initialized_tick_within_one_word(-51840, 60, true), (-51840, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(-51841, 60, true), (-51900, true));
        assert_eq!(ticks.next_initialized_tick_within_one_word(-51900, 60, false), (-51840, true));
        // word -4 starts at compressed -1024
        assert_eq!(ticks.next_initialized_tick_within_one_word(-51901, 60, true), (-61440, false));
    }

    #[test]
    fn test_check_spacing() -> eyre::Result<()> {
        let aligned: TickSet = [InitializedTick::new(-51900, 5, -5), InitializedTick::new(-51840, 5, 5)]
            .into_iter()
            .collect();
        aligned.check_spacing(60)?;
        assert_eq!(aligned.check_spacing(200), Err(DensityError::TickMisaligned(-51900)));

        let misaligned: TickSet = [InitializedTick::new(-51870, 1, 1)].into_iter().collect();
        assert_eq!(misaligned.check_spacing(60), Err(DensityError::TickMisaligned(-51870)));
        misaligned.check_spacing(10)?;

        let outside: TickSet = [InitializedTick::new(-887400, 1, 1)].into_iter().collect();
        assert_eq!(outside.check_spacing(60), Err(DensityError::TickOutOfBounds(-887400)));
        Ok(())
    }

    #[test]
    fn test_duplicate_index_keeps_last() {
        let mut ticks = TickSet::new();
        assert!(ticks.insert(InitializedTick::new(60, 1, 1)).is_none());
        let previous = ticks.insert(InitializedTick::new(60, 2, -2));
        assert_eq!(previous, Some(InitializedTick::new(60, 1, 1)));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks.get(60).map(|tick| tick.liquidity_net), Some(-2));
    }

    #[test]
    fn test_serializes_liquidity_as_decimal_strings() -> eyre::Result<()> {
        let tick = InitializedTick::new(-60, u128::MAX, i128::MIN);
        let json = serde_json::to_string(&tick)?;
        assert_eq!(
            json,
            format!(
                r#"{{"tick_index":-60,"liquidity_gross":"{}","liquidity_net":"{}"}}"#,
                u128::MAX,
                i128::MIN
            )
        );
        assert_eq!(serde_json::from_str::<InitializedTick>(&json)?, tick);
        Ok(())
    }
}
