use crate::config::EngineConfig;
use crate::density::{assemble_buckets, BucketSequence};
use crate::error::Result;
use crate::pool::PoolSnapshot;
use crate::session::ChartSession;
use crate::tick::TickSet;
use crate::walk::ticks_surrounding_price;
use tracing::instrument;

/// Computes the liquidity density chart of a pool snapshot.
#[derive(Debug, Clone, Default)]
pub struct DensityEngine {
    config: EngineConfig,
}

impl DensityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[instrument(
        skip_all,
        fields(
            pool = %pool.address,
            fee = %pool.fee,
            num_surrounding_ticks = self.config.num_surrounding_ticks,
        )
    )]
    pub fn compute(&self, pool: &PoolSnapshot, ticks: &TickSet) -> Result<BucketSequence> {
        pool.validate()?;
        ticks.check_spacing(pool.tick_spacing())?;
        let data = ticks_surrounding_price(pool, ticks, self.config.num_surrounding_ticks)?;
        assemble_buckets(&data, &pool.token1, self.config.parallel)
    }

    /// Like [`compute`](Self::compute), but yields `None` when a later request
    /// was started on `session` while the chart was being computed.
    pub fn compute_in(
        &self,
        session: &ChartSession,
        pool: &PoolSnapshot,
        ticks: &TickSet,
    ) -> Result<Option<BucketSequence>> {
        let generation = session.begin(pool);
        let sequence = self.compute(pool, ticks)?;
        Ok(session.accept(generation, sequence))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::DensityError;
    use crate::fixtures::icp_sns1_pool;
    use crate::tick::InitializedTick;
    use crate::tick_math::MAX_TICK;

    fn engine(num_surrounding_ticks: usize) -> DensityEngine {
        DensityEngine::new(EngineConfig {
            num_surrounding_ticks,
            ..Default::default()
        })
    }

    #[test]
    fn test_compute_default_window() -> eyre::Result<()> {
        let ticks: TickSet = [
            InitializedTick::new(-52200, 2000, 2000),
            InitializedTick::new(-51480, 2000, -2000),
        ]
        .into_iter()
        .collect();
        let mut pool = icp_sns1_pool();
        pool.liquidity += 2000;

        let sequence = DensityEngine::default().compute(&pool, &ticks)?;
        assert_eq!(sequence.len(), 601);
        assert_eq!(sequence.tick_spacing, 60);
        for pair in sequence.buckets.windows(2) {
            assert_eq!(pair[1].tick_index - pair[0].tick_index, 60);
        }
        let current = sequence.current().ok_or_else(|| eyre::eyre!("no current bucket"))?;
        assert_eq!(current.tick_index, -51840);
        assert_eq!(current.liquidity_active, pool.liquidity);

        let active_at = |tick_index: i32| {
            sequence
                .buckets
                .iter()
                .find(|bucket| bucket.tick_index == tick_index)
                .map(|bucket| bucket.liquidity_active)
        };
        assert_eq!(active_at(-52260), Some(5651347183));
        assert_eq!(active_at(-52200), Some(5651347183 + 2000));
        assert_eq!(active_at(-51540), Some(5651347183 + 2000));
        assert_eq!(active_at(-51480), Some(5651347183));
        Ok(())
    }

    #[test]
    fn test_compute_rejects_invalid_snapshot() {
        let mut pool = icp_sns1_pool();
        pool.tick = MAX_TICK + 1;
        assert_eq!(
            engine(2).compute(&pool, &TickSet::new()),
            Err(DensityError::TickOutOfBounds(MAX_TICK + 1))
        );
    }

    #[test]
    fn test_compute_rejects_misaligned_ticks() {
        // -51870 sits between two buckets and would never be visited
        let ticks: TickSet = [InitializedTick::new(-51870, 1000, 1000)].into_iter().collect();
        assert_eq!(
            engine(2).compute(&icp_sns1_pool(), &ticks),
            Err(DensityError::TickMisaligned(-51870))
        );
    }

    #[test]
    fn test_sequential_requests_are_all_delivered() -> eyre::Result<()> {
        let session = ChartSession::new();
        let engine = engine(2);
        let pool = icp_sns1_pool();

        let first = engine.compute_in(&session, &pool, &TickSet::new())?;
        let second = engine.compute_in(&session, &pool, &TickSet::new())?;
        assert!(first.is_some());
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_overlapping_older_snapshot_is_discarded() -> eyre::Result<()> {
        let session = ChartSession::new();
        let engine = engine(2);
        let older = icp_sns1_pool();
        let mut newer = icp_sns1_pool();
        newer.liquidity += 1000;

        // the older request is still running when the newer one completes
        let generation = session.begin(&older);
        let stale = engine.compute(&older, &TickSet::new())?;
        let fresh = engine.compute_in(&session, &newer, &TickSet::new())?;

        let fresh = fresh.ok_or_else(|| eyre::eyre!("latest request was dropped"))?;
        assert_eq!(fresh.current().map(|bucket| bucket.liquidity_active), Some(newer.liquidity));
        assert_eq!(session.accept(generation, stale), None);
        Ok(())
    }

    #[test]
    fn test_result_for_previous_pool_is_discarded() -> eyre::Result<()> {
        let session = ChartSession::new();
        let pool = icp_sns1_pool();
        let generation = session.begin(&pool);
        let sequence = engine(2).compute(&pool, &TickSet::new())?;

        // another pool was requested while the chart was computed
        let mut other = icp_sns1_pool();
        other.address = "other-pool".to_string();
        session.begin(&other);
        assert_eq!(session.accept(generation, sequence), None);
        Ok(())
    }
}
