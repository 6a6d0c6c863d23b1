use crate::pool::PoolSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Marks which request a computation was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Orders the chart requests of one view. Only the latest request may
/// deliver its result, anything started before it is dropped.
#[derive(Debug, Default)]
pub struct ChartSession {
    generation: AtomicU64,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Generation {
        Generation(self.generation.load(Ordering::Acquire))
    }

    /// Invalidates every computation in flight.
    pub fn reset(&self) -> Generation {
        Generation(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Starts a request for `pool`. It supersedes every earlier request, for
    /// another pool or for an older snapshot of the same one.
    pub fn begin(&self, pool: &PoolSnapshot) -> Generation {
        let generation = self.reset();
        trace!(
            pool = %pool.address,
            tick = pool.tick,
            generation = generation.0,
            "chart request started"
        );
        generation
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.current() == generation
    }

    /// Returns `result` if no reset happened since `generation` was taken.
    pub fn accept<T>(&self, generation: Generation, result: T) -> Option<T> {
        if self.is_current(generation) {
            Some(result)
        } else {
            debug!(
                started = generation.0,
                current = self.current().0,
                "discarding stale density result"
            );
            None
        }
    }
}
