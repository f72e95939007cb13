//! Call counting and timing around any scorer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::debug;

/// Snapshot of an instrumented scorer's counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScorerStats {
    pub calls: u64,
    pub total: Duration,
}

impl ScorerStats {
    /// Mean time per call, zero before the first call.
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total.as_nanos() / u128::from(self.calls);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Scorer wrapper measuring call count and elapsed time.
#[derive(Debug)]
pub struct Instrumented<F> {
    inner: F,
    name: String,
    calls: AtomicU64,
    nanos: AtomicU64,
}

impl<F> Instrumented<F>
where
    F: Fn(&str, &str) -> f64,
{
    pub fn new(name: impl Into<String>, inner: F) -> Self {
        Self {
            inner,
            name: name.into(),
            calls: AtomicU64::new(0),
            nanos: AtomicU64::new(0),
        }
    }

    pub fn score(&self, query: &str, choice: &str) -> f64 {
        let start = Instant::now();
        let score = (self.inner)(query, choice);
        let nanos = start.elapsed().as_nanos();
        let elapsed = u64::try_from(nanos).unwrap_or(u64::MAX);

        self.calls.fetch_add(1, Ordering::Relaxed);
        self.nanos.fetch_add(elapsed, Ordering::Relaxed);
        score
    }

    pub fn stats(&self) -> ScorerStats {
        ScorerStats {
            calls: self.calls.load(Ordering::Relaxed),
            total: Duration::from_nanos(self.nanos.load(Ordering::Relaxed)),
        }
    }

    /// Current counters, also logged at debug level.
    pub fn report(&self) -> ScorerStats {
        let stats = self.stats();
        debug!(
            scorer = %self.name,
            calls = stats.calls,
            total_us = stats.total.as_micros() as u64,
            mean_ns = stats.mean().as_nanos() as u64,
            "scorer stats"
        );
        stats
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::Relaxed);
        self.nanos.store(0, Ordering::Relaxed);
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
