//! Memoizing wrapper for scorers.
//!
//! Scores are cached per `(query, candidate)` pair with least-recently-used
//! eviction and an optional time-to-live. The wrapper takes `&self`, so a
//! cached scorer can be shared and passed to the selectors as a plain
//! closure.
//!
//! # Example
//! ```
//! use fuzzrank::cache::CachedScorer;
//! use fuzzrank_core::weighted_ratio;
//!
//! let cached = CachedScorer::new(weighted_ratio, 1024);
//! let first = cached.score("apple", "apply");
//! let second = cached.score("apple", "apply");
//! assert_eq!(first, second);
//!
//! let stats = cached.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Current number of entries
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedScore {
    score: f64,
    stored_at: Instant,
}

/// Scorer wrapper remembering recent results.
pub struct CachedScorer<F> {
    inner: F,
    entries: Mutex<LruCache<(String, String), CachedScore>>,
    ttl: Option<Duration>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<F> CachedScorer<F>
where
    F: Fn(&str, &str) -> f64,
{
    /// Wrap `inner` with a cache holding at most `capacity` pairs.
    ///
    /// A zero capacity is raised to 1.
    pub fn new(inner: F, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            entries: Mutex::new(LruCache::new(capacity)),
            ttl: None,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Expire entries older than `ttl`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Cached score, computing and storing it on a miss.
    pub fn score(&self, query: &str, choice: &str) -> f64 {
        let key = (query.to_owned(), choice.to_owned());

        {
            let mut entries = self.entries.lock();
            if let Some(cached) = entries.get(&key) {
                if self.is_fresh(cached) {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return cached.score;
                }
                entries.pop(&key);
            }
        }

        // Lock is not held while the inner scorer runs
        self.misses.fetch_add(1, Ordering::Relaxed);
        let score = (self.inner)(query, choice);
        self.entries.lock().put(
            key,
            CachedScore {
                score,
                stored_at: Instant::now(),
            },
        );
        score
    }

    fn is_fresh(&self, cached: &CachedScore) -> bool {
        self.ttl.map_or(true, |ttl| cached.stored_at.elapsed() < ttl)
    }

    /// Drop every entry and reset statistics.
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<F> std::fmt::Debug for CachedScorer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedScorer")
            .field("ttl", &self.ttl)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuzzrank_core::{extract, ratio};
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_new_cache_is_empty() {
        let cache = CachedScorer::new(ratio, 8);
        assert!(cache.is_empty());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 0,
                misses: 0,
                size: 0,
                capacity: 8,
            }
        );
    }

    #[test]
    fn test_caches_per_pair() {
        let calls = AtomicUsize::new(0);
        let cache = CachedScorer::new(
            |a: &str, b: &str| {
                calls.fetch_add(1, Ordering::Relaxed);
                ratio(a, b)
            },
            8,
        );

        cache.score("a", "b");
        cache.score("a", "b");
        cache.score("b", "a");
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_lru_eviction() {
        let cache = CachedScorer::new(ratio, 2);
        cache.score("q", "one");
        cache.score("q", "two");
        cache.score("q", "one"); // refresh "one"
        cache.score("q", "three"); // evicts "two"

        let before = cache.stats().misses;
        cache.score("q", "one");
        assert_eq!(cache.stats().misses, before);
        cache.score("q", "two");
        assert_eq!(cache.stats().misses, before + 1);
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = CachedScorer::new(ratio, 8).with_ttl(Duration::ZERO);
        cache.score("q", "x");
        cache.score("q", "x");
        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 2);
    }

    #[test]
    fn test_zero_capacity_raised() {
        let cache = CachedScorer::new(ratio, 0);
        assert_eq!(cache.stats().capacity, 1);
    }

    #[test]
    fn test_clear_resets() {
        let cache = CachedScorer::new(ratio, 8);
        cache.score("q", "x");
        cache.score("q", "x");
        cache.clear();
        assert_eq!(
            cache.stats(),
            CacheStats {
                capacity: 8,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_hit_rate() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 0.75);
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_usable_as_selector_scorer() {
        let cache = CachedScorer::new(ratio, 64);
        let choices = ["apple", "apply", "maple"];
        let score = |a: &str, b: &str| cache.score(a, b);
        let first = extract("apple", &choices, score, 3);
        let second = extract("apple", &choices, score, 3);
        assert_eq!(first, second);
        assert_eq!(cache.stats().hits, 3);
    }
}
