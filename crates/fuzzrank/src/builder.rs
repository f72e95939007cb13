//! Declarative scorer construction.
//!
//! A [`ScorerBuilder`] names one of the core scorers and layers the optional
//! collaborators over it, innermost first: processor, cache, instrumentation.
//! Query validation runs once per selection call, before any scoring.
//!
//! # Example
//!
//! ```rust
//! use fuzzrank::builder::{ScorerBuilder, ScorerKind};
//!
//! let scorer = ScorerBuilder::new(ScorerKind::TokenSort)
//!     .process(true)
//!     .cache(256)
//!     .build()
//!     .unwrap();
//!
//! let top = scorer.extract("SMITH, john", &["John Smith", "Jon Smyth"], 1).unwrap();
//! assert_eq!(top[0].choice, "John Smith");
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use fuzzrank_core::{
    partial_ratio, ratio, token_set_ratio, token_sort_ratio, weighted_ratio, MatchResult,
    SelectConfig, Selector,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{CacheStats, CachedScorer};
use crate::error::{Error, Result};
use crate::instrument::{Instrumented, ScorerStats};
use crate::process::{default_process, processed};
use crate::validate::QueryRules;

type ScoreFn = Box<dyn Fn(&str, &str) -> f64 + Send + Sync>;

/// The built-in scorers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    Ratio,
    Partial,
    TokenSort,
    TokenSet,
    #[default]
    Weighted,
}

impl ScorerKind {
    pub const ALL: [ScorerKind; 5] = [
        ScorerKind::Ratio,
        ScorerKind::Partial,
        ScorerKind::TokenSort,
        ScorerKind::TokenSet,
        ScorerKind::Weighted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScorerKind::Ratio => "ratio",
            ScorerKind::Partial => "partial",
            ScorerKind::TokenSort => "token_sort",
            ScorerKind::TokenSet => "token_set",
            ScorerKind::Weighted => "weighted",
        }
    }

    /// The core scoring function for this kind
    pub fn function(self) -> fn(&str, &str) -> f64 {
        match self {
            ScorerKind::Ratio => ratio,
            ScorerKind::Partial => partial_ratio,
            ScorerKind::TokenSort => token_sort_ratio,
            ScorerKind::TokenSet => token_set_ratio,
            ScorerKind::Weighted => weighted_ratio,
        }
    }
}

impl fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScorerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        ScorerKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| Error::UnknownScorer(s.to_string()))
    }
}

/// Builder for [`Scorer`]
#[derive(Debug, Clone, Default)]
pub struct ScorerBuilder {
    kind: ScorerKind,
    process: bool,
    cache_capacity: Option<usize>,
    cache_ttl: Option<Duration>,
    rules: Option<QueryRules>,
    instrument: bool,
    select: SelectConfig,
}

impl ScorerBuilder {
    pub fn new(kind: ScorerKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn kind(mut self, kind: ScorerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Apply trim + lowercase to both inputs
    pub fn process(mut self, enabled: bool) -> Self {
        self.process = enabled;
        self
    }

    /// Memoize scores, keeping at most `capacity` pairs
    pub fn cache(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Expire memoized scores after `ttl`; requires [`ScorerBuilder::cache`]
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn validate(mut self, rules: QueryRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn instrument(mut self, enabled: bool) -> Self {
        self.instrument = enabled;
        self
    }

    pub fn select(mut self, config: SelectConfig) -> Self {
        self.select = config;
        self
    }

    pub fn build(self) -> Result<Scorer> {
        let selector = Selector::with_config(self.select)?;

        if self.cache_ttl.is_some() && self.cache_capacity.is_none() {
            return Err(Error::Config(
                "cache_ttl set without a cache capacity".to_string(),
            ));
        }
        if self.cache_capacity == Some(0) {
            return Err(Error::Config(
                "cache capacity must be greater than zero".to_string(),
            ));
        }

        let mut score: ScoreFn = Box::new(self.kind.function());

        if self.process {
            score = Box::new(processed(score, default_process));
        }

        let (score, cache): (ScoreFn, _) = match self.cache_capacity {
            Some(capacity) => {
                let mut cached = CachedScorer::new(score, capacity);
                if let Some(ttl) = self.cache_ttl {
                    cached = cached.with_ttl(ttl);
                }
                let cached = Arc::new(cached);
                let handle = Arc::clone(&cached);
                (
                    Box::new(move |a: &str, b: &str| handle.score(a, b)) as ScoreFn,
                    Some(cached),
                )
            }
            None => (score, None),
        };

        let (score, instrumented): (ScoreFn, _) = if self.instrument {
            let inst = Arc::new(Instrumented::new(self.kind.name(), score));
            let handle = Arc::clone(&inst);
            (
                Box::new(move |a: &str, b: &str| handle.score(a, b)) as ScoreFn,
                Some(inst),
            )
        } else {
            (score, None)
        };

        debug!(
            kind = %self.kind,
            process = self.process,
            cache = ?self.cache_capacity,
            validate = self.rules.is_some(),
            instrument = self.instrument,
            "scorer built"
        );

        Ok(Scorer {
            kind: self.kind,
            score,
            cache,
            instrumented,
            rules: self.rules,
            selector,
        })
    }
}

/// A composed scoring pipeline bound to a selector
pub struct Scorer {
    kind: ScorerKind,
    score: ScoreFn,
    cache: Option<Arc<CachedScorer<ScoreFn>>>,
    instrumented: Option<Arc<Instrumented<ScoreFn>>>,
    rules: Option<QueryRules>,
    selector: Selector,
}

impl Scorer {
    pub fn kind(&self) -> ScorerKind {
        self.kind
    }

    fn check(&self, query: &str) -> Result<()> {
        match &self.rules {
            Some(rules) => rules.validate(query),
            None => Ok(()),
        }
    }

    pub fn score(&self, query: &str, choice: &str) -> Result<f64> {
        self.check(query)?;
        Ok((self.score)(query, choice))
    }

    pub fn extract<C: AsRef<str>>(
        &self,
        query: &str,
        choices: &[C],
        limit: usize,
    ) -> Result<Vec<MatchResult>> {
        self.check(query)?;
        Ok(self.selector.extract(query, choices, &self.score, limit))
    }

    pub fn extract_one<C: AsRef<str>>(
        &self,
        query: &str,
        choices: &[C],
    ) -> Result<Option<MatchResult>> {
        self.check(query)?;
        Ok(self.selector.extract_one(query, choices, &self.score))
    }

    /// Cache counters, if the cache layer is enabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    /// Call counters, if instrumentation is enabled. Also logged.
    pub fn stats(&self) -> Option<ScorerStats> {
        self.instrumented.as_ref().map(|i| i.report())
    }
}

impl fmt::Debug for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorer")
            .field("kind", &self.kind)
            .field("cache", &self.cache)
            .field("rules", &self.rules)
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}
