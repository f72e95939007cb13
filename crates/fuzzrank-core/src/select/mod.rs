//! Candidate selection
//!
//! Given a query, a candidate slice and any scorer, return the top-k matches
//! ([`extract`]) or the single best one ([`extract_one`]). The algorithm is
//! picked by candidate count; see [`SelectConfig`] for the tier thresholds.
//!
//! Scorers are plain functions or closures. The `try_` variants accept
//! fallible scorers and return the first error unchanged.
//!
//! # Example
//!
//! ```rust
//! use fuzzrank_core::fuzzy::weighted_ratio;
//! use fuzzrank_core::select::{extract, extract_one};
//!
//! let fruit = ["apple", "apply", "application", "banana"];
//!
//! let top = extract("apple", &fruit, weighted_ratio, 2);
//! assert_eq!(top[0].choice, "apple");
//! assert_eq!(top[0].score, 100.0);
//!
//! let best = extract_one("banan", &fruit, weighted_ratio).unwrap();
//! assert_eq!(best.choice, "banana");
//! ```

mod best;
mod config;
mod heap;
mod top_k;

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

pub use config::{ConfigError, SelectConfig};

/// A scored candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub choice: String,
    pub score: f64,
    /// Position of the candidate in the input slice
    pub index: usize,
}

impl MatchResult {
    pub fn new(choice: String, score: f64, index: usize) -> Self {
        Self {
            choice,
            score,
            index,
        }
    }
}

/// Selection engine with its own tier configuration
#[derive(Debug, Clone, Default)]
pub struct Selector {
    config: SelectConfig,
}

impl Selector {
    /// Create a selector with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selector with custom thresholds
    pub fn with_config(config: SelectConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// Top `limit` candidates by descending score, ties by ascending text.
    pub fn extract<C, F>(
        &self,
        query: &str,
        choices: &[C],
        mut scorer: F,
        limit: usize,
    ) -> Vec<MatchResult>
    where
        C: AsRef<str>,
        F: FnMut(&str, &str) -> f64,
    {
        let scorer = |a: &str, b: &str| Ok(scorer(a, b));
        infallible(self.try_extract(query, choices, scorer, limit))
    }

    /// [`Selector::extract`] with a fallible scorer.
    pub fn try_extract<C, F, E>(
        &self,
        query: &str,
        choices: &[C],
        scorer: F,
        limit: usize,
    ) -> Result<Vec<MatchResult>, E>
    where
        C: AsRef<str>,
        F: FnMut(&str, &str) -> Result<f64, E>,
    {
        top_k::try_extract(&self.config, query, choices, scorer, limit)
    }

    /// Highest-scoring candidate, `None` for an empty slice.
    pub fn extract_one<C, F>(
        &self,
        query: &str,
        choices: &[C],
        mut scorer: F,
    ) -> Option<MatchResult>
    where
        C: AsRef<str>,
        F: FnMut(&str, &str) -> f64,
    {
        let scorer = |a: &str, b: &str| Ok(scorer(a, b));
        infallible(self.try_extract_one(query, choices, scorer))
    }

    /// [`Selector::extract_one`] with a fallible scorer.
    pub fn try_extract_one<C, F, E>(
        &self,
        query: &str,
        choices: &[C],
        scorer: F,
    ) -> Result<Option<MatchResult>, E>
    where
        C: AsRef<str>,
        F: FnMut(&str, &str) -> Result<f64, E>,
    {
        best::try_extract_one(&self.config, query, choices, scorer)
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// [`Selector::extract`] with default thresholds.
pub fn extract<C, F>(query: &str, choices: &[C], scorer: F, limit: usize) -> Vec<MatchResult>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> f64,
{
    Selector::new().extract(query, choices, scorer, limit)
}

/// [`Selector::try_extract`] with default thresholds.
pub fn try_extract<C, F, E>(
    query: &str,
    choices: &[C],
    scorer: F,
    limit: usize,
) -> Result<Vec<MatchResult>, E>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> Result<f64, E>,
{
    Selector::new().try_extract(query, choices, scorer, limit)
}

/// [`Selector::extract_one`] with default thresholds.
pub fn extract_one<C, F>(query: &str, choices: &[C], scorer: F) -> Option<MatchResult>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> f64,
{
    Selector::new().extract_one(query, choices, scorer)
}

/// [`Selector::try_extract_one`] with default thresholds.
pub fn try_extract_one<C, F, E>(
    query: &str,
    choices: &[C],
    scorer: F,
) -> Result<Option<MatchResult>, E>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> Result<f64, E>,
{
    Selector::new().try_extract_one(query, choices, scorer)
}
