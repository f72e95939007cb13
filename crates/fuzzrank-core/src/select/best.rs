//! Best-match selection ("extract_one").
//!
//! Up to `best_linear_max` candidates this is an exact linear scan. Above it
//! the search is staged to bound latency:
//!
//! 1. probe for a candidate byte-equal to the query
//! 2. sample deciles plus evenly spaced extra positions
//! 3. on huge inputs with a best above `verify_score`, verify with seeded
//!    random samples and stop if nothing improves
//! 4. chunked sequential scan; once enough has been scanned and the best
//!    clears `scan_stop_score`, sample the unscanned tail and stop
//!
//! Results from stages 3 and 4 are high-confidence, not guaranteed maxima.

use ahash::AHashSet;
use tracing::{debug, trace};

use super::{MatchResult, SelectConfig};
use crate::distance::PERFECT_SCORE;

pub(crate) fn try_extract_one<C, F, E>(
    config: &SelectConfig,
    query: &str,
    choices: &[C],
    scorer: F,
) -> Result<Option<MatchResult>, E>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> Result<f64, E>,
{
    let Some(first) = choices.first() else {
        return Ok(None);
    };

    let mut search = Search {
        query,
        choices,
        scorer,
        best_index: 0,
        best_score: 0.0,
        sampled: AHashSet::new(),
    };
    search.best_score = (search.scorer)(query, first.as_ref())?;
    search.sampled.insert(0);

    if search.is_perfect() {
        return Ok(Some(search.into_result()));
    }

    let n = choices.len();
    if n <= config.best_linear_max {
        debug!(n, "extract_one: linear scan");
        for index in 1..n {
            if search.visit(index)? {
                break;
            }
        }
        return Ok(Some(search.into_result()));
    }

    debug!(n, "extract_one: staged sampling");
    search.staged(config)?;
    Ok(Some(search.into_result()))
}

struct Search<'a, C, F> {
    query: &'a str,
    choices: &'a [C],
    scorer: F,
    best_index: usize,
    best_score: f64,
    /// Positions scored out of order, skipped by the sequential scan
    sampled: AHashSet<usize>,
}

impl<C, F, E> Search<'_, C, F>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> Result<f64, E>,
{
    /// Exactly 100. Custom scorers may go higher, so this is not a maximum.
    fn is_perfect(&self) -> bool {
        self.best_score == PERFECT_SCORE
    }

    /// Score `index`, keeping the earliest of equal bests. A NaN best is
    /// replaced by any real score. Returns whether the best is now perfect.
    fn visit(&mut self, index: usize) -> Result<bool, E> {
        let score = (self.scorer)(self.query, self.choices[index].as_ref())?;
        if score > self.best_score || (self.best_score.is_nan() && !score.is_nan()) {
            self.best_score = score;
            self.best_index = index;
        } else if score == self.best_score && index < self.best_index {
            self.best_index = index;
        }
        Ok(self.is_perfect())
    }

    /// Visit `index` out of order, once.
    fn sample(&mut self, index: usize) -> Result<bool, E> {
        if !self.sampled.insert(index) {
            return Ok(false);
        }
        self.visit(index)
    }

    fn staged(&mut self, config: &SelectConfig) -> Result<(), E> {
        let n = self.choices.len();

        // Exact duplicates of the query must never be lost to sampling
        let query = self.query;
        if let Some(index) = self.choices.iter().position(|c| c.as_ref() == query) {
            if self.sample(index)? {
                debug!(index, "extract_one: exact candidate");
                return Ok(());
            }
        }

        let extra = config.extra_samples(n);
        let strategic = (0..10)
            .map(|k| k * n / 10)
            .chain((1..=extra).map(|k| k * n / (extra + 1)));
        for index in strategic {
            if self.sample(index)? {
                debug!(index, "extract_one: perfect match while sampling");
                return Ok(());
            }
        }
        trace!(
            best = self.best_score,
            samples = self.sampled.len(),
            "extract_one: strategic samples done"
        );

        if n > config.verify_min_len && self.best_score > config.verify_score {
            let before = self.best_score;
            let mut rng = fastrand::Rng::with_seed(config.seed);
            for _ in 0..config.verify_samples {
                if self.sample(rng.usize(..n))? {
                    return Ok(());
                }
            }
            if self.best_score <= before {
                debug!(
                    best = self.best_score,
                    threshold = config.verify_score,
                    "extract_one: verification found nothing better, accepting sample"
                );
                return Ok(());
            }
        }

        let chunk_size = config.scan_chunk_size(n);
        let stop_at = n as f64 * config.scan_stop_fraction_for(n);

        for start in (0..n).step_by(chunk_size) {
            let end = (start + chunk_size).min(n);
            for index in start..end {
                if self.sampled.contains(&index) {
                    continue;
                }
                if self.visit(index)? {
                    return Ok(());
                }
            }
            trace!(
                scanned = end,
                best = self.best_score,
                "extract_one: chunk done"
            );

            if end as f64 >= stop_at && self.best_score > config.scan_stop_score {
                debug!(
                    scanned = end,
                    best = self.best_score,
                    threshold = config.scan_stop_score,
                    "extract_one: early stop, sampling tail"
                );
                return self.sample_tail(end, config.tail_samples);
            }
        }

        Ok(())
    }

    /// Evenly spaced samples over `[from, n)`.
    fn sample_tail(&mut self, from: usize, samples: usize) -> Result<(), E> {
        let remaining = self.choices.len() - from;
        let count = samples.min(remaining);
        for k in 0..count {
            if self.sample(from + k * remaining / count)? {
                break;
            }
        }
        Ok(())
    }

    fn into_result(self) -> MatchResult {
        MatchResult::new(
            self.choices[self.best_index].as_ref().to_string(),
            self.best_score,
            self.best_index,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::weighted_ratio;
    use std::convert::Infallible;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("entry-{}", i)).collect()
    }

    fn best_of<F>(query: &str, choices: &[String], mut scorer: F) -> Option<MatchResult>
    where
        F: FnMut(&str, &str) -> f64,
    {
        let wrapped = |a: &str, b: &str| Ok::<_, Infallible>(scorer(a, b));
        match try_extract_one(&SelectConfig::default(), query, choices, wrapped) {
            Ok(best) => best,
            Err(e) => match e {},
        }
    }

    #[test]
    fn test_empty() {
        assert!(best_of("q", &[], |_: &str, _: &str| 1.0).is_none());
    }

    #[test]
    fn test_first_perfect_short_circuits() {
        let choices = words(10);
        let mut calls = 0;
        let out = best_of("entry-0", &choices, |a: &str, b: &str| {
            calls += 1;
            weighted_ratio(a, b)
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(out.index, 0);
    }

    #[test]
    fn test_linear_keeps_earliest_tie() {
        let choices = words(100);
        let out = best_of("q", &choices, |_: &str, b: &str| {
            if b.ends_with('7') {
                50.0
            } else {
                10.0
            }
        })
        .unwrap();
        assert_eq!(out.choice, "entry-7");
    }

    #[test]
    fn test_large_finds_exact_anywhere() {
        let mut choices = words(150_000);
        choices[123_457] = "needle in haystack".to_string();
        // Near misses everywhere push the best above the early-stop thresholds
        let out = best_of("needle in haystack", &choices, |a: &str, b: &str| {
            if a == b {
                100.0
            } else {
                99.0
            }
        })
        .unwrap();
        assert_eq!(out.score, 100.0);
        assert_eq!(out.index, 123_457);
    }

    #[test]
    fn test_verification_accepts_sample() {
        let choices = words(200_000);
        let mut calls = 0usize;
        let out = best_of("q", &choices, |_: &str, _: &str| {
            calls += 1;
            99.0
        })
        .unwrap();
        assert_eq!(out.score, 99.0);
        // first + deciles + extra samples + at most 100 verification samples
        assert!(calls <= 1 + 10 + 20 + 100, "calls = {}", calls);
    }

    #[test]
    fn test_scan_early_stop() {
        let choices = words(50_000);
        let mut calls = 0usize;
        best_of("q", &choices, |_: &str, _: &str| {
            calls += 1;
            97.5
        });
        // chunk 10_000 > 15% of 50_000, so one chunk plus tail samples
        assert!(calls < 10_000 + 200 + 30, "calls = {}", calls);
        assert!(calls >= 10_000 - 30);
    }

    #[test]
    fn test_full_scan_on_low_scores() {
        let choices = words(30_000);
        let mut calls = 0usize;
        let out = best_of("q", &choices, |_: &str, b: &str| {
            calls += 1;
            if b == "entry-29999" {
                60.0
            } else {
                5.0
            }
        })
        .unwrap();
        assert_eq!(calls, 30_000);
        assert_eq!(out.choice, "entry-29999");
    }

    #[test]
    fn test_scorer_error_propagates() {
        let choices = words(40_000);
        let config = SelectConfig::default();
        let result = try_extract_one(&config, "q", &choices, |_: &str, b: &str| {
            if b == "entry-35000" {
                Err("scorer failed")
            } else {
                Ok(1.0)
            }
        });
        assert_eq!(result, Err("scorer failed"));
    }

    #[test]
    fn test_scores_above_hundred_do_not_stop_scan() {
        let choices: Vec<String> = ["p", "x", "y", "best"].map(String::from).to_vec();
        let out = best_of("q", &choices, |_: &str, b: &str| match b {
            "p" => 150.0,
            "best" => 200.0,
            _ => 1.0,
        })
        .unwrap();
        assert_eq!(out.choice, "best");
        assert_eq!(out.score, 200.0);
    }

    #[test]
    fn test_nan_first_score_is_replaced() {
        let choices: Vec<String> = ["a", "b", "c"].map(String::from).to_vec();
        let out = best_of("q", &choices, |_: &str, b: &str| match b {
            "a" => f64::NAN,
            "b" => 50.0,
            _ => 10.0,
        })
        .unwrap();
        assert_eq!(out.choice, "b");
        assert_eq!(out.score, 50.0);
    }
}
