//! Tunable thresholds for the selection tiers.
//!
//! The defaults were picked empirically. Above `best_linear_max` candidates
//! `extract_one` samples instead of scanning, and results whose score clears
//! `verify_score` or `scan_stop_score` are high-confidence, not guaranteed
//! maxima.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be in (0, 1], got {value}")]
    Fraction { field: &'static str, value: f64 },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field}: min {min} exceeds max {max}")]
    Range {
        field: &'static str,
        min: usize,
        max: usize,
    },
}

/// Selection engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Full sort when `n <= small_factor * limit`
    pub small_factor: usize,
    /// Largest `n` handled by the single-pass bounded heap
    pub medium_max: usize,
    /// Chunk size bounds for the large top-k tier
    pub top_chunk_min: usize,
    pub top_chunk_max: usize,
    /// Fraction of input processed before the top-k early stop may fire
    pub top_stop_fraction: f64,
    /// K-th best score that triggers the top-k early stop
    pub top_stop_score: f64,
    /// Extra chunks scanned after the early stop fires
    pub confirm_chunks: usize,

    /// Largest `n` scanned exhaustively by `extract_one`
    pub best_linear_max: usize,
    /// Extra evenly spaced samples taken after the deciles
    pub extra_samples_min: usize,
    pub extra_samples_max: usize,
    /// Random verification runs only above this many candidates
    pub verify_min_len: usize,
    pub verify_score: f64,
    pub verify_samples: usize,
    /// Chunk size bounds for the sequential best-match scan
    pub scan_chunk_min: usize,
    pub scan_chunk_max: usize,
    /// Scan fraction before the best-match early stop, above `verify_min_len`
    pub scan_stop_fraction_large: f64,
    /// Scan fraction before the best-match early stop, otherwise
    pub scan_stop_fraction: f64,
    pub scan_stop_score: f64,
    /// Evenly spaced samples of the unscanned tail taken on early stop
    pub tail_samples: usize,
    /// Seed for the verification pass
    pub seed: u64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            small_factor: 2,
            medium_max: 8_000,
            top_chunk_min: 3_000,
            top_chunk_max: 10_000,
            top_stop_fraction: 0.2,
            top_stop_score: 93.0,
            confirm_chunks: 2,

            best_linear_max: 20_000,
            extra_samples_min: 15,
            extra_samples_max: 50,
            verify_min_len: 100_000,
            verify_score: 98.0,
            verify_samples: 100,
            scan_chunk_min: 10_000,
            scan_chunk_max: 20_000,
            scan_stop_fraction_large: 0.10,
            scan_stop_fraction: 0.15,
            scan_stop_score: 97.0,
            tail_samples: 200,
            seed: 0x5eed_f022,
        }
    }
}

impl SelectConfig {
    /// Check every field is usable by the selectors
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("top_stop_fraction", self.top_stop_fraction),
            ("scan_stop_fraction_large", self.scan_stop_fraction_large),
            ("scan_stop_fraction", self.scan_stop_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Fraction { field, value });
            }
        }

        for (field, value) in [
            ("small_factor", self.small_factor),
            ("top_chunk_min", self.top_chunk_min),
            ("scan_chunk_min", self.scan_chunk_min),
            ("verify_samples", self.verify_samples),
            ("tail_samples", self.tail_samples),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }

        for (field, min, max) in [
            ("top_chunk", self.top_chunk_min, self.top_chunk_max),
            ("scan_chunk", self.scan_chunk_min, self.scan_chunk_max),
            (
                "extra_samples",
                self.extra_samples_min,
                self.extra_samples_max,
            ),
        ] {
            if min > max {
                return Err(ConfigError::Range { field, min, max });
            }
        }

        Ok(())
    }

    /// Chunk size for the large top-k tier: grows with `n`
    pub(crate) fn top_chunk_size(&self, n: usize) -> usize {
        (n / 20).clamp(self.top_chunk_min, self.top_chunk_max)
    }

    /// Chunk size for the sequential best-match scan
    pub(crate) fn scan_chunk_size(&self, n: usize) -> usize {
        (n / 50).clamp(self.scan_chunk_min, self.scan_chunk_max)
    }

    /// Number of extra evenly spaced samples for `n` candidates
    pub(crate) fn extra_samples(&self, n: usize) -> usize {
        let (min, max) = (self.extra_samples_min, self.extra_samples_max);
        (n / 10_000).clamp(min, max)
    }

    pub(crate) fn scan_stop_fraction_for(&self, n: usize) -> f64 {
        if n > self.verify_min_len {
            self.scan_stop_fraction_large
        } else {
            self.scan_stop_fraction
        }
    }
}
