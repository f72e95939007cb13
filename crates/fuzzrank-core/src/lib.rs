//! fuzzrank Core Engine
//!
//! String similarity scoring and candidate selection. Pure, synchronous and
//! free of global state: every call allocates its own working state.
//!
//! # Modules
//!
//! - [`distance`] - Levenshtein distance and the 0-100 ratio
//! - [`tokenize`] - word tokenizer for the token scorers
//! - [`fuzzy`] - partial, token-sort, token-set and weighted scorers
//! - [`select`] - top-k and best-match selection over candidate slices
//!
//! # Features
//!
//! - `simd` - SIMD-accelerated substring search via memchr
//!
//! # Example
//!
//! ```rust
//! use fuzzrank_core::{extract, extract_one, weighted_ratio};
//!
//! let choices = ["apple", "apply", "application", "banana"];
//!
//! let top = extract("apple", &choices, weighted_ratio, 2);
//! assert_eq!(top.len(), 2);
//! assert_eq!(top[0].choice, "apple");
//!
//! let best = extract_one("bananna", &choices, weighted_ratio).unwrap();
//! assert_eq!(best.choice, "banana");
//! ```

pub mod distance;
pub mod fuzzy;
pub mod select;
pub mod tokenize;

// Re-export main types at crate root
pub use distance::{distance, ratio, PERFECT_SCORE};
pub use fuzzy::{partial_ratio, token_set_ratio, token_sort_ratio, weighted_ratio};
pub use select::{
    extract, extract_one, try_extract, try_extract_one, ConfigError, MatchResult, SelectConfig,
    Selector,
};
pub use tokenize::{sort_tokens, token_set, tokenize};
