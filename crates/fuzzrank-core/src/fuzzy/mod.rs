//! Composite scorers
//!
//! Four scorers layered on [`crate::distance::ratio`] and
//! [`crate::tokenize`]. Every one of them maps two strings to a score in
//! `[0, 100]`.
//!
//! # Strategies
//!
//! 1. Partial ratio - best-aligned window of the longer string
//! 2. Token sort ratio - word order ignored
//! 3. Token set ratio - duplicates and extra words ignored
//! 4. Weighted ratio - picks among the above by relative length
//!
//! # Example
//!
//! ```rust
//! use fuzzrank_core::fuzzy::{partial_ratio, token_sort_ratio, weighted_ratio};
//!
//! assert_eq!(partial_ratio("abc", "abcdef"), 100.0);
//! assert_eq!(token_sort_ratio("John Smith", "Smith John"), 100.0);
//! assert!(weighted_ratio("apple", "apply") > 70.0);
//! ```

mod strategies;

pub use strategies::{partial_ratio, token_set_ratio, token_sort_ratio, weighted_ratio};
