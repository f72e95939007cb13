//! # fuzzrank
//!
//! Collaborators layered over [`fuzzrank_core`]:
//! - **process**: input normalization (trim + lowercase)
//! - **cache**: memoizing scorer wrapper with LRU eviction and TTL
//! - **validate**: query validation hook
//! - **instrument**: call counting and timing
//! - **builder**: declarative scorer construction from the pieces above
//! - **config**: JSON file + environment configuration
//! - **error**: common error type
//! - **tracing**: logging setup
//!
//! ## Usage
//!
//! ```rust
//! use fuzzrank::config::FuzzrankConfig;
//!
//! let scorer = FuzzrankConfig::default().builder().build().unwrap();
//! let best = scorer.extract_one("new york", &["New York", "Newark"]).unwrap();
//! assert_eq!(best.unwrap().choice, "New York");
//! ```

pub mod builder;
pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod process;
pub mod tracing;
pub mod validate;

// Re-export commonly used items at crate root
pub use builder::{Scorer, ScorerBuilder, ScorerKind};
pub use config::FuzzrankConfig;
pub use error::{Error, Result};
pub use fuzzrank_core::MatchResult;
