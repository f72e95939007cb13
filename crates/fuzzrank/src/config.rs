//! fuzzrank configuration
//!
//! Layered: built-in defaults, then an optional JSON file, then environment
//! variables:
//! - `FUZZRANK_SCORER`: scorer kind (default: weighted)
//! - `FUZZRANK_LIMIT`: default top-k limit (default: 5)
//! - `FUZZRANK_PROCESS`: trim + lowercase inputs, `true`/`false` (default: true)
//! - `FUZZRANK_CACHE_CAPACITY`: memoize up to N pairs, 0 disables (default: off)
//! - `FUZZRANK_CACHE_TTL_MS`: expire memoized scores after N ms

use std::path::Path;
use std::time::Duration;

use fuzzrank_core::SelectConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::{ScorerBuilder, ScorerKind};
use crate::error::{Error, Result};
use crate::validate::QueryRules;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzrankConfig {
    pub scorer: ScorerKind,
    pub limit: usize,
    pub process: bool,
    pub cache_capacity: Option<usize>,
    pub cache_ttl_ms: Option<u64>,
    pub instrument: bool,
    pub query: QueryRules,
    pub select: SelectConfig,
}

impl Default for FuzzrankConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerKind::Weighted,
            limit: 5,
            process: true,
            cache_capacity: None,
            cache_ttl_ms: None,
            instrument: false,
            query: QueryRules::default(),
            select: SelectConfig::default(),
        }
    }
}

impl FuzzrankConfig {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply `FUZZRANK_*` overrides read through `lookup`.
    pub fn with_env<L>(mut self, lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FUZZRANK_SCORER") {
            self.scorer = value.parse()?;
        }
        if let Some(value) = lookup("FUZZRANK_LIMIT") {
            self.limit = parse_env("FUZZRANK_LIMIT", &value)?;
        }
        if let Some(value) = lookup("FUZZRANK_PROCESS") {
            self.process = parse_env("FUZZRANK_PROCESS", &value)?;
        }
        if let Some(value) = lookup("FUZZRANK_CACHE_CAPACITY") {
            let capacity: usize = parse_env("FUZZRANK_CACHE_CAPACITY", &value)?;
            self.cache_capacity = (capacity > 0).then_some(capacity);
        }
        if let Some(value) = lookup("FUZZRANK_CACHE_TTL_MS") {
            self.cache_ttl_ms = Some(parse_env("FUZZRANK_CACHE_TTL_MS", &value)?);
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.select.validate()?;
        if self.cache_capacity == Some(0) {
            return Err(Error::Config(
                "cache_capacity must be greater than zero".to_string(),
            ));
        }
        if self.cache_ttl_ms.is_some() && self.cache_capacity.is_none() {
            return Err(Error::Config(
                "cache_ttl_ms requires cache_capacity".to_string(),
            ));
        }
        Ok(())
    }

    /// Scorer builder reflecting this configuration
    pub fn builder(&self) -> ScorerBuilder {
        let mut builder = ScorerBuilder::new(self.scorer)
            .process(self.process)
            .validate(self.query.clone())
            .instrument(self.instrument)
            .select(self.select.clone());
        if let Some(capacity) = self.cache_capacity {
            builder = builder.cache(capacity);
        }
        if let Some(ms) = self.cache_ttl_ms {
            builder = builder.cache_ttl(Duration::from_millis(ms));
        }
        builder
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    match value.trim().parse() {
        Ok(parsed) => Ok(parsed),
        Err(_) => Err(Error::Config(format!("{}: cannot parse '{}'", key, value))),
    }
}
