//! Query validation hook.
//!
//! Rejects malformed queries before any scoring happens.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Query acceptance rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRules {
    /// Maximum query length in characters
    pub max_len: usize,
    /// Accept empty or whitespace-only queries
    pub allow_empty: bool,
}

impl Default for QueryRules {
    fn default() -> Self {
        Self {
            max_len: 1024,
            allow_empty: false,
        }
    }
}

impl QueryRules {
    pub fn validate(&self, query: &str) -> Result<()> {
        if !self.allow_empty && query.trim().is_empty() {
            return Err(Error::InvalidQuery("query is empty".to_string()));
        }

        let len = query.chars().count();
        if len > self.max_len {
            return Err(Error::InvalidQuery(format!(
                "query is {} characters, limit is {}",
                len, self.max_len
            )));
        }

        if let Some(c) = query.chars().find(|&c| is_forbidden(c)) {
            return Err(Error::InvalidQuery(format!(
                "query contains control character {:?}",
                c
            )));
        }

        Ok(())
    }
}

fn is_forbidden(c: char) -> bool {
    c.is_control() && c != '\t' && c != '\n'
}

/// Validate `query` against the default rules.
pub fn validate_query(query: &str) -> Result<()> {
    QueryRules::default().validate(query)
}

/// Scorer wrapper that validates the query side before scoring.
#[derive(Debug, Clone)]
pub struct Validated<F> {
    inner: F,
    rules: QueryRules,
}

impl<F> Validated<F>
where
    F: Fn(&str, &str) -> f64,
{
    pub fn new(inner: F, rules: QueryRules) -> Self {
        Self { inner, rules }
    }

    pub fn score(&self, query: &str, choice: &str) -> Result<f64> {
        self.rules.validate(query)?;
        Ok((self.inner)(query, choice))
    }

    pub fn rules(&self) -> &QueryRules {
        &self.rules
    }
}
