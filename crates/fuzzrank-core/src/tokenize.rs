//! Word tokenizer used by the token-based scorers.
//!
//! Splits on space, tab, newline, dash and underscore, lower-casing each
//! token. Consecutive delimiters never produce empty tokens.

use ahash::AHashSet;

#[inline]
fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '-' | '_')
}

/// Split `s` into lower-cased tokens in a single left-to-right scan.
pub fn tokenize(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in s.chars() {
        if is_delimiter(c) {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        } else {
            current.extend(c.to_lowercase());
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Sort tokens lexicographically and join them with single spaces.
pub fn sort_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut sorted: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();
    sorted.join(" ")
}

/// Deduplicated, order-independent view of a token sequence.
pub fn token_set(tokens: &[String]) -> AHashSet<&str> {
    tokens.iter().map(String::as_str).collect()
}
