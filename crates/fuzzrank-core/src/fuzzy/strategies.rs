//! Composite scoring strategies
//!
//! Platform-specific implementations:
//! - `simd` feature: containment fast path via memchr
//! - otherwise: `str::contains`

use crate::distance::{ratio, PERFECT_SCORE};
use crate::tokenize::{sort_tokens, token_set, tokenize};

/// Discount applied to token scores when lengths differ a lot.
const UNBALANCED_TOKEN_SCALE: f64 = 0.95;

/// Length ratio above which two strings are scored as whole-string alignments.
const BALANCED_LEN_RATIO: f64 = 0.8;

/// Length ratio below which substring alignment dominates.
const UNBALANCED_LEN_RATIO: f64 = 0.6;

#[inline]
fn contains(haystack: &str, needle: &str) -> bool {
    #[cfg(feature = "simd")]
    {
        let finder = memchr::memmem::Finder::new(needle.as_bytes());
        finder.find(haystack.as_bytes()).is_some()
    }

    #[cfg(not(feature = "simd"))]
    {
        haystack.contains(needle)
    }
}

/// Best `ratio` between the shorter string and any equally long window of
/// the longer one.
///
/// Containment short-circuits to 100. Either side empty scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    if shorter.is_empty() || longer.is_empty() {
        return 0.0;
    }
    if contains(longer, shorter) {
        return PERFECT_SCORE;
    }

    // Byte offsets of every char boundary, so windows can be sliced without
    // re-allocating
    let bounds: Vec<usize> = longer
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(longer.len()))
        .collect();
    let window = shorter.chars().count();
    let offsets = bounds.len() - 1 - window;

    let mut best = 0.0_f64;
    for start in 0..=offsets {
        let candidate = &longer[bounds[start]..bounds[start + window]];
        let score = ratio(shorter, candidate);
        if score > best {
            best = score;
            if best >= PERFECT_SCORE {
                break;
            }
        }
    }
    best
}

/// `ratio` of the two inputs after tokenizing and sorting their words.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);

    match (tokens_a.is_empty(), tokens_b.is_empty()) {
        (true, true) => PERFECT_SCORE,
        (true, false) | (false, true) => 0.0,
        (false, false) => ratio(&sort_tokens(&tokens_a), &sort_tokens(&tokens_b)),
    }
}

/// Shared-vocabulary score that ignores duplicate words and tolerates one
/// side carrying extra words.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    let set_a = token_set(&tokens_a);
    let set_b = token_set(&tokens_b);

    match (set_a.is_empty(), set_b.is_empty()) {
        (true, true) => return PERFECT_SCORE,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let intersection: Vec<&str> = set_a.intersection(&set_b).copied().collect();
    if intersection.is_empty() {
        return 0.0;
    }

    let only_a = set_a.difference(&set_b).copied();
    let only_b = set_b.difference(&set_a).copied();

    let combined_a: Vec<&str> = intersection.iter().copied().chain(only_a).collect();
    let combined_b: Vec<&str> = intersection.iter().copied().chain(only_b).collect();

    let sorted_intersection = sort_tokens(&intersection);
    let sorted_a = sort_tokens(&combined_a);
    let sorted_b = sort_tokens(&combined_b);

    ratio(&sorted_intersection, &sorted_a)
        .max(ratio(&sorted_intersection, &sorted_b))
        .max(ratio(&sorted_a, &sorted_b))
}

/// Length-aware dispatcher over `ratio`, `partial_ratio` and the token
/// scorers. Default scorer for both selectors.
///
/// - lengths within 80%: whole-string and token scores
/// - lengths under 60%: partial score, token scores discounted by 0.95
/// - in between: everything, undiscounted
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return PERFECT_SCORE;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let len_ratio = if len_a == len_b {
        1.0
    } else {
        len_a.min(len_b) as f64 / len_a.max(len_b) as f64
    };

    if len_ratio > BALANCED_LEN_RATIO {
        let simple = ratio(a, b);
        if simple >= PERFECT_SCORE {
            return simple;
        }
        let sorted = token_sort_ratio(a, b);
        if sorted >= PERFECT_SCORE {
            return sorted;
        }
        return simple.max(sorted).max(token_set_ratio(a, b));
    }

    if len_ratio < UNBALANCED_LEN_RATIO {
        let partial = partial_ratio(a, b);
        if partial >= PERFECT_SCORE {
            return partial;
        }
        return partial
            .max(UNBALANCED_TOKEN_SCALE * token_sort_ratio(a, b))
            .max(UNBALANCED_TOKEN_SCALE * token_set_ratio(a, b));
    }

    let simple = ratio(a, b);
    if simple >= PERFECT_SCORE {
        return simple;
    }
    let partial = partial_ratio(a, b);
    if partial >= PERFECT_SCORE {
        return partial;
    }
    simple
        .max(partial)
        .max(token_sort_ratio(a, b))
        .max(token_set_ratio(a, b))
}
