//! Levenshtein edit distance and the normalized 0-100 ratio built on it.
//!
//! Both functions operate on Unicode scalar values, so `"café"` has length 4
//! regardless of its UTF-8 encoding.

/// Score assigned to a perfect match.
pub const PERFECT_SCORE: f64 = 100.0;

/// Minimum number of single-character insertions, deletions and substitutions
/// needed to turn `a` into `b`.
///
/// Runs the classic dynamic program over two rolling rows sized to the
/// shorter input: O(|a|·|b|) time, O(min(|a|, |b|)) space.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Inner dimension is the shorter string
    let (outer, inner) = if a.len() >= b.len() {
        (&a, &b)
    } else {
        (&b, &a)
    };

    let mut prev: Vec<usize> = (0..=inner.len()).collect();
    let mut curr: Vec<usize> = vec![0; inner.len() + 1];

    for (i, oc) in outer.iter().enumerate() {
        curr[0] = i + 1;
        for (j, ic) in inner.iter().enumerate() {
            let substitution = prev[j] + usize::from(oc != ic);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let result = prev[inner.len()];
    assert!(
        result <= outer.len(),
        "edit distance {} exceeds longer length {}",
        result,
        outer.len()
    );
    result
}

/// Normalized similarity in `[0, 100]`.
///
/// `100` for identical strings (including two empty strings), otherwise
/// `(max_len - distance) / max_len * 100`, floored at `0`.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return PERFECT_SCORE;
    }

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return PERFECT_SCORE;
    }

    let dist = distance(a, b);
    if dist >= max_len {
        return 0.0;
    }

    ((max_len - dist) as f64 / max_len as f64) * PERFECT_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitten_sitting() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("sitting", "kitten"), 3);
    }

    #[test]
    fn test_identical() {
        assert_eq!(distance("flaw", "flaw"), 0);
        assert_eq!(ratio("flaw", "flaw"), 100.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abc", ""), 3);
        assert_eq!(distance("", ""), 0);
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("", "abc"), 0.0);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(distance("café", "cafe"), 1);
        assert_eq!(ratio("café", "cafe"), 75.0);
    }

    #[test]
    fn test_ratio_partial_overlap() {
        // one substitution over four characters
        assert_eq!(ratio("abcd", "abce"), 75.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_ratio_symmetric() {
        assert_eq!(ratio("apple", "apply"), ratio("apply", "apple"));
        assert_eq!(ratio("abc", "abcdef"), ratio("abcdef", "abc"));
    }
}
