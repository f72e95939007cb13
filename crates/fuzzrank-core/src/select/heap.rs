//! Fixed-capacity top-k set backed by a min-oriented binary heap.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::MatchResult;
use crate::distance::PERFECT_SCORE;

/// Scores closer than this compare as equal.
const SCORE_EPSILON: f64 = 0.001;

/// Scores are bucketed to `SCORE_EPSILON` so that "equal within epsilon"
/// stays a total order.
#[inline]
fn bucket(score: f64) -> i64 {
    (score / SCORE_EPSILON).round() as i64
}

/// Ranking order used for every selector output: descending score, then
/// ascending candidate text. `Less` means `a` ranks first.
///
/// Scores are compared by 0.001 bucket, not by pairwise distance, so two
/// scores less than 0.001 apart that straddle a bucket edge still order by
/// score (80.0006 before 80.0004). Pairwise "within 0.001" is not transitive.
pub(crate) fn rank(a_score: f64, a_choice: &str, b_score: f64, b_choice: &str) -> Ordering {
    bucket(b_score)
        .cmp(&bucket(a_score))
        .then_with(|| a_choice.cmp(b_choice))
        .then_with(|| b_score.total_cmp(&a_score))
}

/// A scored candidate held by the heap, borrowed from the caller's slice.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry<'a> {
    pub choice: &'a str,
    pub score: f64,
    pub index: usize,
}

impl Entry<'_> {
    fn into_result(self) -> MatchResult {
        MatchResult::new(self.choice.to_string(), self.score, self.index)
    }
}

// Greater = better ranked
impl Ord for Entry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        rank(other.score, other.choice, self.score, self.choice)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Entry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry<'_> {}

/// Holds the best `capacity` entries seen so far. The worst held entry sits
/// at the top of the heap so replacement is O(log k).
#[derive(Debug)]
pub(crate) struct BoundedTopSet<'a> {
    heap: BinaryHeap<Reverse<Entry<'a>>>,
    capacity: usize,
    perfect: usize,
}

impl<'a> BoundedTopSet<'a> {
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            capacity,
            perfect: 0,
        }
    }

    /// Offer an entry; returns whether it was kept.
    pub fn push(&mut self, entry: Entry<'a>) -> bool {
        if self.capacity == 0 {
            return false;
        }

        if self.heap.len() < self.capacity {
            self.track(&entry, true);
            self.heap.push(Reverse(entry));
            return true;
        }

        let beats_worst = matches!(self.heap.peek(), Some(Reverse(worst)) if entry > *worst);
        if !beats_worst {
            return false;
        }

        if let Some(Reverse(evicted)) = self.heap.pop() {
            self.track(&evicted, false);
        }
        self.track(&entry, true);
        self.heap.push(Reverse(entry));
        true
    }

    fn track(&mut self, entry: &Entry<'_>, added: bool) {
        if entry.score == PERFECT_SCORE {
            if added {
                self.perfect += 1;
            } else {
                self.perfect -= 1;
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.capacity
    }

    /// Score of the worst held entry, once the set is full.
    pub fn threshold(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        self.heap.peek().map(|Reverse(e)| e.score)
    }

    /// Every held entry scores exactly 100.
    pub fn is_saturated(&self) -> bool {
        self.capacity > 0 && self.perfect >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drain into ranking order.
    pub fn into_sorted(self) -> Vec<MatchResult> {
        // into_sorted_vec is ascending over Reverse, i.e. best first
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(e)| e.into_result())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(choice: &str, score: f64, index: usize) -> Entry<'_> {
        Entry {
            choice,
            score,
            index,
        }
    }

    fn choices(results: &[MatchResult]) -> Vec<&str> {
        results.iter().map(|r| r.choice.as_str()).collect()
    }

    #[test]
    fn test_keeps_best_k() {
        let mut set = BoundedTopSet::new(2);
        set.push(entry("a", 10.0, 0));
        set.push(entry("b", 50.0, 1));
        set.push(entry("c", 30.0, 2));
        set.push(entry("d", 5.0, 3));

        let out = set.into_sorted();
        assert_eq!(choices(&out), vec!["b", "c"]);
    }

    #[test]
    fn test_tie_break_lexicographic() {
        let mut set = BoundedTopSet::new(3);
        set.push(entry("pear", 80.0, 0));
        set.push(entry("apple", 80.0, 1));
        set.push(entry("fig", 80.0004, 2));
        set.push(entry("kiwi", 90.0, 3));

        let out = set.into_sorted();
        assert_eq!(choices(&out), vec!["kiwi", "apple", "fig"]);
    }

    #[test]
    fn test_equal_score_smaller_text_evicts() {
        let mut set = BoundedTopSet::new(1);
        assert!(set.push(entry("zebra", 70.0, 0)));
        assert!(set.push(entry("aardvark", 70.0, 1)));
        assert!(!set.push(entry("moose", 70.0, 2)));
        assert_eq!(choices(&set.into_sorted()), vec!["aardvark"]);
    }

    #[test]
    fn test_threshold_and_saturation() {
        let mut set = BoundedTopSet::new(2);
        assert_eq!(set.threshold(), None);
        set.push(entry("x", 100.0, 0));
        assert!(!set.is_saturated());
        set.push(entry("y", 60.0, 1));
        assert_eq!(set.threshold(), Some(60.0));
        set.push(entry("z", 100.0, 2));
        assert!(set.is_saturated());
        assert_eq!(set.threshold(), Some(100.0));
    }

    #[test]
    fn test_bucket_edge_orders_by_score() {
        let mut set = BoundedTopSet::new(2);
        set.push(entry("a", 80.0004, 0));
        set.push(entry("b", 80.0006, 1));
        assert_eq!(choices(&set.into_sorted()), vec!["b", "a"]);
    }

    #[test]
    fn test_scores_above_hundred_are_not_perfect() {
        let mut set = BoundedTopSet::new(1);
        set.push(entry("p", 150.0, 0));
        assert!(!set.is_saturated());
        set.push(entry("q", 100.0, 1));
        assert!(!set.is_saturated());
        assert_eq!(choices(&set.into_sorted()), vec!["p"]);
    }

    #[test]
    fn test_zero_capacity() {
        let mut set = BoundedTopSet::new(0);
        assert!(!set.push(entry("a", 100.0, 0)));
        assert_eq!(set.len(), 0);
        assert!(set.into_sorted().is_empty());
    }

    #[test]
    fn test_rank_order() {
        assert_eq!(rank(90.0, "b", 80.0, "a"), Ordering::Less);
        assert_eq!(rank(80.0, "a", 80.0, "b"), Ordering::Less);
        assert_eq!(rank(80.0, "b", 80.0, "a"), Ordering::Greater);
    }
}
