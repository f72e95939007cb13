//! End-to-end tests for extract / extract_one

use std::cell::Cell;

use fuzzrank_core::{
    extract, extract_one, ratio, try_extract, try_extract_one, weighted_ratio, SelectConfig,
    Selector,
};
use pretty_assertions::assert_eq;

/// Synthetic catalogue of distinct product names
fn catalogue(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("product {} model {}", i % 977, i))
        .collect()
}

#[derive(Debug, PartialEq)]
struct ScorerFailed(&'static str);

fn always_fails(_: &str, _: &str) -> Result<f64, ScorerFailed> {
    Err(ScorerFailed("always"))
}

fn explodes(_: &str, _: &str) -> f64 {
    panic!("scorer exploded")
}

#[test]
fn test_fruit_example() {
    let choices = ["apple", "apply", "application", "banana"];
    let top = extract("apple", &choices, weighted_ratio, 2);

    assert_eq!(top.len(), 2);
    assert_eq!(top[0].choice, "apple");
    assert_eq!(top[0].score, 100.0);
    // apply and application both score 80, tie broken lexicographically
    assert_eq!(top[1].choice, "application");
    assert_eq!(top[1].score, 80.0);
}

#[test]
fn test_empty_and_zero_limit() {
    let none: Vec<String> = Vec::new();
    let some = catalogue(10);

    assert!(extract("q", &none, weighted_ratio, 5).is_empty());
    assert!(extract("q", &some, weighted_ratio, 0).is_empty());
    assert!(extract_one("q", &none, weighted_ratio).is_none());
}

#[test]
fn test_output_len_and_order_per_tier() {
    for n in [8, 500, 9_000] {
        let choices = catalogue(n);
        let top = extract("product 12 model 4000", &choices, weighted_ratio, 7);
        assert_eq!(top.len(), 7, "n = {}", n);

        for pair in top.windows(2) {
            assert!(pair[0].score >= pair[1].score, "n = {}: {:?}", n, pair);
            if (pair[0].score - pair[1].score).abs() < 0.001 {
                assert!(pair[0].choice <= pair[1].choice, "n = {}: {:?}", n, pair);
            }
        }
    }
}

#[test]
fn test_heap_tier_matches_full_sort() {
    let choices = catalogue(2_000);
    let query = "product 400 model 1377";

    let sorted = Selector::with_config(SelectConfig {
        small_factor: usize::MAX,
        ..Default::default()
    })
    .unwrap()
    .extract(query, &choices, ratio, 10);
    let heap = extract(query, &choices, ratio, 10);

    assert_eq!(sorted, heap);
}

#[test]
fn test_exact_match_found_at_scale() {
    let mut choices = catalogue(250_000);
    let query = "the one we want";
    choices[201_337] = query.to_string();

    let best = extract_one(query, &choices, weighted_ratio).unwrap();
    assert_eq!(best.score, 100.0);
    assert_eq!(best.index, 201_337);
}

#[test]
fn test_extract_one_matches_extract_head_below_threshold() {
    let choices = catalogue(5_000);
    let query = "product 33 modle 4210";

    let best = extract_one(query, &choices, ratio).unwrap();
    let top = extract(query, &choices, ratio, 1);
    assert_eq!(best.score, top[0].score);
}

#[test]
fn test_scorer_error_propagates() {
    let choices = catalogue(100);
    let err = try_extract("q", &choices, always_fails, 5).unwrap_err();
    assert_eq!(err, ScorerFailed("always"));

    let err = try_extract_one("q", &choices, always_fails).unwrap_err();
    assert_eq!(err, ScorerFailed("always"));
}

#[test]
#[should_panic(expected = "scorer exploded")]
fn test_scorer_panic_propagates() {
    let choices = catalogue(100);
    extract("q", &choices, explodes, 5);
}

#[test]
fn test_error_stops_scan_immediately() {
    let choices = catalogue(1_000);
    let calls = Cell::new(0usize);
    let scorer = |_: &str, b: &str| {
        calls.set(calls.get() + 1);
        if b.ends_with(" 10") {
            Err(ScorerFailed("tenth"))
        } else {
            Ok(50.0)
        }
    };
    let result = try_extract("q", &choices, scorer, 3);

    assert_eq!(result, Err(ScorerFailed("tenth")));
    assert_eq!(calls.get(), 11);
}

#[test]
fn test_custom_scorer_range_not_clamped() {
    let choices = ["a", "bb", "ccc"];
    let by_length = |_: &str, b: &str| b.len() as f64 * 1_000.0;
    let top = extract("q", &choices, by_length, 3);
    assert_eq!(top[0].choice, "ccc");
    assert_eq!(top[0].score, 3_000.0);
}
