//! Top-k selection ("extract").
//!
//! Three tiers by candidate count `n`:
//! - `n <= small_factor * limit`: score everything, sort, truncate
//! - `n <= medium_max`: one pass through a bounded heap
//! - larger: chunked pass through the same heap, stopping a few chunks after
//!   the k-th best score clears `top_stop_score`

use tracing::{debug, trace};

use super::heap::{BoundedTopSet, Entry};
use super::{MatchResult, SelectConfig};

pub(crate) fn try_extract<C, F, E>(
    config: &SelectConfig,
    query: &str,
    choices: &[C],
    mut scorer: F,
    limit: usize,
) -> Result<Vec<MatchResult>, E>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> Result<f64, E>,
{
    let n = choices.len();
    if limit == 0 || n == 0 {
        return Ok(Vec::new());
    }
    let limit = limit.min(n);

    if n <= config.small_factor.saturating_mul(limit) {
        debug!(n, limit, "extract: full sort");
        return full_sort(query, choices, &mut scorer, limit);
    }

    let mut set = BoundedTopSet::new(limit);

    if n <= config.medium_max {
        debug!(n, limit, "extract: bounded heap");
        if scan(&mut set, query, choices, 0, &mut scorer)? {
            debug!(n, limit, "extract: saturated with perfect matches");
        }
        return Ok(set.into_sorted());
    }

    let chunk_size = config.top_chunk_size(n);
    let stop_at = n as f64 * config.top_stop_fraction;
    debug!(n, limit, chunk_size, "extract: chunked heap");

    let mut processed = 0usize;
    let mut confirm: Option<usize> = None;

    for chunk in choices.chunks(chunk_size) {
        if let Some(left) = confirm {
            if left == 0 {
                break;
            }
            confirm = Some(left - 1);
        }

        if scan(&mut set, query, chunk, processed, &mut scorer)? {
            debug!(
                n,
                limit,
                processed,
                "extract: saturated with perfect matches"
            );
            return Ok(set.into_sorted());
        }
        processed += chunk.len();
        trace!(processed, held = set.len(), "extract: chunk done");

        if confirm.is_none() && processed as f64 >= stop_at {
            if let Some(kth) = set.threshold().filter(|&s| s > config.top_stop_score) {
                debug!(
                    processed,
                    kth_score = kth,
                    confirm_chunks = config.confirm_chunks,
                    "extract: early stop armed"
                );
                confirm = Some(config.confirm_chunks);
            }
        }
    }

    Ok(set.into_sorted())
}

fn full_sort<C, F, E>(
    query: &str,
    choices: &[C],
    scorer: &mut F,
    limit: usize,
) -> Result<Vec<MatchResult>, E>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> Result<f64, E>,
{
    let mut entries = Vec::with_capacity(choices.len());
    for (index, choice) in choices.iter().enumerate() {
        let choice = choice.as_ref();
        let score = scorer(query, choice)?;
        entries.push(Entry {
            choice,
            score,
            index,
        });
    }

    // Entry orders best as greatest
    entries.sort_unstable_by(|a, b| b.cmp(a));
    entries.truncate(limit);

    Ok(entries
        .into_iter()
        .map(|e| MatchResult::new(e.choice.to_string(), e.score, e.index))
        .collect())
}

/// Feed `chunk` into `set`. Returns `true` once the set is saturated with
/// perfect matches.
fn scan<'a, C, F, E>(
    set: &mut BoundedTopSet<'a>,
    query: &str,
    chunk: &'a [C],
    base: usize,
    scorer: &mut F,
) -> Result<bool, E>
where
    C: AsRef<str>,
    F: FnMut(&str, &str) -> Result<f64, E>,
{
    for (offset, choice) in chunk.iter().enumerate() {
        let choice = choice.as_ref();
        let score = scorer(query, choice)?;
        set.push(Entry {
            choice,
            score,
            index: base + offset,
        });
        if set.is_saturated() {
            return Ok(true);
        }
    }
    Ok(false)
}
