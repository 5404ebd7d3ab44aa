//! Mattson stack-distance analysis.
//!
//! For a repeated access to key `e` at position `i`, with `p` the previous
//! access to `e`, the recorded distance is the number of distinct keys in
//! `[p, i)` minus one. Back-to-back repeats therefore land in bucket 0.
//! First-time accesses are counted as infinite.

use super::fenwick::FenwickTree;
use crate::histogram::StackDistanceHistogram;
use crate::trace::{AccessTrace, Key};
use crate::utils::error::MrcError;
use log::debug;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// Build the stack-distance histogram of a trace
///
/// Runs in O(n log n): a Fenwick tree marks the position of each key's most
/// recent access, so the distinct keys in `[p, i)` are a range sum.
pub fn analyze(trace: &AccessTrace) -> StackDistanceHistogram {
    let never = AtomicBool::new(false);
    match analyze_with_cancel(trace, &never) {
        Ok(histogram) => histogram,
        Err(_) => unreachable!("analysis without a cancellation request cannot be cancelled"),
    }
}

/// Same as [`analyze`], checking `cancel` before every access
///
/// # Errors
/// * `MrcError::Cancelled` - the flag was raised; carries the number of
///   accesses processed so far
pub fn analyze_with_cancel(
    trace: &AccessTrace,
    cancel: &AtomicBool,
) -> Result<StackDistanceHistogram, MrcError> {
    let keys = trace.keys();
    let mut histogram = StackDistanceHistogram::default();
    let mut last_access: HashMap<Key, usize> = HashMap::new();
    let mut marks = FenwickTree::new(keys.len());

    for (i, &key) in keys.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            debug!("Stack-distance analysis cancelled at access {}", i);
            return Err(MrcError::Cancelled(i));
        }

        match last_access.insert(key, i) {
            None => histogram.record_infinite(),
            Some(previous) => {
                let unique = marks.range_sum(previous, i);
                histogram.record_finite((unique - 1) as u64);
                marks.add(previous, -1);
            }
        }
        marks.add(i, 1);
    }

    debug!(
        "Analyzed {} accesses: {} distinct keys",
        keys.len(),
        histogram.infinite_count()
    );
    Ok(histogram)
}

/// Reference implementation rescanning the window for every access
///
/// Quadratic; kept for cross-checking [`analyze`] on small traces.
pub fn analyze_brute_force(trace: &AccessTrace) -> StackDistanceHistogram {
    let keys = trace.keys();
    let mut histogram = StackDistanceHistogram::default();
    let mut seen: HashSet<Key> = HashSet::new();

    for (i, &key) in keys.iter().enumerate() {
        if seen.insert(key) {
            histogram.record_infinite();
            continue;
        }
        let previous = keys[..i]
            .iter()
            .rposition(|&k| k == key)
            .unwrap_or_default();
        let unique: HashSet<Key> = keys[previous..i].iter().copied().collect();
        histogram.record_finite(unique.len() as u64 - 1);
    }

    histogram
}
