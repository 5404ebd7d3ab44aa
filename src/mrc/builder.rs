//! Histogram → miss-ratio curve conversion.
//!
//! A cache of capacity `c` misses every access whose stack distance is at
//! least `c`, so the miss ratio at a key is the share of the histogram mass
//! at or beyond that key. Walking the keys in ascending order with a running
//! total gives the whole curve in one pass.

use super::curve::MissRatioCurve;
use crate::histogram::{BinnedHistogram, Distance, StackDistanceHistogram};
use crate::utils::error::MrcError;
use log::{debug, warn};

/// Build the MRC of a binned histogram
///
/// The false-infinity and +∞ buckets are part of the walk, so the curve ends
/// with the ratio of cold misses at `Distance::Infinite`.
///
/// # Errors
/// * `MrcError::EmptyInput` - the histogram holds no mass
/// * `MrcError::MalformedInput` - a bucket holds a negative count
pub fn build(histogram: &BinnedHistogram) -> Result<MissRatioCurve, MrcError> {
    if let Some((key, count)) = histogram.entries().iter().find(|(_, c)| **c < 0.0) {
        return Err(MrcError::MalformedInput(format!(
            "negative count {} at distance {}",
            count, key
        )));
    }
    build_from_entries(
        histogram
            .entries()
            .iter()
            .map(|(&key, &count)| (key, count)),
        histogram.total(),
    )
}

/// Build the MRC of an exact stack-distance histogram
pub fn build_exact(histogram: &StackDistanceHistogram) -> Result<MissRatioCurve, MrcError> {
    let entries = histogram
        .distances()
        .iter()
        .map(|(&distance, &count)| (Distance::Finite(distance), count as f64))
        .chain(std::iter::once((
            Distance::Infinite,
            histogram.infinite_count() as f64,
        )));
    build_from_entries(entries, histogram.total() as f64)
}

fn build_from_entries(
    entries: impl Iterator<Item = (Distance, f64)>,
    total: f64,
) -> Result<MissRatioCurve, MrcError> {
    if total <= 0.0 {
        return Err(MrcError::EmptyInput(
            "histogram has no accesses; the miss ratio is undefined".to_string(),
        ));
    }

    let mut running = total;
    let mut points = Vec::new();
    for (key, count) in entries {
        points.push((key, (running / total).clamp(0.0, 1.0)));
        running -= count;
    }

    // Fractional counts may leave rounding noise behind
    if running.abs() > total * 1e-9 {
        warn!("MRC running total ended at {} instead of 0", running);
    }

    debug!("Built MRC with {} points over {} accesses", points.len(), total);
    Ok(MissRatioCurve::from_points_unchecked(points))
}
