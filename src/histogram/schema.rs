//! Histogram data types shared by the analyzer, codecs and MRC builder.
//!
//! Distances are kept as scaled integers (`raw_key * bin_size`) and the
//! "+∞" bucket is a dedicated variant, so no float is ever used as a key.

use crate::utils::error::MrcError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reuse distance of an access, or infinity for a first-time access
///
/// `Finite` orders before `Infinite`, so sorted maps place +∞ last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Distance {
    Finite(u64),
    Infinite,
}

impl Distance {
    /// Finite distance value, if any
    pub fn finite(self) -> Option<u64> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}

/// Exact stack-distance histogram produced by the analyzer
///
/// Invariant: `sum(distances) + infinite_count == trace length`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackDistanceHistogram {
    distances: BTreeMap<u64, u64>,
    infinite_count: u64,
}

impl StackDistanceHistogram {
    pub fn new(distances: BTreeMap<u64, u64>, infinite_count: u64) -> Self {
        Self {
            distances,
            infinite_count,
        }
    }

    /// Sparse distance → count mapping (zero counts never stored)
    pub fn distances(&self) -> &BTreeMap<u64, u64> {
        &self.distances
    }

    /// Number of first-time accesses
    pub fn infinite_count(&self) -> u64 {
        self.infinite_count
    }

    /// Total number of accesses represented
    pub fn total(&self) -> u64 {
        self.distances.values().sum::<u64>() + self.infinite_count
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub(crate) fn record_finite(&mut self, distance: u64) {
        *self.distances.entry(distance).or_insert(0) += 1;
    }

    pub(crate) fn record_infinite(&mut self) {
        self.infinite_count += 1;
    }

    /// Fold the exact histogram into `num_bins` bins of width `bin_size`
    ///
    /// Distances at or beyond `num_bins * bin_size` go to the false-infinity
    /// bucket, exactly as a bounded simulator histogram would record them.
    ///
    /// # Errors
    /// * `MrcError::MalformedInput` - zero `bin_size` or `num_bins`
    pub fn to_binned(&self, bin_size: u64, num_bins: u64) -> Result<BinnedHistogram, MrcError> {
        validate_geometry(num_bins, bin_size)?;

        let mut bins: BTreeMap<u64, f64> = BTreeMap::new();
        let mut false_infinity = 0.0;
        for (&distance, &count) in &self.distances {
            let index = distance / bin_size;
            if index < num_bins {
                *bins.entry(index * bin_size).or_insert(0.0) += count as f64;
            } else {
                false_infinity += count as f64;
            }
        }

        Ok(BinnedHistogram::from_parts(
            num_bins,
            bin_size,
            bins,
            false_infinity,
            self.infinite_count as f64,
        ))
    }
}

/// Binned histogram with synthetic false-infinity and infinity entries
///
/// Entries are keyed by scaled distance. The false-infinity bucket sits at
/// `num_bins * bin_size` and the infinity bucket at `Distance::Infinite`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinnedHistogram {
    num_bins: u64,
    bin_size: u64,
    entries: BTreeMap<Distance, f64>,
}

impl BinnedHistogram {
    /// Assemble a histogram from its tracked bins and overflow buckets
    ///
    /// A tracked bin landing on the false-infinity key is merged into it.
    pub fn from_parts(
        num_bins: u64,
        bin_size: u64,
        bins: BTreeMap<u64, f64>,
        false_infinity: f64,
        infinity: f64,
    ) -> Self {
        let mut entries: BTreeMap<Distance, f64> = bins
            .into_iter()
            .map(|(key, count)| (Distance::Finite(key), count))
            .collect();
        *entries
            .entry(Distance::Finite(num_bins.saturating_mul(bin_size)))
            .or_insert(0.0) += false_infinity;
        *entries.entry(Distance::Infinite).or_insert(0.0) += infinity;

        Self {
            num_bins,
            bin_size,
            entries,
        }
    }

    pub fn num_bins(&self) -> u64 {
        self.num_bins
    }

    pub fn bin_size(&self) -> u64 {
        self.bin_size
    }

    /// Key of the false-infinity bucket
    pub fn false_infinity_key(&self) -> u64 {
        self.num_bins.saturating_mul(self.bin_size)
    }

    /// All entries in ascending order, +∞ last
    pub fn entries(&self) -> &BTreeMap<Distance, f64> {
        &self.entries
    }

    /// Tracked bins only (below the false-infinity key)
    pub fn tracked_bins(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        let limit = self.false_infinity_key();
        self.entries
            .iter()
            .filter_map(move |(key, &count)| match key {
                Distance::Finite(k) if *k < limit => Some((*k, count)),
                _ => None,
            })
    }

    pub fn false_infinity(&self) -> f64 {
        self.entries
            .get(&Distance::Finite(self.false_infinity_key()))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn infinity(&self) -> f64 {
        self.entries.get(&Distance::Infinite).copied().unwrap_or(0.0)
    }

    /// Sum of every bucket, including both infinities
    pub fn total(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Return a copy with `adjustment` added to the first bucket(s)
    ///
    /// A negative adjustment that would drive the first bucket below zero
    /// zeroes it and carries the remainder into the following buckets.
    ///
    /// # Errors
    /// * `MrcError::Sampling` - the tracked bins cannot absorb the adjustment
    pub fn adjusted_first_buckets(&self, adjustment: f64) -> Result<BinnedHistogram, MrcError> {
        if !adjustment.is_finite() {
            return Err(MrcError::Sampling(format!(
                "non-finite histogram adjustment {}",
                adjustment
            )));
        }

        let mut adjusted = self.clone();
        let mut remaining = adjustment;
        for index in 0..self.num_bins {
            let key = Distance::Finite(index * self.bin_size);
            let count = adjusted.entries.get(&key).copied().unwrap_or(0.0);
            let updated = count + remaining;
            if updated < 0.0 {
                adjusted.entries.remove(&key);
                remaining += count;
                continue;
            }
            if updated == 0.0 {
                adjusted.entries.remove(&key);
            } else {
                adjusted.entries.insert(key, updated);
            }
            remaining = 0.0;
            break;
        }

        if remaining != 0.0 {
            return Err(MrcError::Sampling(format!(
                "adjustment {} exceeds histogram mass (unabsorbed {})",
                adjustment, remaining
            )));
        }

        Ok(adjusted)
    }
}

pub(crate) fn validate_geometry(num_bins: u64, bin_size: u64) -> Result<(), MrcError> {
    if num_bins == 0 {
        return Err(MrcError::MalformedInput("number of bins is 0".to_string()));
    }
    if bin_size == 0 {
        return Err(MrcError::MalformedInput("bin size is 0".to_string()));
    }
    Ok(())
}
