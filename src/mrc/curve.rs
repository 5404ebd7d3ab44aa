//! Miss-ratio curve value type and its dense/sparse forms.

use crate::histogram::Distance;
use crate::utils::config::MAX_DENSE_LEN;
use crate::utils::error::MrcError;
use serde::{Deserialize, Serialize};

/// Capacity → miss ratio, sorted by capacity with +∞ last
///
/// Curves produced by the builder are non-increasing, lie in [0, 1] and
/// start at 1.0. Curves read from disk or SHARDS-corrected are only
/// required to have strictly increasing capacities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissRatioCurve {
    points: Vec<(Distance, f64)>,
}

impl MissRatioCurve {
    /// Wrap points that are already sorted and non-empty
    pub(crate) fn from_points_unchecked(points: Vec<(Distance, f64)>) -> Self {
        Self { points }
    }

    /// Build a curve from `(capacity, miss_ratio)` pairs
    ///
    /// # Errors
    /// * `MrcError::EmptyInput` - no points
    /// * `MrcError::MalformedInput` - capacities not strictly increasing, or a
    ///   non-finite miss ratio
    pub fn from_sparse(pairs: Vec<(u64, f64)>) -> Result<Self, MrcError> {
        if pairs.is_empty() {
            return Err(MrcError::EmptyInput("miss-ratio curve has no points".to_string()));
        }
        for window in pairs.windows(2) {
            if window[1].0 <= window[0].0 {
                return Err(MrcError::MalformedInput(format!(
                    "capacities must be strictly increasing ({} then {})",
                    window[0].0, window[1].0
                )));
            }
        }
        if let Some((capacity, ratio)) = pairs.iter().find(|(_, ratio)| !ratio.is_finite()) {
            return Err(MrcError::MalformedInput(format!(
                "non-finite miss ratio {} at capacity {}",
                ratio, capacity
            )));
        }

        Ok(Self {
            points: pairs
                .into_iter()
                .map(|(capacity, ratio)| (Distance::Finite(capacity), ratio))
                .collect(),
        })
    }

    /// Build a curve from a dense array where index `i` is capacity `i * bin_size`
    pub fn from_dense(values: &[f64], bin_size: u64) -> Result<Self, MrcError> {
        if bin_size == 0 {
            return Err(MrcError::MalformedInput("bin size is 0".to_string()));
        }
        let pairs = values
            .iter()
            .enumerate()
            .map(|(i, &ratio)| (i as u64 * bin_size, ratio))
            .collect();
        Self::from_sparse(pairs)
    }

    pub fn points(&self) -> &[(Distance, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Finite capacities of the curve in ascending order
    pub fn finite_capacities(&self) -> impl Iterator<Item = u64> + '_ {
        self.points.iter().filter_map(|(capacity, _)| capacity.finite())
    }

    /// Miss ratio at the +∞ point, if the curve carries one
    pub fn infinity(&self) -> Option<f64> {
        self.points
            .last()
            .filter(|(capacity, _)| *capacity == Distance::Infinite)
            .map(|&(_, ratio)| ratio)
    }

    /// Step lookup of the miss ratio for a cache of `capacity`
    ///
    /// Absent capacities carry no histogram mass, so the ratio is the one
    /// recorded at the smallest capacity ≥ `capacity` (the +∞ point counts).
    /// Past the last point the last ratio is returned.
    pub fn miss_ratio_at(&self, capacity: u64) -> f64 {
        let target = Distance::Finite(capacity);
        let index = self.points.partition_point(|(c, _)| *c < target);
        self.points
            .get(index)
            .or_else(|| self.points.last())
            .map(|&(_, ratio)| ratio)
            .unwrap_or(0.0)
    }

    /// Sparse on-disk form; the +∞ point is not a capacity and is omitted
    pub fn to_sparse(&self) -> Vec<(u64, f64)> {
        self.points
            .iter()
            .filter_map(|&(capacity, ratio)| capacity.finite().map(|c| (c, ratio)))
            .collect()
    }

    /// Dense on-disk form: one ratio per bin index up to the last finite
    /// capacity, followed by the +∞ ratio when present
    ///
    /// The length grows with `last_capacity / bin_size`, not with the number
    /// of points; lengths above [`MAX_DENSE_LEN`] are refused.
    ///
    /// # Errors
    /// * `MrcError::MalformedInput` - zero `bin_size`, or a dense form longer
    ///   than [`MAX_DENSE_LEN`]
    pub fn to_dense(&self, bin_size: u64) -> Result<Vec<f64>, MrcError> {
        if bin_size == 0 {
            return Err(MrcError::MalformedInput("bin size is 0".to_string()));
        }
        let last = self.finite_capacities().last().unwrap_or(0);
        if last / bin_size >= MAX_DENSE_LEN {
            return Err(MrcError::MalformedInput(format!(
                "capacity {} at bin size {} needs a dense MRC longer than {} entries",
                last, bin_size, MAX_DENSE_LEN
            )));
        }
        let mut dense: Vec<f64> = (0..=last / bin_size)
            .map(|index| self.miss_ratio_at(index * bin_size))
            .collect();
        if let Some(ratio) = self.infinity() {
            dense.push(ratio);
        }
        Ok(dense)
    }
}
