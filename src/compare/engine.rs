//! Comparison engine.
//! Aligns two curves (or series) and assembles the full report.

use super::area::mean_absolute_error;
use super::schema::{
    ComparisonReport, ComparisonSummary, CurveMetadata, CurveMetrics, TemporalReport,
};
use super::temporal::temporal_error;
use crate::mrc::MissRatioCurve;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::MrcError;
use chrono::Utc;
use log::debug;

/// Score a candidate MRC against the oracle MRC
///
/// Both curves are step-aligned on the union of their finite capacities
/// for the area metrics. The dense metrics are those of the two
/// `to_dense(bin_size)` arrays with the shorter one padded, computed run by
/// run so that byte-sized capacities never allocate the dense arrays.
///
/// # Errors
/// * `MrcError::EmptyInput` - neither curve has a finite capacity
/// * `MrcError::MalformedInput` - zero `bin_size`
///
/// # Example
/// ```ignore
/// let oracle = build(&read_histogram("oracle.json")?)?;
/// let candidate = build(&read_histogram("candidate.json")?)?;
/// let report = compare_curves(&oracle, &candidate, 1)?;
/// ```
pub fn compare_curves(
    oracle: &MissRatioCurve,
    candidate: &MissRatioCurve,
    bin_size: u64,
) -> Result<ComparisonReport, MrcError> {
    let mut grid: Vec<u64> = oracle
        .finite_capacities()
        .chain(candidate.finite_capacities())
        .collect();
    grid.sort_unstable();
    grid.dedup();

    let (Some(&min), Some(&max)) = (grid.first(), grid.last()) else {
        return Err(MrcError::EmptyInput(
            "curves have no finite capacities to compare".to_string(),
        ));
    };

    let xs: Vec<f64> = grid.iter().map(|&c| c as f64).collect();
    let oracle_ys: Vec<f64> = grid.iter().map(|&c| oracle.miss_ratio_at(c)).collect();
    let candidate_ys: Vec<f64> = grid.iter().map(|&c| candidate.miss_ratio_at(c)).collect();

    let signed_area = mean_absolute_error(&xs, &oracle_ys, &candidate_ys, true)?;
    let unsigned_area = mean_absolute_error(&xs, &oracle_ys, &candidate_ys, false)?;
    let range = (max - min) as f64;
    let normalized_unsigned_area = if range > 0.0 {
        unsigned_area / range
    } else {
        0.0
    };

    let (dense_mae, dense_mse) = dense_curve_errors(oracle, candidate, bin_size)?;

    debug!(
        "Compared curves on {} capacities: unsigned area {:.6}",
        grid.len(),
        unsigned_area
    );

    let mut summary = ComparisonSummary::default();
    if oracle == candidate {
        summary.warning = Some("Oracle and candidate curves are identical".to_string());
    }

    Ok(ComparisonReport {
        report_version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        oracle: describe_curve(oracle, "oracle"),
        candidate: describe_curve(candidate, "candidate"),
        metrics: CurveMetrics {
            capacities_compared: grid.len(),
            signed_area,
            unsigned_area,
            normalized_unsigned_area,
            dense_mae,
            dense_mse,
        },
        threshold_violations: Vec::new(), // Populated by check_thresholds
        summary,
    })
}

/// Score a candidate time series against the oracle series
pub fn compare_series(oracle: &[f64], output: &[f64]) -> Result<TemporalReport, MrcError> {
    let accuracy = temporal_error(oracle, output)?;
    Ok(TemporalReport {
        report_version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        accuracy,
        threshold_violations: Vec::new(),
        summary: ComparisonSummary::default(),
    })
}

/// Dense form of a curve viewed as a step function of the bin index
struct DenseSteps<'a> {
    curve: &'a MissRatioCurve,
    bin_size: u64,
    finite_len: u64,
    infinity: Option<f64>,
    len: u64,
}

impl<'a> DenseSteps<'a> {
    fn new(curve: &'a MissRatioCurve, bin_size: u64) -> Self {
        let last = curve.finite_capacities().last().unwrap_or(0);
        let finite_len = (last / bin_size).saturating_add(1);
        let infinity = curve.infinity();
        Self {
            curve,
            bin_size,
            finite_len,
            infinity,
            len: finite_len.saturating_add(u64::from(infinity.is_some())),
        }
    }

    /// Indices where the dense value may change
    fn breakpoints(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::once(0)
            .chain(
                self.curve
                    .finite_capacities()
                    .map(move |c| (c / self.bin_size).saturating_add(1)),
            )
            .chain([self.finite_len, self.len])
    }

    /// Dense value at `index`; past the end the last value repeats
    fn value(&self, index: u64) -> f64 {
        if index < self.finite_len {
            return self.curve.miss_ratio_at(index * self.bin_size);
        }
        match self.infinity {
            Some(ratio) => ratio,
            None => self
                .curve
                .miss_ratio_at((self.finite_len - 1) * self.bin_size),
        }
    }
}

/// Dense MAE and MSE of two curves without materializing the dense arrays
///
/// Both dense forms are constant between breakpoints, so each run
/// contributes `width * loss` once.
fn dense_curve_errors(
    oracle: &MissRatioCurve,
    candidate: &MissRatioCurve,
    bin_size: u64,
) -> Result<(f64, f64), MrcError> {
    if bin_size == 0 {
        return Err(MrcError::MalformedInput("bin size is 0".to_string()));
    }
    let oracle = DenseSteps::new(oracle, bin_size);
    let candidate = DenseSteps::new(candidate, bin_size);
    let length = oracle.len.max(candidate.len);

    let mut breaks: Vec<u64> = oracle
        .breakpoints()
        .chain(candidate.breakpoints())
        .filter(|&index| index < length)
        .chain(std::iter::once(length))
        .collect();
    breaks.sort_unstable();
    breaks.dedup();

    let (mut absolute, mut squared) = (0.0, 0.0);
    for run in breaks.windows(2) {
        let width = (run[1] - run[0]) as f64;
        let diff = oracle.value(run[0]) - candidate.value(run[0]);
        absolute += width * diff.abs();
        squared += width * diff * diff;
    }

    let length = length as f64;
    Ok((absolute / length, squared / length))
}

fn describe_curve(curve: &MissRatioCurve, source: &str) -> CurveMetadata {
    CurveMetadata {
        source: source.to_string(),
        points: curve.len(),
        max_capacity: curve.finite_capacities().last().unwrap_or(0),
        cold_miss_ratio: curve.infinity(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_curves() {
        let curve = MissRatioCurve::from_sparse(vec![(0, 1.0), (4, 0.5), (8, 0.2)]).unwrap();
        let report = compare_curves(&curve, &curve, 4).unwrap();

        assert_eq!(report.metrics.signed_area, 0.0);
        assert_eq!(report.metrics.unsigned_area, 0.0);
        assert_eq!(report.metrics.dense_mae, 0.0);
        assert!(report.summary.warning.is_some());
        assert_eq!(report.summary.status, "PASSED");
    }

    #[test]
    fn test_step_aligned_union_grid() {
        let oracle = MissRatioCurve::from_sparse(vec![(0, 1.0), (10, 0.0)]).unwrap();
        let candidate = MissRatioCurve::from_sparse(vec![(0, 1.0), (5, 0.5), (10, 0.5)]).unwrap();
        let report = compare_curves(&oracle, &candidate, 5).unwrap();

        // Grid 0, 5, 10: oracle reads 1.0, 0.0, 0.0; candidate 1.0, 0.5, 0.5
        assert_eq!(report.metrics.capacities_compared, 3);
        assert_eq!(report.metrics.unsigned_area, 3.75);
        assert_eq!(report.metrics.signed_area, -3.75);
        assert_eq!(report.metrics.normalized_unsigned_area, 0.375);
    }

    #[test]
    fn test_dense_errors_match_materialized_arrays() {
        use crate::compare::area::{dense_mean_absolute_error, dense_mean_squared_error};
        use crate::histogram::StackDistanceHistogram;
        use crate::mrc::build_exact;
        use std::collections::BTreeMap;

        let distances: BTreeMap<u64, u64> = [(0, 3), (2, 1), (7, 2), (9, 4)].into_iter().collect();
        let exact = build_exact(&StackDistanceHistogram::new(distances, 5)).unwrap();
        let curves = [
            exact,
            MissRatioCurve::from_sparse(vec![(0, 1.0), (3, 0.6), (4, 0.4), (12, 0.1)]).unwrap(),
            MissRatioCurve::from_sparse(vec![(1, 0.9), (5, 0.3)]).unwrap(),
        ];

        for oracle in &curves {
            for candidate in &curves {
                for bin_size in [1, 2, 3, 5] {
                    let lhs = oracle.to_dense(bin_size).unwrap();
                    let rhs = candidate.to_dense(bin_size).unwrap();
                    let (mae, mse) = dense_curve_errors(oracle, candidate, bin_size).unwrap();

                    let expected_mae = dense_mean_absolute_error(&lhs, &rhs).unwrap();
                    let expected_mse = dense_mean_squared_error(&lhs, &rhs).unwrap();
                    assert!((mae - expected_mae).abs() < 1e-12, "bin size {}", bin_size);
                    assert!((mse - expected_mse).abs() < 1e-12, "bin size {}", bin_size);
                }
            }
        }
    }

    #[test]
    fn test_byte_scale_capacities_compare_without_dense_arrays() {
        let oracle = MissRatioCurve::from_sparse(vec![(0, 1.0), (1 << 46, 0.25)]).unwrap();
        let candidate = MissRatioCurve::from_sparse(vec![(0, 1.0), (1 << 46, 0.5)]).unwrap();
        let report = compare_curves(&oracle, &candidate, 1).unwrap();

        // Every index but 0 differs by 0.25
        let expected = 0.25 * (1u64 << 46) as f64 / ((1u64 << 46) + 1) as f64;
        assert!((report.metrics.dense_mae - expected).abs() < 1e-12);
        assert!((report.metrics.dense_mse - 0.25 * expected).abs() < 1e-12);
    }

    #[test]
    fn test_compare_series() {
        let report = compare_series(&[1.0, 2.0], &[2.0, 2.0]).unwrap();
        assert_eq!(report.accuracy.relu_excess.mean, 0.5);
    }
}
