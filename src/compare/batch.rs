//! Parallel comparison of many candidate curves against one oracle.
//!
//! Each candidate is loaded and scored independently on the rayon pool.
//! A candidate that fails to load or compare is logged and skipped; the
//! rest of the batch still completes.

use super::engine::compare_curves;
use super::schema::ComparisonReport;
use super::threshold::{check_thresholds, ThresholdConfig};
use crate::mrc::MissRatioCurve;
use crate::output::load_curve;
use crate::utils::error::MrcError;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Candidates that were scored, in input order
    pub results: Vec<BatchEntry>,

    /// Candidates that were skipped, in input order
    pub failures: Vec<BatchFailure>,
}

/// One scored candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub report: ComparisonReport,
}

/// One skipped candidate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchFailure {
    pub path: PathBuf,

    /// Error kind, e.g. "MalformedInput"
    pub kind: String,

    pub message: String,
}

impl BatchReport {
    /// Number of scored candidates whose thresholds failed
    pub fn failed_count(&self) -> usize {
        self.results
            .iter()
            .filter(|entry| entry.report.summary.status == "FAILED")
            .count()
    }
}

/// Score every candidate file against `oracle`
pub fn compare_batch(
    oracle: &MissRatioCurve,
    candidates: &[PathBuf],
    bin_size: u64,
    thresholds: Option<&ThresholdConfig>,
) -> BatchReport {
    info!("Comparing {} candidates in parallel", candidates.len());

    let outcomes: Vec<(PathBuf, Result<ComparisonReport, MrcError>)> = candidates
        .par_iter()
        .map(|path| {
            let outcome = compare_one(oracle, path, bin_size, thresholds);
            (path.clone(), outcome)
        })
        .collect();

    let mut report = BatchReport {
        results: Vec::new(),
        failures: Vec::new(),
    };
    for (path, outcome) in outcomes {
        match outcome {
            Ok(comparison) => report.results.push(BatchEntry {
                path,
                report: comparison,
            }),
            Err(err) => {
                warn!("Skipping {} ({}): {}", path.display(), err.kind(), err);
                report.failures.push(BatchFailure {
                    path,
                    kind: err.kind().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        "Batch finished: {} compared, {} skipped",
        report.results.len(),
        report.failures.len()
    );
    report
}

fn compare_one(
    oracle: &MissRatioCurve,
    path: &Path,
    bin_size: u64,
    thresholds: Option<&ThresholdConfig>,
) -> Result<ComparisonReport, MrcError> {
    let candidate = load_curve(path, bin_size)?;
    let mut report = compare_curves(oracle, &candidate, bin_size)?;
    report.candidate.source = path.display().to_string();
    if let Some(config) = thresholds {
        check_thresholds(&mut report, config);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::write_sparse_mrc;

    #[test]
    fn test_batch_skips_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let good = temp_dir.path().join("good.bin");
        write_sparse_mrc(&[(0, 1.0), (8, 0.5)], &good).unwrap();
        let missing = temp_dir.path().join("missing.bin");

        let oracle = MissRatioCurve::from_sparse(vec![(0, 1.0), (8, 0.4)]).unwrap();
        let report = compare_batch(&oracle, &[good.clone(), missing.clone()], 1, None);

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].path, good);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, missing);
        assert_eq!(report.failures[0].kind, "IoError");
    }
}
