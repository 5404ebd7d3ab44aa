//! Schema definitions for comparison reports.
//!
//! Defines the structures written out when a candidate curve or series is
//! scored against its oracle.

use super::temporal::AccuracyReport;
use serde::{Deserialize, Serialize};

/// Complete report scoring a candidate MRC against the oracle MRC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Schema version for the report format
    pub report_version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Description of the oracle curve
    pub oracle: CurveMetadata,

    /// Description of the candidate curve
    pub candidate: CurveMetadata,

    /// Curve-difference metrics
    pub metrics: CurveMetrics,

    /// List of threshold violations (if any)
    pub threshold_violations: Vec<ThresholdViolation>,

    /// Summary of comparison results
    pub summary: ComparisonSummary,
}

/// Where a curve came from and its shape
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CurveMetadata {
    /// File path or label of the curve
    pub source: String,

    /// Number of points, including +∞ when present
    pub points: usize,

    /// Largest finite capacity
    pub max_capacity: u64,

    /// Miss ratio at +∞ (cold misses), when the curve carries it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cold_miss_ratio: Option<f64>,
}

/// Differences between two miss-ratio curves
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CurveMetrics {
    /// Number of capacities both curves were sampled at
    pub capacities_compared: usize,

    /// Signed area between the curves; positive when the oracle is above
    pub signed_area: f64,

    /// Unsigned area between the curves
    pub unsigned_area: f64,

    /// Unsigned area divided by the capacity range
    pub normalized_unsigned_area: f64,

    /// Index-wise mean absolute error of the dense curves
    pub dense_mae: f64,

    /// Index-wise mean squared error of the dense curves
    pub dense_mse: f64,
}

/// Report on two temporal series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalReport {
    /// Schema version for the report format
    pub report_version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Pointwise error statistics
    pub accuracy: AccuracyReport,

    /// List of threshold violations (if any)
    pub threshold_violations: Vec<ThresholdViolation>,

    /// Summary of comparison results
    pub summary: ComparisonSummary,
}

/// A single threshold violation
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThresholdViolation {
    /// Name of the metric that violated threshold
    pub metric: String,

    /// Threshold value
    pub threshold: f64,

    /// Actual value
    pub actual: f64,

    /// Severity: "error" or "warning"
    pub severity: String,
}

/// Summary of comparison results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonSummary {
    /// Whether any error-level threshold was exceeded
    pub has_regressions: bool,

    /// Number of threshold violations
    pub violation_count: usize,

    /// Overall status: "PASSED", "FAILED", "WARNING"
    pub status: String,

    /// Optional warning message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl Default for ComparisonSummary {
    fn default() -> Self {
        Self {
            has_regressions: false,
            violation_count: 0,
            status: "PASSED".to_string(),
            warning: None,
        }
    }
}
