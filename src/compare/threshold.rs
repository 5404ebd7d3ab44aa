//! Threshold configuration and violation detection.
//!
//! Loads accuracy limits from TOML and checks comparison reports
//! for violations.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::schema::{
    ComparisonReport, ComparisonSummary, CurveMetrics, TemporalReport, ThresholdViolation,
};
use super::temporal::AccuracyReport;
use crate::utils::error::MrcError;

/// Complete threshold configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThresholdConfig {
    /// MRC comparison thresholds
    #[serde(default)]
    pub curve: CurveThresholds,

    /// Temporal series thresholds
    #[serde(default)]
    pub temporal: TemporalThresholds,
}

/// Limits on the difference between two MRCs
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CurveThresholds {
    /// Maximum magnitude of the signed area
    pub max_signed_area: Option<f64>,

    /// Maximum unsigned area
    pub max_unsigned_area: Option<f64>,

    /// Maximum dense mean absolute error
    pub max_dense_mae: Option<f64>,

    /// Maximum dense mean squared error
    pub max_dense_mse: Option<f64>,

    /// Warn (without failing) above this normalized unsigned area
    pub warn_normalized_unsigned_area: Option<f64>,
}

/// Limits on temporal errors
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TemporalThresholds {
    /// Maximum mean absolute error
    pub max_mean_absolute_error: Option<f64>,

    /// Maximum mean relu excess (candidate above oracle)
    pub max_mean_relu_excess: Option<f64>,

    /// Maximum single absolute error
    pub max_absolute_error: Option<f64>,

    /// Warn (without failing) above this mean absolute-error ratio
    pub warn_mean_absolute_error_ratio: Option<f64>,
}

/// Load thresholds from a TOML file
///
/// # Errors
/// * `MrcError::Io` - If file cannot be read
/// * `MrcError::Config` - If TOML is invalid
///
/// # Example
/// ```ignore
/// let thresholds = load_thresholds("thresholds.toml")?;
/// ```
pub fn load_thresholds(path: impl AsRef<Path>) -> Result<ThresholdConfig, MrcError> {
    let contents = fs::read_to_string(path)?;
    let config: ThresholdConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Check a comparison report against thresholds and update violations
///
/// # Returns
/// Vector of violations (also updates report.threshold_violations)
pub fn check_thresholds(
    report: &mut ComparisonReport,
    config: &ThresholdConfig,
) -> Vec<ThresholdViolation> {
    let mut violations = Vec::new();
    check_curve_thresholds(&report.metrics, &config.curve, &mut violations);

    let warning = report.summary.warning.take();
    report.threshold_violations = violations.clone();
    report.summary = ComparisonSummary {
        warning,
        ..create_summary(&violations)
    };

    violations
}

/// Check a temporal report against thresholds and update violations
pub fn check_temporal_thresholds(
    report: &mut TemporalReport,
    config: &ThresholdConfig,
) -> Vec<ThresholdViolation> {
    let mut violations = Vec::new();
    check_series_thresholds(&report.accuracy, &config.temporal, &mut violations);

    report.threshold_violations = violations.clone();
    report.summary = create_summary(&violations);

    violations
}

fn check_curve_thresholds(
    metrics: &CurveMetrics,
    thresholds: &CurveThresholds,
    violations: &mut Vec<ThresholdViolation>,
) {
    let limits = [
        ("curve.max_signed_area", thresholds.max_signed_area, metrics.signed_area.abs(), "error"),
        ("curve.max_unsigned_area", thresholds.max_unsigned_area, metrics.unsigned_area, "error"),
        ("curve.max_dense_mae", thresholds.max_dense_mae, metrics.dense_mae, "error"),
        ("curve.max_dense_mse", thresholds.max_dense_mse, metrics.dense_mse, "error"),
        (
            "curve.warn_normalized_unsigned_area",
            thresholds.warn_normalized_unsigned_area,
            metrics.normalized_unsigned_area,
            "warning",
        ),
    ];
    push_exceeded(&limits, violations);
}

fn check_series_thresholds(
    accuracy: &AccuracyReport,
    thresholds: &TemporalThresholds,
    violations: &mut Vec<ThresholdViolation>,
) {
    let limits = [
        (
            "temporal.max_mean_absolute_error",
            thresholds.max_mean_absolute_error,
            accuracy.absolute.mean,
            "error",
        ),
        (
            "temporal.max_mean_relu_excess",
            thresholds.max_mean_relu_excess,
            accuracy.relu_excess.mean,
            "error",
        ),
        (
            "temporal.max_absolute_error",
            thresholds.max_absolute_error,
            accuracy.absolute.max,
            "error",
        ),
        (
            "temporal.warn_mean_absolute_error_ratio",
            thresholds.warn_mean_absolute_error_ratio,
            accuracy.absolute_ratio.mean,
            "warning",
        ),
    ];
    push_exceeded(&limits, violations);
}

fn push_exceeded(
    limits: &[(&str, Option<f64>, f64, &str)],
    violations: &mut Vec<ThresholdViolation>,
) {
    for &(metric, threshold, actual, severity) in limits {
        if let Some(threshold) = threshold {
            if actual > threshold {
                violations.push(ThresholdViolation {
                    metric: metric.to_string(),
                    threshold,
                    actual,
                    severity: severity.to_string(),
                });
            }
        }
    }
}

/// Create summary based on violations
pub fn create_summary(violations: &[ThresholdViolation]) -> ComparisonSummary {
    let error_count = violations
        .iter()
        .filter(|v| v.severity == "error")
        .count();
    let warning_count = violations
        .iter()
        .filter(|v| v.severity == "warning")
        .count();

    let status = if error_count > 0 {
        "FAILED"
    } else if warning_count > 0 {
        "WARNING"
    } else {
        "PASSED"
    };

    ComparisonSummary {
        has_regressions: error_count > 0,
        violation_count: violations.len(),
        status: status.to_string(),
        warning: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(unsigned_area: f64) -> CurveMetrics {
        CurveMetrics {
            capacities_compared: 4,
            signed_area: -unsigned_area,
            unsigned_area,
            normalized_unsigned_area: unsigned_area / 10.0,
            dense_mae: 0.01,
            dense_mse: 0.0001,
        }
    }

    #[test]
    fn test_parse_partial_config() {
        let config: ThresholdConfig = toml::from_str(
            r#"
            [curve]
            max_unsigned_area = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(config.curve.max_unsigned_area, Some(0.05));
        assert_eq!(config.curve.max_dense_mae, None);
        assert_eq!(config.temporal.max_mean_absolute_error, None);
    }

    #[test]
    fn test_curve_threshold_exceeded() {
        let thresholds = CurveThresholds {
            max_signed_area: Some(0.5),
            max_unsigned_area: Some(0.5),
            ..Default::default()
        };

        let mut violations = Vec::new();
        check_curve_thresholds(&metrics(0.75), &thresholds, &mut violations);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].metric, "curve.max_signed_area");
        assert_eq!(violations[0].actual, 0.75);
        assert_eq!(violations[1].threshold, 0.5);
    }

    #[test]
    fn test_curve_threshold_not_exceeded() {
        let thresholds = CurveThresholds {
            max_unsigned_area: Some(1.0),
            max_dense_mae: Some(0.02),
            ..Default::default()
        };

        let mut violations = Vec::new();
        check_curve_thresholds(&metrics(0.75), &thresholds, &mut violations);

        assert!(violations.is_empty());
    }

    #[test]
    fn test_create_summary_with_errors() {
        let violations = vec![ThresholdViolation {
            metric: "test".to_string(),
            threshold: 10.0,
            actual: 20.0,
            severity: "error".to_string(),
        }];

        let summary = create_summary(&violations);
        assert_eq!(summary.status, "FAILED");
        assert!(summary.has_regressions);
        assert_eq!(summary.violation_count, 1);
    }

    #[test]
    fn test_create_summary_with_warnings() {
        let violations = vec![ThresholdViolation {
            metric: "test".to_string(),
            threshold: 10.0,
            actual: 20.0,
            severity: "warning".to_string(),
        }];

        let summary = create_summary(&violations);
        assert_eq!(summary.status, "WARNING");
        assert!(!summary.has_regressions);
    }
}
