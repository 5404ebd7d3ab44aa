//! Pointwise error between two aligned time series.
//!
//! Typically the series are memory usage sampled at equally spaced times,
//! the oracle's next to the candidate's. An "excess" error is one where the
//! candidate uses more than the oracle.

use crate::utils::error::MrcError;
use serde::{Deserialize, Serialize};

/// One error series and its summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSeries {
    pub values: Vec<f64>,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
}

impl ErrorSeries {
    /// Summarize a non-empty series
    pub fn from_values(values: Vec<f64>) -> Result<Self, MrcError> {
        if values.is_empty() {
            return Err(MrcError::EmptyInput("error series is empty".to_string()));
        }
        Ok(Self {
            mean: mean(&values),
            median: median(&values),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            values,
        })
    }
}

/// Accuracy of a candidate series against the oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// `output - oracle`; savings offset excesses
    pub fair_excess: ErrorSeries,

    /// `max(output - oracle, 0)`; savings never offset excesses
    pub relu_excess: ErrorSeries,

    /// `|oracle - output|`
    pub absolute: ErrorSeries,

    /// Absolute error divided by the largest value in either series
    pub absolute_ratio: ErrorSeries,
}

/// Compare two equally long series point by point
///
/// When both series are all zero the ratio series is all zero.
///
/// # Errors
/// * `MrcError::EmptyInput` - zero-length series
/// * `MrcError::MalformedInput` - the series differ in length
pub fn temporal_error(oracle: &[f64], output: &[f64]) -> Result<AccuracyReport, MrcError> {
    if oracle.len() != output.len() {
        return Err(MrcError::MalformedInput(format!(
            "series lengths differ: oracle={} output={}",
            oracle.len(),
            output.len()
        )));
    }
    if oracle.is_empty() {
        return Err(MrcError::EmptyInput("temporal series are empty".to_string()));
    }

    let fair: Vec<f64> = oracle.iter().zip(output).map(|(a, b)| b - a).collect();
    let relu: Vec<f64> = fair.iter().map(|&e| e.max(0.0)).collect();
    let absolute: Vec<f64> = fair.iter().map(|e| e.abs()).collect();

    let peak = oracle
        .iter()
        .chain(output)
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let ratio: Vec<f64> = if peak == 0.0 {
        vec![0.0; absolute.len()]
    } else {
        absolute.iter().map(|e| e / peak).collect()
    };

    Ok(AccuracyReport {
        fair_excess: ErrorSeries::from_values(fair)?,
        relu_excess: ErrorSeries::from_values(relu)?,
        absolute: ErrorSeries::from_values(absolute)?,
        absolute_ratio: ErrorSeries::from_values(ratio)?,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of a non-empty slice; even lengths average the two central values
fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
