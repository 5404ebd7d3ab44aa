//! Curve comparison and threshold checking.
//!
//! This module scores a candidate MRC (or time series) against an oracle
//! and produces reports with threshold violation detection.
//!
//! # Example
//! ```ignore
//! use mrc_toolkit::compare::{check_thresholds, compare_curves, load_thresholds};
//! use mrc_toolkit::output::load_curve;
//!
//! let oracle = load_curve("oracle.bin", 1)?;
//! let candidate = load_curve("candidate.bin", 1)?;
//! let mut report = compare_curves(&oracle, &candidate, 1)?;
//!
//! let thresholds = load_thresholds("thresholds.toml")?;
//! let violations = check_thresholds(&mut report, &thresholds);
//! ```

pub mod area;
mod batch;
mod engine;
pub mod geometry;
mod output;
mod schema;
pub mod temporal;
mod threshold;

// Public API exports
pub use area::{
    calculate_average_error, dense_mean_absolute_error, dense_mean_squared_error,
    mean_absolute_error, normalized_average_error, trapezoid_area,
};
pub use batch::{compare_batch, BatchEntry, BatchFailure, BatchReport};
pub use engine::{compare_curves, compare_series};
pub use geometry::{intersect, CurvePoint, Intersection, Segment};
pub use output::{render_terminal_comparison, render_terminal_temporal};
pub use schema::{
    ComparisonReport, ComparisonSummary, CurveMetadata, CurveMetrics, TemporalReport,
    ThresholdViolation,
};
pub use temporal::{temporal_error, AccuracyReport, ErrorSeries};
pub use threshold::{
    check_temporal_thresholds, check_thresholds, create_summary, load_thresholds,
    CurveThresholds, TemporalThresholds, ThresholdConfig,
};
