//! Terminal output rendering for comparison reports.

use super::schema::{ComparisonReport, ComparisonSummary, TemporalReport, ThresholdViolation};
use super::temporal::ErrorSeries;
use colored::*;

const RULE: &str = "---------------------------------------------------\n";

/// Render a human-readable summary of an MRC comparison for the terminal
pub fn render_terminal_comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();

    out.push_str("\n📊 ");
    out.push_str(&"Miss Ratio Curve Comparison".bold().to_string());
    out.push('\n');
    out.push_str(RULE);
    out.push_str(&format!(
        "Oracle:    {} ({} points)\n",
        report.oracle.source, report.oracle.points
    ));
    out.push_str(&format!(
        "Candidate: {} ({} points)\n",
        report.candidate.source, report.candidate.points
    ));
    out.push_str(RULE);
    out.push('\n');

    let m = &report.metrics;
    out.push_str(&format!("Capacities compared:      {}\n", m.capacities_compared));
    out.push_str(&format!("Signed area:              {:+.6}\n", m.signed_area));
    out.push_str(&format!("Unsigned area:            {:.6}\n", m.unsigned_area));
    out.push_str(&format!(
        "Normalized unsigned area: {:.6}\n",
        m.normalized_unsigned_area
    ));
    out.push_str(&format!("Dense MAE:                {:.6}\n", m.dense_mae));
    out.push_str(&format!("Dense MSE:                {:.6}\n", m.dense_mse));

    out.push_str(&render_violations(&report.threshold_violations));
    out.push_str(&render_status(&report.summary));
    out
}

/// Render a human-readable summary of a temporal comparison
pub fn render_terminal_temporal(report: &TemporalReport) -> String {
    let mut out = String::new();

    out.push_str("\n⏱️  ");
    out.push_str(&"Temporal Error Summary".bold().to_string());
    out.push('\n');
    out.push_str(RULE);
    out.push_str(&format!(
        "{:<16} {:>14} {:>14} {:>14}\n",
        "", "mean", "median", "max"
    ));

    let a = &report.accuracy;
    out.push_str(&render_series("fair excess", &a.fair_excess));
    out.push_str(&render_series("relu excess", &a.relu_excess));
    out.push_str(&render_series("absolute", &a.absolute));
    out.push_str(&render_series("absolute ratio", &a.absolute_ratio));

    out.push_str(&render_violations(&report.threshold_violations));
    out.push_str(&render_status(&report.summary));
    out
}

fn render_series(label: &str, series: &ErrorSeries) -> String {
    format!(
        "{:<16} {:>14.4} {:>14.4} {:>14.4}\n",
        label, series.mean, series.median, series.max
    )
}

fn render_violations(violations: &[ThresholdViolation]) -> String {
    let mut out = String::new();
    if violations.is_empty() {
        return out;
    }

    out.push_str("\nThreshold Violations:\n");
    for v in violations {
        let line = format!(
            "  {}: {:.6} > {:.6}",
            v.metric, v.actual, v.threshold
        );
        let line = if v.severity == "error" {
            line.red()
        } else {
            line.yellow()
        };
        out.push_str(&line.to_string());
        out.push('\n');
    }
    out
}

fn render_status(summary: &ComparisonSummary) -> String {
    let mut out = String::new();
    if let Some(warning) = &summary.warning {
        out.push_str(&format!("\n⚠️  {}\n", warning.yellow()));
    }
    out.push('\n');
    out.push_str(RULE);
    let status_msg = match summary.status.as_str() {
        "FAILED" => format!(
            "❌ STATUS: THRESHOLD EXCEEDED ({} violations)",
            summary.violation_count
        )
        .red()
        .bold(),
        "WARNING" => format!("⚠️  STATUS: WARNING ({} violations)", summary.violation_count)
            .yellow()
            .bold(),
        _ => "✅ STATUS: PASSED".green().bold(),
    };
    out.push_str(&status_msg.to_string());
    out.push('\n');
    out
}
