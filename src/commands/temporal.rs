//! Temporal command implementation.

use super::models::TemporalArgs;
use crate::compare::{
    check_temporal_thresholds, compare_series, load_thresholds, render_terminal_temporal,
};
use crate::output::{read_dense_mrc, write_report};
use anyhow::{Context, Result};
use colored::*;

/// Execute the temporal command
pub fn execute_temporal(args: TemporalArgs) -> Result<()> {
    let oracle = read_dense_mrc(&args.oracle)
        .with_context(|| format!("Failed to read oracle series {}", args.oracle.display()))?;
    let output = read_dense_mrc(&args.output_series).with_context(|| {
        format!("Failed to read output series {}", args.output_series.display())
    })?;

    let mut report = compare_series(&oracle, &output).with_context(|| {
        format!(
            "Failed to compare {} against {}",
            args.output_series.display(),
            args.oracle.display()
        )
    })?;

    if let Some(path) = &args.threshold_file {
        let thresholds = load_thresholds(path)
            .with_context(|| format!("Failed to load threshold file {}", path.display()))?;
        check_temporal_thresholds(&mut report, &thresholds);
    }

    if let Some(path) = &args.output {
        write_report(&report, path)
            .with_context(|| format!("Failed to write temporal report {}", path.display()))?;
        println!(
            "📊 Temporal report written to {}",
            path.display().to_string().cyan()
        );
    }

    if args.summary {
        println!("{}", render_terminal_temporal(&report));
    }

    if report.summary.status == "FAILED" {
        anyhow::bail!("Temporal error exceeds thresholds");
    }

    Ok(())
}
