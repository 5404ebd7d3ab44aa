//! Compare command implementation.
//! Scores a candidate MRC against the oracle and reports violations.

use super::models::CompareArgs;
use crate::compare::{
    check_thresholds, compare_curves, load_thresholds, render_terminal_comparison,
};
use crate::output::{load_curve, write_report};
use anyhow::{Context, Result};
use colored::*;

/// Execute the compare command
pub fn execute_compare(args: CompareArgs) -> Result<()> {
    // Step 1: Load curves
    let oracle = load_curve(&args.oracle, args.bin_size)
        .with_context(|| format!("Failed to read oracle curve {}", args.oracle.display()))?;
    let candidate = load_curve(&args.candidate, args.bin_size).with_context(|| {
        format!("Failed to read candidate curve {}", args.candidate.display())
    })?;

    // Step 2: Score
    let mut report = compare_curves(&oracle, &candidate, args.bin_size)
        .context("Failed to compare curves")?;
    report.oracle.source = args.oracle.display().to_string();
    report.candidate.source = args.candidate.display().to_string();

    // Step 3: Check violations only if thresholds are set
    if let Some(path) = &args.threshold_file {
        let thresholds = load_thresholds(path)
            .with_context(|| format!("Failed to load threshold file {}", path.display()))?;
        check_thresholds(&mut report, &thresholds);
    }

    // Step 4: Write output if requested
    if let Some(path) = &args.output {
        write_report(&report, path)
            .with_context(|| format!("Failed to write comparison report {}", path.display()))?;
        println!(
            "📊 Comparison report written to {}",
            path.display().to_string().cyan()
        );
    }

    // Step 5: Terminal summary
    if args.summary {
        println!("{}", render_terminal_comparison(&report));
    }

    if report.summary.status == "FAILED" {
        anyhow::bail!(
            "{} exceeds accuracy thresholds against {}",
            args.candidate.display(),
            args.oracle.display()
        );
    }

    Ok(())
}
