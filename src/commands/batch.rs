//! Batch command implementation.
//! Compares many candidates against one oracle, skipping files that fail.

use super::models::BatchArgs;
use crate::compare::{compare_batch, load_thresholds};
use crate::output::{load_curve, write_report};
use anyhow::{Context, Result};
use colored::*;
use log::{info, warn};

/// Execute the batch command
pub fn execute_batch(args: BatchArgs) -> Result<()> {
    let oracle = load_curve(&args.oracle, args.bin_size)
        .with_context(|| format!("Failed to read oracle curve {}", args.oracle.display()))?;

    let thresholds = match &args.threshold_file {
        Some(path) => Some(
            load_thresholds(path)
                .with_context(|| format!("Failed to load threshold file {}", path.display()))?,
        ),
        None => None,
    };

    let mut batch = compare_batch(&oracle, &args.candidates, args.bin_size, thresholds.as_ref());
    for entry in &mut batch.results {
        entry.report.oracle.source = args.oracle.display().to_string();
    }

    if let Some(dir) = &args.output_dir {
        for entry in &batch.results {
            let stem = entry
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "candidate".to_string());
            let path = dir.join(format!("{}.report.json", stem));
            if let Err(err) = write_report(&entry.report, &path) {
                warn!("Could not write {}: {}", path.display(), err);
            }
        }
        let summary_path = dir.join("batch.json");
        write_report(&batch, &summary_path)
            .with_context(|| format!("Failed to write {}", summary_path.display()))?;
        info!("Batch reports written to {}", dir.display());
    }

    for entry in &batch.results {
        let status = match entry.report.summary.status.as_str() {
            "FAILED" => "FAILED".red(),
            "WARNING" => "WARNING".yellow(),
            _ => "PASSED".green(),
        };
        println!(
            "{:<8} {}  unsigned area {:.6}",
            status,
            entry.path.display(),
            entry.report.metrics.unsigned_area
        );
    }
    for failure in &batch.failures {
        println!("{:<8} {}  {}", "SKIPPED".dimmed(), failure.path.display(), failure.kind);
    }

    let failed = batch.failed_count();
    if failed > 0 {
        anyhow::bail!("{} of {} candidates exceed thresholds", failed, args.candidates.len());
    }
    Ok(())
}
