//! Histogram command implementation.
//!
//! The histogram command:
//! 1. Reads a binary trace
//! 2. Runs the stack-distance analysis
//! 3. Bins the exact histogram
//! 4. Writes it as binary or JSON

use crate::analyzer::analyze;
use crate::commands::models::HistogramArgs;
use crate::histogram::write_histogram_binary;
use crate::output::write_histogram_json;
use crate::trace::read_trace;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the histogram command
///
/// **Public** - main entry point called from main.rs
pub fn execute_histogram(args: HistogramArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Reading {:?} trace: {}", args.format, args.trace.display());
    let trace = read_trace(&args.trace, args.format)
        .with_context(|| format!("Failed to read trace {}", args.trace.display()))?;

    info!("Analyzing {} accesses...", trace.len());
    let exact = analyze(&trace);
    debug!(
        "{} distinct distances, {} cold misses",
        exact.distances().len(),
        exact.infinite_count()
    );

    let binned = exact
        .to_binned(args.bin_size, args.num_bins)
        .context("Failed to bin histogram")?;

    if args.json {
        write_histogram_json(&binned, &args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    } else {
        write_histogram_binary(&binned, &args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    }

    info!(
        "Histogram written to {} in {:.2?}",
        args.output.display(),
        start_time.elapsed()
    );
    Ok(())
}

/// Validate histogram arguments
///
/// **Public** - called before execution to fail fast
pub fn validate_histogram_args(args: &HistogramArgs) -> Result<()> {
    if args.bin_size == 0 {
        anyhow::bail!("bin size must be greater than 0");
    }
    if args.num_bins == 0 {
        anyhow::bail!("number of bins must be greater than 0");
    }
    if args.num_bins.checked_mul(args.bin_size).is_none() {
        anyhow::bail!("num_bins * bin_size overflows a 64-bit capacity");
    }
    Ok(())
}
