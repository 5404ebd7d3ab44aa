//! MRC command implementation.
//! Converts a histogram into a miss-ratio curve, optionally SHARDS-corrected.

use super::models::MrcArgs;
use crate::histogram::read_histogram;
use crate::mrc::build;
use crate::output::{write_dense_mrc, write_sparse_mrc};
use crate::sampling::{read_shards_metadata, SampledHistogram};
use anyhow::{Context, Result};
use log::info;

/// Execute the mrc command
pub fn execute_mrc(args: MrcArgs) -> Result<()> {
    let histogram = read_histogram(&args.input)
        .with_context(|| format!("Failed to read histogram {}", args.input.display()))?;

    let histogram = match &args.shards {
        Some(path) => {
            let metadata = read_shards_metadata(path)
                .with_context(|| format!("Failed to read SHARDS metadata {}", path.display()))?;
            info!(
                "Correcting for sampling ratio {} ({} of {} entries processed)",
                metadata.sampling_ratio, metadata.num_entries_processed, metadata.num_entries_seen
            );
            SampledHistogram::new(histogram, metadata)
                .corrected_histogram()
                .context("Failed to apply SHARDS correction")?
        }
        None => histogram,
    };

    let curve = build(&histogram)
        .with_context(|| format!("Failed to build MRC from {}", args.input.display()))?;

    let written = if args.dense {
        let dense = curve.to_dense(histogram.bin_size())?;
        write_dense_mrc(&dense, &args.output)
    } else {
        write_sparse_mrc(&curve.to_sparse(), &args.output)
    };
    written.with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("MRC with {} points written to {}", curve.len(), args.output.display());
    Ok(())
}
