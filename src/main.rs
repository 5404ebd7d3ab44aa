//! MRC Toolkit CLI
//!
//! Builds stack-distance histograms and miss-ratio curves from traces and
//! scores predicted curves against an oracle.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use mrc_toolkit::commands::{
    display_version, execute_batch, execute_compare, execute_histogram, execute_mrc,
    execute_temporal, validate_histogram_args, BatchArgs, CompareArgs, HistogramArgs, MrcArgs,
    TemporalArgs,
};
use mrc_toolkit::trace::TraceFormat;
use mrc_toolkit::utils::config::{DEFAULT_BIN_SIZE, DEFAULT_NUM_BINS};
use mrc_toolkit::utils::parse_quantity;

/// MRC Toolkit - miss-ratio curve construction and comparison
#[derive(Parser, Debug)]
#[command(name = "mrc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a stack-distance histogram from a trace
    Histogram {
        /// Path to the binary trace
        #[arg(short, long)]
        trace: PathBuf,

        /// Trace record layout
        #[arg(short, long, value_enum, default_value = "kia")]
        format: TraceFormat,

        /// Output path for the histogram
        #[arg(short, long, default_value = "histogram.bin")]
        output: PathBuf,

        /// Width of a histogram bin
        #[arg(long, default_value_t = DEFAULT_BIN_SIZE, value_parser = parse_size)]
        bin_size: u64,

        /// Number of tracked bins
        #[arg(long, default_value_t = DEFAULT_NUM_BINS)]
        num_bins: u64,

        /// Write histogram JSON instead of the binary format
        #[arg(long)]
        json: bool,
    },

    /// Build a miss-ratio curve from a histogram
    Mrc {
        /// Histogram JSON (.json) or binary
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the MRC
        #[arg(short, long, default_value = "mrc.bin")]
        output: PathBuf,

        /// SHARDS metadata JSON for sampling correction
        #[arg(long)]
        shards: Option<PathBuf>,

        /// Write a dense f64 MRC instead of a sparse one
        #[arg(long)]
        dense: bool,
    },

    /// Score a candidate MRC against an oracle MRC
    Compare {
        /// Oracle curve
        #[arg(long)]
        oracle: PathBuf,

        /// Candidate curve
        #[arg(long)]
        candidate: PathBuf,

        /// Capacity step of dense curve files
        #[arg(long, default_value_t = DEFAULT_BIN_SIZE, value_parser = parse_size)]
        bin_size: u64,

        /// Threshold configuration (TOML)
        #[arg(long)]
        thresholds: Option<PathBuf>,

        /// Output path for the comparison report JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Temporal error between two dense f64 series
    Temporal {
        /// Oracle series
        #[arg(long)]
        oracle: PathBuf,

        /// Candidate series
        #[arg(long)]
        output_series: PathBuf,

        /// Threshold configuration (TOML)
        #[arg(long)]
        thresholds: Option<PathBuf>,

        /// Output path for the temporal report JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Compare many candidates against one oracle in parallel
    Batch {
        /// Oracle curve
        #[arg(long)]
        oracle: PathBuf,

        /// Candidate curves
        #[arg(long, num_args = 1.., required = true)]
        candidates: Vec<PathBuf>,

        /// Capacity step of dense curve files
        #[arg(long, default_value_t = DEFAULT_BIN_SIZE, value_parser = parse_size)]
        bin_size: u64,

        /// Threshold configuration (TOML)
        #[arg(long)]
        thresholds: Option<PathBuf>,

        /// Directory for per-candidate reports
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Parse a size such as `4096` or `"4 KiB"` into a whole number of bytes
fn parse_size(text: &str) -> std::result::Result<u64, String> {
    let value = parse_quantity(text).map_err(|e| e.to_string())?;
    if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(format!("'{}' is not a whole number of bytes", text));
    }
    Ok(value as u64)
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Histogram {
            trace,
            format,
            output,
            bin_size,
            num_bins,
            json,
        } => {
            let args = HistogramArgs {
                trace,
                format,
                output,
                bin_size,
                num_bins,
                json,
            };

            // Validate args first
            validate_histogram_args(&args)?;

            execute_histogram(args)?;
        }

        Commands::Mrc {
            input,
            output,
            shards,
            dense,
        } => {
            execute_mrc(MrcArgs {
                input,
                output,
                shards,
                dense,
            })?;
        }

        Commands::Compare {
            oracle,
            candidate,
            bin_size,
            thresholds,
            output,
            summary,
        } => {
            execute_compare(CompareArgs {
                oracle,
                candidate,
                bin_size,
                threshold_file: thresholds,
                output,
                summary,
            })?;
        }

        Commands::Temporal {
            oracle,
            output_series,
            thresholds,
            output,
            summary,
        } => {
            execute_temporal(TemporalArgs {
                oracle,
                output_series,
                threshold_file: thresholds,
                output,
                summary,
            })?;
        }

        Commands::Batch {
            oracle,
            candidates,
            bin_size,
            thresholds,
            output_dir,
        } => {
            execute_batch(BatchArgs {
                oracle,
                candidates,
                bin_size,
                threshold_file: thresholds,
                output_dir,
            })?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
