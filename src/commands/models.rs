use crate::trace::TraceFormat;
use crate::utils::config::{DEFAULT_BIN_SIZE, DEFAULT_NUM_BINS};
use std::path::PathBuf;

/// Arguments for the histogram command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct HistogramArgs {
    /// Path to the binary trace
    pub trace: PathBuf,

    /// Record layout of the trace
    pub format: TraceFormat,

    /// Output path for the histogram
    pub output: PathBuf,

    /// Width of a histogram bin
    pub bin_size: u64,

    /// Number of tracked bins before the false-infinity bucket
    pub num_bins: u64,

    /// Write histogram JSON instead of the binary format
    pub json: bool,
}

impl Default for HistogramArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::new(),
            format: TraceFormat::Kia,
            output: PathBuf::from("histogram.bin"),
            bin_size: DEFAULT_BIN_SIZE,
            num_bins: DEFAULT_NUM_BINS,
            json: false,
        }
    }
}

/// Arguments for the mrc command
#[derive(Debug, Clone)]
pub struct MrcArgs {
    /// Histogram JSON or binary
    pub input: PathBuf,

    /// Output path for the MRC
    pub output: PathBuf,

    /// SHARDS metadata JSON for sampling correction (optional)
    pub shards: Option<PathBuf>,

    /// Write a dense MRC instead of a sparse one
    pub dense: bool,
}

/// Arguments for the compare command
#[derive(Debug, Clone)]
pub struct CompareArgs {
    /// Oracle curve
    pub oracle: PathBuf,

    /// Candidate curve
    pub candidate: PathBuf,

    /// Capacity step of dense curve files
    pub bin_size: u64,

    /// Optional threshold configuration file (TOML)
    pub threshold_file: Option<PathBuf>,

    /// Path to write the comparison report JSON
    pub output: Option<PathBuf>,

    /// Print a human-readable summary to the terminal
    pub summary: bool,
}

impl Default for CompareArgs {
    fn default() -> Self {
        Self {
            oracle: PathBuf::new(),
            candidate: PathBuf::new(),
            bin_size: DEFAULT_BIN_SIZE,
            threshold_file: None,
            output: None,
            summary: true,
        }
    }
}

/// Arguments for the temporal command
#[derive(Debug, Clone)]
pub struct TemporalArgs {
    /// Oracle series (dense f64 binary)
    pub oracle: PathBuf,

    /// Candidate series (dense f64 binary)
    pub output_series: PathBuf,

    /// Optional threshold configuration file (TOML)
    pub threshold_file: Option<PathBuf>,

    /// Path to write the temporal report JSON
    pub output: Option<PathBuf>,

    /// Print a human-readable summary to the terminal
    pub summary: bool,
}

/// Arguments for the batch command
#[derive(Debug, Clone)]
pub struct BatchArgs {
    /// Oracle curve shared by every comparison
    pub oracle: PathBuf,

    /// Candidate curves
    pub candidates: Vec<PathBuf>,

    /// Capacity step of dense curve files
    pub bin_size: u64,

    /// Optional threshold configuration file (TOML)
    pub threshold_file: Option<PathBuf>,

    /// Directory for per-candidate reports (optional)
    pub output_dir: Option<PathBuf>,
}
