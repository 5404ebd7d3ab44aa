//! Configuration and constants shared by the pipeline stages.

/// Current report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Maximum recursion depth when splitting a trapezoid at a crossing.
/// Two non-collinear segments cross at most once, so depth 1 suffices
/// for well-formed input.
pub const MAX_SPLIT_DEPTH: u32 = 8;

// Defaults for binning an exact histogram (one distance per bin)
pub const DEFAULT_BIN_SIZE: u64 = 1;
pub const DEFAULT_NUM_BINS: u64 = 1 << 20;

/// Longest dense array (histogram or MRC) materialized in memory.
/// 2^28 entries is 2 GiB of f64.
pub const MAX_DENSE_LEN: u64 = 1 << 28;

// Dense histogram binary layout
pub const HISTOGRAM_HEADER_FIELDS: usize = 5;
pub const HISTOGRAM_HEADER_BYTES: usize = HISTOGRAM_HEADER_FIELDS * 8;
pub const HISTOGRAM_RECORD_BYTES: usize = 16;

// Sparse MRC binary layout: (index: u64, miss_ratio: f64)
pub const SPARSE_MRC_RECORD_BYTES: usize = 16;

// Packed trace record sizes
pub const KIA_RECORD_BYTES: usize = 25;
pub const SARI_RECORD_BYTES: usize = 20;

/// Accepted values of the `"type"` tag in histogram JSON
pub const HISTOGRAM_TYPE_NAMES: &[&str] = &["Histogram", "FractionalHistogram"];

/// Memory units, in bytes
pub const MEMORY_UNITS: &[(&str, f64)] = &[
    ("TB", 1e12),
    ("GB", 1e9),
    ("MB", 1e6),
    ("KB", 1e3),
    ("TiB", (1u64 << 40) as f64),
    ("GiB", (1u64 << 30) as f64),
    ("MiB", (1u64 << 20) as f64),
    ("KiB", (1u64 << 10) as f64),
    ("B", 1.0),
];

const MS_PER_SECOND: f64 = 1000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;
const MS_PER_YEAR: f64 = 365.0 * MS_PER_DAY;

/// Time units, in milliseconds
pub const TIME_UNITS: &[(&str, f64)] = &[
    ("years", MS_PER_YEAR),
    ("days", MS_PER_DAY),
    ("hours", MS_PER_HOUR),
    ("minutes", MS_PER_MINUTE),
    ("seconds", MS_PER_SECOND),
    ("milliseconds", 1.0),
    ("year", MS_PER_YEAR),
    ("day", MS_PER_DAY),
    ("hour", MS_PER_HOUR),
    ("minute", MS_PER_MINUTE),
    ("second", MS_PER_SECOND),
    ("millisecond", 1.0),
    ("h", MS_PER_HOUR),
    ("min", MS_PER_MINUTE),
    ("sec", MS_PER_SECOND),
    ("s", MS_PER_SECOND),
    ("ms", 1.0),
];
