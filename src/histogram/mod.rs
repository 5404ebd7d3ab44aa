//! Histogram types and codecs.
//!
//! This module handles:
//! - Exact and binned histogram representations
//! - Sparse ↔ dense conversion
//! - Histogram JSON decoding (`Histogram` / `FractionalHistogram`)
//! - The dense histogram binary format

pub mod binary;
pub mod codec;
pub mod json;
pub mod schema;

// Re-export main types
pub use binary::{read_histogram_binary, write_histogram_binary, HistogramHeader};
pub use codec::{decode_binned, to_dense, to_sparse};
pub use json::{read_histogram_json, HistogramFields, HistogramJson};
pub use schema::{BinnedHistogram, Distance, StackDistanceHistogram};

use crate::utils::error::MrcError;
use std::path::Path;

/// Read a histogram from JSON (`.json`) or the binary format (anything else)
pub fn read_histogram(path: impl AsRef<Path>) -> Result<BinnedHistogram, MrcError> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => read_histogram_json(path),
        _ => read_histogram_binary(path),
    }
}
