//! Dense histogram binary format.
//!
//! Layout (little-endian):
//! - header: `num_bins, bin_size, false_infinity, infinity, running_sum` (u64 each)
//! - records: `(index: u64, frequency: u64)` where `index` is already
//!   scaled by `bin_size`; zero-frequency bins are not written

use super::schema::{validate_geometry, BinnedHistogram};
use crate::utils::config::{HISTOGRAM_HEADER_BYTES, HISTOGRAM_RECORD_BYTES};
use crate::utils::error::MrcError;
use log::debug;
use std::collections::BTreeMap;
use std::path::Path;

/// Fixed header of the dense histogram binary format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramHeader {
    pub num_bins: u64,
    pub bin_size: u64,
    pub false_infinity: u64,
    pub infinity: u64,
    pub running_sum: u64,
}

/// Decode a histogram from its binary representation
///
/// # Errors
/// * `MrcError::MalformedInput` - short header or trailing partial record
pub fn decode_histogram(bytes: &[u8]) -> Result<(HistogramHeader, BinnedHistogram), MrcError> {
    if bytes.len() < HISTOGRAM_HEADER_BYTES {
        return Err(MrcError::MalformedInput(format!(
            "histogram header needs {} bytes, got {}",
            HISTOGRAM_HEADER_BYTES,
            bytes.len()
        )));
    }

    let (header_bytes, body) = bytes.split_at(HISTOGRAM_HEADER_BYTES);
    let header = HistogramHeader {
        num_bins: read_u64(header_bytes, 0),
        bin_size: read_u64(header_bytes, 1),
        false_infinity: read_u64(header_bytes, 2),
        infinity: read_u64(header_bytes, 3),
        running_sum: read_u64(header_bytes, 4),
    };
    validate_geometry(header.num_bins, header.bin_size)?;

    if body.len() % HISTOGRAM_RECORD_BYTES != 0 {
        return Err(MrcError::MalformedInput(format!(
            "histogram body of {} bytes is not a whole number of {}-byte records",
            body.len(),
            HISTOGRAM_RECORD_BYTES
        )));
    }

    let mut bins: BTreeMap<u64, f64> = BTreeMap::new();
    for record in body.chunks_exact(HISTOGRAM_RECORD_BYTES) {
        let index = read_u64(record, 0);
        let frequency = read_u64(record, 1);
        *bins.entry(index).or_insert(0.0) += frequency as f64;
    }

    debug!(
        "Decoded binary histogram: {} records, running_sum={}",
        bins.len(),
        header.running_sum
    );

    let histogram = BinnedHistogram::from_parts(
        header.num_bins,
        header.bin_size,
        bins,
        header.false_infinity as f64,
        header.infinity as f64,
    );
    Ok((header, histogram))
}

/// Encode a histogram into its binary representation
///
/// # Errors
/// * `MrcError::MalformedInput` - a count is not a non-negative integer
pub fn encode_histogram(histogram: &BinnedHistogram) -> Result<Vec<u8>, MrcError> {
    let false_infinity = to_integer(histogram.false_infinity())?;
    let infinity = to_integer(histogram.infinity())?;

    let mut records = Vec::new();
    let mut running_sum = false_infinity + infinity;
    for (index, count) in histogram.tracked_bins() {
        let frequency = to_integer(count)?;
        if frequency == 0 {
            continue;
        }
        running_sum += frequency;
        records.push((index, frequency));
    }

    let mut bytes =
        Vec::with_capacity(HISTOGRAM_HEADER_BYTES + records.len() * HISTOGRAM_RECORD_BYTES);
    for field in [
        histogram.num_bins(),
        histogram.bin_size(),
        false_infinity,
        infinity,
        running_sum,
    ] {
        bytes.extend_from_slice(&field.to_le_bytes());
    }
    for (index, frequency) in records {
        bytes.extend_from_slice(&index.to_le_bytes());
        bytes.extend_from_slice(&frequency.to_le_bytes());
    }
    Ok(bytes)
}

/// Read a binary histogram file
pub fn read_histogram_binary(path: impl AsRef<Path>) -> Result<BinnedHistogram, MrcError> {
    let path = path.as_ref();
    debug!("Reading binary histogram from: {}", path.display());
    let bytes = std::fs::read(path)?;
    decode_histogram(&bytes).map(|(_, histogram)| histogram)
}

/// Write a binary histogram file
pub fn write_histogram_binary(
    histogram: &BinnedHistogram,
    path: impl AsRef<Path>,
) -> Result<(), MrcError> {
    let bytes = encode_histogram(histogram)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Read the `n`th little-endian u64 of a buffer that is known to be long enough
pub(crate) fn read_u64(bytes: &[u8], n: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&bytes[n * 8..n * 8 + 8]);
    u64::from_le_bytes(word)
}

fn to_integer(count: f64) -> Result<u64, MrcError> {
    if count.is_finite() && count >= 0.0 && count.fract() == 0.0 {
        Ok(count as u64)
    } else {
        Err(MrcError::MalformedInput(format!(
            "binary histograms store integer frequencies, got {}",
            count
        )))
    }
}
