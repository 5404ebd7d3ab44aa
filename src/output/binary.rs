//! Miss-ratio curve files.
//!
//! - Dense: raw little-endian f64 array, index `i` is capacity `i * bin_size`
//! - Sparse: `(index: u64, miss_ratio: f64)` little-endian records
//! - Sparse text (`.dat`): one `index,miss_ratio` pair per line

use crate::histogram::binary::read_u64;
use crate::histogram::read_histogram_json;
use crate::mrc::{self, MissRatioCurve};
use crate::utils::config::SPARSE_MRC_RECORD_BYTES;
use crate::utils::error::{MrcError, OutputError};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Encode a dense MRC
pub fn encode_dense_mrc(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Decode a dense MRC
///
/// # Errors
/// * `MrcError::MalformedInput` - length is not a multiple of 8 bytes
pub fn decode_dense_mrc(bytes: &[u8]) -> Result<Vec<f64>, MrcError> {
    if bytes.len() % 8 != 0 {
        return Err(MrcError::MalformedInput(format!(
            "dense MRC length {} is not a multiple of 8",
            bytes.len()
        )));
    }
    Ok((0..bytes.len() / 8)
        .map(|n| f64::from_bits(read_u64(bytes, n)))
        .collect())
}

/// Encode a sparse MRC
pub fn encode_sparse_mrc(pairs: &[(u64, f64)]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pairs.len() * SPARSE_MRC_RECORD_BYTES);
    for &(index, ratio) in pairs {
        bytes.extend_from_slice(&index.to_le_bytes());
        bytes.extend_from_slice(&ratio.to_le_bytes());
    }
    bytes
}

/// Decode a sparse MRC
///
/// # Errors
/// * `MrcError::MalformedInput` - trailing partial record
pub fn decode_sparse_mrc(bytes: &[u8]) -> Result<Vec<(u64, f64)>, MrcError> {
    if bytes.len() % SPARSE_MRC_RECORD_BYTES != 0 {
        return Err(MrcError::MalformedInput(format!(
            "sparse MRC has a trailing partial record ({} stray bytes)",
            bytes.len() % SPARSE_MRC_RECORD_BYTES
        )));
    }
    Ok(bytes
        .chunks_exact(SPARSE_MRC_RECORD_BYTES)
        .map(|record| (read_u64(record, 0), f64::from_bits(read_u64(record, 1))))
        .collect())
}

/// Parse the `.dat` text form of a sparse MRC
///
/// Blank lines are skipped.
pub fn parse_sparse_mrc_text(text: &str) -> Result<Vec<(u64, f64)>, MrcError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            let malformed =
                || MrcError::MalformedInput(format!("line {}: expected `index,miss_ratio`", number + 1));
            let (index, ratio) = line.split_once(',').ok_or_else(malformed)?;
            let index = index.trim().parse::<u64>().map_err(|_| malformed())?;
            let ratio = ratio.trim().parse::<f64>().map_err(|_| malformed())?;
            Ok((index, ratio))
        })
        .collect()
}

pub fn read_dense_mrc(path: impl AsRef<Path>) -> Result<Vec<f64>, MrcError> {
    decode_dense_mrc(&fs::read(path)?)
}

pub fn read_sparse_mrc(path: impl AsRef<Path>) -> Result<Vec<(u64, f64)>, MrcError> {
    decode_sparse_mrc(&fs::read(path)?)
}

pub fn read_sparse_mrc_text(path: impl AsRef<Path>) -> Result<Vec<(u64, f64)>, MrcError> {
    parse_sparse_mrc_text(&fs::read_to_string(path)?)
}

/// Write a dense MRC file
pub fn write_dense_mrc(values: &[f64], output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_bytes(&encode_dense_mrc(values), output_path.as_ref())
}

/// Write a sparse MRC file
pub fn write_sparse_mrc(
    pairs: &[(u64, f64)],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_bytes(&encode_sparse_mrc(pairs), output_path.as_ref())
}

fn write_bytes(bytes: &[u8], output_path: &Path) -> Result<(), OutputError> {
    info!("Writing MRC to: {}", output_path.display());
    super::prepare_output_path(output_path)?;
    fs::write(output_path, bytes).map_err(OutputError::WriteFailed)?;
    debug!("MRC written ({} bytes)", bytes.len());
    Ok(())
}

/// Load a miss-ratio curve from any supported file, by extension
///
/// - `.json`: histogram JSON, converted with the MRC builder
/// - `.dat`: sparse text MRC
/// - `.f64`, `.dense`: dense MRC with index scaled by `bin_size`
/// - anything else: sparse binary MRC
pub fn load_curve(path: impl AsRef<Path>, bin_size: u64) -> Result<MissRatioCurve, MrcError> {
    let path = path.as_ref();
    debug!("Loading curve from: {}", path.display());

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => mrc::build(&read_histogram_json(path)?),
        Some("dat") => MissRatioCurve::from_sparse(read_sparse_mrc_text(path)?),
        Some("f64") | Some("dense") => MissRatioCurve::from_dense(&read_dense_mrc(path)?, bin_size),
        _ => MissRatioCurve::from_sparse(read_sparse_mrc(path)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_round_trip() {
        let pairs = vec![(0, 1.0), (64, 0.5), (128, 0.125)];
        assert_eq!(decode_sparse_mrc(&encode_sparse_mrc(&pairs)).unwrap(), pairs);
    }

    #[test]
    fn test_partial_records_rejected() {
        let mut bytes = encode_sparse_mrc(&[(0, 1.0)]);
        bytes.push(0);
        assert!(matches!(decode_sparse_mrc(&bytes), Err(MrcError::MalformedInput(_))));
        assert!(matches!(decode_dense_mrc(&bytes[..9]), Err(MrcError::MalformedInput(_))));
    }

    #[test]
    fn test_parse_text() {
        let pairs = parse_sparse_mrc_text("0,1.0\n10, 0.4\n\n20,0.1\n").unwrap();
        assert_eq!(pairs, vec![(0, 1.0), (10, 0.4), (20, 0.1)]);
        assert!(parse_sparse_mrc_text("0;1.0").is_err());
    }

    #[test]
    fn test_load_curve_dispatch() {
        let temp_dir = tempfile::tempdir().unwrap();

        let dense = temp_dir.path().join("curve.f64");
        write_dense_mrc(&[1.0, 0.5, 0.25], &dense).unwrap();
        let curve = load_curve(&dense, 2).unwrap();
        assert_eq!(curve.to_sparse(), vec![(0, 1.0), (2, 0.5), (4, 0.25)]);

        let sparse = temp_dir.path().join("curve.bin");
        write_sparse_mrc(&[(0, 1.0), (3, 0.2)], &sparse).unwrap();
        assert_eq!(load_curve(&sparse, 1).unwrap().miss_ratio_at(2), 0.2);

        let text = temp_dir.path().join("curve.dat");
        fs::write(&text, "0,1.0\n5,0.0\n").unwrap();
        assert_eq!(load_curve(&text, 1).unwrap().len(), 2);
    }
}
