//! Readers for packed little-endian trace files.
//!
//! - Kia: `{timestamp: u64, command: u8, key: u64, size: u32, ttl: u32}`
//! - Sari: `{timestamp: u32, key: u64, size: u32, eviction_time: u32}`

use super::{AccessTrace, Key};
use crate::utils::config::{KIA_RECORD_BYTES, SARI_RECORD_BYTES};
use crate::utils::error::MrcError;
use clap::ValueEnum;
use log::{debug, info};
use std::path::Path;

/// Supported trace record layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TraceFormat {
    Kia,
    Sari,
}

impl TraceFormat {
    /// Size of one packed record in bytes
    pub fn record_size(self) -> usize {
        match self {
            TraceFormat::Kia => KIA_RECORD_BYTES,
            TraceFormat::Sari => SARI_RECORD_BYTES,
        }
    }

    /// Byte offset of the key within a record
    fn key_offset(self) -> usize {
        match self {
            TraceFormat::Kia => 9,
            TraceFormat::Sari => 4,
        }
    }
}

/// Decode the keys of an in-memory trace
///
/// # Errors
/// * `MrcError::MalformedInput` - length is not a multiple of the record size
pub fn decode_trace(bytes: &[u8], format: TraceFormat) -> Result<AccessTrace, MrcError> {
    let record_size = format.record_size();
    if bytes.len() % record_size != 0 {
        return Err(MrcError::MalformedInput(format!(
            "{:?} trace of {} bytes is not a whole number of {}-byte records",
            format,
            bytes.len(),
            record_size
        )));
    }

    let offset = format.key_offset();
    let keys: Vec<Key> = bytes
        .chunks_exact(record_size)
        .map(|record| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&record[offset..offset + 8]);
            u64::from_le_bytes(word)
        })
        .collect();

    debug!("Decoded {} {:?} records", keys.len(), format);
    Ok(AccessTrace::new(keys))
}

/// Read a whole trace file into memory
pub fn read_trace(path: impl AsRef<Path>, format: TraceFormat) -> Result<AccessTrace, MrcError> {
    let path = path.as_ref();
    info!("Reading from {} with {:?}'s format", path.display(), format);
    let bytes = std::fs::read(path)?;
    decode_trace(&bytes, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kia_record(timestamp: u64, key: u64) -> Vec<u8> {
        let mut record = Vec::with_capacity(KIA_RECORD_BYTES);
        record.extend_from_slice(&timestamp.to_le_bytes());
        record.push(0);
        record.extend_from_slice(&key.to_le_bytes());
        record.extend_from_slice(&64u32.to_le_bytes());
        record.extend_from_slice(&0u32.to_le_bytes());
        record
    }

    fn sari_record(timestamp: u32, key: u64) -> Vec<u8> {
        let mut record = Vec::with_capacity(SARI_RECORD_BYTES);
        record.extend_from_slice(&timestamp.to_le_bytes());
        record.extend_from_slice(&key.to_le_bytes());
        record.extend_from_slice(&64u32.to_le_bytes());
        record.extend_from_slice(&0u32.to_le_bytes());
        record
    }

    #[test]
    fn test_decode_kia() {
        let bytes: Vec<u8> = [(1, 42), (2, 7), (3, 42)]
            .iter()
            .flat_map(|&(t, k)| kia_record(t, k))
            .collect();

        let trace = decode_trace(&bytes, TraceFormat::Kia).unwrap();
        assert_eq!(trace.keys(), &[42, 7, 42]);
    }

    #[test]
    fn test_decode_sari() {
        let bytes: Vec<u8> = [(1, 5), (2, 6)]
            .iter()
            .flat_map(|&(t, k)| sari_record(t, k))
            .collect();

        let trace = decode_trace(&bytes, TraceFormat::Sari).unwrap();
        assert_eq!(trace.keys(), &[5, 6]);
    }

    #[test]
    fn test_truncated_trace() {
        let mut bytes = kia_record(1, 1);
        bytes.pop();
        assert!(matches!(
            decode_trace(&bytes, TraceFormat::Kia),
            Err(MrcError::MalformedInput(_))
        ));
    }
}
