//! JSON report and histogram writers.
//!
//! Writes any serializable report (comparison, temporal, batch) as pretty
//! JSON, and binned histograms in the simulator JSON format.

use crate::histogram::{BinnedHistogram, HistogramJson};
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = compare_curves(&oracle, &candidate, 1)?;
/// write_report(&report, "report.json")?;
/// ```
pub fn write_report<T: Serialize>(
    report: &T,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    super::prepare_output_path(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a report back from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report<T: DeserializeOwned>(input_path: impl AsRef<Path>) -> Result<T, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)
}

/// Write a binned histogram in the simulator JSON format
pub fn write_histogram_json(
    histogram: &BinnedHistogram,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_report(&HistogramJson::from_binned(histogram), output_path)
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_series;
    use crate::compare::TemporalReport;
    use crate::histogram::read_histogram_json;
    use std::collections::BTreeMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_and_read_report() {
        let report = compare_series(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.5, 3.0, 4.0]).unwrap();
        let temp_file = NamedTempFile::new().unwrap();

        write_report(&report, temp_file.path()).unwrap();
        let loaded: TemporalReport = read_report(temp_file.path()).unwrap();

        assert_eq!(loaded.accuracy, report.accuracy);
        assert_eq!(loaded.summary, report.summary);
    }

    #[test]
    fn test_histogram_json_round_trip() {
        let mut bins = BTreeMap::new();
        bins.insert(0, 3.0);
        bins.insert(4, 1.0);
        let histogram = BinnedHistogram::from_parts(4, 2, bins, 2.0, 5.0);

        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("histogram.json");
        write_histogram_json(&histogram, &path).unwrap();

        assert_eq!(read_histogram_json(&path).unwrap(), histogram);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        let report = compare_series(&[1.0], &[2.0]).unwrap();
        write_report(&report, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
