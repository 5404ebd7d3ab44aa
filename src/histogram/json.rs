//! Histogram JSON as emitted by the simulators.
//!
//! ```json
//! {
//!     "type": "Histogram" | "FractionalHistogram",
//!     ".num_bins": 1024,
//!     ".bin_size": 1,
//!     ".running_sum": 100,
//!     ".histogram": {"0": 12, "3": 7},
//!     ".false_infinity": 4,
//!     ".infinity": 77
//! }
//! ```

use super::codec::decode_binned;
use super::schema::BinnedHistogram;
use crate::utils::config::HISTOGRAM_TYPE_NAMES;
use crate::utils::error::MrcError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Histogram JSON document, discriminated by its `"type"` tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HistogramJson {
    /// Integer counts
    Histogram(HistogramFields),
    /// Fractional counts (e.g. after scaled insertion)
    FractionalHistogram(HistogramFields),
}

/// Fields shared by both histogram variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramFields {
    #[serde(rename = ".num_bins")]
    pub num_bins: u64,

    #[serde(rename = ".bin_size")]
    pub bin_size: u64,

    #[serde(rename = ".running_sum")]
    pub running_sum: f64,

    #[serde(rename = ".histogram")]
    pub histogram: BTreeMap<String, f64>,

    #[serde(rename = ".false_infinity")]
    pub false_infinity: f64,

    #[serde(rename = ".infinity")]
    pub infinity: f64,
}

impl HistogramJson {
    /// Parse a JSON value, rejecting a missing or unrecognized `"type"`
    ///
    /// # Errors
    /// * `MrcError::MalformedInput` - bad tag or missing field
    pub fn from_value(value: serde_json::Value) -> Result<Self, MrcError> {
        let tag = value
            .get("type")
            .ok_or_else(|| MrcError::MalformedInput("missing field `type`".to_string()))?;

        match tag.as_str() {
            Some(name) if HISTOGRAM_TYPE_NAMES.contains(&name) => {}
            _ => {
                return Err(MrcError::MalformedInput(format!(
                    "unrecognized histogram type {}",
                    tag
                )))
            }
        }

        serde_json::from_value(value).map_err(|e| MrcError::MalformedInput(e.to_string()))
    }

    pub fn fields(&self) -> &HistogramFields {
        match self {
            HistogramJson::Histogram(fields) | HistogramJson::FractionalHistogram(fields) => fields,
        }
    }

    /// Decode into a binned histogram
    ///
    /// `Histogram` requires non-negative integral counts; `FractionalHistogram`
    /// accepts any non-negative finite count.
    pub fn decode(&self) -> Result<BinnedHistogram, MrcError> {
        let fields = self.fields();
        let counts = fields
            .histogram
            .values()
            .chain([&fields.false_infinity, &fields.infinity]);

        match self {
            HistogramJson::Histogram(_) => {
                if let Some(bad) = counts.into_iter().find(|c| !is_count(**c) || c.fract() != 0.0) {
                    return Err(MrcError::MalformedInput(format!(
                        "Histogram count {} is not a non-negative integer",
                        bad
                    )));
                }
            }
            HistogramJson::FractionalHistogram(_) => {
                if let Some(bad) = counts.into_iter().find(|c| !is_count(**c)) {
                    return Err(MrcError::MalformedInput(format!(
                        "FractionalHistogram count {} is not a non-negative number",
                        bad
                    )));
                }
            }
        }

        let histogram = decode_binned(
            fields.num_bins,
            fields.bin_size,
            fields.false_infinity,
            fields.infinity,
            &fields.histogram,
        )?;

        if (histogram.total() - fields.running_sum).abs() > 1e-9 * fields.running_sum.max(1.0) {
            warn!(
                "Histogram running sum {} disagrees with bucket total {}",
                fields.running_sum,
                histogram.total()
            );
        }

        Ok(histogram)
    }

    /// Encode a binned histogram as a `"Histogram"` document
    ///
    /// Keys are written unscaled so that decoding multiplies them back.
    pub fn from_binned(histogram: &BinnedHistogram) -> Self {
        let bin_size = histogram.bin_size();
        let bins = histogram
            .tracked_bins()
            .map(|(key, count)| ((key / bin_size).to_string(), count))
            .collect();

        let fields = HistogramFields {
            num_bins: histogram.num_bins(),
            bin_size,
            running_sum: histogram.total(),
            histogram: bins,
            false_infinity: histogram.false_infinity(),
            infinity: histogram.infinity(),
        };

        let integral = histogram.entries().values().all(|c| c.fract() == 0.0);
        if integral {
            HistogramJson::Histogram(fields)
        } else {
            HistogramJson::FractionalHistogram(fields)
        }
    }
}

fn is_count(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Read and decode a histogram JSON file
///
/// # Errors
/// * `MrcError::Io` - file cannot be opened
/// * `MrcError::Json` - file is not JSON
/// * `MrcError::MalformedInput` - JSON does not describe a histogram
pub fn read_histogram_json(path: impl AsRef<Path>) -> Result<BinnedHistogram, MrcError> {
    let path = path.as_ref();
    debug!("Reading histogram JSON from: {}", path.display());

    let file = File::open(path)?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
    HistogramJson::from_value(value)?.decode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::schema::Distance;
    use serde_json::json;

    fn sample_json() -> serde_json::Value {
        json!({
            "type": "Histogram",
            ".num_bins": 8,
            ".bin_size": 2,
            ".running_sum": 10,
            ".histogram": {"0": 3, "2": 4},
            ".false_infinity": 1,
            ".infinity": 2
        })
    }

    #[test]
    fn test_decode_histogram() {
        let hist = HistogramJson::from_value(sample_json()).unwrap().decode().unwrap();

        assert_eq!(hist.entries()[&Distance::Finite(0)], 3.0);
        assert_eq!(hist.entries()[&Distance::Finite(4)], 4.0);
        assert_eq!(hist.false_infinity(), 1.0);
        assert_eq!(hist.infinity(), 2.0);
        assert_eq!(hist.false_infinity_key(), 16);
    }

    #[test]
    fn test_missing_type() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("type");
        assert!(matches!(
            HistogramJson::from_value(value),
            Err(MrcError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_unknown_type() {
        let mut value = sample_json();
        value["type"] = json!("QuickMrcBuckets");
        assert!(matches!(
            HistogramJson::from_value(value),
            Err(MrcError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_missing_field() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove(".bin_size");
        assert!(matches!(
            HistogramJson::from_value(value),
            Err(MrcError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_integer_histogram_rejects_fractions() {
        let mut value = sample_json();
        value[".histogram"]["0"] = json!(2.5);
        let parsed = HistogramJson::from_value(value.clone()).unwrap();
        assert!(parsed.decode().is_err());

        value["type"] = json!("FractionalHistogram");
        let parsed = HistogramJson::from_value(value).unwrap();
        assert!(parsed.decode().is_ok());
    }

    #[test]
    fn test_encode_matches_decode() {
        let hist = HistogramJson::from_value(sample_json()).unwrap().decode().unwrap();
        let encoded = HistogramJson::from_binned(&hist);
        assert!(matches!(encoded, HistogramJson::Histogram(_)));
        assert_eq!(encoded.decode().unwrap(), hist);

        let text = serde_json::to_string(&encoded).unwrap();
        assert!(text.contains("\"type\":\"Histogram\""));
    }
}
