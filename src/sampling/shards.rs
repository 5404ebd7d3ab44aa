//! SHARDS sampling-bias correction.
//!
//! Spatial sampling processes only a hashed subset of keys, which shifts
//! histogram mass relative to the full trace. The correction re-centers a
//! metric so sampled MRCs can be compared against an unsampled oracle:
//!
//! ```text
//! expected_sampled = ratio * seen
//! hist_adj         = expected_sampled - processed
//! mrc_adj          = hist_adj / expected_sampled
//! corrected        = x + mrc_adj
//! ```

use crate::histogram::BinnedHistogram;
use crate::mrc::MissRatioCurve;
use crate::utils::error::MrcError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Sampler metadata reported alongside a sampled histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShardsMetadata {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub sampler: Option<String>,

    #[serde(rename = ".sampling_ratio")]
    pub sampling_ratio: f64,

    #[serde(rename = ".num_entries_seen")]
    pub num_entries_seen: u64,

    #[serde(rename = ".num_entries_processed")]
    pub num_entries_processed: u64,

    #[serde(rename = ".scale", default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u64>,

    #[serde(rename = ".adjustment", default, skip_serializing_if = "Option::is_none")]
    pub adjustment: Option<bool>,
}

impl ShardsMetadata {
    pub fn new(sampling_ratio: f64, num_entries_seen: u64, num_entries_processed: u64) -> Self {
        Self {
            sampler: None,
            sampling_ratio,
            num_entries_seen,
            num_entries_processed,
            scale: None,
            adjustment: None,
        }
    }

    /// Check the ratio and the counter pair
    ///
    /// # Errors
    /// * `MrcError::Sampling` - ratio outside (0, 1], or more entries
    ///   processed than seen
    pub fn validate(&self) -> Result<(), MrcError> {
        if !self.sampling_ratio.is_finite()
            || self.sampling_ratio <= 0.0
            || self.sampling_ratio > 1.0
        {
            return Err(MrcError::Sampling(format!(
                "sampling ratio {} is outside (0, 1]",
                self.sampling_ratio
            )));
        }
        if self.num_entries_processed > self.num_entries_seen {
            return Err(MrcError::Sampling(format!(
                "processed {} entries but only saw {}",
                self.num_entries_processed, self.num_entries_seen
            )));
        }
        Ok(())
    }

    /// Number of entries a perfect sampler would have processed
    pub fn expected_sampled(&self) -> f64 {
        self.sampling_ratio * self.num_entries_seen as f64
    }

    /// Histogram mass missing (positive) or in excess (negative)
    ///
    /// Simulator histograms hold counts multiplied by `.scale`, so the
    /// adjustment is scaled the same way, then truncated toward zero.
    pub fn histogram_adjustment(&self) -> Result<f64, MrcError> {
        self.validate()?;
        let scale = self.scale.unwrap_or(1) as f64;
        Ok((scale * (self.expected_sampled() - self.num_entries_processed as f64)).trunc())
    }

    /// False only when the sampler reports `.adjustment: false`
    pub fn adjustment_enabled(&self) -> bool {
        self.adjustment != Some(false)
    }

    /// Correct a metric computed on the sampled trace
    pub fn correct(&self, raw: f64) -> Result<f64, MrcError> {
        self.validate()?;
        correct(
            self.sampling_ratio,
            self.num_entries_seen,
            self.num_entries_processed,
            raw,
        )
    }

    /// Correct every miss ratio of a curve; results are not clamped
    pub fn correct_curve(&self, curve: &MissRatioCurve) -> Result<MissRatioCurve, MrcError> {
        self.validate()?;
        let points = curve
            .points()
            .iter()
            .map(|&(capacity, ratio)| Ok((capacity, self.correct(ratio)?)))
            .collect::<Result<Vec<_>, MrcError>>()?;
        Ok(MissRatioCurve::from_points_unchecked(points))
    }

    /// Divide a sampled capacity by the sampling ratio
    pub fn scale_capacity(&self, capacity: f64) -> f64 {
        scale_capacity(capacity, Some(self.sampling_ratio))
    }
}

/// Apply the SHARDS correction to a raw metric value
///
/// # Errors
/// * `MrcError::Sampling` - `ratio * seen == 0`, which would divide by zero
pub fn correct(ratio: f64, seen: u64, processed: u64, raw: f64) -> Result<f64, MrcError> {
    let expected_sampled = ratio * seen as f64;
    if expected_sampled == 0.0 {
        return Err(MrcError::Sampling(format!(
            "expected sample size is zero (ratio={}, seen={})",
            ratio, seen
        )));
    }
    let hist_adj = expected_sampled - processed as f64;
    let mrc_adj = hist_adj / expected_sampled;
    Ok(raw + mrc_adj)
}

/// Scale a sampled capacity up to full-trace units
///
/// Results without a recorded ratio are treated as unsampled.
pub fn scale_capacity(capacity: f64, ratio: Option<f64>) -> f64 {
    capacity / ratio.unwrap_or(1.0)
}

/// A histogram together with the sampler metadata that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct SampledHistogram {
    pub histogram: BinnedHistogram,
    pub metadata: ShardsMetadata,
}

impl SampledHistogram {
    pub fn new(histogram: BinnedHistogram, metadata: ShardsMetadata) -> Self {
        Self {
            histogram,
            metadata,
        }
    }

    pub fn false_infinity(&self) -> f64 {
        self.histogram.false_infinity()
    }

    /// Histogram with the SHARDS-Adj mass added to its first bucket(s)
    ///
    /// Returned unchanged when the sampler ran with adjustment disabled.
    pub fn corrected_histogram(&self) -> Result<BinnedHistogram, MrcError> {
        if !self.metadata.adjustment_enabled() {
            debug!("SHARDS adjustment disabled by the sampler; histogram left as is");
            return Ok(self.histogram.clone());
        }
        let adjustment = self.metadata.histogram_adjustment()?;
        debug!("Applying SHARDS histogram adjustment of {:.3}", adjustment);
        self.histogram.adjusted_first_buckets(adjustment)
    }
}

/// Read SHARDS metadata from a JSON file
///
/// Accepts either the bare sampler object or a predictor result with the
/// object nested under `Extras.SHARDS`.
pub fn read_shards_metadata(path: impl AsRef<Path>) -> Result<ShardsMetadata, MrcError> {
    let path = path.as_ref();
    debug!("Reading SHARDS metadata from: {}", path.display());

    let file = File::open(path)?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
    parse_shards_metadata(value)
}

/// Parse SHARDS metadata from a JSON value (see [`read_shards_metadata`])
pub fn parse_shards_metadata(value: serde_json::Value) -> Result<ShardsMetadata, MrcError> {
    let object = if value.get(".sampling_ratio").is_some() {
        value
    } else {
        value
            .get("Extras")
            .and_then(|extras| extras.get("SHARDS"))
            .cloned()
            .ok_or_else(|| {
                MrcError::MalformedInput("missing field `.sampling_ratio`".to_string())
            })?
    };

    serde_json::from_value(object).map_err(|e| MrcError::MalformedInput(e.to_string()))
}
