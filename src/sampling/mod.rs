//! Sampling-bias correction for SHARDS-sampled results.

pub mod shards;

pub use shards::{
    correct, parse_shards_metadata, read_shards_metadata, scale_capacity, SampledHistogram,
    ShardsMetadata,
};
