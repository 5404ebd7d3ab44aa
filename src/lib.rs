//! MRC Toolkit
//!
//! Miss-ratio curve construction and comparison for cache studies:
//! stack-distance histograms (Mattson's algorithm), histogram codecs,
//! SHARDS sampling correction, histogram → MRC conversion and geometric
//! accuracy metrics between a predicted and an oracle curve.
//!
//! This crate provides the library behind the `mrc` CLI tool.
//!
//! ## Pipeline
//!
//! ```ignore
//! use mrc_toolkit::{analyzer, compare, mrc, trace};
//!
//! let trace = trace::read_trace("trace.bin", trace::TraceFormat::Kia)?;
//! let oracle = mrc::build_exact(&analyzer::analyze(&trace))?;
//! let candidate = mrc::build(&mrc_toolkit::histogram::read_histogram("sampled.json")?)?;
//! let report = compare::compare_curves(&oracle, &candidate, 1)?;
//! ```

pub mod analyzer;
pub mod commands;
pub mod compare;
pub mod histogram;
pub mod mrc;
pub mod output;
pub mod sampling;
pub mod trace;
pub mod utils;
