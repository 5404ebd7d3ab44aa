//! Stack-distance analysis of access traces.
//!
//! This module transforms an access trace into:
//! - An exact stack-distance histogram (Mattson's algorithm)
//! - Optionally, its binned form for the MRC builder

mod fenwick;
pub mod stack_distance;

// Re-export main functions
pub use stack_distance::{analyze, analyze_brute_force, analyze_with_cancel};
