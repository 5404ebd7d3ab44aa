//! Utility modules for configuration, error handling, and unit parsing.

pub mod config;
pub mod error;
pub mod units;

// Re-export commonly used error types for convenience
pub use error::{MrcError, OutputError};
pub use units::parse_quantity;
