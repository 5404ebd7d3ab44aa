//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod batch;
pub mod compare;
pub mod histogram;
pub mod models;
pub mod mrc;
pub mod temporal;
pub mod utils;

// Re-export main command functions
pub use batch::execute_batch;
pub use compare::execute_compare;
pub use histogram::{execute_histogram, validate_histogram_args};
pub use models::{BatchArgs, CompareArgs, HistogramArgs, MrcArgs, TemporalArgs};
pub use mrc::execute_mrc;
pub use temporal::execute_temporal;
pub use utils::display_version;
