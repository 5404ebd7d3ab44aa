//! Miss-ratio curve construction.

pub mod builder;
pub mod curve;

pub use builder::{build, build_exact};
pub use curve::MissRatioCurve;
