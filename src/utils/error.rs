//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised by the MRC pipeline
///
/// All variants are fail-fast: they describe malformed data or an
/// unsatisfiable precondition, never a transient condition.
#[derive(Error, Debug)]
pub enum MrcError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Sampling error: {0}")]
    Sampling(String),

    #[error("Geometric degeneracy: {0}")]
    GeometricDegeneracy(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid threshold configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Analysis cancelled after {0} accesses")]
    Cancelled(usize),
}

impl MrcError {
    /// Short name of the error kind, used when logging skipped batch inputs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) => "MalformedInput",
            Self::Sampling(_) => "SamplingError",
            Self::GeometricDegeneracy(_) => "GeometricDegeneracy",
            Self::EmptyInput(_) => "EmptyInputError",
            Self::Config(_) => "ConfigError",
            Self::Json(_) => "MalformedInput",
            Self::Io(_) => "IoError",
            Self::Cancelled(_) => "Cancelled",
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_names() {
        assert_eq!(MrcError::EmptyInput("x".into()).kind(), "EmptyInputError");
        assert_eq!(MrcError::Sampling("x".into()).kind(), "SamplingError");
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(MrcError::from(json_err).kind(), "MalformedInput");
    }

    #[test]
    fn test_error_display() {
        let err = MrcError::MalformedInput("missing field `.bin_size`".into());
        assert_eq!(err.to_string(), "Malformed input: missing field `.bin_size`");
    }
}
