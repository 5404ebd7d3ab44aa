//! Readers and writers for curve files and reports.
//!
//! This module handles moving data to and from disk:
//! - JSON reports and histogram JSON
//! - Dense and sparse MRC binaries
//! - Sparse MRC text files

pub mod binary;
pub mod json;

// Re-export main functions
pub use binary::{
    load_curve, read_dense_mrc, read_sparse_mrc, read_sparse_mrc_text, write_dense_mrc,
    write_sparse_mrc,
};
pub use json::{read_report, write_histogram_json, write_report};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Validate an output path and create its parent directories
pub fn prepare_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_rejected() {
        assert!(prepare_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_directory_path_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(prepare_output_path(temp_dir.path()).is_err());
    }
}
