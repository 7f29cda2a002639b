//! Errors raised while reading result files.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while discovering or parsing result files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Results directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {lines} lines is not a whole number of 3-line records")]
    TruncatedRecord { file: String, lines: usize },

    #[error("{file}:{line}: expected {expected} config values, found {found}")]
    ConfigArity {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{file}:{line}: invalid number '{token}'")]
    InvalidNumber {
        file: String,
        line: usize,
        token: String,
    },
}
