//! Indexer error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving file sets.
#[derive(Debug, Error)]
pub enum IndexerError {
    /// Directory that could not be read while expanding a glob
    #[error("Cannot read {path}: {source}")]
    Walk {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Glob or exclude pattern that could not be compiled
    #[error("Invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// Path not found
    #[error("Path not found: {0}")]
    NotFound(PathBuf),
}

impl IndexerError {
    pub(crate) fn pattern(pattern: &str, err: glob::PatternError) -> Self {
        IndexerError::Pattern {
            pattern: pattern.to_string(),
            message: err.to_string(),
        }
    }
}
