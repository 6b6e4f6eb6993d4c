//! Core error types for snapdoc.

use snapdoc_indexer::IndexerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in core operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration file does not exist
    #[error("Config not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Configuration file is not valid JSON for the expected shape
    #[error("Invalid config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Destination directory or document could not be written
    #[error("Cannot write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File-set resolution error
    #[error(transparent)]
    Indexer(#[from] IndexerError),
}

impl CoreError {
    /// Whether this error must abort the run before any output is written.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CoreError::ConfigNotFound(_) | CoreError::ConfigParse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_write_names_path() {
        let err = CoreError::OutputWrite {
            path: PathBuf::from("out/a.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("out/a.md"));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_config_errors_are_flagged() {
        assert!(CoreError::ConfigNotFound(PathBuf::from("x.json")).is_config_error());
        let parse = CoreError::ConfigParse {
            path: PathBuf::from("x.json"),
            message: "expected value".to_string(),
        };
        assert!(parse.is_config_error());
    }
}
