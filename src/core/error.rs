//! Error types for code_collector
//!
//! Only run-fatal conditions live here. Per-file problems become
//! [`SkippedEntry`](crate::core::models::SkippedEntry) records and per-spec
//! misses are dropped, so neither ever surfaces as an `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for collector operations
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Errors that abort a collection run
#[derive(Error, Debug)]
pub enum CollectorError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snippet target does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Snippet target exists but no decoder accepted it
    #[error("Unable to read file: {path}")]
    Unreadable { path: PathBuf },

    /// Extraction ranges did not match the expected shape
    #[error("Invalid extraction ranges: {message}")]
    InvalidRanges { message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CollectorError>,
    },
}

impl CollectorError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CollectorError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        CollectorError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid ranges error
    pub fn invalid_ranges(message: impl Into<String>) -> Self {
        CollectorError::InvalidRanges {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CollectorError::FileNotFound {
            path: PathBuf::from("/tmp/missing.py"),
        };
        assert!(err.to_string().contains("/tmp/missing.py"));
    }

    #[test]
    fn test_error_with_context() {
        let err = CollectorError::invalid_ranges("expected a JSON array");
        let wrapped = err.with_context("parsing --ranges");
        let msg = wrapped.to_string();
        assert!(msg.contains("parsing --ranges"));
        assert!(msg.contains("expected a JSON array"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CollectorError = io_err.into();
        assert!(matches!(err, CollectorError::Io(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(CollectorError::invalid_config("bad"));
        let err = result.context("loading .code_collector.json").unwrap_err();
        assert!(matches!(err, CollectorError::WithContext { .. }));
    }
}
