//! Error types for the export module
//!
//! Extraction itself never fails; these errors cover reading stylesheets,
//! rendering the result and writing it out.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// IO errors while reading inputs or writing output
    #[error("IO error on {path:?}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML serialization errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Unknown output format or export mode name
    #[error("Unsupported format '{format}'")]
    UnsupportedFormat { format: String },

    /// No input files were given
    #[error("No input files specified")]
    NoInput,
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Json {
            source: err,
            message: "JSON serialization failed".to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ExportError {
    fn from(err: serde_yaml::Error) -> Self {
        ExportError::Yaml {
            source: err,
            message: "YAML serialization failed".to_string(),
        }
    }
}

/// Helper trait for converting IO errors with the path they concern
pub trait IoContext<T> {
    fn with_io_context(self, path: impl Into<PathBuf>, message: &str) -> ExportResult<T>;
}

impl<T> IoContext<T> for Result<T, std::io::Error> {
    fn with_io_context(self, path: impl Into<PathBuf>, message: &str) -> ExportResult<T> {
        self.map_err(|e| ExportError::Io {
            path: path.into(),
            message: message.to_string(),
            source: e,
        })
    }
}

/// Helper trait for converting JSON errors with context
pub trait JsonContext<T> {
    fn with_json_context(self, message: &str) -> ExportResult<T>;
}

impl<T> JsonContext<T> for Result<T, serde_json::Error> {
    fn with_json_context(self, message: &str) -> ExportResult<T> {
        self.map_err(|e| ExportError::Json {
            message: message.to_string(),
            source: e,
        })
    }
}
