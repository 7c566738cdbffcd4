//! Error types for grafana-sync
//!
//! This module defines all error types used throughout the application,
//! covering local file handling, definition parsing, and remote API calls.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for grafana-sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// I/O error while reading a watch directory or definition file
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// Path of the directory or file involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Definition file is not valid JSON
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        /// Path of the definition file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Definition file lacks the string field used for identity matching
    #[error("Definition '{path}' has no string '{field}' field")]
    MissingField {
        /// Path of the definition file
        path: PathBuf,
        /// Name of the expected field (`title` or `name`)
        field: &'static str,
    },

    /// Invalid file-name matching pattern
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Transport-level failure talking to the Grafana server
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Grafana API answered with a non-success status
    #[error("Grafana API error (HTTP {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned by the server
        body: String,
    },

    /// Response body could not be decoded
    #[error("Failed to decode Grafana response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem watcher error
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

impl SyncError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a JSON parse error with path context
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    /// Create a missing-field error for a definition file
    pub fn missing_field(path: impl Into<PathBuf>, field: &'static str) -> Self {
        Self::MissingField {
            path: path.into(),
            field,
        }
    }

    /// Create an API error from a response status and body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this error originated locally (file or configuration),
    /// as opposed to a remote API failure
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::Json { .. }
                | Self::MissingField { .. }
                | Self::Pattern(_)
                | Self::Config(_)
                | Self::Watch(_)
        )
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } | Self::MissingField { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Result type alias for grafana-sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| SyncError::io(path, e))
    }
}
