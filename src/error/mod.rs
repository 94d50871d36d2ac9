//! Error types and Result aliases for dirwatcher.
//!
//! This module defines the error hierarchy used throughout the crate.
//! All public functions return `Result<T, Error>` or `Result<T>`.

use thiserror::Error;

/// Result type alias using dirwatcher's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dirwatcher operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Directory or file watching error.
    #[error("watcher error: {0}")]
    Watcher(#[from] WatcherError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised while listing the watched directory or scanning its files.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// The watched directory does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// The watched directory exists but could not be listed.
    #[error("failed to list directory '{path}': {reason}")]
    DirectoryAccess { path: String, reason: String },

    /// A file could not be opened or read during a scan.
    #[error("failed to scan file '{path}': {reason}")]
    FileAccess { path: String, reason: String },
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error means the watched directory is missing.
    #[must_use]
    pub const fn is_directory_not_found(&self) -> bool {
        matches!(self, Self::Watcher(WatcherError::DirectoryNotFound { .. }))
    }
}

impl WatcherError {
    /// Create a file access error for `path`.
    pub fn file_access(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::FileAccess {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}
