//! Storage-specific error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::security::PathSecurityError;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file name does not carry an installable extension.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// The file name resolved outside the data directory.
    #[error("Invalid path: {0}")]
    InvalidPath(#[from] PathSecurityError),

    /// No regular file exists at the resolved path.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing the file.
    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    /// Create a new "unsupported extension" error.
    pub fn unsupported_extension(name: impl Into<String>) -> Self {
        Self::UnsupportedExtension(name.into())
    }

    /// Create a new I/O error bound to `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
