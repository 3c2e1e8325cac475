//! Storage Layer
//!
//! Filesystem access for level files. Reads and writes are synchronous and
//! only happen at session start and session end, outside the frame loop.
//!
//! "File absent" and "any other I/O failure" are kept apart so callers can
//! treat a missing level as a fresh one without swallowing real errors.

pub mod local;

pub use local::LocalStorage;

use std::fmt;

/// Storage error types
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// File or directory not found
    NotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// Any other I/O error (disk full, rename across devices, ...)
    IoError(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(path) => write!(f, "not found: {}", path),
            StorageError::PermissionDenied(msg) => write!(f, "permission denied: {}", msg),
            StorageError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}
