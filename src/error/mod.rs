//! # Error Module
//!
//! Error types for the repetitive file cleaner.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - Comparison and classification never fail on loaded content; only the
//!   I/O collaborators (listing, reading, decoding, deleting) produce errors

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while listing the target directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while loading file content
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

impl ReadError {
    /// Path of the file that could not be loaded
    pub fn path(&self) -> &PathBuf {
        match self {
            ReadError::Io { path, .. } | ReadError::Decode { path, .. } => path,
        }
    }
}

/// Errors that occur while removing a file
///
/// A file that is already gone is not an error; see
/// [`crate::core::deletion::DeleteOutcome::AlreadyGone`].
#[derive(Error, Debug)]
pub enum DeleteError {
    #[error("Permission denied deleting: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to delete {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DeleteError {
    /// Classify an I/O error raised while deleting `path`
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied { path },
            _ => DeleteError::Io { path, source },
        }
    }
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, CleanerError>;
