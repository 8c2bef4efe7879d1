//! # Scanner Module
//!
//! Lists the files of one directory, without recursing.
//!
//! ## Example
//! ```rust,ignore
//! use repetitive_file_cleaner::core::scanner::{DirectoryLister, FileLister, ScanConfig};
//!
//! let lister = DirectoryLister::new(ScanConfig::default());
//! let listing = lister.list(Path::new("/data/inbox"))?;
//! ```

mod walker;

pub use walker::{DirectoryLister, ScanConfig};

use crate::error::ScanError;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file discovered in the target directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Result of listing a directory
#[derive(Debug, Default)]
pub struct Listing {
    /// Files in listing order
    pub files: Vec<FileEntry>,
    /// Entries that could not be inspected (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for file listers
///
/// Implement this trait to feed the passes from somewhere other than the
/// local filesystem (e.g., in tests).
pub trait FileLister: Send + Sync {
    /// List the files directly inside `dir`
    fn list(&self, dir: &Path) -> Result<Listing, ScanError>;

    /// List with progress reporting via events
    fn list_with_events(&self, dir: &Path, events: &EventSender) -> Result<Listing, ScanError>;
}
