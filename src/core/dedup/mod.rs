//! # Dedup Module
//!
//! The two duplicate-detection passes and the deletion set they produce.
//!
//! ## Passes
//! 1. [`ExactDeduplicator`] - keeps the first file with a given content,
//!    marks every later file with the same bytes
//! 2. [`FuzzyDeduplicator`] - scores every unordered pair `(i, j)`, `i < j`,
//!    and marks `j` when the pair crosses its threshold
//!
//! Neither pass touches the filesystem beyond reading. Removal is the job of
//! [`crate::core::deletion`].

mod exact;
mod fuzzy;

pub use exact::ExactDeduplicator;
pub use fuzzy::{score_text_pair, FuzzyDeduplicator, PairScore};

use crate::core::scanner::FileEntry;
use crate::error::ReadError;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Why a file was marked for deletion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MatchReason {
    /// Byte-identical to an earlier file
    ExactContent,
    /// Text within the edit-distance threshold of an earlier file
    SimilarText { distance_percent: f64 },
    /// Image within the correlation threshold of an earlier file
    SimilarImage { similarity: f64 },
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchReason::ExactContent => write!(f, "identical content"),
            MatchReason::SimilarText { distance_percent } => {
                write!(f, "text {distance_percent:.1}% different")
            }
            MatchReason::SimilarImage { similarity } => {
                write!(f, "image {similarity:.1}% similar")
            }
        }
    }
}

/// A file selected for removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkedFile {
    /// Position of the file in the pass input
    pub index: usize,
    /// The file to remove
    pub file: FileEntry,
    /// Position of the earlier file it duplicates; always below `index`
    pub original: usize,
    /// Why it was marked
    pub reason: MatchReason,
}

/// Files selected for removal, in the order they were marked.
///
/// The fuzzy pass may mark the same file once per earlier file it
/// matches; those repeats are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletionSet {
    marked: Vec<MarkedFile>,
}

impl DeletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a deletion request
    pub fn mark(&mut self, marked: MarkedFile) {
        debug_assert!(marked.original < marked.index);
        self.marked.push(marked);
    }

    /// Number of requests, repeats included
    pub fn len(&self) -> usize {
        self.marked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkedFile> {
        self.marked.iter()
    }

    /// Input positions of the marked files, in marking order
    pub fn indices(&self) -> Vec<usize> {
        self.marked.iter().map(|m| m.index).collect()
    }

    /// Distinct input positions, ascending
    pub fn unique_indices(&self) -> Vec<usize> {
        let mut indices = self.indices();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Check whether a path has been marked at least once
    pub fn contains(&self, path: &Path) -> bool {
        self.marked.iter().any(|m| m.file.path == path)
    }
}

impl<'a> IntoIterator for &'a DeletionSet {
    type Item = &'a MarkedFile;
    type IntoIter = std::slice::Iter<'a, MarkedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.marked.iter()
    }
}

/// A duplicate-detection pass over an ordered file list
///
/// Implementations own every piece of state they build for one call and
/// drop it before returning, so a pass can be run again on new input.
pub trait DuplicatePass: Send + Sync {
    /// Select the files to remove
    fn find(&self, files: &[FileEntry]) -> Result<DeletionSet, ReadError> {
        self.find_with_events(files, &crate::events::null_sender())
    }

    /// Select the files to remove, reporting progress via events
    fn find_with_events(
        &self,
        files: &[FileEntry],
        events: &EventSender,
    ) -> Result<DeletionSet, ReadError>;
}
