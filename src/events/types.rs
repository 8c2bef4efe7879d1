//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the cleaner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory listing events
    Scan(ScanEvent),
    /// Duplicate detection events
    Compare(CompareEvent),
    /// Deletion phase events
    Delete(DeleteEvent),
    /// Pass-level events
    Pass(PassEvent),
}

/// Events during directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Listing has started
    Started { path: PathBuf },
    /// A file was found
    FileFound { path: PathBuf },
    /// An entry could not be read but listing continues
    Error { path: PathBuf, message: String },
    /// Listing completed
    Completed { total_files: usize },
}

/// Events during duplicate detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    /// Detection has started
    Started {
        total_files: usize,
        total_comparisons: usize,
    },
    /// Progress update during detection
    Progress(CompareProgress),
    /// A file was marked for deletion
    DuplicateFound {
        /// The file that will be removed
        path: PathBuf,
        /// The earlier file it duplicates
        original: PathBuf,
    },
    /// Detection completed
    Completed { marked: usize },
}

/// Progress information during detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareProgress {
    /// Number of comparisons completed
    pub comparisons_completed: usize,
    /// Total number of comparisons needed
    pub total_comparisons: usize,
    /// Number of files marked so far
    pub marked: usize,
}

/// Events during the deletion phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DeleteEvent {
    /// Deletion has started
    Started { total_requests: usize },
    /// A file was removed
    FileDeleted { path: PathBuf },
    /// A file was requested again after it had already been removed
    AlreadyRemoved { path: PathBuf },
    /// A file could not be removed
    Error { path: PathBuf, message: String },
    /// Deletion completed
    Completed { deleted: usize, elapsed_ns: u64 },
}

/// Pass-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PassEvent {
    /// A pass has started
    Started { mode: PassMode },
    /// Moving to a new phase
    PhaseChanged { phase: PassPhase },
    /// Pass completed successfully
    Completed { summary: PassSummary },
    /// Pass aborted with a fatal error
    Error { message: String },
}

/// Which duplicate definition a pass applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassMode {
    /// Byte-identical content
    Exact,
    /// Edit-distance or correlation similarity
    Fuzzy,
}

/// Phases of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassPhase {
    Listing,
    Comparing,
    Deleting,
}

/// Summary of a completed pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassSummary {
    /// Files listed in the directory
    pub total_files: usize,
    /// Deletion requests produced by the pass (repeats included)
    pub marked: usize,
    /// Files actually removed
    pub deleted: usize,
    /// Bytes freed by the removals
    pub bytes_freed: u64,
    /// Time spent in the deletion step, in nanoseconds
    pub delete_elapsed_ns: u64,
}

impl std::fmt::Display for PassMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassMode::Exact => write!(f, "exact"),
            PassMode::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

impl std::fmt::Display for PassPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassPhase::Listing => write!(f, "Listing"),
            PassPhase::Comparing => write!(f, "Comparing"),
            PassPhase::Deleting => write!(f, "Deleting"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_serializable() {
        let event = Event::Compare(CompareEvent::Progress(CompareProgress {
            comparisons_completed: 10,
            total_comparisons: 45,
            marked: 2,
        }));

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: Event = serde_json::from_str(&json).unwrap();

        match deserialized {
            Event::Compare(CompareEvent::Progress(p)) => {
                assert_eq!(p.total_comparisons, 45);
                assert_eq!(p.marked, 2);
            }
            _ => panic!("Wrong event type"),
        }
    }

    #[test]
    fn pass_summary_is_serializable() {
        let summary = PassSummary {
            total_files: 12,
            marked: 4,
            deleted: 3,
            bytes_freed: 123_456,
            delete_elapsed_ns: 9_000,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("123456"));
    }

    #[test]
    fn pass_mode_display() {
        assert_eq!(PassMode::Exact.to_string(), "exact");
        assert_eq!(PassMode::Fuzzy.to_string(), "fuzzy");
        assert_eq!(PassPhase::Deleting.to_string(), "Deleting");
    }
}
