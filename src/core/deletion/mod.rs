//! # Deletion Module
//!
//! Carries out a [`DeletionSet`] and times it.
//!
//! Only the removal loop is timed; detection has already finished when
//! [`execute_deletions`] is called. A request for a path that was already
//! removed earlier in the same set, or that no longer exists, is a no-op
//! counted under `already_removed`. Repeats of a path whose removal failed
//! are skipped without being counted.

use crate::core::dedup::DeletionSet;
use crate::error::DeleteError;
use crate::events::{DeleteEvent, Event, EventSender};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// What happened to one deletion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The file was removed
    Removed,
    /// The file did not exist any more
    AlreadyGone,
}

/// Removes files on behalf of the cleaner
pub trait DeletionExecutor: Send + Sync {
    fn delete(&self, path: &Path) -> Result<DeleteOutcome, DeleteError>;

    /// Whether this executor actually touches the filesystem
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Permanently removes files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDeleter;

impl DeletionExecutor for FsDeleter {
    fn delete(&self, path: &Path) -> Result<DeleteOutcome, DeleteError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(DeleteOutcome::Removed),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyGone),
            Err(e) => Err(DeleteError::from_io(path.to_path_buf(), e)),
        }
    }
}

/// Reports every request as removed without touching anything
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunDeleter;

impl DeletionExecutor for DryRunDeleter {
    fn delete(&self, _path: &Path) -> Result<DeleteOutcome, DeleteError> {
        Ok(DeleteOutcome::Removed)
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// Outcome of carrying out a deletion set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletionReport {
    /// Requests in the set, repeats included
    pub requested: usize,
    /// Files removed (or that would be, on a dry run)
    pub deleted: usize,
    /// Requests for files that were already gone
    pub already_removed: usize,
    /// Sum of the sizes of removed files
    pub bytes_freed: u64,
    /// Files that could not be removed, with the reason
    pub failures: Vec<(PathBuf, String)>,
    /// Time spent removing files; zero when the set was empty
    pub elapsed: Duration,
    /// Whether nothing was actually removed
    pub dry_run: bool,
}

/// Carry out every request in `deletions`, in order.
///
/// Individual failures are recorded and do not stop the loop.
pub fn execute_deletions(
    deletions: &DeletionSet,
    executor: &dyn DeletionExecutor,
    events: &EventSender,
) -> DeletionReport {
    let mut report = DeletionReport {
        requested: deletions.len(),
        dry_run: executor.is_dry_run(),
        ..Default::default()
    };

    events.send(Event::Delete(DeleteEvent::Started {
        total_requests: deletions.len(),
    }));

    if !deletions.is_empty() {
        let mut removed: HashSet<&Path> = HashSet::new();
        let mut failed: HashSet<&Path> = HashSet::new();
        let start = Instant::now();

        for marked in deletions {
            let path = marked.file.path.as_path();

            if removed.contains(path) {
                report.already_removed += 1;
                events.send(Event::Delete(DeleteEvent::AlreadyRemoved {
                    path: path.to_path_buf(),
                }));
                continue;
            }
            if failed.contains(path) {
                tracing::debug!(path = %path.display(), "skipping repeat of failed deletion");
                continue;
            }

            match executor.delete(path) {
                Ok(DeleteOutcome::Removed) => {
                    removed.insert(path);
                    report.deleted += 1;
                    report.bytes_freed += marked.file.size;
                    events.send(Event::Delete(DeleteEvent::FileDeleted {
                        path: path.to_path_buf(),
                    }));
                }
                Ok(DeleteOutcome::AlreadyGone) => {
                    removed.insert(path);
                    report.already_removed += 1;
                    events.send(Event::Delete(DeleteEvent::AlreadyRemoved {
                        path: path.to_path_buf(),
                    }));
                }
                Err(e) => {
                    failed.insert(path);
                    tracing::warn!(path = %path.display(), error = %e, "could not delete file");
                    events.send(Event::Delete(DeleteEvent::Error {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    }));
                    report.failures.push((path.to_path_buf(), e.to_string()));
                }
            }
        }

        report.elapsed = start.elapsed();
    }

    tracing::info!(
        requested = report.requested,
        deleted = report.deleted,
        already_removed = report.already_removed,
        failed = report.failures.len(),
        dry_run = report.dry_run,
        "deletion finished"
    );

    events.send(Event::Delete(DeleteEvent::Completed {
        deleted: report.deleted,
        elapsed_ns: u64::try_from(report.elapsed.as_nanos()).unwrap_or(u64::MAX),
    }));

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dedup::{MarkedFile, MatchReason};
    use crate::core::scanner::FileEntry;
    use crate::events::null_sender;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn mark(set: &mut DeletionSet, path: &Path, size: u64, index: usize) {
        set.mark(MarkedFile {
            index,
            file: FileEntry::new(path, size),
            original: 0,
            reason: MatchReason::ExactContent,
        });
    }

    /// Executor that fails for one path and records every call
    struct FlakyDeleter {
        failing: PathBuf,
        calls: Mutex<Vec<PathBuf>>,
    }

    impl DeletionExecutor for FlakyDeleter {
        fn delete(&self, path: &Path) -> Result<DeleteOutcome, DeleteError> {
            self.calls.lock().unwrap().push(path.to_path_buf());
            if path == self.failing {
                Err(DeleteError::PermissionDenied {
                    path: path.to_path_buf(),
                })
            } else {
                Ok(DeleteOutcome::Removed)
            }
        }
    }

    #[test]
    fn removes_marked_files_and_sums_sizes() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.txt");
        let b = temp_dir.path().join("b.txt");
        fs::write(&a, "aaa").unwrap();
        fs::write(&b, "bbbbb").unwrap();

        let mut set = DeletionSet::new();
        mark(&mut set, &a, 3, 1);
        mark(&mut set, &b, 5, 2);

        let report = execute_deletions(&set, &FsDeleter, &null_sender());

        assert_eq!(report.deleted, 2);
        assert_eq!(report.bytes_freed, 8);
        assert!(report.failures.is_empty());
        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn repeated_requests_are_no_ops() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.txt");
        fs::write(&a, "aaa").unwrap();

        let mut set = DeletionSet::new();
        mark(&mut set, &a, 3, 2);
        mark(&mut set, &a, 3, 2);

        let report = execute_deletions(&set, &FsDeleter, &null_sender());

        assert_eq!(report.requested, 2);
        assert_eq!(report.deleted, 1);
        assert_eq!(report.already_removed, 1);
        assert_eq!(report.bytes_freed, 3);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn externally_removed_file_is_not_a_failure() {
        let temp_dir = TempDir::new().unwrap();
        let gone = temp_dir.path().join("gone.txt");

        let outcome = FsDeleter.delete(&gone).unwrap();
        assert_eq!(outcome, DeleteOutcome::AlreadyGone);
    }

    #[test]
    fn failures_are_collected_and_loop_continues() {
        let mut set = DeletionSet::new();
        mark(&mut set, Path::new("/d/locked"), 1, 1);
        mark(&mut set, Path::new("/d/free"), 1, 2);

        let executor = FlakyDeleter {
            failing: PathBuf::from("/d/locked"),
            calls: Mutex::new(Vec::new()),
        };
        let report = execute_deletions(&set, &executor, &null_sender());

        assert_eq!(report.deleted, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, PathBuf::from("/d/locked"));
        assert_eq!(executor.calls.lock().unwrap().len(), 2);
    }

    #[test]
    fn repeat_of_failed_deletion_is_not_counted_as_removed() {
        let mut set = DeletionSet::new();
        mark(&mut set, Path::new("/d/locked"), 1, 2);
        mark(&mut set, Path::new("/d/locked"), 1, 2);

        let executor = FlakyDeleter {
            failing: PathBuf::from("/d/locked"),
            calls: Mutex::new(Vec::new()),
        };
        let (sender, receiver) = crate::events::EventChannel::new();
        let report = execute_deletions(&set, &executor, &sender);
        drop(sender);

        assert_eq!(report.requested, 2);
        assert_eq!(report.deleted, 0);
        assert_eq!(report.already_removed, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(executor.calls.lock().unwrap().len(), 1);
        assert!(!receiver
            .iter()
            .any(|e| matches!(e, Event::Delete(DeleteEvent::AlreadyRemoved { .. }))));
    }

    #[test]
    fn dry_run_leaves_files_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.txt");
        fs::write(&a, "aaa").unwrap();

        let mut set = DeletionSet::new();
        mark(&mut set, &a, 3, 1);

        let report = execute_deletions(&set, &DryRunDeleter, &null_sender());

        assert!(report.dry_run);
        assert_eq!(report.deleted, 1);
        assert!(a.exists());
    }

    #[test]
    fn empty_set_reports_zero_elapsed() {
        let report = execute_deletions(&DeletionSet::new(), &FsDeleter, &null_sender());

        assert_eq!(report.requested, 0);
        assert_eq!(report.deleted, 0);
        assert_eq!(report.elapsed, Duration::ZERO);
    }
}
