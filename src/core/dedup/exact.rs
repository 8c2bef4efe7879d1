//! Exact-content pass.

use super::{DeletionSet, DuplicatePass, MarkedFile, MatchReason};
use crate::core::loader::ContentReader;
use crate::core::scanner::FileEntry;
use crate::error::ReadError;
use crate::events::{CompareEvent, CompareProgress, Event, EventSender};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Marks every file whose bytes were already seen earlier in the input
pub struct ExactDeduplicator<R> {
    reader: R,
}

impl<R: ContentReader> ExactDeduplicator<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: ContentReader> DuplicatePass for ExactDeduplicator<R> {
    fn find_with_events(
        &self,
        files: &[FileEntry],
        events: &EventSender,
    ) -> Result<DeletionSet, ReadError> {
        let total = files.len();
        events.send(Event::Compare(CompareEvent::Started {
            total_files: total,
            total_comparisons: total,
        }));

        // Content already seen, mapped to the index of its first holder.
        // Lives for this call only.
        let mut seen: HashMap<Vec<u8>, usize> = HashMap::new();
        let mut deletions = DeletionSet::new();

        for (index, file) in files.iter().enumerate() {
            let content = self.reader.read_bytes(&file.path)?;

            match seen.entry(content) {
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
                Entry::Occupied(slot) => {
                    let original = *slot.get();
                    tracing::debug!(
                        path = %file.path.display(),
                        original = %files[original].path.display(),
                        "identical content"
                    );
                    events.send(Event::Compare(CompareEvent::DuplicateFound {
                        path: file.path.clone(),
                        original: files[original].path.clone(),
                    }));
                    deletions.mark(MarkedFile {
                        index,
                        file: file.clone(),
                        original,
                        reason: MatchReason::ExactContent,
                    });
                }
            }

            events.send(Event::Compare(CompareEvent::Progress(CompareProgress {
                comparisons_completed: index + 1,
                total_comparisons: total,
                marked: deletions.len(),
            })));
        }

        tracing::info!(
            files = total,
            unique = seen.len(),
            marked = deletions.len(),
            "exact pass finished"
        );

        events.send(Event::Compare(CompareEvent::Completed {
            marked: deletions.len(),
        }));

        Ok(deletions)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{entries, MemoryReader};
    use super::*;
    use crate::events::EventChannel;

    #[test]
    fn later_copies_are_marked_first_is_kept() {
        let reader = MemoryReader::default()
            .with("/d/a1.txt", "alpha")
            .with("/d/b.txt", "beta")
            .with("/d/a2.txt", "alpha");
        let pass = ExactDeduplicator::new(reader);

        let files = entries(&["/d/a1.txt", "/d/b.txt", "/d/a2.txt"]);
        let deletions = pass.find(&files).unwrap();

        assert_eq!(deletions.indices(), vec![2]);
        let marked = deletions.iter().next().unwrap();
        assert_eq!(marked.original, 0);
        assert_eq!(marked.reason, MatchReason::ExactContent);
    }

    #[test]
    fn every_copy_after_the_first_is_marked() {
        let reader = MemoryReader::default()
            .with("/d/1", "same")
            .with("/d/2", "same")
            .with("/d/3", "other")
            .with("/d/4", "same");
        let pass = ExactDeduplicator::new(reader);

        let deletions = pass.find(&entries(&["/d/1", "/d/2", "/d/3", "/d/4"])).unwrap();

        assert_eq!(deletions.indices(), vec![1, 3]);
        assert!(deletions.iter().all(|m| m.original == 0));
    }

    #[test]
    fn near_identical_content_is_not_exact() {
        let reader = MemoryReader::default()
            .with("/d/a.txt", "hello world")
            .with("/d/b.txt", "hello world ");
        let pass = ExactDeduplicator::new(reader);

        let deletions = pass.find(&entries(&["/d/a.txt", "/d/b.txt"])).unwrap();
        assert!(deletions.is_empty());
    }

    #[test]
    fn empty_files_are_duplicates_of_each_other() {
        let reader = MemoryReader::default().with("/d/x", "").with("/d/y", "");
        let pass = ExactDeduplicator::new(reader);

        let deletions = pass.find(&entries(&["/d/x", "/d/y"])).unwrap();
        assert_eq!(deletions.indices(), vec![1]);
    }

    #[test]
    fn each_file_is_read_once() {
        let reader = MemoryReader::default()
            .with("/d/a", "1")
            .with("/d/b", "1")
            .with("/d/c", "2");
        let pass = ExactDeduplicator::new(reader);

        pass.find(&entries(&["/d/a", "/d/b", "/d/c"])).unwrap();

        for path in ["/d/a", "/d/b", "/d/c"] {
            assert_eq!(pass.reader.reads_of(path), 1);
        }
    }

    #[test]
    fn runs_do_not_share_seen_content() {
        let reader = MemoryReader::default().with("/d/a", "x").with("/d/b", "x");
        let pass = ExactDeduplicator::new(reader);

        let first = pass.find(&entries(&["/d/a"])).unwrap();
        let second = pass.find(&entries(&["/d/b"])).unwrap();

        assert!(first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn read_failure_aborts_the_pass() {
        let reader = MemoryReader::default().with("/d/a", "x");
        let pass = ExactDeduplicator::new(reader);

        let result = pass.find(&entries(&["/d/a", "/d/missing"]));
        assert!(matches!(result, Err(ReadError::Io { .. })));
    }

    #[test]
    fn emits_duplicate_found_events() {
        let reader = MemoryReader::default().with("/d/a", "x").with("/d/b", "x");
        let pass = ExactDeduplicator::new(reader);
        let (sender, receiver) = EventChannel::new();

        pass.find_with_events(&entries(&["/d/a", "/d/b"]), &sender).unwrap();
        drop(sender);

        let found: Vec<_> = receiver
            .iter()
            .filter_map(|e| match e {
                Event::Compare(CompareEvent::DuplicateFound { path, .. }) => Some(path),
                _ => None,
            })
            .collect();
        assert_eq!(found, vec![std::path::PathBuf::from("/d/b")]);
    }
}
