//! Pairwise similarity pass.

use super::{DeletionSet, DuplicatePass, MarkedFile, MatchReason};
use crate::core::classifier::{is_plain_text, PairKind};
use crate::core::loader::{ContentReader, ImageDecoder};
use crate::core::scanner::FileEntry;
use crate::core::similarity::{
    distance_percent, image_similarity, is_similar_image, is_similar_text,
};
use crate::error::ReadError;
use crate::events::{CompareEvent, CompareProgress, Event, EventSender};
use std::path::Path;

/// Outcome of scoring one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairScore {
    /// One image and one non-image; never compared
    Skipped,
    /// Image correlation similarity, higher is closer
    Image(f64),
    /// Text edit-distance percentage, lower is closer
    Text(f64),
}

impl PairScore {
    /// The reason to remove the later file of the pair, if the score
    /// crosses its threshold
    pub fn verdict(&self) -> Option<MatchReason> {
        match *self {
            PairScore::Skipped => None,
            PairScore::Image(similarity) => {
                is_similar_image(similarity).then_some(MatchReason::SimilarImage { similarity })
            }
            PairScore::Text(distance_percent) => is_similar_text(distance_percent)
                .then_some(MatchReason::SimilarText { distance_percent }),
        }
    }
}

/// Score two texts, trimming surrounding whitespace when both paths are
/// plain `.txt` files
pub fn score_text_pair(first_path: &Path, first: &str, second_path: &Path, second: &str) -> f64 {
    if is_plain_text(first_path) && is_plain_text(second_path) {
        distance_percent(first.trim(), second.trim())
    } else {
        distance_percent(first, second)
    }
}

/// Compares every unordered pair of files and marks the later one of each
/// matching pair
///
/// The lowest-indexed file of any cluster of look-alikes is never on the
/// marked side of a pair, so it always survives.
pub struct FuzzyDeduplicator<R, D> {
    reader: R,
    decoder: D,
}

impl<R: ContentReader, D: ImageDecoder> FuzzyDeduplicator<R, D> {
    pub fn new(reader: R, decoder: D) -> Self {
        Self { reader, decoder }
    }

    /// Score the pair `(first, second)`.
    ///
    /// `first_text` caches the first file's text across the inner loop.
    /// Decoded images are dropped before this returns, whether scoring
    /// succeeds or fails.
    fn score_pair(
        &self,
        first: &FileEntry,
        first_text: &mut Option<String>,
        second: &FileEntry,
    ) -> Result<PairScore, ReadError> {
        match PairKind::of(&first.path, &second.path) {
            PairKind::Mixed => Ok(PairScore::Skipped),
            PairKind::BothImage => {
                let first_image = self.decoder.decode(&first.path)?;
                let second_image = self.decoder.decode(&second.path)?;
                Ok(PairScore::Image(image_similarity(&first_image, &second_image)))
            }
            PairKind::BothNonImage => {
                if first_text.is_none() {
                    *first_text = Some(self.reader.read_text(&first.path)?);
                }
                let first_content = first_text.as_deref().unwrap_or_default();
                let second_content = self.reader.read_text(&second.path)?;

                Ok(PairScore::Text(score_text_pair(
                    &first.path,
                    first_content,
                    &second.path,
                    &second_content,
                )))
            }
        }
    }
}

impl<R: ContentReader, D: ImageDecoder> DuplicatePass for FuzzyDeduplicator<R, D> {
    fn find_with_events(
        &self,
        files: &[FileEntry],
        events: &EventSender,
    ) -> Result<DeletionSet, ReadError> {
        let n = files.len();
        let total_comparisons = n.saturating_sub(1) * n / 2;

        events.send(Event::Compare(CompareEvent::Started {
            total_files: n,
            total_comparisons,
        }));

        let mut deletions = DeletionSet::new();
        let mut comparisons_completed = 0;
        let mut last_progress_update = 0;
        let mut skipped = 0;

        // Every 1000 comparisons or 2% of total, whichever is smaller
        let update_interval = std::cmp::min(1000, std::cmp::max(1, total_comparisons / 50));

        for i in 0..n {
            let first = &files[i];
            let mut first_text = None;

            for j in (i + 1)..n {
                let second = &files[j];

                let score = self.score_pair(first, &mut first_text, second)?;
                if score == PairScore::Skipped {
                    skipped += 1;
                }

                if let Some(reason) = score.verdict() {
                    tracing::debug!(
                        path = %second.path.display(),
                        original = %first.path.display(),
                        %reason,
                        "near duplicate"
                    );
                    events.send(Event::Compare(CompareEvent::DuplicateFound {
                        path: second.path.clone(),
                        original: first.path.clone(),
                    }));
                    deletions.mark(MarkedFile {
                        index: j,
                        file: second.clone(),
                        original: i,
                        reason,
                    });
                }

                comparisons_completed += 1;

                if comparisons_completed - last_progress_update >= update_interval {
                    events.send(Event::Compare(CompareEvent::Progress(CompareProgress {
                        comparisons_completed,
                        total_comparisons,
                        marked: deletions.len(),
                    })));
                    last_progress_update = comparisons_completed;
                }
            }
        }

        tracing::info!(
            files = n,
            comparisons = comparisons_completed,
            skipped,
            marked = deletions.len(),
            "fuzzy pass finished"
        );

        events.send(Event::Compare(CompareEvent::Completed {
            marked: deletions.len(),
        }));

        Ok(deletions)
    }
}
