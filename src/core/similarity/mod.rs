//! # Similarity Module
//!
//! Pairwise scorers used by the fuzzy pass.
//!
//! The two scores point in opposite directions and are kept that way:
//!
//! | Scorer | Score | Duplicate when |
//! |--------|-------|----------------|
//! | Text   | edit distance, % of the longer text (lower = closer) | ≤ 15 |
//! | Image  | dampened template-match confidence (higher = closer) | ≥ 85 |

mod correlation;
mod edit_distance;

pub use correlation::{image_similarity, match_template, TemplateMatch, CONFIDENCE_DAMPENING};
pub use edit_distance::{distance_percent, levenshtein_distance};

/// Image pairs scoring at or above this are duplicates
pub const IMAGE_SIMILARITY_THRESHOLD: f64 = 85.0;

/// Text pairs whose distance percentage is at or below this are duplicates
pub const TEXT_DISTANCE_THRESHOLD: f64 = 15.0;

/// Apply the image threshold to a similarity score
pub fn is_similar_image(similarity: f64) -> bool {
    similarity >= IMAGE_SIMILARITY_THRESHOLD
}

/// Apply the text threshold to a distance percentage
pub fn is_similar_text(distance_percent: f64) -> bool {
    distance_percent <= TEXT_DISTANCE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_threshold_is_inclusive() {
        assert!(is_similar_image(85.0));
        assert!(is_similar_image(90.0));
        assert!(!is_similar_image(84.99));
    }

    #[test]
    fn text_threshold_is_inclusive() {
        assert!(is_similar_text(0.0));
        assert!(is_similar_text(15.0));
        assert!(!is_similar_text(15.01));
    }
}
