//! # Classifier Module
//!
//! Decides whether a path names an image, purely from its suffix.
//!
//! Matching is a case-sensitive `ends_with` against [`IMAGE_SUFFIXES`].
//! The last entry is `"bmp"` without a leading dot, so any name that ends
//! in those three letters (`notes.bmp`, `tarbmp`) counts as an image.
//! `photo.JPG` does not.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Suffixes that mark a file as an image
pub const IMAGE_SUFFIXES: [&str; 5] = [".jpg", ".png", ".webp", ".jpeg", "bmp"];

/// Suffix of plain-text files whose content is trimmed before fuzzy scoring
pub const TEXT_SUFFIX: &str = ".txt";

/// Kind of a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Image,
    NonImage,
}

impl FileKind {
    /// Classify a path by its suffix
    pub fn of(path: &Path) -> Self {
        if is_image(path) {
            FileKind::Image
        } else {
            FileKind::NonImage
        }
    }
}

/// Kind of an unordered pair of files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairKind {
    /// Both files are images
    BothImage,
    /// Neither file is an image
    BothNonImage,
    /// Exactly one file is an image
    Mixed,
}

impl PairKind {
    /// Classify a pair of paths
    pub fn of(first: &Path, second: &Path) -> Self {
        match (FileKind::of(first), FileKind::of(second)) {
            (FileKind::Image, FileKind::Image) => PairKind::BothImage,
            (FileKind::NonImage, FileKind::NonImage) => PairKind::BothNonImage,
            _ => PairKind::Mixed,
        }
    }
}

impl std::fmt::Display for PairKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairKind::BothImage => write!(f, "image pair"),
            PairKind::BothNonImage => write!(f, "text pair"),
            PairKind::Mixed => write!(f, "mixed pair"),
        }
    }
}

/// Check whether a path ends in one of the image suffixes
pub fn is_image(path: &Path) -> bool {
    ends_with_any(path, &IMAGE_SUFFIXES)
}

/// Check whether a path ends in the plain-text suffix
pub fn is_plain_text(path: &Path) -> bool {
    ends_with_any(path, &[TEXT_SUFFIX])
}

fn ends_with_any(path: &Path, suffixes: &[&str]) -> bool {
    // Suffix test on the textual path, not Path::extension
    let name = path.to_string_lossy();
    suffixes.iter().any(|suffix| name.ends_with(suffix))
}
