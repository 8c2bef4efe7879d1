//! # Core Module
//!
//! The duplicate detection engine.
//!
//! ## Modules
//! - `scanner` - Lists the files of one directory
//! - `loader` - Reads text and decodes images
//! - `classifier` - Tells images from everything else by suffix
//! - `similarity` - Edit-distance and template-match scorers
//! - `dedup` - The exact and fuzzy passes
//! - `deletion` - Removes what a pass selected
//! - `pipeline` - Orchestrates list, compare, delete

pub mod classifier;
pub mod dedup;
pub mod deletion;
pub mod loader;
pub mod pipeline;
pub mod scanner;
pub mod similarity;

// Re-export commonly used types
pub use classifier::{FileKind, PairKind};
pub use dedup::{DeletionSet, DuplicatePass, MarkedFile, MatchReason};
pub use deletion::DeletionReport;
pub use pipeline::{CleanResult, Cleaner};
pub use scanner::FileEntry;
