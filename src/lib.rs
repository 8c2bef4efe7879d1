//! # Repetitive File Cleaner
//!
//! Finds and removes duplicate or near-duplicate files inside a single
//! directory.
//!
//! ## Passes
//! - **Exact** - a file whose full content was already seen earlier in the
//!   listing is removed; the first occurrence always survives
//! - **Fuzzy** - every unordered pair is compared; text files by normalized
//!   edit distance, images by template-match correlation. The later file of
//!   a matching pair is removed
//!
//! ## Architecture
//! - `core` - classification, similarity scoring, the two passes, deletion
//! - `events` - channel-based progress reporting
//! - `error` - error types for the I/O collaborators

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{CleanerError, Result};

/// Initialize tracing for the library
///
/// `default_directive` applies when `RUST_LOG` is not set.
/// This should be called by the application entry point.
pub fn init_tracing(default_directive: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
