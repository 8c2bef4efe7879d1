//! # file-dedup CLI
//!
//! Command-line interface for the repetitive file cleaner.
//!
//! ## Usage
//! ```bash
//! file-dedup exact ~/Downloads
//! file-dedup fuzzy ~/Downloads --dry-run --verbose
//! ```

mod cli;

use repetitive_file_cleaner::Result;

fn main() -> Result<()> {
    cli::run()
}
