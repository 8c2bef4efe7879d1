//! # Pipeline Module
//!
//! Orchestrates one cleaning pass.
//!
//! ## Stages
//! 1. **List** - collect the files directly inside the directory
//! 2. **Compare** - run the exact or fuzzy pass to build a deletion set
//! 3. **Delete** - remove the selected files, timing only this step

mod executor;

pub use executor::{CleanResult, Cleaner, CleanerBuilder, CleanerConfig};
