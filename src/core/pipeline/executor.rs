//! Cleaner execution implementation.

use crate::core::dedup::{DeletionSet, DuplicatePass, ExactDeduplicator, FuzzyDeduplicator};
use crate::core::deletion::{
    execute_deletions, DeletionExecutor, DeletionReport, DryRunDeleter, FsDeleter,
};
use crate::core::loader::{FsContentReader, FsImageDecoder};
use crate::core::scanner::{DirectoryLister, FileLister, ScanConfig};
use crate::error::CleanerError;
use crate::events::{
    null_sender, Event, EventSender, PassEvent, PassMode, PassPhase, PassSummary,
};
use std::path::PathBuf;
use std::time::Instant;

/// Result of one cleaning pass
#[derive(Debug)]
pub struct CleanResult {
    /// Which pass ran
    pub mode: PassMode,
    /// Files listed in the directory
    pub total_files: usize,
    /// Files selected for removal
    pub deletions: DeletionSet,
    /// What the deletion step did
    pub report: DeletionReport,
    /// Non-fatal problems met while listing
    pub errors: Vec<String>,
    /// Wall time of the whole pass in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the cleaner
#[derive(Debug, Clone)]
pub struct CleanerConfig {
    /// Directory whose files are compared
    pub directory: Option<PathBuf>,
    /// Duplicate definition to apply
    pub mode: PassMode,
    /// Select files without removing them
    pub dry_run: bool,
    /// Lister configuration
    pub scan_config: ScanConfig,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            directory: None,
            mode: PassMode::Exact,
            dry_run: false,
            scan_config: ScanConfig::default(),
        }
    }
}

/// Builder for the cleaner
///
/// The lister, pass and executor default to filesystem-backed
/// implementations chosen from the configuration; each can be swapped out.
#[derive(Default)]
pub struct CleanerBuilder {
    config: CleanerConfig,
    lister: Option<Box<dyn FileLister>>,
    pass: Option<Box<dyn DuplicatePass>>,
    executor: Option<Box<dyn DeletionExecutor>>,
}

impl CleanerBuilder {
    /// Create a new cleaner builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory to clean
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = Some(directory.into());
        self
    }

    /// Set the pass to run
    pub fn mode(mut self, mode: PassMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Select files without removing them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Include files whose name starts with `.`
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan_config.include_hidden = include;
        self
    }

    /// Set lister configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Replace the file lister
    pub fn lister(mut self, lister: Box<dyn FileLister>) -> Self {
        self.lister = Some(lister);
        self
    }

    /// Replace the duplicate-detection pass chosen by `mode`
    pub fn pass(mut self, pass: Box<dyn DuplicatePass>) -> Self {
        self.pass = Some(pass);
        self
    }

    /// Replace the deletion executor chosen by `dry_run`
    pub fn executor(mut self, executor: Box<dyn DeletionExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Build the cleaner
    pub fn build(self) -> Result<Cleaner, CleanerError> {
        let directory = self
            .config
            .directory
            .clone()
            .ok_or_else(|| CleanerError::Config("no directory given".to_string()))?;

        let lister = self
            .lister
            .unwrap_or_else(|| Box::new(DirectoryLister::new(self.config.scan_config.clone())));

        let pass = self.pass.unwrap_or_else(|| match self.config.mode {
            PassMode::Exact => Box::new(ExactDeduplicator::new(FsContentReader)),
            PassMode::Fuzzy => Box::new(FuzzyDeduplicator::new(FsContentReader, FsImageDecoder)),
        });

        let executor = self.executor.unwrap_or_else(|| {
            if self.config.dry_run {
                Box::new(DryRunDeleter)
            } else {
                Box::new(FsDeleter)
            }
        });

        Ok(Cleaner {
            directory,
            mode: self.config.mode,
            lister,
            pass,
            executor,
        })
    }
}

/// Lists a directory, runs one pass over it and removes what the pass
/// selected
pub struct Cleaner {
    directory: PathBuf,
    mode: PassMode,
    lister: Box<dyn FileLister>,
    pass: Box<dyn DuplicatePass>,
    executor: Box<dyn DeletionExecutor>,
}

impl Cleaner {
    /// Create a new cleaner builder
    pub fn builder() -> CleanerBuilder {
        CleanerBuilder::new()
    }

    /// The directory this cleaner works on
    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }

    /// Run without events
    pub fn run(&self) -> Result<CleanResult, CleanerError> {
        self.run_with_events(&null_sender())
    }

    /// Run with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<CleanResult, CleanerError> {
        let result = self.run_phases(events);
        if let Err(e) = &result {
            events.send(Event::Pass(PassEvent::Error {
                message: e.to_string(),
            }));
        }
        result
    }

    fn run_phases(&self, events: &EventSender) -> Result<CleanResult, CleanerError> {
        let start_time = Instant::now();

        events.send(Event::Pass(PassEvent::Started { mode: self.mode }));

        // Phase 1: Listing
        events.send(Event::Pass(PassEvent::PhaseChanged {
            phase: PassPhase::Listing,
        }));

        let listing = self.lister.list_with_events(&self.directory, events)?;
        let errors: Vec<String> = listing
            .errors
            .iter()
            .map(|e| {
                tracing::warn!(error = %e, "skipped unreadable entry");
                e.to_string()
            })
            .collect();
        let files = listing.files;

        tracing::info!(
            directory = %self.directory.display(),
            files = files.len(),
            mode = %self.mode,
            "starting pass"
        );

        // Phase 2: Comparing
        events.send(Event::Pass(PassEvent::PhaseChanged {
            phase: PassPhase::Comparing,
        }));

        let deletions = self.pass.find_with_events(&files, events)?;

        // Phase 3: Deleting
        events.send(Event::Pass(PassEvent::PhaseChanged {
            phase: PassPhase::Deleting,
        }));

        let report = execute_deletions(&deletions, self.executor.as_ref(), events);

        let duration_ms = start_time.elapsed().as_millis() as u64;

        events.send(Event::Pass(PassEvent::Completed {
            summary: PassSummary {
                total_files: files.len(),
                marked: deletions.len(),
                deleted: report.deleted,
                bytes_freed: report.bytes_freed,
                delete_elapsed_ns: u64::try_from(report.elapsed.as_nanos()).unwrap_or(u64::MAX),
            },
        }));

        Ok(CleanResult {
            mode: self.mode,
            total_files: files.len(),
            deletions,
            report,
            errors,
            duration_ms,
        })
    }
}
