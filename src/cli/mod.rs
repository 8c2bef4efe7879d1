//! # CLI Module
//!
//! Command-line interface for the repetitive file cleaner.
//!
//! ## Usage
//! ```bash
//! # Remove byte-identical copies
//! file-dedup exact ~/Downloads
//!
//! # Remove near-duplicates, but only show what would go
//! file-dedup fuzzy ~/Downloads --dry-run
//!
//! # JSON output
//! file-dedup fuzzy ~/Downloads --output json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use repetitive_file_cleaner::core::pipeline::{CleanResult, Cleaner};
use repetitive_file_cleaner::error::Result;
use repetitive_file_cleaner::events::{CompareEvent, Event, EventChannel, PassEvent, PassMode};
use std::path::PathBuf;
use std::thread;

/// Repetitive File Cleaner - remove duplicate and near-duplicate files
#[derive(Parser, Debug)]
#[command(name = "file-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Remove files whose content is identical to an earlier file
    Exact(PassArgs),
    /// Remove text files within 15% edit distance and images at least 85% alike
    Fuzzy(PassArgs),
}

#[derive(Args, Debug)]
struct PassArgs {
    /// Directory to clean (not searched recursively)
    directory: PathBuf,

    /// Show what would be removed without removing anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Ignore files whose name starts with a dot
    #[arg(long)]
    skip_hidden: bool,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    output: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (removed paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Exact(args) => run_pass(PassMode::Exact, args),
        Commands::Fuzzy(args) => run_pass(PassMode::Fuzzy, args),
    }
}

fn run_pass(mode: PassMode, args: PassArgs) -> Result<()> {
    repetitive_file_cleaner::init_tracing(if args.verbose { "debug" } else { "warn" });

    let term = Term::stderr();

    if matches!(args.output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {} {}",
            style("Repetitive File Cleaner").bold().cyan(),
            style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
            style(format!("({mode} pass)")).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    let cleaner = Cleaner::builder()
        .directory(&args.directory)
        .mode(mode)
        .dry_run(args.dry_run)
        .include_hidden(!args.skip_hidden)
        .build()?;

    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(args.output, OutputFormat::Pretty) && !args.verbose {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();

    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            let Some(ref pb) = progress_clone else {
                continue;
            };
            match event {
                Event::Pass(PassEvent::PhaseChanged { phase }) => {
                    pb.set_message(format!("{phase}"));
                }
                Event::Compare(CompareEvent::Started {
                    total_comparisons, ..
                }) => {
                    pb.set_length(total_comparisons as u64);
                }
                Event::Compare(CompareEvent::Progress(p)) => {
                    pb.set_position(p.comparisons_completed as u64);
                }
                Event::Pass(PassEvent::Completed { .. } | PassEvent::Error { .. }) => {
                    pb.finish_and_clear();
                }
                _ => {}
            }
        }
    });

    let result = cleaner.run_with_events(&sender);

    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let result = result?;

    match args.output {
        OutputFormat::Pretty => print_pretty_results(&term, &result, args.verbose),
        OutputFormat::Json => print_json_results(&result),
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &CleanResult, verbose: bool) {
    let report = &result.report;

    term.write_line(&format!("{} Pass Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} files compared in {:.1}s",
        style(result.total_files).cyan(),
        result.duration_ms as f64 / 1000.0
    ))
    .ok();

    let verb = if report.dry_run { "Would delete" } else { "Deleted" };
    term.write_line(&format!(
        "  {} file count: {}",
        verb,
        style(report.deleted).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  Time for delete: {} nanoseconds",
        style(report.elapsed.as_nanos()).yellow()
    ))
    .ok();

    if report.bytes_freed > 0 {
        term.write_line(&format!(
            "  {} {}",
            style(format_bytes(report.bytes_freed)).yellow(),
            if report.dry_run { "would be freed" } else { "freed" }
        ))
        .ok();
    }

    if report.already_removed > 0 {
        term.write_line(&format!(
            "  {} repeated requests ignored",
            style(report.already_removed).dim()
        ))
        .ok();
    }

    if !result.deletions.is_empty() {
        term.write_line("").ok();
        for marked in &result.deletions {
            let line = if verbose {
                format!(
                    "  {} {} ({})",
                    style("✗").red(),
                    marked.file.path.display(),
                    style(marked.reason).dim()
                )
            } else {
                format!("  {} {}", style("✗").red(), marked.file.path.display())
            };
            term.write_line(&line).ok();
        }
    }

    if !report.failures.is_empty() {
        term.write_line("").ok();
        term.write_line(&format!("{}", style("Could not delete:").bold().red()))
            .ok();
        for (path, reason) in &report.failures {
            term.write_line(&format!("  {} {}", path.display(), style(reason).dim()))
                .ok();
        }
    }

    for error in &result.errors {
        term.write_line(&format!("  {} {}", style("!").yellow(), error))
            .ok();
    }

    if report.dry_run {
        term.write_line("").ok();
        term.write_line(&format!(
            "{}",
            style("Dry run: no files were deleted.").dim()
        ))
        .ok();
    }
}

fn print_json_results(result: &CleanResult) {
    let output = serde_json::json!({
        "mode": result.mode,
        "total_files": result.total_files,
        "marked": result.deletions.len(),
        "deleted": result.report.deleted,
        "already_removed": result.report.already_removed,
        "bytes_freed": result.report.bytes_freed,
        "delete_elapsed_ns": result.report.elapsed.as_nanos() as u64,
        "dry_run": result.report.dry_run,
        "duration_ms": result.duration_ms,
        "deletions": result.deletions.iter().map(|m| {
            serde_json::json!({
                "path": m.file.path,
                "original_index": m.original,
                "reason": m.reason.to_string(),
            })
        }).collect::<Vec<_>>(),
        "failures": result.report.failures.iter().map(|(path, reason)| {
            serde_json::json!({ "path": path, "reason": reason })
        }).collect::<Vec<_>>(),
        "errors": result.errors,
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to encode results: {e}"),
    }
}

fn print_minimal_results(result: &CleanResult) {
    for index in result.deletions.unique_indices() {
        if let Some(marked) = result.deletions.iter().find(|m| m.index == index) {
            println!("{}", marked.file.path.display());
        }
    }
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_fuzzy_with_flags() {
        let cli = Cli::try_parse_from(["file-dedup", "fuzzy", "/data", "--dry-run", "-o", "json"])
            .unwrap();
        match cli.command {
            Commands::Fuzzy(args) => {
                assert_eq!(args.directory, PathBuf::from("/data"));
                assert!(args.dry_run);
                assert!(matches!(args.output, OutputFormat::Json));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn hidden_files_are_listed_unless_skipped() {
        let cli = Cli::try_parse_from(["file-dedup", "exact", "/data"]).unwrap();
        let Commands::Exact(args) = cli.command else {
            panic!("expected exact command");
        };
        assert!(!args.skip_hidden);

        let cli = Cli::try_parse_from(["file-dedup", "exact", "/data", "--skip-hidden"]).unwrap();
        let Commands::Exact(args) = cli.command else {
            panic!("expected exact command");
        };
        assert!(args.skip_hidden);
    }

    #[test]
    fn directory_is_required() {
        assert!(Cli::try_parse_from(["file-dedup", "exact"]).is_err());
    }

    #[test]
    fn format_bytes_picks_unit() {
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
