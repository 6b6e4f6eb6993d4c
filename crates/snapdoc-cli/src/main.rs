//! Snapdoc CLI
//!
//! Renders the snapshots declared in a JSON configuration and rebuilds the
//! URL index that links every generated document.

use anyhow::{Context, Result};
use clap::Parser;
use snapdoc_core::{
    CoreError, ExportConfig, RunReport, RunSettings, SnapshotJob, DEFAULT_CONFIG_PATH,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable carrying the branch name in CI.
const BRANCH_ENV: &str = "GITHUB_REF_NAME";
/// Environment variable carrying `owner/repo` in CI.
const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";

#[derive(Parser)]
#[command(name = "snapdoc")]
#[command(about = "Export source snapshots as markdown and index them with repository links")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory that globs and outputs are relative to
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Branch name (overrides GITHUB_REF_NAME)
    #[arg(long)]
    branch: Option<String>,

    /// Repository identifier, owner/repo (overrides GITHUB_REPOSITORY)
    #[arg(long)]
    repo: Option<String>,

    /// Skip the URL index
    #[arg(long)]
    no_index: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ {:#}", e);
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 2 when the configuration could not be loaded, 1 for any other failure.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CoreError>() {
        Some(core) if core.is_config_error() => 2,
        _ => 1,
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<RunReport> {
    let config = ExportConfig::load_from(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let settings = RunSettings {
        root: cli.root,
        branch: cli.branch.or_else(|| env_var(BRANCH_ENV)),
        repository: cli.repo.or_else(|| env_var(REPOSITORY_ENV)),
        build_index: !cli.no_index,
    };

    let report = SnapshotJob::new(config, settings)
        .run()
        .context("Export failed")?;
    Ok(report)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn print_summary(report: &RunReport) {
    for outcome in &report.outcomes {
        let output = outcome.output.display();
        match &outcome.error {
            None => println!("Wrote {} with {} file(s).", output, outcome.files_included),
            Some(e) => println!("✗ {} not written: {}", output, e),
        }
        for skipped in &outcome.skipped {
            println!("  skipped {}: {}", skipped.path, skipped.reason);
        }
        for rejected in &outcome.rejected_patterns {
            println!("  ignored {}", rejected);
        }
        for walk_error in &outcome.walk_errors {
            println!("  unreadable {}", walk_error);
        }
    }

    match (&report.index, &report.index_error) {
        (Some(index), _) => println!(
            "Wrote {} with {} entries.",
            index.path.display(),
            index.entries
        ),
        (None, Some(e)) => println!("✗ URL index not written: {}", e),
        (None, None) => {}
    }

    println!(
        "Done. Total files included across snapshots: {}",
        report.total_files
    );

    let failed = report.failed_snapshots();
    let skipped = report.skipped_files();
    if failed > 0 || skipped > 0 {
        println!("  {} snapshot(s) failed, {} file(s) skipped", failed, skipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["snapdoc"]);
        assert_eq!(cli.config, PathBuf::from("docs/ai-snapshots.json"));
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(!cli.no_index);
        assert!(cli.branch.is_none());
    }

    #[test]
    fn test_positional_config_and_overrides() {
        let cli = Cli::parse_from([
            "snapdoc",
            "cfg/export.json",
            "--branch",
            "main",
            "--repo",
            "acme/api",
            "--no-index",
        ]);
        assert_eq!(cli.config, PathBuf::from("cfg/export.json"));
        assert_eq!(cli.branch.as_deref(), Some("main"));
        assert_eq!(cli.repo.as_deref(), Some("acme/api"));
        assert!(cli.no_index);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["snapdoc", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_missing_config_is_error() {
        let cli = Cli::parse_from(["snapdoc", "/nonexistent/snapdoc.json"]);
        let err = run(cli).unwrap_err();
        assert!(format!("{:#}", err).contains("Config not found"));
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn test_malformed_config_exit_status() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("snapdoc.json");
        std::fs::write(&path, "{\"snapshots\": [").unwrap();

        let cli = Cli::parse_from([OsStr::new("snapdoc"), path.as_os_str()]);
        let err = run(cli).unwrap_err();
        assert_eq!(exit_status(&err), 2);
    }

    #[test]
    fn test_missing_root_exit_status() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("snapdoc.json");
        std::fs::write(&path, "{}").unwrap();

        let missing_root = temp_dir.path().join("missing");
        let cli = Cli::parse_from([
            OsStr::new("snapdoc"),
            path.as_os_str(),
            OsStr::new("--root"),
            missing_root.as_os_str(),
        ]);
        let err = run(cli).unwrap_err();
        assert_eq!(exit_status(&err), 1);
    }
}
