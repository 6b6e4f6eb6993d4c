//! Snapshot job runner.
//!
//! Runs every configured snapshot in declaration order, then rebuilds the
//! URL index. A failing snapshot is recorded and the run moves on.

use crate::clock::{Clock, SystemClock};
use crate::config::{ExportConfig, SnapshotSpec};
use crate::render::{write_document, SkippedFile, SnapshotRenderer};
use crate::urls::{IndexReport, UrlIndexBuilder};
use crate::CoreError;
use snapdoc_indexer::{to_slash, PatternMatcher};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// Values captured once at the process boundary.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Directory that relative globs and outputs resolve against
    pub root: PathBuf,
    /// Branch override (e.g. from the CI environment)
    pub branch: Option<String>,
    /// `owner/repo` override
    pub repository: Option<String>,
    /// Whether to rebuild the URL index after the snapshots
    pub build_index: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            branch: None,
            repository: None,
            build_index: true,
        }
    }
}

/// Outcome of a single snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotOutcome {
    pub output: PathBuf,
    pub files_included: usize,
    pub skipped: Vec<SkippedFile>,
    /// Patterns that could not be compiled
    pub rejected_patterns: Vec<String>,
    /// Directories that could not be read while matching
    pub walk_errors: Vec<String>,
    /// Set when the document could not be written
    pub error: Option<String>,
}

impl SnapshotOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Files embedded across all written snapshots
    pub total_files: usize,
    pub outcomes: Vec<SnapshotOutcome>,
    pub index: Option<IndexReport>,
    pub index_error: Option<String>,
    pub duration_ms: u64,
}

impl RunReport {
    pub fn failed_snapshots(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }

    pub fn skipped_files(&self) -> usize {
        self.outcomes.iter().map(|o| o.skipped.len()).sum()
    }
}

/// Runs the snapshots of one configuration.
pub struct SnapshotJob {
    config: ExportConfig,
    settings: RunSettings,
    clock: Box<dyn Clock>,
}

impl SnapshotJob {
    /// Create a job that reads the system clock.
    pub fn new(config: ExportConfig, settings: RunSettings) -> Self {
        Self {
            config,
            settings,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the clock used for index timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Override, then configured fallback (itself defaulting to `develop`).
    pub fn branch(&self) -> &str {
        self.settings
            .branch
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or(self.config.branch_env_fallback.as_str())
    }

    pub fn repository(&self) -> &str {
        self.settings
            .repository
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(self.config.repository.as_str())
    }

    /// Run all snapshots, then the index.
    ///
    /// Only a missing working root fails the run; everything else is
    /// reported per snapshot.
    pub fn run(&self) -> Result<RunReport, CoreError> {
        let start = Instant::now();
        let matcher = PatternMatcher::new(&self.settings.root)?;
        let renderer = SnapshotRenderer::new(&self.config.title_prefix);
        let branch = self.branch();

        info!(
            snapshots = self.config.snapshots.len(),
            branch,
            root = ?self.settings.root,
            "Starting export"
        );

        let mut report = RunReport::default();

        for spec in &self.config.snapshots {
            let outcome = self.run_snapshot(spec, &matcher, &renderer, branch);
            if outcome.is_ok() {
                report.total_files += outcome.files_included;
            }
            report.outcomes.push(outcome);
        }

        if self.settings.build_index {
            let scope = self.config.index_scope();
            let builder = UrlIndexBuilder::new(
                self.repository(),
                branch,
                &self.config.title_prefix,
                &self.config.timezone,
            );
            match builder.build(&scope, &matcher, self.clock.as_ref()) {
                Ok(index) => report.index = Some(index),
                Err(e) => {
                    warn!(error = %e, "URL index not written");
                    report.index_error = Some(e.to_string());
                }
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            total_files = report.total_files,
            failed = report.failed_snapshots(),
            duration_ms = report.duration_ms,
            "Export complete"
        );
        Ok(report)
    }

    fn run_snapshot(
        &self,
        spec: &SnapshotSpec,
        matcher: &PatternMatcher,
        renderer: &SnapshotRenderer,
        branch: &str,
    ) -> SnapshotOutcome {
        let files = matcher.resolve(&spec.globs, &spec.excludes);
        let rendered = renderer.render(spec, &files, branch);

        let mut outcome = SnapshotOutcome {
            output: spec.output.clone(),
            files_included: rendered.included,
            skipped: rendered.skipped,
            rejected_patterns: files.rejected.iter().map(|e| e.to_string()).collect(),
            walk_errors: files.walk_errors.iter().map(|e| e.to_string()).collect(),
            error: None,
        };

        let destination = matcher.root().join(&spec.output);
        match write_document(&destination, &rendered.content) {
            Ok(()) => {
                info!(
                    output = %to_slash(&spec.output),
                    files = outcome.files_included,
                    skipped = outcome.skipped.len(),
                    "Snapshot written"
                );
            }
            Err(e) => {
                warn!(output = %to_slash(&spec.output), error = %e, "Snapshot failed");
                outcome.error = Some(e.to_string());
            }
        }

        outcome
    }
}
