//! URL index of generated documents.
//!
//! Lists every document under the index base directory with a link to its
//! hosted page and to its raw content. The index never lists itself.

use crate::clock::{format_timestamp, Clock};
use crate::config::DEFAULT_INDEX_FILENAME;
use crate::render::write_document;
use crate::CoreError;
use snapdoc_indexer::{escape_literal, relative_label, to_slash, MatchedFile, PatternMatcher};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const BLOB_URL_BASE: &str = "https://github.com";
const RAW_URL_BASE: &str = "https://raw.githubusercontent.com";

/// Link to the rendered page of `path` on `branch`.
pub fn blob_url(repository: &str, branch: &str, path: &str) -> String {
    format!(
        "{}/{}/blob/{}/{}",
        BLOB_URL_BASE,
        repository,
        branch,
        path.trim_start_matches('/')
    )
}

/// Link to the unprocessed bytes of `path` on `branch`.
pub fn raw_url(repository: &str, branch: &str, path: &str) -> String {
    format!(
        "{}/{}/{}/{}",
        RAW_URL_BASE,
        repository,
        branch,
        path.trim_start_matches('/')
    )
}

/// Resolved scope of the URL index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexScope {
    /// Directory labels are relative to; the index is written inside it
    pub base_dir: PathBuf,
    pub globs: Vec<String>,
    /// User excludes; the index's own path is always excluded on top
    pub excludes: Vec<String>,
    pub index_filename: String,
}

impl IndexScope {
    /// Every markdown document under `base_dir`, recursively.
    pub fn for_base_dir(base_dir: &Path) -> Self {
        let base = to_slash(base_dir);
        let glob = if base == "." {
            "**/*.md".to_string()
        } else {
            format!("{}/**/*.md", escape_literal(base_dir))
        };

        Self {
            base_dir: PathBuf::from(base),
            globs: vec![glob],
            excludes: Vec::new(),
            index_filename: DEFAULT_INDEX_FILENAME.to_string(),
        }
    }

    /// Path of the index document, relative to the working root.
    pub fn index_path(&self) -> PathBuf {
        PathBuf::from(to_slash(&self.base_dir.join(&self.index_filename)))
    }
}

/// One listed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Path relative to the base directory (or the full path when outside it)
    pub label: String,
    pub blob_url: String,
    pub raw_url: String,
}

/// Result of writing the index.
#[derive(Debug, Clone)]
pub struct IndexReport {
    /// Index document path, relative to the working root
    pub path: PathBuf,
    pub entries: usize,
}

/// Builds the URL index document.
pub struct UrlIndexBuilder {
    repository: String,
    branch: String,
    title_prefix: String,
    timezone: String,
}

impl UrlIndexBuilder {
    pub fn new(
        repository: impl Into<String>,
        branch: impl Into<String>,
        title_prefix: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            repository: repository.into(),
            branch: branch.into(),
            title_prefix: title_prefix.into(),
            timezone: timezone.into(),
        }
    }

    /// Match documents in scope, excluding the index itself, sorted by label.
    pub fn collect_entries(
        &self,
        scope: &IndexScope,
        matcher: &PatternMatcher,
    ) -> Vec<IndexEntry> {
        let index_path = scope.index_path();

        let mut excludes = scope.excludes.clone();
        excludes.push(escape_literal(&index_path));

        let matched = matcher.resolve(&scope.globs, &excludes);
        let own_path = matcher.root().join(&index_path);

        let mut entries: Vec<IndexEntry> = matched
            .files
            .iter()
            .filter(|file| !is_same_file(file, &own_path))
            .map(|file| {
                let label = relative_label(Path::new(&file.rel_path), &scope.base_dir)
                    .unwrap_or_else(|| file.rel_path.clone());
                IndexEntry {
                    label,
                    blob_url: blob_url(&self.repository, &self.branch, &file.rel_path),
                    raw_url: raw_url(&self.repository, &self.branch, &file.rel_path),
                }
            })
            .collect();

        entries.sort_by(|a, b| a.label.cmp(&b.label));
        debug!(count = entries.len(), base = ?scope.base_dir, "Index entries collected");
        entries
    }

    /// Render the index document text.
    pub fn render(&self, scope: &IndexScope, entries: &[IndexEntry], timestamp: &str) -> String {
        let mut lines = vec![
            format!(
                "# {} — {}\n",
                self.title_prefix,
                to_slash(&scope.index_path())
            ),
            format!("_Last generated: {}_\n", timestamp),
            format!(
                "Repository: `{}` — Branch: `{}`\n",
                self.repository, self.branch
            ),
            format!("Total snapshots: **{}**\n", entries.len()),
            "---\n".to_string(),
        ];

        if entries.is_empty() {
            lines.push(format!(
                "> (No snapshots found in `{}`)\n",
                to_slash(&scope.base_dir)
            ));
        } else {
            for entry in entries {
                lines.push(format!(
                    "- [{}]({}) — [raw]({})",
                    entry.label, entry.blob_url, entry.raw_url
                ));
            }
        }

        lines.join("\n")
    }

    /// Collect, render and write the index inside the matcher root.
    pub fn build(
        &self,
        scope: &IndexScope,
        matcher: &PatternMatcher,
        clock: &dyn Clock,
    ) -> Result<IndexReport, CoreError> {
        let entries = self.collect_entries(scope, matcher);
        let timestamp = format_timestamp(clock, &self.timezone);
        let content = self.render(scope, &entries, &timestamp);

        let path = scope.index_path();
        write_document(&matcher.root().join(&path), &content)?;

        info!(path = ?path, entries = entries.len(), "URL index written");
        Ok(IndexReport {
            path,
            entries: entries.len(),
        })
    }
}

/// Whether `file` resolves to the same on-disk file as `index`.
fn is_same_file(file: &MatchedFile, index: &Path) -> bool {
    match (std::fs::canonicalize(&file.path), std::fs::canonicalize(index)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
