//! Glob-based file-set resolution.

use super::path::{normalize, to_slash};
use crate::IndexerError;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A matched regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedFile {
    /// Path to open on disk (root-joined)
    pub path: PathBuf,
    /// Normalized path relative to the matcher root, `/`-separated
    pub rel_path: String,
}

/// Result of resolving include and exclude patterns.
#[derive(Debug, Default)]
pub struct MatchedFileSet {
    /// Matched files, sorted by `rel_path`, without duplicates
    pub files: Vec<MatchedFile>,
    /// Patterns that failed to compile and were skipped
    pub rejected: Vec<IndexerError>,
    /// Directories that could not be read during expansion
    pub walk_errors: Vec<IndexerError>,
}

impl MatchedFileSet {
    /// Relative paths in match order.
    pub fn rel_paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.rel_path.as_str()).collect()
    }
}

/// Resolves include globs and exclude patterns under a root directory.
pub struct PatternMatcher {
    root: PathBuf,
}

impl PatternMatcher {
    /// Create a matcher rooted at an existing directory.
    ///
    /// The root is normalized so that `./proj` and `proj` strip the same prefix.
    pub fn new(root: &Path) -> Result<Self, IndexerError> {
        if !root.is_dir() {
            return Err(IndexerError::NotFound(root.to_path_buf()));
        }
        Ok(Self {
            root: normalize(root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Expand `globs`, union the hits, keep regular files, sort, then drop
    /// anything matching one of `excludes`.
    pub fn resolve<S: AsRef<str>>(&self, globs: &[S], excludes: &[S]) -> MatchedFileSet {
        let mut rejected = Vec::new();
        let mut walk_errors = Vec::new();

        // Keyed by normalized relative path: dedupes overlapping globs and sorts.
        let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();

        for raw in globs {
            let raw = raw.as_ref();
            let full = self.anchor(raw);

            let paths = match glob::glob_with(&full, include_options()) {
                Ok(paths) => paths,
                Err(e) => {
                    let err = IndexerError::pattern(raw, e);
                    warn!(error = %err, "Skipping include pattern");
                    rejected.push(err);
                    continue;
                }
            };

            let mut hits = 0usize;
            for entry in paths {
                match entry {
                    Ok(path) => {
                        // Directories and dangling links fall out here
                        if !path.is_file() {
                            continue;
                        }
                        hits += 1;
                        found.entry(self.rel_path(&path)).or_insert(path);
                    }
                    Err(e) => {
                        warn!(path = ?e.path(), error = %e, "Unreadable path during glob walk");
                        walk_errors.push(IndexerError::Walk {
                            path: e.path().to_path_buf(),
                            source: e.into_error(),
                        });
                    }
                }
            }
            debug!(pattern = raw, hits, "Include pattern expanded");
        }

        let exclude_patterns: Vec<Pattern> = excludes
            .iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                match Pattern::new(&raw.replace('\\', "/")) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        let err = IndexerError::pattern(raw, e);
                        warn!(error = %err, "Skipping exclude pattern");
                        rejected.push(err);
                        None
                    }
                }
            })
            .collect();

        let files = found
            .into_iter()
            .filter(|(rel, _)| {
                !exclude_patterns
                    .iter()
                    .any(|p| p.matches_with(rel, exclude_options()))
            })
            .map(|(rel_path, path)| MatchedFile { path, rel_path })
            .collect();

        MatchedFileSet {
            files,
            rejected,
            walk_errors,
        }
    }

    /// Join a relative pattern onto the (escaped) root.
    fn anchor(&self, pattern: &str) -> String {
        let pattern = pattern.replace('\\', "/");
        if Path::new(&pattern).is_absolute() {
            return pattern;
        }
        let root = to_slash(&self.root);
        if root == "." {
            return pattern;
        }
        format!(
            "{}/{}",
            Pattern::escape(root.trim_end_matches('/')),
            pattern.trim_start_matches("./")
        )
    }

    fn rel_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(rel) => to_slash(rel),
            Err(_) => to_slash(path),
        }
    }
}

/// Escape a literal path so it can be embedded in a glob pattern.
pub fn escape_literal(path: &Path) -> String {
    Pattern::escape(&to_slash(path))
}

/// Include expansion: `*` stays within a segment and skips dot-files.
fn include_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    }
}

/// Exclude filtering: shell-style match on the whole path string.
fn exclude_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    }
}
