//! Snapshot rendering to markdown documents.
//!
//! Embeds the full text of every matched file in a fenced block tagged
//! with its language, under a title, optional header and provenance line.

use crate::config::SnapshotSpec;
use crate::CoreError;
use snapdoc_indexer::{fence_tag, MatchedFileSet};
use std::path::Path;
use tracing::{debug, warn};

/// A matched file that could not be embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Normalized path relative to the working root
    pub path: String,
    pub reason: String,
}

/// Output of rendering one snapshot.
#[derive(Debug, Clone)]
pub struct RenderedSnapshot {
    pub content: String,
    /// Number of files embedded
    pub included: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Renderer for snapshot documents.
pub struct SnapshotRenderer {
    title_prefix: String,
}

impl SnapshotRenderer {
    pub fn new(title_prefix: impl Into<String>) -> Self {
        Self {
            title_prefix: title_prefix.into(),
        }
    }

    /// Render a snapshot document for `files`.
    ///
    /// Files that cannot be read are left out and reported in `skipped`.
    pub fn render(
        &self,
        spec: &SnapshotSpec,
        files: &MatchedFileSet,
        branch: &str,
    ) -> RenderedSnapshot {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", spec.resolved_title(&self.title_prefix)));

        if let Some(header) = spec.header_text() {
            output.push_str(&format!("> {}\n\n", header));
        }

        output.push_str(&format!(
            "> Snapshot generated from branch `{}`. Contains the **full code** of each file.\n\n",
            branch
        ));
        output.push_str("---\n\n");

        let mut included = 0;
        let mut skipped = Vec::new();

        for file in &files.files {
            let bytes = match std::fs::read(&file.path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(path = %file.rel_path, error = %e, "Skipping unreadable file");
                    skipped.push(SkippedFile {
                        path: file.rel_path.clone(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            // Invalid UTF-8 sequences become U+FFFD
            let text = String::from_utf8_lossy(&bytes);

            output.push_str(&format!("```{}\n// {}\n", fence_tag(&file.path), file.rel_path));
            output.push_str(&text);
            output.push_str("\n```\n\n");

            debug!(path = %file.rel_path, bytes = bytes.len(), "Embedded file");
            included += 1;
        }

        RenderedSnapshot {
            content: output,
            included,
            skipped,
        }
    }
}

/// Create the parent directory of `path` if needed and overwrite it.
pub fn write_document(path: &Path, content: &str) -> Result<(), CoreError> {
    let to_write_error = |source| CoreError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    std::fs::write(path, content).map_err(to_write_error)
}
