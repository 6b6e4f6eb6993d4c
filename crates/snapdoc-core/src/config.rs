//! Export configuration.

use crate::urls::IndexScope;
use crate::CoreError;
use serde::{Deserialize, Serialize};
use snapdoc_indexer::normalize;
use std::path::{Component, Path, PathBuf};

/// Where the configuration is looked up when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "docs/ai-snapshots.json";

/// File name of the URL index inside its base directory.
pub const DEFAULT_INDEX_FILENAME: &str = "ai-snapshots-urls.md";

/// Top-level export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Snapshot documents to generate, in order
    #[serde(default)]
    pub snapshots: Vec<SnapshotSpec>,

    /// Prefix of generated titles when a snapshot has none
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,

    /// Branch used when no override is supplied
    #[serde(default = "default_branch")]
    pub branch_env_fallback: String,

    /// Scope of the URL index (derived from snapshot outputs when absent)
    #[serde(default)]
    pub urls_index: Option<IndexScopeConfig>,

    /// Repository identifier (`owner/repo`) used when no override is supplied
    #[serde(default = "default_repository")]
    pub repository: String,

    /// IANA zone for index timestamps
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// One snapshot document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotSpec {
    /// Destination document, relative to the working root
    pub output: PathBuf,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub header: Option<String>,

    /// Include patterns; an empty list yields an empty document
    #[serde(default)]
    pub globs: Vec<String>,

    /// Shell-style patterns matched against each candidate path
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl SnapshotSpec {
    /// Explicit title, or `<prefix> — <output>`.
    pub fn resolved_title(&self, prefix: &str) -> String {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title.to_string(),
            _ => format!("{} — {}", prefix, self.output.display()),
        }
    }

    /// Header text, if any is set and non-blank.
    pub fn header_text(&self) -> Option<&str> {
        self.header.as_deref().filter(|h| !h.trim().is_empty())
    }
}

/// User-facing URL index settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexScopeConfig {
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    #[serde(default)]
    pub globs: Option<Vec<String>>,

    #[serde(default)]
    pub excludes: Vec<String>,

    #[serde(default = "default_index_filename")]
    pub index_filename: String,
}

fn default_title_prefix() -> String {
    "Snapshot AI".to_string()
}

fn default_branch() -> String {
    "develop".to_string()
}

fn default_repository() -> String {
    "screenleads/sl-dev-backend".to_string()
}

fn default_timezone() -> String {
    "Europe/Madrid".to_string()
}

fn default_index_filename() -> String {
    DEFAULT_INDEX_FILENAME.to_string()
}

fn default_index_base_dir() -> PathBuf {
    PathBuf::from("docs/ai-snapshots")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            snapshots: Vec::new(),
            title_prefix: default_title_prefix(),
            branch_env_fallback: default_branch(),
            urls_index: None,
            repository: default_repository(),
            timezone: default_timezone(),
        }
    }
}

impl ExportConfig {
    /// Load configuration from a specific path.
    ///
    /// A missing or unparsable file is an error; there is no fallback.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        if !path.is_file() {
            return Err(CoreError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            CoreError::ConfigParse { message, .. } => CoreError::ConfigParse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, CoreError> {
        serde_json::from_str(content).map_err(|e| CoreError::ConfigParse {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Resolve the URL index scope, filling in defaults.
    pub fn index_scope(&self) -> IndexScope {
        let user = self.urls_index.clone().unwrap_or_default();
        let base_dir = user
            .base_dir
            .map(|dir| normalize(&dir))
            .unwrap_or_else(|| self.common_output_dir());

        let mut scope = IndexScope::for_base_dir(&base_dir);
        if let Some(globs) = user.globs {
            scope.globs = globs;
        }
        scope.excludes = user.excludes;
        if !user.index_filename.trim().is_empty() {
            scope.index_filename = user.index_filename;
        }
        scope
    }

    /// Deepest directory containing every snapshot output.
    fn common_output_dir(&self) -> PathBuf {
        let mut parents = self.snapshots.iter().map(|s| {
            normalize(&s.output)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        });

        let Some(first) = parents.next() else {
            return default_index_base_dir();
        };

        let mut common: Vec<Component<'_>> = first.components().collect();
        let rest: Vec<PathBuf> = parents.collect();
        for other in &rest {
            let shared = common
                .iter()
                .zip(other.components())
                .take_while(|(a, b)| **a == *b)
                .count();
            common.truncate(shared);
        }

        let dir: PathBuf = common.iter().collect();
        if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config =
            ExportConfig::from_json(r#"{"snapshots":[{"output":"out/a.md","globs":["src/*.go"]}]}"#)
                .unwrap();
        assert_eq!(config.snapshots.len(), 1);
        assert_eq!(config.title_prefix, "Snapshot AI");
        assert_eq!(config.branch_env_fallback, "develop");
        assert_eq!(config.timezone, "Europe/Madrid");
        assert!(config.snapshots[0].excludes.is_empty());
    }

    #[test]
    fn test_missing_snapshots_key_is_empty() {
        let config = ExportConfig::from_json("{}").unwrap();
        assert!(config.snapshots.is_empty());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let err = ExportConfig::from_json("{\"snapshots\": [").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));

        let err = ExportConfig::from_json(r#"{"snapshots":[{"title":"no output"}]}"#).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = ExportConfig::load_from(&temp_dir.path().join("none.json")).unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_from_reports_path_on_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("cfg.json");
        std::fs::write(&path, "not json").unwrap();

        match ExportConfig::load_from(&path).unwrap_err() {
            CoreError::ConfigParse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolved_title_fallback() {
        let spec: SnapshotSpec = serde_json::from_str(r#"{"output":"docs/x.md"}"#).unwrap();
        assert_eq!(spec.resolved_title("Snapshot AI"), "Snapshot AI — docs/x.md");

        let spec: SnapshotSpec =
            serde_json::from_str(r#"{"output":"docs/x.md","title":"Backend","header":"  "}"#)
                .unwrap();
        assert_eq!(spec.resolved_title("Snapshot AI"), "Backend");
        assert_eq!(spec.header_text(), None);
    }

    #[test]
    fn test_index_scope_derived_from_outputs() {
        let config = ExportConfig::from_json(
            r#"{"snapshots":[
                {"output":"docs/ai-snapshots/backend/a.md"},
                {"output":"./docs/ai-snapshots/b.md"}
            ]}"#,
        )
        .unwrap();
        let scope = config.index_scope();
        assert_eq!(scope.base_dir, PathBuf::from("docs/ai-snapshots"));
        assert_eq!(scope.globs, vec!["docs/ai-snapshots/**/*.md".to_string()]);
        assert_eq!(
            scope.index_path(),
            PathBuf::from("docs/ai-snapshots/ai-snapshots-urls.md")
        );
    }

    #[test]
    fn test_index_scope_without_snapshots() {
        let scope = ExportConfig::default().index_scope();
        assert_eq!(scope.base_dir, PathBuf::from("docs/ai-snapshots"));
    }

    #[test]
    fn test_index_scope_outputs_at_root() {
        let config = ExportConfig::from_json(r#"{"snapshots":[{"output":"a.md"}]}"#).unwrap();
        let scope = config.index_scope();
        assert_eq!(scope.base_dir, PathBuf::from("."));
        assert_eq!(scope.globs, vec!["**/*.md".to_string()]);
    }

    #[test]
    fn test_index_scope_from_config() {
        let config = ExportConfig::from_json(
            r#"{"urls_index":{"base_dir":"docs","globs":["docs/**/*.md"],"excludes":["docs/drafts/*"],"index_filename":"urls.md"}}"#,
        )
        .unwrap();
        let scope = config.index_scope();
        assert_eq!(scope.base_dir, PathBuf::from("docs"));
        assert_eq!(scope.excludes, vec!["docs/drafts/*".to_string()]);
        assert_eq!(scope.index_path(), PathBuf::from("docs/urls.md"));
    }
}
