//! Fence-language tagging for embedded source files.

use std::path::Path;

/// Languages that get a tagged fence when embedded in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Java,
    Kotlin,
    Rust,
    Go,
    TypeScript,
    JavaScript,
    Python,
    Xml,
    Yaml,
    Toml,
    Json,
    Properties,
    Sql,
    Markdown,
    Html,
    Css,
    Shell,
}

impl Language {
    /// Detect the language of a file based on its extension.
    pub fn from_path(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?.to_lowercase();

        match ext.as_str() {
            // JVM
            "java" => Some(Language::Java),
            "kt" | "kts" => Some(Language::Kotlin),

            // Other compiled languages
            "rs" => Some(Language::Rust),
            "go" => Some(Language::Go),

            // Scripting
            "ts" | "tsx" => Some(Language::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Language::JavaScript),
            "py" | "pyi" => Some(Language::Python),
            "sh" | "bash" => Some(Language::Shell),

            // Markup/config
            "xml" => Some(Language::Xml),
            "yml" | "yaml" => Some(Language::Yaml),
            "toml" => Some(Language::Toml),
            "json" => Some(Language::Json),
            "properties" => Some(Language::Properties),
            "html" | "htm" => Some(Language::Html),
            "css" | "scss" => Some(Language::Css),

            // Query
            "sql" => Some(Language::Sql),

            // Documentation
            "md" | "markdown" => Some(Language::Markdown),

            _ => None,
        }
    }

    /// The info string written after the opening fence.
    pub fn fence_tag(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Xml => "xml",
            Language::Yaml => "yaml",
            Language::Toml => "toml",
            Language::Json => "json",
            Language::Properties => "properties",
            Language::Sql => "sql",
            Language::Markdown => "markdown",
            Language::Html => "html",
            Language::Css => "css",
            Language::Shell => "bash",
        }
    }
}

/// Fence tag for a path, or an empty string when the extension is unknown.
pub fn fence_tag(path: &Path) -> &'static str {
    Language::from_path(path).map_or("", |lang| lang.fence_tag())
}
