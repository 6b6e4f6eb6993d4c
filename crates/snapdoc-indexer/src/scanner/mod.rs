//! File-set resolution module.
//!
//! Expands include globs, filters excludes and tags each file with the
//! fence language used when it is embedded in a document.

mod language;
mod matcher;
mod path;

pub use language::{fence_tag, Language};
pub use matcher::{escape_literal, MatchedFile, MatchedFileSet, PatternMatcher};
pub use path::{normalize, relative_label, to_slash};
