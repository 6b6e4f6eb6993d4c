//! Snapdoc Indexer
//!
//! This crate resolves the file sets that snapdoc renders, including:
//! - Glob expansion with recursive `**` support and shell-style excludes
//! - Deterministic, deduplicated ordering of matched files
//! - Fence-language tagging by file extension
//! - Lexical path normalization shared by the renderer and the URL index

mod error;
pub mod scanner;

pub use error::IndexerError;
pub use scanner::{
    escape_literal, fence_tag, normalize, relative_label, to_slash, Language, MatchedFile,
    MatchedFileSet, PatternMatcher,
};
