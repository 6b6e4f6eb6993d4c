//! Snapdoc Core Components
//!
//! This crate turns a declarative export configuration into snapshot
//! documents and a cross-linked URL index of everything generated.

mod clock;
mod config;
mod error;
mod render;
mod runner;
mod urls;

pub use clock::{format_timestamp, Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use config::{
    ExportConfig, IndexScopeConfig, SnapshotSpec, DEFAULT_CONFIG_PATH, DEFAULT_INDEX_FILENAME,
};
pub use error::CoreError;
pub use render::{write_document, RenderedSnapshot, SkippedFile, SnapshotRenderer};
pub use runner::{RunReport, RunSettings, SnapshotJob, SnapshotOutcome};
pub use urls::{blob_url, raw_url, IndexEntry, IndexReport, IndexScope, UrlIndexBuilder};
