//! Icon catalog ingestion, deduplication and manifest rewriting.
//!
//! # Pipeline
//!
//! ```text
//! sources ─► collect ─► pool (workers ─► store) ─► resolve ─┬─► catalog
//!                                                           └─► rewrite
//! ```
//!
//! - [`sources`] - the static source list
//! - [`collect`] - manifest download and icon reference extraction
//! - [`worker`] / [`pool`] - concurrent download, sniffing and storage
//! - [`resolve`] - grouping by content hash and the URL map
//! - [`catalog`] - the consolidated, sorted catalog
//! - [`rewrite`] - per-source manifests pointing at cached copies
//! - [`report`] - run summary, update log and commit message
//!
//! Only the pool runs concurrently. Everything after it is a single pass
//! over the drained outcome set.

pub mod catalog;
pub mod collect;
mod error;
pub mod image;
pub mod manifest;
pub mod model;
pub mod pool;
pub mod report;
pub mod resolve;
pub mod rewrite;
pub mod sources;
pub mod worker;

pub use error::{Error, IconError, Result};
pub use model::{FetchOutcome, IconReference, SourceDefinition};
