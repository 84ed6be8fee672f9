//! # bdpm-service
//!
//! Source acquisition and refresh orchestration for the BDPM registry.
//!
//! This crate turns the pure ingestion pipeline of `bdpm-loader` into a
//! running service: it downloads (or re-reads) the five source files,
//! rebuilds the registry graph, and publishes each successful rebuild into
//! a shared [`SnapshotStore`](bdpm_loader::SnapshotStore).
//!
//! The HTTP serving layer lives outside this repository. It holds an
//! `Arc<SnapshotStore>`, calls `current()` per request, and answers from
//! that snapshot's graph; the snapshot version and publication timestamp
//! are available for cache-freshness headers. A refresh failure is never
//! visible to it beyond the snapshot simply not advancing.

#![warn(missing_docs)]

mod refresh;
mod source;

pub use refresh::{RefreshDriver, RefreshError, RefreshOutcome};
pub use source::{fetch, FetchError, SourceLocation, SourceSet};

// Re-export the loader surface the embedding layer needs
pub use bdpm_loader::{RegistryGraph, Snapshot, SnapshotStore};
