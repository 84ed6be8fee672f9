//! # bdpm-loader
//!
//! Parser, linker, and snapshot store for the BDPM drug-registry files.
//!
//! The crate covers the full ingestion pipeline: row decoders for the five
//! tab-separated source files, entity loaders that tolerate malformed rows,
//! the linker that cross-references everything into a composite graph, and
//! the versioned snapshot store that publishes graphs atomically. All entry
//! points take in-memory content or readers, never file paths, so the whole
//! pipeline is testable without a file system.
//!
//! ```no_run
//! use bdpm_loader::{link, load_all, RawSources, SnapshotStore};
//!
//! # fn demo(raw: RawSources) -> Result<(), bdpm_loader::RegistryError> {
//! let store = SnapshotStore::new();
//!
//! let loaded = load_all(&raw)?;
//! let output = link(loaded)?;
//! let snapshot = store.publish(output.graph);
//!
//! if let Some(record) = snapshot.graph.specialty(60234100) {
//!     println!("{}", record.specialty.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod composition;
mod condition;
pub mod decode;
mod generic;
mod graph;
mod linker;
mod loader;
mod presentation;
mod specialty;
mod store;
mod types;

pub use decode::{decode_text, TsvDecoder, TsvRecord};
pub use graph::RegistryGraph;
pub use linker::{link, LinkOutput, LinkReport};
pub use loader::{index_by_cis, load_all, load_source, Loaded, LoadedSources};
#[cfg(feature = "parallel")]
pub use loader::load_source_parallel;
pub use store::{Snapshot, SnapshotStore};
pub use types::{RawSources, RegistryError, RegistryResult, RowReject, SourceKind};

// Re-export bdpm-types for convenience
pub use bdpm_types;
