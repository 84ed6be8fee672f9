//! Versioned snapshot store.
//!
//! Holds the currently published registry graph behind a single swapped
//! reference. `publish` installs a new graph in one indivisible step;
//! readers clone an `Arc` and keep a fully consistent graph for as long as
//! they hold it, even while a newer snapshot is published concurrently.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::graph::RegistryGraph;

/// One immutable, fully linked version of the registry graph.
#[derive(Debug)]
pub struct Snapshot {
    /// Monotonically increasing version, starting at 1.
    pub version: u64,
    /// When this snapshot was published.
    pub published_at: DateTime<Utc>,
    /// The graph itself.
    pub graph: RegistryGraph,
}

/// The single shared holder of the current snapshot.
///
/// The snapshot reference is the only shared mutable state in the core:
/// written once per successful refresh cycle, read many times concurrently.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<Snapshot>>>,
    version: AtomicU64,
}

impl SnapshotStore {
    /// Creates a store with no snapshot published yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new graph as the current snapshot.
    ///
    /// The swap is indivisible: a concurrent `current()` call observes
    /// either the complete prior snapshot or the complete new one, never
    /// a mixture. The prior snapshot stays alive only as long as readers
    /// still hold a reference to it.
    pub fn publish(&self, graph: RegistryGraph) -> Arc<Snapshot> {
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot {
            version,
            published_at: Utc::now(),
            graph,
        });

        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Returns the snapshot in effect at the moment of the call.
    ///
    /// `None` until the first publish. The returned graph never changes
    /// underneath the caller.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Version of the latest published snapshot (0 before the first).
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn empty_graph() -> RegistryGraph {
        RegistryGraph::from_parts(Vec::new(), HashMap::new(), Vec::new(), HashMap::new())
    }

    #[test]
    fn test_store_starts_empty() {
        let store = SnapshotStore::new();
        assert!(store.current().is_none());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_publish_installs_snapshot() {
        let store = SnapshotStore::new();
        let published = store.publish(empty_graph());

        assert_eq!(published.version, 1);
        let current = store.current().unwrap();
        assert_eq!(current.version, 1);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_versions_are_monotonic() {
        let store = SnapshotStore::new();
        let first = store.publish(empty_graph());
        let second = store.publish(empty_graph());

        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);
        assert!(second.published_at >= first.published_at);
        assert_eq!(store.current().unwrap().version, 2);
    }

    #[test]
    fn test_reader_keeps_old_snapshot_across_publish() {
        let store = SnapshotStore::new();
        store.publish(empty_graph());

        let held = store.current().unwrap();
        store.publish(empty_graph());

        // The captured reference is unaffected by the newer publish.
        assert_eq!(held.version, 1);
        assert_eq!(store.current().unwrap().version, 2);
    }

    #[test]
    fn test_concurrent_readers_see_complete_snapshots() {
        use std::sync::Arc as StdArc;
        use std::thread;

        let store = StdArc::new(SnapshotStore::new());
        store.publish(empty_graph());

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = StdArc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    let snapshot = store.current().unwrap();
                    // Version 0 would mean a half-published snapshot.
                    assert!(snapshot.version >= 1);
                }
            }));
        }
        for _ in 0..10 {
            store.publish(empty_graph());
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
