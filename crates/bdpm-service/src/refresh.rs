//! Refresh driver.
//!
//! Orchestrates one full refresh cycle — acquire all five sources, decode
//! and link them off the async runtime, publish on success — and the
//! periodic re-run. A failed cycle never touches the published snapshot:
//! the serving layer keeps answering from the last good graph.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bdpm_loader::{
    link, load_all, LoadedSources, RawSources, RegistryError, SnapshotStore, SourceKind,
};
use thiserror::Error;

use crate::source::{fetch, FetchError, SourceSet};

/// Errors that fail a refresh cycle.
#[derive(Error, Debug)]
pub enum RefreshError {
    /// Another refresh is already in flight; this one was rejected.
    #[error("A refresh cycle is already in flight")]
    AlreadyRunning,

    /// Acquiring one of the sources failed or timed out.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Decoding or linking failed structurally.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The blocking decode/link task was cancelled or panicked.
    #[error("Decode/link task failed: {0}")]
    Task(String),
}

/// The operational outcome of one successful refresh cycle.
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    /// Version of the snapshot this cycle published.
    pub version: u64,
    /// Accepted specialty records.
    pub specialties: usize,
    /// Accepted composition records.
    pub compositions: usize,
    /// Accepted presentation records.
    pub presentations: usize,
    /// Accepted prescription-condition records.
    pub conditions: usize,
    /// Resolved generic groups.
    pub groups: usize,
    /// Rows rejected across all five sources.
    pub rejected_rows: usize,
    /// Orphaned references excluded while linking.
    pub orphans: usize,
    /// Wall-clock duration of the cycle.
    pub duration: Duration,
}

/// Per-source record counts captured before the loaded sets are consumed.
struct LoadCounts {
    specialties: usize,
    compositions: usize,
    presentations: usize,
    conditions: usize,
    rejected: usize,
}

impl LoadCounts {
    fn of(loaded: &LoadedSources) -> Self {
        Self {
            specialties: loaded.specialties.accepted(),
            compositions: loaded.compositions.accepted(),
            presentations: loaded.presentations.accepted(),
            conditions: loaded.conditions.accepted(),
            rejected: loaded.total_rejected(),
        }
    }
}

/// Drives the acquire → decode → link → publish cycle.
///
/// At most one cycle runs at a time; a `run_once` call made while another
/// is in flight is rejected immediately rather than queued, so two
/// downloads never interleave and the transient memory footprint stays
/// bounded to one rebuild.
pub struct RefreshDriver {
    store: Arc<SnapshotStore>,
    sources: SourceSet,
    client: reqwest::Client,
    fetch_timeout: Duration,
    in_flight: tokio::sync::Mutex<()>,
}

impl RefreshDriver {
    /// Creates a driver publishing into `store`.
    pub fn new(store: Arc<SnapshotStore>, sources: SourceSet, fetch_timeout: Duration) -> Self {
        Self {
            store,
            sources,
            client: reqwest::Client::new(),
            fetch_timeout,
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Runs one refresh cycle end to end.
    ///
    /// On any acquisition or structural error the previously published
    /// snapshot is left untouched and the error is returned as the
    /// cycle's failure signal.
    pub async fn run_once(&self) -> Result<RefreshOutcome, RefreshError> {
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| RefreshError::AlreadyRunning)?;

        let started = Instant::now();
        let raw = self.acquire_all().await?;

        // Decode + link are pure compute over the fetched bytes.
        let (output, counts) = tokio::task::spawn_blocking(move || {
            let loaded = load_all(&raw)?;
            let counts = LoadCounts::of(&loaded);
            let output = link(loaded)?;
            Ok::<_, RegistryError>((output, counts))
        })
        .await
        .map_err(|e| RefreshError::Task(e.to_string()))??;

        let orphans = output.report.orphan_count();
        let snapshot = self.store.publish(output.graph);

        let outcome = RefreshOutcome {
            version: snapshot.version,
            specialties: counts.specialties,
            compositions: counts.compositions,
            presentations: counts.presentations,
            conditions: counts.conditions,
            groups: snapshot.graph.group_count(),
            rejected_rows: counts.rejected,
            orphans,
            duration: started.elapsed(),
        };

        tracing::info!(
            version = outcome.version,
            specialties = outcome.specialties,
            compositions = outcome.compositions,
            presentations = outcome.presentations,
            conditions = outcome.conditions,
            groups = outcome.groups,
            rejected = outcome.rejected_rows,
            orphans = outcome.orphans,
            duration_ms = outcome.duration.as_millis() as u64,
            "refresh cycle published new snapshot"
        );

        Ok(outcome)
    }

    /// Re-runs the cycle on a fixed cadence, forever.
    ///
    /// Failures are logged and swallowed: the last good snapshot stays
    /// authoritative until a later cycle succeeds.
    pub async fn run_periodic(self: Arc<Self>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick fires immediately; the startup refresh already ran.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match self.run_once().await {
                Ok(outcome) => {
                    tracing::debug!(version = outcome.version, "periodic refresh succeeded");
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "periodic refresh failed; previous snapshot remains authoritative"
                    );
                }
            }
        }
    }

    async fn acquire_all(&self) -> Result<RawSources, FetchError> {
        let (specialties, compositions, presentations, conditions, groups) = tokio::try_join!(
            self.fetch_one(SourceKind::Specialties),
            self.fetch_one(SourceKind::Compositions),
            self.fetch_one(SourceKind::Presentations),
            self.fetch_one(SourceKind::Conditions),
            self.fetch_one(SourceKind::Groups),
        )?;

        Ok(RawSources {
            specialties,
            compositions,
            presentations,
            conditions,
            groups,
        })
    }

    async fn fetch_one(&self, kind: SourceKind) -> Result<Vec<u8>, FetchError> {
        let bytes = fetch(
            &self.client,
            self.sources.location(kind),
            kind,
            self.fetch_timeout,
        )
        .await?;
        tracing::debug!(source = %kind, bytes = bytes.len(), "source acquired");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_sources(dir: &Path) {
        std::fs::write(
            dir.join("CIS_bdpm.txt"),
            "1\tTest Med\tcomprimé\torale\tAutorisation active\tProcédure nationale\tCommercialisée\t22/07/2002\t\t\tHOLDER\tNon\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("CIS_COMPO_bdpm.txt"),
            "1\tcomprimé\t2202\tPARACETAMOL\t1000 mg\tun comprimé\tSA\t1\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("CIS_CIP_bdpm.txt"),
            "1\t3475355\tplaquette(s)\tPrésentation active\tDéclaration de commercialisation\t22/07/2002\t3400934753558\toui\t65 %\t1,50\n",
        )
        .unwrap();
        std::fs::write(dir.join("CIS_CPD_bdpm.txt"), "1\tliste I\n").unwrap();
        std::fs::write(
            dir.join("CIS_GENER_bdpm.txt"),
            "100\tGroup1\t1\t0\t1\t100\n",
        )
        .unwrap();
    }

    fn make_driver(dir: &Path) -> (Arc<SnapshotStore>, RefreshDriver) {
        let store = Arc::new(SnapshotStore::new());
        let driver = RefreshDriver::new(
            Arc::clone(&store),
            SourceSet::from_dir(dir),
            Duration::from_secs(5),
        );
        (store, driver)
    }

    #[tokio::test]
    async fn test_run_once_publishes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let (store, driver) = make_driver(dir.path());

        let outcome = driver.run_once().await.unwrap();

        assert_eq!(outcome.version, 1);
        assert_eq!(outcome.specialties, 1);
        assert_eq!(outcome.groups, 1);
        assert_eq!(outcome.rejected_rows, 0);
        assert_eq!(outcome.orphans, 0);

        let snapshot = store.current().unwrap();
        assert_eq!(snapshot.version, 1);
        let record = snapshot.graph.specialty(1).unwrap();
        assert_eq!(record.specialty.name, "Test Med");
        assert_eq!(record.group_ids, vec![100]);
    }

    #[tokio::test]
    async fn test_failed_cycle_leaves_snapshot_untouched() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let (store, driver) = make_driver(dir.path());

        driver.run_once().await.unwrap();
        let before = store.current().unwrap();

        // Empty specialty file: structural error on the next cycle.
        std::fs::write(dir.path().join("CIS_bdpm.txt"), "").unwrap();
        let err = driver.run_once().await.unwrap_err();
        assert!(matches!(
            err,
            RefreshError::Registry(RegistryError::EmptySource { .. })
        ));

        let after = store.current().unwrap();
        assert_eq!(after.version, before.version);
        assert!(after.graph.has_specialty(1));
    }

    #[tokio::test]
    async fn test_missing_source_fails_acquisition() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        std::fs::remove_file(dir.path().join("CIS_GENER_bdpm.txt")).unwrap();
        let (store, driver) = make_driver(dir.path());

        let err = driver.run_once().await.unwrap_err();
        assert!(matches!(err, RefreshError::Fetch(FetchError::Io { .. })));
        assert!(store.current().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_run_once_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let (_store, driver) = make_driver(dir.path());

        let _held = driver.in_flight.lock().await;
        let err = driver.run_once().await.unwrap_err();
        assert!(matches!(err, RefreshError::AlreadyRunning));
    }

    #[tokio::test]
    async fn test_repeated_cycles_bump_version() {
        let dir = tempfile::tempdir().unwrap();
        write_sources(dir.path());
        let (store, driver) = make_driver(dir.path());

        driver.run_once().await.unwrap();
        let held = store.current().unwrap();
        driver.run_once().await.unwrap();

        // A reader holding the old snapshot keeps a consistent graph.
        assert_eq!(held.version, 1);
        assert_eq!(store.current().unwrap().version, 2);
    }
}
