//! BDPM registry refresh server binary.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bdpm_loader::SnapshotStore;
use bdpm_service::{RefreshDriver, SourceSet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BASE_URL: &str =
    "https://base-donnees-publique.medicaments.gouv.fr/telechargement.php?fichier=";
const DEFAULT_REFRESH_SECS: u64 = 86_400;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // A local directory takes precedence over the download base URL
    let sources = match std::env::var("BDPM_SOURCE_DIR") {
        Ok(dir) => {
            tracing::info!("Reading BDPM sources from directory: {}", dir);
            SourceSet::from_dir(PathBuf::from(dir))
        }
        Err(_) => {
            let base = std::env::var("BDPM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
            tracing::info!("Downloading BDPM sources from: {}", base);
            SourceSet::from_base_url(&base)
        }
    };

    let refresh_secs = std::env::var("BDPM_REFRESH_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REFRESH_SECS);
    let fetch_timeout_secs = std::env::var("BDPM_FETCH_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);

    let store = Arc::new(SnapshotStore::new());
    let driver = Arc::new(RefreshDriver::new(
        Arc::clone(&store),
        sources,
        Duration::from_secs(fetch_timeout_secs),
    ));

    // The first cycle must succeed before the process is considered up;
    // a registry service with no snapshot has nothing to answer from.
    tracing::info!("Running initial refresh cycle...");
    let outcome = driver.run_once().await?;
    tracing::info!(
        "Initial snapshot published: version {} with {} specialties",
        outcome.version,
        outcome.specialties
    );

    tracing::info!("Scheduling refresh every {} seconds", refresh_secs);
    tokio::spawn(
        Arc::clone(&driver).run_periodic(Duration::from_secs(refresh_secs)),
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");

    Ok(())
}
