//! Source acquisition.
//!
//! Each of the five registry sources can live behind an HTTP URL (the
//! upstream download endpoint) or a local file path (a mirrored copy).
//! Every acquisition is bounded by a timeout: a cycle built from a
//! partially fetched source must never be published, so a slow source
//! fails the cycle structurally instead.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bdpm_loader::SourceKind;
use thiserror::Error;

/// Errors raised while acquiring one source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP transport failure.
    #[error("HTTP request for {kind} failed: {reason}")]
    Http {
        /// Which source failed.
        kind: SourceKind,
        /// Transport-level failure description.
        reason: String,
    },

    /// Non-success HTTP status.
    #[error("HTTP status {status} fetching {kind}")]
    Status {
        /// Which source failed.
        kind: SourceKind,
        /// The status code returned.
        status: u16,
    },

    /// Local file read failure.
    #[error("IO error reading {kind}: {reason}")]
    Io {
        /// Which source failed.
        kind: SourceKind,
        /// I/O failure description.
        reason: String,
    },

    /// The acquisition exceeded its bounded timeout.
    #[error("Timed out acquiring {kind} after {seconds}s")]
    Timeout {
        /// Which source timed out.
        kind: SourceKind,
        /// The timeout that was exceeded.
        seconds: u64,
    },
}

/// Where one source is acquired from.
#[derive(Debug, Clone)]
pub enum SourceLocation {
    /// Download over HTTP.
    Url(String),
    /// Re-read from the local file system.
    Path(PathBuf),
}

/// The acquisition locations of all five sources for a refresh cycle.
#[derive(Debug, Clone)]
pub struct SourceSet {
    /// Specialty file location.
    pub specialties: SourceLocation,
    /// Composition file location.
    pub compositions: SourceLocation,
    /// Presentation file location.
    pub presentations: SourceLocation,
    /// Prescription-condition file location.
    pub conditions: SourceLocation,
    /// Generic-group file location.
    pub groups: SourceLocation,
}

impl SourceSet {
    /// Builds a set pointing at conventionally named files in a directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let path = |kind: SourceKind| SourceLocation::Path(dir.join(kind.file_name()));
        Self {
            specialties: path(SourceKind::Specialties),
            compositions: path(SourceKind::Compositions),
            presentations: path(SourceKind::Presentations),
            conditions: path(SourceKind::Conditions),
            groups: path(SourceKind::Groups),
        }
    }

    /// Builds a set pointing at conventionally named files behind a base URL.
    ///
    /// The upstream endpoint takes the file name as a query value, so a
    /// base ending in `=` or `/` gets the name appended directly.
    pub fn from_base_url(base: &str) -> Self {
        let url = |kind: SourceKind| {
            let name = kind.file_name();
            if base.ends_with('=') || base.ends_with('/') {
                SourceLocation::Url(format!("{base}{name}"))
            } else {
                SourceLocation::Url(format!("{base}/{name}"))
            }
        };
        Self {
            specialties: url(SourceKind::Specialties),
            compositions: url(SourceKind::Compositions),
            presentations: url(SourceKind::Presentations),
            conditions: url(SourceKind::Conditions),
            groups: url(SourceKind::Groups),
        }
    }

    /// Returns the location configured for one source kind.
    pub fn location(&self, kind: SourceKind) -> &SourceLocation {
        match kind {
            SourceKind::Specialties => &self.specialties,
            SourceKind::Compositions => &self.compositions,
            SourceKind::Presentations => &self.presentations,
            SourceKind::Conditions => &self.conditions,
            SourceKind::Groups => &self.groups,
        }
    }
}

/// Acquires one source, bounded by `timeout`.
pub async fn fetch(
    client: &reqwest::Client,
    location: &SourceLocation,
    kind: SourceKind,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    let acquisition = async {
        match location {
            SourceLocation::Url(url) => {
                let response = client.get(url).send().await.map_err(|e| FetchError::Http {
                    kind,
                    reason: e.to_string(),
                })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        kind,
                        status: status.as_u16(),
                    });
                }

                let bytes = response.bytes().await.map_err(|e| FetchError::Http {
                    kind,
                    reason: e.to_string(),
                })?;
                Ok(bytes.to_vec())
            }
            SourceLocation::Path(path) => {
                tokio::fs::read(path).await.map_err(|e| FetchError::Io {
                    kind,
                    reason: e.to_string(),
                })
            }
        }
    };

    match tokio::time::timeout(timeout, acquisition).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            kind,
            seconds: timeout.as_secs(),
        }),
    }
}
