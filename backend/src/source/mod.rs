//! Snapshot sources: where location records come from.
//!
//! The refresh scheduler only depends on the [`SnapshotSource`] trait. Each
//! call to [`SnapshotSource::fetch_snapshot`] performs its own setup and
//! teardown of whatever resource it needs, so a source can be invoked
//! repeatedly over the whole process lifetime.
//!
//! Nothing here scrapes the dining site; the provided sources read
//! an already normalized JSON document either from disk ([`FileSource`]) or
//! from an upstream URL ([`HttpSource`]). [`MemorySource`] serves records
//! held in memory.

pub mod file;
#[cfg(feature = "http-source")]
pub mod http;
pub mod memory;

pub use file::FileSource;
pub use memory::MemorySource;
#[cfg(feature = "http-source")]
pub use http::HttpSource;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{SourceKind, SourceSettings};
use crate::error::{ConfigError, SourceResult};
use crate::models::LocationRecord;

/// Produces the full, ordered list of dining locations.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch every location from the upstream source.
    async fn fetch_snapshot(&self) -> SourceResult<Vec<LocationRecord>>;

    /// Short human-readable description used in logs.
    fn describe(&self) -> String;
}

/// Accepted document shapes: a bare array or `{"locations": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocationsDocument {
    Bare(Vec<LocationRecord>),
    Wrapped { locations: Vec<LocationRecord> },
}

/// Decode a JSON location document.
pub fn decode_locations(bytes: &[u8]) -> SourceResult<Vec<LocationRecord>> {
    let document: LocationsDocument = serde_json::from_slice(bytes)?;
    Ok(match document {
        LocationsDocument::Bare(locations) | LocationsDocument::Wrapped { locations } => locations,
    })
}

/// Build the configured snapshot source.
pub fn build_source(settings: &SourceSettings) -> Result<Arc<dyn SnapshotSource>, ConfigError> {
    match settings.kind {
        SourceKind::File => {
            let path = settings.path.clone().ok_or_else(|| {
                ConfigError::Invalid("source.path is required for a file source".to_string())
            })?;
            Ok(Arc::new(FileSource::new(path)))
        }
        #[cfg(feature = "http-source")]
        SourceKind::Http => {
            let url = settings.url.clone().ok_or_else(|| {
                ConfigError::Invalid("source.url is required for an http source".to_string())
            })?;
            Ok(Arc::new(HttpSource::new(url, settings.timeout())))
        }
        #[cfg(not(feature = "http-source"))]
        SourceKind::Http => Err(ConfigError::Invalid(
            "http source requires the `http-source` feature".to_string(),
        )),
    }
}
