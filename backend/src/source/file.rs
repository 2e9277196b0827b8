//! Snapshot source backed by a JSON document on disk.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{decode_locations, SnapshotSource};
use crate::error::{SourceError, SourceResult};
use crate::models::LocationRecord;

/// Re-reads a JSON location document on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    async fn fetch_snapshot(&self) -> SourceResult<Vec<LocationRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Read location document");
        decode_locations(&bytes)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}
