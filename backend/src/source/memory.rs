//! In-memory snapshot source for tests and local development.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::SnapshotSource;
use crate::error::SourceResult;
use crate::models::LocationRecord;

/// Serves whatever records it currently holds.
#[derive(Debug, Default)]
pub struct MemorySource {
    records: RwLock<Vec<LocationRecord>>,
}

impl MemorySource {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Replace what the next fetch returns.
    pub fn replace(&self, records: Vec<LocationRecord>) {
        *self.records.write() = records;
    }
}

#[async_trait]
impl SnapshotSource for MemorySource {
    async fn fetch_snapshot(&self) -> SourceResult<Vec<LocationRecord>> {
        Ok(self.records.read().clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.read().len())
    }
}
