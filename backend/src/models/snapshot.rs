//! Immutable snapshot of all dining locations from one fetch.

use chrono::{DateTime, Utc};

use super::checksum::calculate_fingerprint;
use super::location::LocationRecord;

/// The full record set produced by one successful fetch.
///
/// Snapshots are never mutated after construction; a newer fetch produces a
/// new `Snapshot` that replaces this one as a whole.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    records: Vec<LocationRecord>,
    fetched_at: DateTime<Utc>,
    fingerprint: String,
}

impl Snapshot {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Self::fetched_at(records, Utc::now())
    }

    pub fn fetched_at(records: Vec<LocationRecord>, fetched_at: DateTime<Utc>) -> Self {
        let fingerprint = calculate_fingerprint(&records);
        Self {
            records,
            fetched_at,
            fingerprint,
        }
    }

    pub fn records(&self) -> &[LocationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fetch_time(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// SHA-256 over the records; equal for identical record sequences.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn same_content(&self, other: &Snapshot) -> bool {
        self.fingerprint == other.fingerprint
    }
}
