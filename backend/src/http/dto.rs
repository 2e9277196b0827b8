//! Data Transfer Objects for the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::LocationRecord;
use crate::scheduler::RefreshStatus;

/// Body of every location listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationsResponse {
    pub locations: Vec<LocationRecord>,
}

impl From<Vec<LocationRecord>> for LocationsResponse {
    fn from(locations: Vec<LocationRecord>) -> Self {
        Self { locations }
    }
}

/// Health and readiness report.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether any snapshot has been accepted yet
    pub ready: bool,
    pub locations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_fetched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub refresh: RefreshStatus,
}
