//! Snapshot source fetching a JSON document from an upstream URL.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{decode_locations, SnapshotSource};
use crate::error::SourceResult;
use crate::models::LocationRecord;

/// GETs the location document from `url` on every fetch.
///
/// A fresh client is built per call so no connection state outlives a
/// refresh cycle.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SnapshotSource for HttpSource {
    async fn fetch_snapshot(&self) -> SourceResult<Vec<LocationRecord>> {
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let response = client.get(&self.url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(url = %self.url, bytes = bytes.len(), "Fetched location document");
        decode_locations(&bytes)
    }

    fn describe(&self) -> String {
        format!("http {}", self.url)
    }
}
