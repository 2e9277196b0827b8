//! Refresh scheduling: fetch, guard, replace.
//!
//! [`RefreshScheduler::refresh`] runs one cycle
//! (`Idle → Fetching → Guarding → Idle`) and never returns an error: fetch
//! failures and guard rejections are logged and recorded, and the store keeps
//! serving the previous snapshot. The periodic timer is a thin adapter,
//! [`RefreshScheduler::spawn_periodic`], around that call.

pub mod status;

pub use status::{RefreshStatus, RefreshTracker};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::SourceError;
use crate::guard::{CacheGuard, GuardDecision};
use crate::models::{LocationRecord, Snapshot};
use crate::source::SnapshotSource;
use crate::store::SnapshotStore;

/// Default period between refresh cycles.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// What a single refresh trigger ended up doing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The candidate replaced the current snapshot
    Accepted { records: usize, changed: bool },
    /// The guard kept the previous snapshot
    Rejected { decision: GuardDecision },
    /// Fetching failed; nothing changed
    Failed { error: String },
    /// Another cycle was already in flight
    Skipped,
}

impl RefreshOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RefreshOutcome::Accepted { .. })
    }
}

/// Owns the refresh cycle and is the only writer of its [`SnapshotStore`].
pub struct RefreshScheduler {
    source: Arc<dyn SnapshotSource>,
    store: SnapshotStore,
    guard: CacheGuard,
    tracker: RefreshTracker,
    in_flight: Mutex<()>,
}

impl RefreshScheduler {
    pub fn new(source: Arc<dyn SnapshotSource>, store: SnapshotStore, guard: CacheGuard) -> Self {
        Self {
            source,
            store,
            guard,
            tracker: RefreshTracker::new(),
            in_flight: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn status(&self) -> RefreshStatus {
        self.tracker.status()
    }

    /// Run one fetch-and-guard cycle.
    ///
    /// A trigger that arrives while another cycle is running is skipped, so
    /// fetches and snapshot replacement never interleave.
    pub async fn refresh(&self) -> RefreshOutcome {
        let Ok(_in_flight) = self.in_flight.try_lock() else {
            warn!("Refresh already in flight, skipping trigger");
            return RefreshOutcome::Skipped;
        };

        let cycle_id = Uuid::new_v4();
        let outcome = self
            .run_cycle()
            .instrument(info_span!("refresh", %cycle_id))
            .await;
        self.tracker.record(&outcome);
        outcome
    }

    async fn run_cycle(&self) -> RefreshOutcome {
        info!(source = %self.source.describe(), "Reloading dining locations");

        let records = match self.fetch().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Location fetch failed, keeping previous snapshot");
                return RefreshOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        let candidate = Snapshot::new(records);
        let changed = self
            .store
            .current_snapshot()
            .map_or(true, |current| !current.same_content(&candidate));
        let records = candidate.len();

        let decision = self.guard.admit(&self.store, candidate);
        if decision.is_accepted() {
            if !changed {
                info!("Snapshot content unchanged");
            }
            RefreshOutcome::Accepted { records, changed }
        } else {
            RefreshOutcome::Rejected { decision }
        }
    }

    /// Fetch from the source, turning a panic into an error.
    async fn fetch(&self) -> Result<Vec<LocationRecord>, SourceError> {
        match AssertUnwindSafe(self.source.fetch_snapshot())
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(SourceError::Panicked(message))
            }
        }
    }

    /// Spawn the periodic trigger.
    ///
    /// The first tick of the interval fires immediately and is consumed, since
    /// the startup cycle is run explicitly before the server listens. Each
    /// later tick runs a cycle to completion before waiting for the next one.
    pub fn spawn_periodic(
        self: &Arc<Self>,
        period: Duration,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            ticker.tick().await;
            info!(period_secs = period.as_secs(), "Periodic refresh started");

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown.cancelled() => {
                        info!("Periodic refresh stopping");
                        break;
                    }

                    _ = ticker.tick() => {
                        scheduler.refresh().await;
                    }
                }
            }
        })
    }
}
