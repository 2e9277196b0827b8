//! Acceptance heuristic for freshly fetched snapshots.
//!
//! A transient upstream failure tends to drop most or all locations at once
//! rather than changing the count gently. The guard therefore refuses any
//! candidate that is more than `max_record_drop` records smaller than the
//! snapshot it would replace. This is a heuristic: a legitimate large drop is
//! rejected too, and a partial fetch that happens to lose only one record is
//! accepted.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::Snapshot;
use crate::store::SnapshotStore;

/// Records a candidate may lose relative to the previous snapshot.
pub const DEFAULT_MAX_RECORD_DROP: usize = 1;

/// Outcome of evaluating one candidate snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GuardDecision {
    /// No previous snapshot existed
    Initial { candidate: usize },
    Accepted {
        previous: usize,
        candidate: usize,
        threshold: usize,
    },
    Rejected {
        previous: usize,
        candidate: usize,
        threshold: usize,
    },
}

impl GuardDecision {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, GuardDecision::Rejected { .. })
    }

    pub fn candidate_size(&self) -> usize {
        match *self {
            GuardDecision::Initial { candidate }
            | GuardDecision::Accepted { candidate, .. }
            | GuardDecision::Rejected { candidate, .. } => candidate,
        }
    }
}

/// Decides whether a candidate snapshot may replace the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGuard {
    max_record_drop: usize,
}

impl CacheGuard {
    pub fn new(max_record_drop: usize) -> Self {
        Self { max_record_drop }
    }

    pub fn max_record_drop(&self) -> usize {
        self.max_record_drop
    }

    /// Evaluate a candidate of `candidate` records against a previous
    /// snapshot of `previous` records.
    pub fn evaluate_sizes(&self, previous: Option<usize>, candidate: usize) -> GuardDecision {
        let Some(previous) = previous else {
            return GuardDecision::Initial { candidate };
        };

        let threshold = previous.saturating_sub(self.max_record_drop);
        if candidate < threshold {
            GuardDecision::Rejected {
                previous,
                candidate,
                threshold,
            }
        } else {
            GuardDecision::Accepted {
                previous,
                candidate,
                threshold,
            }
        }
    }

    pub fn evaluate(&self, previous: Option<&Snapshot>, candidate: &Snapshot) -> GuardDecision {
        self.evaluate_sizes(previous.map(Snapshot::len), candidate.len())
    }

    pub fn accept(&self, previous: Option<&Snapshot>, candidate: &Snapshot) -> bool {
        self.evaluate(previous, candidate).is_accepted()
    }

    /// Evaluate `candidate` against the store's current snapshot and, when
    /// accepted, install it as the new current snapshot.
    ///
    /// Callers must serialize calls to this; the refresh scheduler does so
    /// with its in-flight guard.
    pub fn admit(&self, store: &SnapshotStore, candidate: Snapshot) -> GuardDecision {
        let previous = store.current_snapshot();
        let decision = self.evaluate(previous.as_deref(), &candidate);

        match decision {
            GuardDecision::Rejected {
                previous,
                candidate,
                threshold,
            } => {
                warn!(
                    previous,
                    candidate,
                    threshold,
                    "Ignored location fetch since it likely has missing data"
                );
            }
            GuardDecision::Initial { .. } | GuardDecision::Accepted { .. } => {
                store.set_snapshot(candidate);
                info!(
                    locations = decision.candidate_size(),
                    "Dining location cache reloaded"
                );
            }
        }

        decision
    }
}

impl Default for CacheGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECORD_DROP)
    }
}
