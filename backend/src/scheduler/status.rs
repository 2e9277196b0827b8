//! Bookkeeping of refresh cycle results.
//!
//! Keeps the last outcome and a few counters so the health endpoint can
//! tell "no data yet" apart from "upstream keeps failing".

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use super::RefreshOutcome;

/// Summary of refresh activity since startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefreshStatus {
    /// Completed cycles, whatever their outcome (skipped triggers excluded)
    pub cycles: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub failed: u64,
    /// Failed cycles since the last accepted snapshot
    pub consecutive_failures: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_outcome: Option<RefreshOutcome>,
}

/// Shared, thread-safe refresh status.
#[derive(Clone, Default)]
pub struct RefreshTracker {
    status: Arc<RwLock<RefreshStatus>>,
}

impl RefreshTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one cycle.
    pub fn record(&self, outcome: &RefreshOutcome) {
        if matches!(outcome, RefreshOutcome::Skipped) {
            return;
        }

        let now = Utc::now();
        let mut status = self.status.write();
        status.cycles += 1;
        status.last_attempt_at = Some(now);
        match outcome {
            RefreshOutcome::Accepted { .. } => {
                status.accepted += 1;
                status.consecutive_failures = 0;
                status.last_success_at = Some(now);
            }
            RefreshOutcome::Rejected { .. } => status.rejected += 1,
            RefreshOutcome::Failed { .. } => {
                status.failed += 1;
                status.consecutive_failures += 1;
            }
            RefreshOutcome::Skipped => {}
        }
        status.last_outcome = Some(outcome.clone());
    }

    pub fn status(&self) -> RefreshStatus {
        self.status.read().clone()
    }
}
