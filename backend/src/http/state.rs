//! Application state for the HTTP server.

use std::sync::Arc;

use crate::query::{QueryEngine, TimeParamPolicy};
use crate::scheduler::RefreshScheduler;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read side over the scheduler's snapshot store
    pub query: QueryEngine,
    /// Used for health reporting only; handlers never trigger a refresh
    pub scheduler: Arc<RefreshScheduler>,
    pub time_params: TimeParamPolicy,
}

impl AppState {
    /// Create a new application state around a scheduler.
    pub fn new(scheduler: Arc<RefreshScheduler>, time_params: TimeParamPolicy) -> Self {
        Self {
            query: QueryEngine::new(scheduler.store().clone()),
            scheduler,
            time_params,
        }
    }
}
