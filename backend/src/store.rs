//! Process-wide holder of the current snapshot.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::models::Snapshot;

/// Holds the currently accepted [`Snapshot`].
///
/// Replacement swaps the whole snapshot pointer, so readers either see the
/// old record set or the new one and never block the writer. A reader keeps
/// its `Arc<Snapshot>` for as long as it needs; later replacements do not
/// touch it.
///
/// Clones share the same underlying slot.
#[derive(Clone)]
pub struct SnapshotStore {
    current: Arc<ArcSwapOption<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self {
            current: Arc::new(ArcSwapOption::empty()),
        }
    }

    /// The accepted snapshot, or `None` before the first successful fetch.
    pub fn current_snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    /// Replace the current snapshot, returning the one it superseded.
    ///
    /// Only the cache guard writes through here.
    pub(crate) fn set_snapshot(&self, snapshot: Snapshot) -> Option<Arc<Snapshot>> {
        self.current.swap(Some(Arc::new(snapshot)))
    }

    /// Whether any snapshot has been accepted yet.
    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }

    pub fn len(&self) -> usize {
        self.current_snapshot()
            .map_or(0, |snapshot| snapshot.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
