use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::{AlertItem, CurbUseBlock, ScenarioMetrics, ZoneMetric};
use crate::window::SeriesWindow;

/// Immutable view of the whole simulation at one tick.
///
/// Curb blocks and scenario metrics never change during a session, so they are
/// shared between successive snapshots instead of copied.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Ticks applied since initialization.
    pub tick: u64,
    /// Wall-clock time the snapshot was produced (ms since epoch).
    pub ts_ms: u64,
    pub zones: Vec<ZoneMetric>,
    pub series: SeriesWindow,
    /// Newest first.
    pub alerts: Vec<AlertItem>,
    pub curb_blocks: Arc<[CurbUseBlock]>,
    pub scenarios: Arc<[ScenarioMetrics]>,
}

/// Holder of the current snapshot.
///
/// Writers publish a complete replacement; readers clone the `Arc` and keep a
/// consistent view for as long as they hold it. Last write wins.
#[derive(Clone)]
pub struct SnapshotStore {
    inner: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotStore {
    pub fn new(initial: Snapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    /// Replace the current snapshot, returning the published handle.
    pub fn publish(&self, next: Snapshot) -> Arc<Snapshot> {
        let next = Arc::new(next);
        *self.inner.write() = Arc::clone(&next);
        next
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.inner.read())
    }
}
