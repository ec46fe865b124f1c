use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility.
#[derive(Clone, Default)]
pub struct Counters {
    pub ticks_applied: Arc<AtomicU64>,
    /// Timer fires that arrived after `stop()` and were discarded.
    pub ticks_stale: Arc<AtomicU64>,

    pub alerts_injected: Arc<AtomicU64>,
    pub zone_alert_bumps: Arc<AtomicU64>,
}

impl Counters {
    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }

    pub(crate) fn incr(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }
}
