//! Perturbation scheduler.
//!
//! Responsibilities:
//! - Own the repeating tick timer (Idle <-> Running).
//! - Apply one perturbation per tick and publish the result atomically.
//! - Apply configuration changes between ticks.
//!
//! Non-responsibilities:
//! - Building the initial snapshot (see `init`).
//! - Filtering or aggregating for readers (see `filter`, `metrics`).
//!
//! Ordering/liveness properties:
//! - A tick holds the core mutex from reading the previous snapshot until
//!   the next one is published, so ticks never overlap and readers never see
//!   a partial update.
//! - `stop()` takes the same mutex and bumps the run generation: once it
//!   returns, no timer fire can apply another tick.
//! - `stop()` on an idle scheduler is a no-op.

use std::sync::Arc;
use std::time::Duration;

use common::logger::{child_span, warn_if_slow};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{Instrument, Span, debug, info, instrument};

use super::perturb::perturb;
use super::state::SimCore;
use crate::config::SimConfig;
use crate::error::EngineError;
use crate::metrics::Counters;
use crate::rng::SimRng;
use crate::snapshot::{Snapshot, SnapshotStore};
use crate::time::Clock;

/// Ticks slower than this are reported on the `performance` target.
const SLOW_TICK: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// State shared between the scheduler handle and its timer task.
struct Shared {
    core: Mutex<SimCore>,
    store: SnapshotStore,
    clock: Arc<dyn Clock>,
    counters: Counters,
}

impl Shared {
    /// Applies one tick. Caller holds the core lock.
    #[instrument(skip_all, level = "debug", target = "scheduler")]
    fn apply_tick(&self, core: &mut SimCore) -> Arc<Snapshot> {
        let prev = self.store.current();
        let now_ms = self.clock.now_ms();

        let (next, outcome) = warn_if_slow("perturbation_tick", SLOW_TICK, || {
            perturb(&prev, &mut core.rng, &core.config, now_ms)
        });

        Counters::incr(&self.counters.ticks_applied, 1);
        Counters::incr(
            &self.counters.zone_alert_bumps,
            u64::from(outcome.zone_alert_bumps),
        );
        if outcome.alert_injected {
            Counters::incr(&self.counters.alerts_injected, 1);
        }

        debug!(
            tick = next.tick,
            points = next.series.len(),
            alerts = next.alerts.len(),
            alert_injected = outcome.alert_injected,
            zone_alert_bumps = outcome.zone_alert_bumps,
            demo_mode = core.config.demo_mode,
            "tick applied"
        );

        self.store.publish(next)
    }

    /// Timer entry point. Returns false once `generation` is stale.
    fn tick_if_current(&self, generation: u64) -> bool {
        let mut core = self.core.lock();
        if !core.is_current(generation) {
            Counters::incr(&self.counters.ticks_stale, 1);
            debug!(generation, "discarding tick from stopped run");
            return false;
        }
        self.apply_tick(&mut core);
        true
    }

    /// Re-bounds the published series to the configured range. Caller holds
    /// the core lock.
    fn rebound_series(&self, core: &SimCore) {
        let bound = core.config.time_range.window_bound();
        let prev = self.store.current();
        if prev.series.bound() == bound {
            return;
        }

        let mut next = (*prev).clone();
        next.series.set_bound(bound);
        debug!(bound, points = next.series.len(), "time series re-bounded");
        self.store.publish(next);
    }
}

async fn run_loop(shared: Arc<Shared>, generation: u64, every: Duration) {
    // First fire is one full period after start, like a browser interval.
    let mut ticker = interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        if !shared.tick_if_current(generation) {
            break;
        }
    }

    debug!(generation, "perturbation loop exited");
}

/// Drives the simulation forward on a fixed cadence.
///
/// The snapshot is only ever replaced through this type. Dropping it stops
/// the timer.
pub struct PerturbationScheduler {
    shared: Arc<Shared>,
    tick_interval: Duration,
    task: Mutex<Option<JoinHandle<()>>>,
    span: Span,
}

impl PerturbationScheduler {
    /// `rng` must be the generator returned alongside `initial` by
    /// [`initialize`](crate::init::initialize); ticks continue that stream.
    pub fn new(
        rng: SimRng,
        config: SimConfig,
        initial: Snapshot,
        clock: Arc<dyn Clock>,
        tick_interval: Duration,
        counters: Counters,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(SimCore::new(rng, config)),
                store: SnapshotStore::new(initial),
                clock,
                counters,
            }),
            tick_interval,
            task: Mutex::new(None),
            span: Span::current(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.shared.core.lock().running {
            SchedulerState::Running
        } else {
            SchedulerState::Idle
        }
    }

    /// Idle -> Running: applies `config` and arms the repeating tick.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self, config: SimConfig) -> Result<(), EngineError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::NoRuntime)?;

        let generation = {
            let mut core = self.shared.core.lock();
            if core.running {
                return Err(EngineError::AlreadyRunning);
            }
            core.config = config;
            self.shared.rebound_series(&core);
            core.running = true;
            core.generation += 1;
            core.generation
        };

        let loop_span = self.span.in_scope(|| child_span("perturbation_loop"));
        let handle = runtime.spawn(
            run_loop(Arc::clone(&self.shared), generation, self.tick_interval)
                .instrument(loop_span),
        );

        if let Some(old) = self.task.lock().replace(handle) {
            old.abort();
        }

        info!(
            generation,
            every_ms = self.tick_interval.as_millis() as u64,
            "perturbation scheduler started"
        );
        Ok(())
    }

    /// Running -> Idle. Idempotent.
    ///
    /// Once this returns no further tick is applied, even if the timer task
    /// has already been woken.
    pub fn stop(&self) {
        let generation = {
            let mut core = self.shared.core.lock();
            if !core.running {
                debug!("stop on idle scheduler ignored");
                return;
            }
            core.running = false;
            core.generation += 1;
            core.generation
        };

        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }

        info!(generation, "perturbation scheduler stopped");
    }

    /// Applies one tick immediately, regardless of the timer.
    ///
    /// Serialized with timer ticks. Useful for replay and for driving a
    /// session without a runtime.
    pub fn step(&self) -> Arc<Snapshot> {
        let mut core = self.shared.core.lock();
        self.shared.apply_tick(&mut core)
    }

    pub fn config(&self) -> SimConfig {
        self.shared.core.lock().config.clone()
    }

    /// Mutates the configuration between ticks.
    ///
    /// A time-range change re-bounds the series right away (shrinking evicts
    /// the oldest points; growing keeps everything and lets ticks fill in).
    /// Demo mode and zone selection take effect on the next read or tick.
    pub fn update_config(&self, f: impl FnOnce(&mut SimConfig)) -> SimConfig {
        let mut core = self.shared.core.lock();
        let before = core.config.clone();
        f(&mut core.config);

        if core.config.time_range != before.time_range {
            self.shared.rebound_series(&core);
        }
        if core.config != before {
            info!(
                time_range = %core.config.time_range,
                demo_mode = core.config.demo_mode,
                all_zones = core.config.selected_zones.is_all(),
                "simulation config updated"
            );
        }

        core.config.clone()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.shared.store.current()
    }

    pub fn counters(&self) -> &Counters {
        &self.shared.counters
    }
}

impl Drop for PerturbationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
