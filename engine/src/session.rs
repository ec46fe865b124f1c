//! One simulation session: the engine's public entry point.
//!
//! A session owns the generator (through the scheduler), seeds it, builds the
//! tick-0 snapshot and exposes the read side the dashboard renders from. Every
//! query reads a single published snapshot, so one call never mixes ticks.

use std::sync::Arc;
use std::time::Duration;

use common::logger::{TraceId, root_span};
use serde::Serialize;
use tracing::{Span, info};

use crate::config::{AppConfig, SimConfig};
use crate::error::EngineError;
use crate::filter::{ZoneSelection, filter_alerts, filter_zones};
use crate::init::initialize;
use crate::metrics::{
    Counters, CurbPolicy, DwellBin, Kpis, SlaBreakdown, ScenarioSummary, adjust_blocks,
    aggregate_kpis, dwell_histogram, sla_breakdown, summarize_scenarios,
};
use crate::rng::SimRng;
use crate::scheduler::{PerturbationScheduler, SchedulerState};
use crate::snapshot::Snapshot;
use crate::time::{Clock, SystemClock};
use crate::types::{
    AlertItem, CurbUseBlock, ScenarioKind, ScenarioMetrics, TimeRange, TimeSeriesPoint,
    ZoneMetric,
};

/// Everything the dashboard renders for one tick.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardView {
    pub session_id: String,
    pub tick: u64,
    pub ts_ms: u64,
    pub config: SimConfig,
    /// Over the selected zones.
    pub kpis: Kpis,
    /// Over the selected zones.
    pub sla: SlaBreakdown,
    pub zones: Vec<ZoneMetric>,
    pub all_zones: Vec<ZoneMetric>,
    pub alerts: Vec<AlertItem>,
    pub time_series: Vec<TimeSeriesPoint>,
}

pub struct Session {
    trace_id: TraceId,
    seed: u32,
    clock: Arc<dyn Clock>,
    scheduler: PerturbationScheduler,
    span: Span,
}

impl Session {
    /// Wall-clock session from application config.
    pub fn new(app: &AppConfig) -> Self {
        Self::with_clock(
            app.seed,
            app.sim.clone(),
            app.tick_interval,
            Arc::new(SystemClock),
        )
    }

    /// Builds the initial snapshot from `seed` at `clock.now_ms()` and hands
    /// it, with the generator that follows it, to an idle scheduler.
    pub fn with_clock(
        seed: u32,
        sim: SimConfig,
        tick_interval: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let trace_id = TraceId::default();
        let span = root_span("simulation_session", &trace_id);
        let guard = span.enter();

        let (initial, rng) = initialize(seed, &sim, clock.now_ms());

        info!(
            seed,
            time_range = %sim.time_range,
            demo_mode = sim.demo_mode,
            every_ms = tick_interval.as_millis() as u64,
            "session initialized"
        );

        let scheduler = PerturbationScheduler::new(
            rng,
            sim,
            initial,
            Arc::clone(&clock),
            tick_interval,
            Counters::default(),
        );

        drop(guard);
        Self {
            trace_id,
            seed,
            clock,
            scheduler,
            span,
        }
    }

    pub fn id(&self) -> &TraceId {
        &self.trace_id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    // ---- lifecycle ------------------------------------------------------

    /// Starts ticking with the current configuration.
    pub fn start(&self) -> Result<(), EngineError> {
        let _enter = self.span.enter();
        self.scheduler.start(self.scheduler.config())
    }

    pub fn stop(&self) {
        let _enter = self.span.enter();
        self.scheduler.stop();
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Applies one tick now. See [`PerturbationScheduler::step`].
    pub fn step(&self) -> Arc<Snapshot> {
        let _enter = self.span.enter();
        let snap = self.scheduler.step();
        self.span.record("tick", snap.tick);
        snap
    }

    pub fn counters(&self) -> &Counters {
        self.scheduler.counters()
    }

    // ---- configuration --------------------------------------------------

    pub fn config(&self) -> SimConfig {
        self.scheduler.config()
    }

    pub fn set_time_range(&self, range: TimeRange) -> SimConfig {
        let _enter = self.span.enter();
        self.scheduler.update_config(|c| c.time_range = range)
    }

    pub fn set_selected_zones(&self, selection: ZoneSelection) -> SimConfig {
        let _enter = self.span.enter();
        self.scheduler.update_config(|c| c.selected_zones = selection)
    }

    pub fn set_demo_mode(&self, on: bool) -> SimConfig {
        let _enter = self.span.enter();
        self.scheduler.update_config(|c| c.demo_mode = on)
    }

    // ---- queries --------------------------------------------------------

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.scheduler.snapshot()
    }

    /// Zones narrowed to the current selection.
    pub fn zones(&self) -> Vec<ZoneMetric> {
        filter_zones(&self.snapshot().zones, &self.config().selected_zones)
    }

    pub fn all_zones(&self) -> Vec<ZoneMetric> {
        self.snapshot().zones.clone()
    }

    /// Oldest first.
    pub fn time_series(&self) -> Vec<TimeSeriesPoint> {
        self.snapshot().series.to_vec()
    }

    /// Alerts for the selected zones, newest first.
    pub fn alerts(&self) -> Vec<AlertItem> {
        filter_alerts(&self.snapshot().alerts, &self.config().selected_zones)
    }

    pub fn curb_blocks(&self) -> Arc<[CurbUseBlock]> {
        Arc::clone(&self.snapshot().curb_blocks)
    }

    /// Curb blocks as they would look under `policy`.
    pub fn curb_blocks_under(&self, policy: CurbPolicy) -> Vec<CurbUseBlock> {
        adjust_blocks(&self.snapshot().curb_blocks, policy)
    }

    pub fn scenarios(&self) -> Arc<[ScenarioMetrics]> {
        Arc::clone(&self.snapshot().scenarios)
    }

    pub fn scenario_summary(
        &self,
        selected: &[ScenarioKind],
        vehicle_count: u32,
    ) -> ScenarioSummary {
        summarize_scenarios(&self.snapshot().scenarios, selected, vehicle_count)
    }

    /// KPIs over the selected zones.
    pub fn kpis(&self) -> Kpis {
        aggregate_kpis(&self.zones())
    }

    /// Dwell distribution for the selected zones.
    ///
    /// Drawn from a side generator seeded from the session seed and the tick,
    /// so it is stable within a tick and never advances the tick stream.
    pub fn dwell_histogram(&self) -> Vec<DwellBin> {
        let snap = self.snapshot();
        let zones = filter_zones(&snap.zones, &self.config().selected_zones);
        let mut side = SimRng::new(self.seed.wrapping_add(snap.tick as u32));
        dwell_histogram(&zones, &mut side)
    }

    /// Builds the dashboard view from one snapshot.
    pub fn dashboard(&self) -> DashboardView {
        let snap = self.snapshot();
        let config = self.config();

        let zones = filter_zones(&snap.zones, &config.selected_zones);
        let alerts = filter_alerts(&snap.alerts, &config.selected_zones);

        DashboardView {
            session_id: self.trace_id.to_string(),
            tick: snap.tick,
            ts_ms: snap.ts_ms,
            kpis: aggregate_kpis(&zones),
            sla: sla_breakdown(&zones),
            zones,
            all_zones: snap.zones.clone(),
            alerts,
            time_series: snap.series.to_vec(),
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use crate::types::ZoneName;
    use tracing_test::traced_test;

    const NOW: u64 = 1_700_000_000_000;

    fn session(sim: SimConfig) -> (Session, ManualClock) {
        let clock = ManualClock::new(NOW);
        let s = Session::with_clock(
            12345,
            sim,
            Duration::from_secs(5),
            Arc::new(clock.clone()),
        );
        (s, clock)
    }

    #[test]
    fn same_seed_same_trajectory() {
        let (a, ca) = session(SimConfig::default());
        let (b, cb) = session(SimConfig::default());

        for _ in 0..25 {
            ca.advance(5_000);
            cb.advance(5_000);
            a.step();
            b.step();
        }

        assert_eq!(*a.snapshot(), *b.snapshot());
        assert_ne!(a.id().as_str(), b.id().as_str());
    }

    #[test]
    fn selection_narrows_reads_but_not_state() {
        let (s, _) = session(SimConfig::default());
        assert_eq!(s.zones().len(), 5);

        s.set_selected_zones(ZoneSelection::only([ZoneName::Pickup, ZoneName::Ada]));

        let names: Vec<_> = s.zones().iter().map(|z| z.name).collect();
        assert_eq!(names, vec![ZoneName::Pickup, ZoneName::Ada]);
        assert_eq!(s.all_zones().len(), 5);
        assert!(
            s.alerts()
                .iter()
                .all(|a| matches!(a.zone, ZoneName::Pickup | ZoneName::Ada))
        );
    }

    #[test]
    fn kpis_cover_only_selected_zones() {
        let (s, _) = session(SimConfig::default());
        s.set_selected_zones(ZoneSelection::only([ZoneName::Shuttle]));

        let shuttle = s.zones()[0].clone();
        let kpis = s.kpis();

        assert!((kpis.avg_dwell - shuttle.avg_dwell_sec).abs() < 1e-9);
        assert_eq!(kpis.unattended_alerts, u64::from(shuttle.unattended_alerts));
    }

    #[test]
    fn dashboard_reads_one_snapshot() {
        let (s, clock) = session(SimConfig::default());
        clock.advance(5_000);
        s.step();

        let view = s.dashboard();
        assert_eq!(view.tick, 1);
        assert_eq!(view.ts_ms, NOW + 5_000);
        assert_eq!(view.all_zones, s.snapshot().zones);
        assert_eq!(view.time_series.len(), 16);
        assert_eq!(view.session_id, s.id().to_string());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["config"]["time_range"], "4h");
        assert!(json["zones"].as_array().is_some_and(|z| z.len() == 5));
    }

    #[test]
    fn histogram_is_stable_within_a_tick() {
        let (s, _) = session(SimConfig::default());
        let before = s.snapshot();

        assert_eq!(s.dwell_histogram(), s.dwell_histogram());
        // the side generator never touches the tick stream
        assert_eq!(*s.snapshot(), *before);
    }

    #[test]
    fn policy_view_leaves_session_blocks_alone() {
        let (s, _) = session(SimConfig::default());
        let original = s.curb_blocks();

        let detour = s.curb_blocks_under(CurbPolicy::ConstructionDetour);

        assert_eq!(detour.len(), original.len());
        assert!(Arc::ptr_eq(&original, &s.curb_blocks()));
    }

    #[traced_test]
    #[test]
    fn config_changes_are_logged() {
        let (s, _) = session(SimConfig::default());
        s.set_demo_mode(true);

        assert!(s.config().demo_mode);
        assert!(logs_contain("simulation config updated"));
    }
}
