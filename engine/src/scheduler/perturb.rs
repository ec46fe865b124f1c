//! One perturbation tick as a pure function.
//!
//! Given the previous snapshot, the generator and the configuration, produce
//! the next snapshot. The timer loop only decides *when* this runs.

use tracing::trace;

use crate::config::SimConfig;
use crate::init::alerts::{MAX_ALERTS, draw_alert, sort_newest_first};
use crate::init::series::{sample_point, wall_clock_phase};
use crate::rng::SimRng;
use crate::snapshot::Snapshot;
use crate::types::{ZoneMetric, clamp_pct};

/// Floor for a zone's average dwell after a step.
pub const MIN_DWELL_SEC: f64 = 20.0;

/// Floor for a zone's throughput after a step.
pub const MIN_THROUGHPUT_VPH: f64 = 50.0;

/// Chance per tick that a zone's unattended alert count goes up.
pub const ZONE_ALERT_PROBABILITY: f64 = 0.1;

/// What a tick did besides the random walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub alert_injected: bool,
    pub zone_alert_bumps: u32,
}

/// Random-walk one zone in place. Returns whether its alert count went up.
///
/// All four metrics move by the same zero-centred draw scaled by
/// `volatility`, with per-metric gains (dwell 5, occupancy 3, throughput 5,
/// SLA 2). Derived fields are recomputed from the clamped values.
pub fn step_zone(zone: &mut ZoneMetric, rng: &mut SimRng, config: &SimConfig) -> bool {
    let change = rng.centered() * config.volatility();

    zone.avg_dwell_sec = (zone.avg_dwell_sec + change * 5.0).max(MIN_DWELL_SEC);
    zone.occupancy_pct = clamp_pct(zone.occupancy_pct + change * 3.0);
    zone.vehicles_per_hour = (zone.vehicles_per_hour + change * 5.0).max(MIN_THROUGHPUT_VPH);
    zone.sla_compliance_pct = clamp_pct(zone.sla_compliance_pct + change * 2.0);

    let bumped = rng.chance(ZONE_ALERT_PROBABILITY);
    if bumped {
        zone.unattended_alerts = zone.unattended_alerts.saturating_add(config.alert_bump());
    }

    zone.refresh_derived();
    bumped
}

/// Produces the snapshot that follows `prev`.
///
/// Order of draws: every zone, then the new series sample, then the alert
/// roll (and the alert body if it fires). Keeping this order fixed is what
/// makes trajectories replayable from a seed.
pub fn perturb(
    prev: &Snapshot,
    rng: &mut SimRng,
    config: &SimConfig,
    now_ms: u64,
) -> (Snapshot, TickOutcome) {
    let tick = prev.tick + 1;
    let mut outcome = TickOutcome::default();

    let mut zones = prev.zones.clone();
    for zone in &mut zones {
        if step_zone(zone, rng, config) {
            outcome.zone_alert_bumps += 1;
        }
    }

    let mut series = prev.series.clone();
    series.set_bound(config.time_range.window_bound());
    series.push(sample_point(rng, now_ms, wall_clock_phase(now_ms)));

    let mut alerts = prev.alerts.clone();
    if rng.chance(config.alert_probability()) {
        let alert = draw_alert(rng, format!("alert-t{tick}"), now_ms);
        trace!(alert_id = %alert.id, zone = %alert.zone, "alert injected");
        alerts.insert(0, alert);
        outcome.alert_injected = true;
    }
    sort_newest_first(&mut alerts);
    alerts.truncate(MAX_ALERTS);

    let next = Snapshot {
        tick,
        ts_ms: now_ms,
        zones,
        series,
        alerts,
        curb_blocks: prev.curb_blocks.clone(),
        scenarios: prev.scenarios.clone(),
    };

    (next, outcome)
}
