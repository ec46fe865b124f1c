//! Initial state builders.
//!
//! One builder per entity family. Each draws only from the generator it is
//! handed, so the output is a pure function of the generator's stream
//! position, the configuration and `now_ms`.

pub mod alerts;
pub mod curb;
pub mod scenarios;
pub mod series;
pub mod zones;

use tracing::{debug, instrument};

use crate::config::SimConfig;
use crate::rng::SimRng;
use crate::snapshot::Snapshot;

pub use alerts::build_alerts;
pub use curb::build_curb_blocks;
pub use scenarios::build_scenario_metrics;
pub use series::build_time_series;
pub use zones::build_zones;

/// Builds the tick-0 snapshot.
///
/// The generator is reset to `seed` before every builder, so each entity
/// family depends on the seed alone and not on how many draws the families
/// before it took. Returns the snapshot together with the generator as the
/// last builder left it; ticks continue from there.
#[instrument(skip(config), target = "init", fields(time_range = %config.time_range))]
pub fn initialize(seed: u32, config: &SimConfig, now_ms: u64) -> (Snapshot, SimRng) {
    let mut rng = SimRng::new(seed);
    let zones = build_zones(&mut rng);

    rng.reset(seed);
    let series = build_time_series(&mut rng, config.time_range, now_ms);

    rng.reset(seed);
    let alerts = build_alerts(&mut rng, now_ms);

    rng.reset(seed);
    let curb_blocks = build_curb_blocks(&mut rng);

    rng.reset(seed);
    let scenarios = build_scenario_metrics(&mut rng);

    debug!(
        zones = zones.len(),
        points = series.len(),
        alerts = alerts.len(),
        blocks = curb_blocks.len(),
        scenarios = scenarios.len(),
        "initial snapshot built"
    );

    let snapshot = Snapshot {
        tick: 0,
        ts_ms: now_ms,
        zones,
        series,
        alerts,
        curb_blocks: curb_blocks.into(),
        scenarios: scenarios.into(),
    };
    (snapshot, rng)
}
