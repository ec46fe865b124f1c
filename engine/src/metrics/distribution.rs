use serde::{Deserialize, Serialize};

use crate::rng::SimRng;
use crate::types::ZoneMetric;

/// Vehicles seen in a 15 minute window at a zone's hourly rate.
fn vehicles_in_window(zone: &ZoneMetric) -> u64 {
    (zone.vehicles_per_hour / 4.0).floor() as u64
}

/// Vehicles within vs. past the SLA target, estimated from zone rates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlaBreakdown {
    pub within: u64,
    pub breached: u64,
    /// Share of vehicles within SLA; 0 when there are no vehicles.
    pub within_pct: f64,
}

pub fn sla_breakdown(zones: &[ZoneMetric]) -> SlaBreakdown {
    let mut within = 0u64;
    let mut breached = 0u64;

    for zone in zones {
        let vehicles = vehicles_in_window(zone);
        let ok = (vehicles as f64 * zone.sla_compliance_pct / 100.0).floor() as u64;
        within += ok;
        breached += vehicles - ok.min(vehicles);
    }

    let total = within + breached;
    let within_pct = if total > 0 {
        within as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    SlaBreakdown {
        within,
        breached,
        within_pct,
    }
}

/// One histogram bucket. `max_sec` is inclusive; `None` is open-ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DwellBin {
    pub label: &'static str,
    pub max_sec: Option<f64>,
    pub count: u64,
}

const BIN_EDGES: [(&str, Option<f64>); 7] = [
    ("0-30s", Some(30.0)),
    ("31-60s", Some(60.0)),
    ("61-90s", Some(90.0)),
    ("91-120s", Some(120.0)),
    ("121-180s", Some(180.0)),
    ("181-300s", Some(300.0)),
    ("300s+", None),
];

/// Synthetic dwell distribution.
///
/// Each zone contributes one sample per vehicle in the window, spread
/// uniformly +/-20s around its average dwell. Samples land in the first bin
/// whose upper edge they do not exceed; negative samples are dropped.
pub fn dwell_histogram(zones: &[ZoneMetric], rng: &mut SimRng) -> Vec<DwellBin> {
    let mut bins: Vec<DwellBin> = BIN_EDGES
        .iter()
        .map(|&(label, max_sec)| DwellBin {
            label,
            max_sec,
            count: 0,
        })
        .collect();

    for zone in zones {
        for _ in 0..vehicles_in_window(zone) {
            let dwell = zone.avg_dwell_sec + rng.centered() * 40.0;
            if dwell < 0.0 {
                continue;
            }
            if let Some(bin) = bins
                .iter_mut()
                .find(|b| b.max_sec.is_none_or(|max| dwell <= max))
            {
                bin.count += 1;
            }
        }
    }

    bins
}
