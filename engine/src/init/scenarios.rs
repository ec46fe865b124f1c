use crate::rng::SimRng;
use crate::types::{ScenarioKind, ScenarioMetrics, clamp_non_negative, clamp_pct};

/// Fleet size at which scenarios peak.
const PEAK_VEHICLES: u32 = 40;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Baseline {
    throughput: f64,
    dwell: f64,
    sla: f64,
    occupancy: f64,
}

fn baseline(kind: ScenarioKind, vehicles: u32) -> Baseline {
    let v = f64::from(vehicles);
    match kind {
        ScenarioKind::Baseline => Baseline {
            throughput: 130.0 + v * 0.35,
            dwell: 60.0,
            sla: 85.0,
            occupancy: 50.0,
        },
        ScenarioKind::OptimizedDispatch => Baseline {
            throughput: 140.0 + v * 0.4,
            dwell: 55.0,
            sla: 90.0,
            occupancy: 50.0,
        },
        ScenarioKind::AggressiveEnforcement => Baseline {
            throughput: 135.0 + v * 0.3,
            dwell: 50.0,
            sla: 92.0,
            occupancy: 45.0,
        },
        ScenarioKind::HighDemandEvent => Baseline {
            throughput: 145.0 + v * 0.5,
            dwell: 70.0,
            sla: 75.0,
            occupancy: 70.0,
        },
    }
}

/// Throughput multiplier: 1.1 at the peak fleet size, ramping up to it from
/// 0.95 and down from 1.05 on either side.
pub fn peak_factor(vehicles: u32) -> f64 {
    let v = f64::from(vehicles);
    let peak = f64::from(PEAK_VEHICLES);
    if vehicles == PEAK_VEHICLES {
        1.1
    } else if vehicles < PEAK_VEHICLES {
        0.95 + (v - 30.0) * 0.01
    } else {
        1.05 - (v - peak) * 0.01
    }
}

/// One record per (scenario, fleet size), scenario-major.
pub fn build_scenario_metrics(rng: &mut SimRng) -> Vec<ScenarioMetrics> {
    let mut out = Vec::with_capacity(ScenarioKind::ALL.len() * ScenarioKind::VEHICLE_COUNTS.len());

    for scenario in ScenarioKind::ALL {
        for vehicle_count in ScenarioKind::VEHICLE_COUNTS {
            let base = baseline(scenario, vehicle_count);

            let avg_throughput = base.throughput * peak_factor(vehicle_count) + rng.centered() * 5.0;
            let avg_dwell_sec = base.dwell + rng.centered() * 10.0;
            let sla_compliance_pct = base.sla + rng.centered() * 5.0;
            let occupancy_pct = base.occupancy + rng.centered() * 10.0;
            let std_dev = 2.0 + rng.next() * 3.0;

            out.push(ScenarioMetrics {
                scenario,
                vehicle_count,
                avg_throughput: clamp_non_negative(avg_throughput),
                avg_dwell_sec: clamp_non_negative(avg_dwell_sec),
                sla_compliance_pct: clamp_pct(sla_compliance_pct),
                occupancy_pct: clamp_pct(occupancy_pct),
                std_dev,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_factor_shape() {
        let f: Vec<f64> = ScenarioKind::VEHICLE_COUNTS
            .iter()
            .map(|v| peak_factor(*v))
            .collect();

        let expected = [0.95, 1.0, 1.1, 1.0, 0.95];
        for (got, want) in f.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
    }

    #[test]
    fn one_record_per_scenario_and_fleet_size() {
        let metrics = build_scenario_metrics(&mut SimRng::default());
        assert_eq!(metrics.len(), 20);

        for kind in ScenarioKind::ALL {
            let counts: Vec<u32> = metrics
                .iter()
                .filter(|m| m.scenario == kind)
                .map(|m| m.vehicle_count)
                .collect();
            assert_eq!(counts, ScenarioKind::VEHICLE_COUNTS.to_vec());
        }
    }

    #[test]
    fn noise_stays_within_half_width() {
        let metrics = build_scenario_metrics(&mut SimRng::new(77));

        for m in &metrics {
            let base = baseline(m.scenario, m.vehicle_count);
            let expected = base.throughput * peak_factor(m.vehicle_count);

            assert!((m.avg_throughput - expected).abs() <= 2.5);
            assert!((m.avg_dwell_sec - base.dwell).abs() <= 5.0);
            assert!((m.sla_compliance_pct - base.sla).abs() <= 2.5);
            assert!((m.occupancy_pct - base.occupancy).abs() <= 5.0);
            assert!((2.0..5.0).contains(&m.std_dev));
        }
    }
}
