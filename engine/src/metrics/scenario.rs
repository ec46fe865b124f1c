use serde::{Deserialize, Serialize};

use super::risk::RiskAssessment;
use crate::types::{RiskLevel, ScenarioKind, ScenarioMetrics};

/// One comparison-table row: a scenario at the chosen fleet size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub scenario: ScenarioKind,
    pub avg_throughput: f64,
    pub avg_dwell_sec: f64,
    pub sla_compliance_pct: f64,
    pub occupancy_pct: f64,
    pub risk: RiskLevel,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioInsight {
    MaxThroughput {
        scenario: ScenarioKind,
        veh_per_hr: f64,
    },
    BestSla {
        scenario: ScenarioKind,
        sla_compliance_pct: f64,
    },
    /// The highest-throughput scenario is not the lowest-risk one.
    Tradeoff {
        high_throughput: ScenarioKind,
        lower_risk: ScenarioKind,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub rows: Vec<ScenarioRow>,
    pub insights: Vec<ScenarioInsight>,
}

/// Compares `selected` scenarios at `vehicle_count`.
///
/// Scenarios without a record at that fleet size are skipped. Ties in the
/// insights keep the earliest row.
pub fn summarize_scenarios(
    scenarios: &[ScenarioMetrics],
    selected: &[ScenarioKind],
    vehicle_count: u32,
) -> ScenarioSummary {
    let rows: Vec<ScenarioRow> = selected
        .iter()
        .filter_map(|kind| {
            scenarios
                .iter()
                .find(|m| m.scenario == *kind && m.vehicle_count == vehicle_count)
        })
        .map(|m| ScenarioRow {
            scenario: m.scenario,
            avg_throughput: m.avg_throughput,
            avg_dwell_sec: m.avg_dwell_sec,
            sla_compliance_pct: m.sla_compliance_pct,
            occupancy_pct: m.occupancy_pct,
            risk: m.risk_level(),
        })
        .collect();

    let insights = derive_insights(&rows);
    ScenarioSummary { rows, insights }
}

fn derive_insights(rows: &[ScenarioRow]) -> Vec<ScenarioInsight> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let mut max_throughput = first;
    let mut best_sla = first;
    let mut lowest_risk = first;

    for row in &rows[1..] {
        if row.avg_throughput > max_throughput.avg_throughput {
            max_throughput = row;
        }
        if row.sla_compliance_pct > best_sla.sla_compliance_pct {
            best_sla = row;
        }
        if row.risk < lowest_risk.risk {
            lowest_risk = row;
        }
    }

    let mut out = vec![
        ScenarioInsight::MaxThroughput {
            scenario: max_throughput.scenario,
            veh_per_hr: max_throughput.avg_throughput,
        },
        ScenarioInsight::BestSla {
            scenario: best_sla.scenario,
            sla_compliance_pct: best_sla.sla_compliance_pct,
        },
    ];

    if max_throughput.scenario != lowest_risk.scenario {
        out.push(ScenarioInsight::Tradeoff {
            high_throughput: max_throughput.scenario,
            lower_risk: lowest_risk.scenario,
        });
    }

    out
}
