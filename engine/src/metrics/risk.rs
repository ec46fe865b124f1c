use crate::types::{RiskLevel, SLA_TARGET_SEC, ScenarioMetrics};

/// Lower bound (inclusive) of the High tier.
pub const HIGH_RISK_THRESHOLD: f64 = 0.85;

/// Lower bound (inclusive) of the Med tier.
pub const MED_RISK_THRESHOLD: f64 = 0.6;

const DWELL_WEIGHT: f64 = 0.5;
const OCCUPANCY_WEIGHT: f64 = 0.3;
const BREACH_WEIGHT: f64 = 0.2;

/// Passenger service delay risk score.
///
/// `score = (dwell / target) * 0.5 + (occupancy / 100) * 0.3 + ((100 - sla) / 100) * 0.2`
pub fn risk_score(
    avg_dwell_sec: f64,
    occupancy_pct: f64,
    sla_compliance_pct: f64,
    sla_target_sec: f64,
) -> f64 {
    let breach_rate_pct = 100.0 - sla_compliance_pct;
    (avg_dwell_sec / sla_target_sec) * DWELL_WEIGHT
        + (occupancy_pct / 100.0) * OCCUPANCY_WEIGHT
        + (breach_rate_pct / 100.0) * BREACH_WEIGHT
}

/// Maps a score to its tier. Each tier includes its lower bound.
pub fn classify_risk(score: f64) -> RiskLevel {
    if score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score >= MED_RISK_THRESHOLD {
        RiskLevel::Med
    } else {
        RiskLevel::Low
    }
}

/// Anything that carries the three risk inputs.
///
/// Zone aggregates and scenario records both go through this, so they are
/// scored by the same formula against the same SLA target.
pub trait RiskAssessment {
    fn avg_dwell_sec(&self) -> f64;
    fn occupancy_pct(&self) -> f64;
    fn sla_compliance_pct(&self) -> f64;

    fn risk_score(&self) -> f64 {
        risk_score(
            self.avg_dwell_sec(),
            self.occupancy_pct(),
            self.sla_compliance_pct(),
            SLA_TARGET_SEC,
        )
    }

    fn risk_level(&self) -> RiskLevel {
        classify_risk(self.risk_score())
    }
}

impl RiskAssessment for ScenarioMetrics {
    fn avg_dwell_sec(&self) -> f64 {
        self.avg_dwell_sec
    }

    fn occupancy_pct(&self) -> f64 {
        self.occupancy_pct
    }

    fn sla_compliance_pct(&self) -> f64 {
        self.sla_compliance_pct
    }
}
