use serde::{Deserialize, Serialize};

use super::risk::RiskAssessment;
use crate::types::{RiskLevel, ZoneMetric};

/// Top-level KPI strip for a zone set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Mean dwell across zones (seconds).
    pub avg_dwell: f64,
    /// Mean vehicles per hour across zones.
    pub throughput: f64,
    /// Mean occupancy across zones (percent).
    pub occupancy: f64,
    /// Mean SLA compliance across zones (percent).
    pub sla_compliance: f64,
    /// Sum of unattended alerts across zones.
    pub unattended_alerts: u64,
    pub delay_risk: RiskLevel,
}

impl RiskAssessment for Kpis {
    fn avg_dwell_sec(&self) -> f64 {
        self.avg_dwell
    }

    fn occupancy_pct(&self) -> f64 {
        self.occupancy
    }

    fn sla_compliance_pct(&self) -> f64 {
        self.sla_compliance
    }
}

/// Aggregates a zone set into KPIs.
///
/// Means for every scalar except `unattended_alerts`, which is summed. An
/// empty set yields all zeros and `Low` risk rather than NaN.
pub fn aggregate_kpis(zones: &[ZoneMetric]) -> Kpis {
    if zones.is_empty() {
        return Kpis::default();
    }

    let n = zones.len() as f64;
    let mean = |f: fn(&ZoneMetric) -> f64| zones.iter().map(f).sum::<f64>() / n;

    let mut kpis = Kpis {
        avg_dwell: mean(|z| z.avg_dwell_sec),
        throughput: mean(|z| z.vehicles_per_hour),
        occupancy: mean(|z| z.occupancy_pct),
        sla_compliance: mean(|z| z.sla_compliance_pct),
        unattended_alerts: zones.iter().map(|z| u64::from(z.unattended_alerts)).sum(),
        delay_risk: RiskLevel::Low,
    };
    kpis.delay_risk = kpis.risk_level();
    kpis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::risk::{classify_risk, risk_score};
    use crate::types::{SLA_TARGET_SEC, ZoneName};

    #[test]
    fn empty_set_is_zero_and_low() {
        let k = aggregate_kpis(&[]);

        assert_eq!(k, Kpis::default());
        assert_eq!(k.delay_risk, RiskLevel::Low);
        assert!(!k.avg_dwell.is_nan());
    }

    #[test]
    fn means_and_sum() {
        let zones = vec![
            ZoneMetric::new(ZoneName::Pickup, 60.0, 40.0, 100.0, 90.0, 2),
            ZoneMetric::new(ZoneName::Dropoff, 80.0, 60.0, 140.0, 80.0, 3),
        ];
        let k = aggregate_kpis(&zones);

        assert_eq!(k.avg_dwell, 70.0);
        assert_eq!(k.occupancy, 50.0);
        assert_eq!(k.throughput, 120.0);
        assert_eq!(k.sla_compliance, 85.0);
        assert_eq!(k.unattended_alerts, 5);
        assert_eq!(
            k.delay_risk,
            classify_risk(risk_score(70.0, 50.0, 85.0, SLA_TARGET_SEC))
        );
    }

    #[test]
    fn congested_zones_score_high() {
        let zones = vec![ZoneMetric::new(ZoneName::Rideshare, 120.0, 95.0, 200.0, 70.0, 0)];
        // 0.667 + 0.285 + 0.06
        assert_eq!(aggregate_kpis(&zones).delay_risk, RiskLevel::High);
    }
}
