//! Derived metrics.
//!
//! Everything here is a pure function of its inputs: no stored state, no
//! clock. Risk scoring lives in [`risk`] and is the only place the delay-risk
//! formula and its thresholds are written down; every other module calls it.

pub mod counters;
pub mod curb;
pub mod distribution;
pub mod kpi;
pub mod risk;
pub mod scenario;

pub use counters::Counters;
pub use curb::{CurbPolicy, adjust_blocks};
pub use distribution::{DwellBin, SlaBreakdown, dwell_histogram, sla_breakdown};
pub use kpi::{Kpis, aggregate_kpis};
pub use risk::{RiskAssessment, classify_risk, risk_score};
pub use scenario::{ScenarioInsight, ScenarioRow, ScenarioSummary, summarize_scenarios};
