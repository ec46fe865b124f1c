use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// SLA dwell target in seconds.
pub const SLA_TARGET_SEC: f64 = 90.0;

/// Clamp a percent-valued field into `[0, 100]`.
pub fn clamp_pct(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

/// Clamp a duration/count-valued field to be non-negative.
pub fn clamp_non_negative(v: f64) -> f64 {
    v.max(0.0)
}

// =========================
// Zones
// =========================

/// Operational curb zone category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoneName {
    Pickup,
    Dropoff,
    #[serde(rename = "ADA")]
    Ada,
    Shuttle,
    Rideshare,
}

impl ZoneName {
    /// All zones in index order; a zone's index is its position here.
    pub const ALL: [ZoneName; 5] = [
        ZoneName::Pickup,
        ZoneName::Dropoff,
        ZoneName::Ada,
        ZoneName::Shuttle,
        ZoneName::Rideshare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneName::Pickup => "Pickup",
            ZoneName::Dropoff => "Dropoff",
            ZoneName::Ada => "ADA",
            ZoneName::Shuttle => "Shuttle",
            ZoneName::Rideshare => "Rideshare",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            ZoneName::Pickup => 0,
            ZoneName::Dropoff => 1,
            ZoneName::Ada => 2,
            ZoneName::Shuttle => 3,
            ZoneName::Rideshare => 4,
        }
    }

    /// Stable zone identity, `zone-<index>`.
    pub fn zone_id(&self) -> String {
        format!("zone-{}", self.index())
    }

    /// Case-insensitive lookup; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|z| z.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ZoneName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaStatus {
    Within,
    Approaching,
    Breach,
}

impl SlaStatus {
    /// breach below 80%, approaching below 90%, otherwise within.
    pub fn from_compliance(sla_compliance_pct: f64) -> Self {
        if sla_compliance_pct < 80.0 {
            SlaStatus::Breach
        } else if sla_compliance_pct < 90.0 {
            SlaStatus::Approaching
        } else {
            SlaStatus::Within
        }
    }
}

/// Live per-zone metrics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneMetric {
    pub id: String,
    pub name: ZoneName,
    pub avg_dwell_sec: f64,
    pub occupancy_pct: f64,
    pub vehicles_per_hour: f64,
    pub sla_compliance_pct: f64,
    pub unattended_alerts: u32,
    pub sla_status: SlaStatus,
    pub current_vehicles: u32,
}

impl ZoneMetric {
    /// Builds a zone from raw values, clamping them and deriving the
    /// status and vehicle count from the clamped result.
    pub fn new(
        name: ZoneName,
        avg_dwell_sec: f64,
        occupancy_pct: f64,
        vehicles_per_hour: f64,
        sla_compliance_pct: f64,
        unattended_alerts: u32,
    ) -> Self {
        let mut z = Self {
            id: name.zone_id(),
            name,
            avg_dwell_sec: clamp_non_negative(avg_dwell_sec),
            occupancy_pct: clamp_pct(occupancy_pct),
            vehicles_per_hour: clamp_non_negative(vehicles_per_hour),
            sla_compliance_pct: clamp_pct(sla_compliance_pct),
            unattended_alerts,
            sla_status: SlaStatus::Within,
            current_vehicles: 0,
        };
        z.refresh_derived();
        z
    }

    /// Recomputes `sla_status` and `current_vehicles` from the stored values.
    pub fn refresh_derived(&mut self) {
        self.sla_status = SlaStatus::from_compliance(self.sla_compliance_pct);
        // Approximation carried over from the dashboard: one vehicle per 10% occupancy.
        self.current_vehicles = (self.occupancy_pct / 10.0).floor() as u32;
    }
}

// =========================
// Time series
// =========================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    OneHour,
    #[default]
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "24h")]
    Day,
}

impl TimeRange {
    /// Points per hour at 15 minute spacing.
    pub const POINTS_PER_HOUR: usize = 4;

    pub fn hours(&self) -> usize {
        match self {
            TimeRange::OneHour => 1,
            TimeRange::FourHours => 4,
            TimeRange::EightHours => 8,
            TimeRange::Day => 24,
        }
    }

    /// Maximum retained time-series points for this range.
    pub fn window_bound(&self) -> usize {
        self.hours() * Self::POINTS_PER_HOUR
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::OneHour => "1h",
            TimeRange::FourHours => "4h",
            TimeRange::EightHours => "8h",
            TimeRange::Day => "24h",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1h" => Ok(TimeRange::OneHour),
            "4h" => Ok(TimeRange::FourHours),
            "8h" => Ok(TimeRange::EightHours),
            "24h" => Ok(TimeRange::Day),
            other => Err(EngineError::InvalidTimeRange(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub ts_ms: u64,
    pub avg_dwell_sec: f64,
    pub throughput_veh_per_hr: f64,
    pub occupancy_pct: f64,
}

// =========================
// Alerts
// =========================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    #[serde(rename = "Unattended Vehicle")]
    UnattendedVehicle,
    Overstay,
    #[serde(rename = "Spillback Risk")]
    SpillbackRisk,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [
        AlertKind::UnattendedVehicle,
        AlertKind::Overstay,
        AlertKind::SpillbackRisk,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertStatus {
    New,
    Acknowledged,
    Closed,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 3] = [
        AlertStatus::New,
        AlertStatus::Acknowledged,
        AlertStatus::Closed,
    ];
}

/// Operator actions suggested on alerts.
pub const RECOMMENDED_ACTIONS: [&str; 5] = [
    "Dispatch curb marshal",
    "Open overflow lane",
    "Send passenger advisory",
    "Activate dynamic pricing",
    "Redirect to alternate zone",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlertItem {
    pub id: String,
    pub kind: AlertKind,
    pub ts_ms: u64,
    pub zone: ZoneName,
    pub dwell_duration_sec: f64,
    pub recommended_action: String,
    pub status: AlertStatus,
    pub zone_id: String,
}

// =========================
// Curb use
// =========================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurbUseType {
    Driveway,
    #[serde(rename = "Always No Parking")]
    AlwaysNoParking,
    #[serde(rename = "Currently No Parking")]
    CurrentlyNoParking,
    #[serde(rename = "Loading Zone")]
    LoadingZone,
    Free,
    #[serde(rename = "Residential Permit")]
    ResidentialPermit,
    #[serde(rename = "Paid Parking")]
    PaidParking,
    #[serde(rename = "Other Permits")]
    OtherPermits,
}

impl CurbUseType {
    pub const ALL: [CurbUseType; 8] = [
        CurbUseType::Driveway,
        CurbUseType::AlwaysNoParking,
        CurbUseType::CurrentlyNoParking,
        CurbUseType::LoadingZone,
        CurbUseType::Free,
        CurbUseType::ResidentialPermit,
        CurbUseType::PaidParking,
        CurbUseType::OtherPermits,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OccupancyLevel {
    Low,
    Med,
    High,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurbUseBlock {
    pub id: String,
    pub street_name: String,
    pub start_position_ft: f64,
    pub end_position_ft: f64,
    pub curb_use: CurbUseType,
    pub capacity: u32,
    pub current_availability_pct: f64,
    pub predicted_occupancy: OccupancyLevel,
    pub from_street: String,
    pub to_street: String,
}

// =========================
// Scenarios
// =========================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    Baseline,
    #[serde(rename = "Optimized Dispatch")]
    OptimizedDispatch,
    #[serde(rename = "Aggressive Enforcement")]
    AggressiveEnforcement,
    #[serde(rename = "High Demand Event")]
    HighDemandEvent,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::Baseline,
        ScenarioKind::OptimizedDispatch,
        ScenarioKind::AggressiveEnforcement,
        ScenarioKind::HighDemandEvent,
    ];

    /// Fleet sizes every scenario is evaluated at.
    pub const VEHICLE_COUNTS: [u32; 5] = [30, 35, 40, 45, 50];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Baseline => "Baseline",
            ScenarioKind::OptimizedDispatch => "Optimized Dispatch",
            ScenarioKind::AggressiveEnforcement => "Aggressive Enforcement",
            ScenarioKind::HighDemandEvent => "High Demand Event",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub scenario: ScenarioKind,
    pub vehicle_count: u32,
    pub avg_throughput: f64,
    pub avg_dwell_sec: f64,
    pub sla_compliance_pct: f64,
    pub occupancy_pct: f64,
    /// Spread for error-bar consumers.
    pub std_dev: f64,
}

// =========================
// Risk
// =========================

/// Passenger service delay risk tier. Ordered Low < Med < High.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Med,
    High,
}
