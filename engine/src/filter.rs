//! View filter: narrows exposed entities to the caller's zone selection.
//!
//! Stateless pass-through. Order of the input is preserved and nothing is
//! mutated; an unrestricted selection returns the input unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{AlertItem, ZoneMetric, ZoneName};

/// Sentinel selecting every zone.
pub const ALL_ZONES: &str = "All";

/// Zone subset chosen in the dashboard shell.
///
/// Either unrestricted ("All") or an explicit set of zones. An explicit set
/// may be empty, in which case nothing matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSelection {
    all: bool,
    zones: BTreeSet<ZoneName>,
}

impl Default for ZoneSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl ZoneSelection {
    pub fn all() -> Self {
        Self {
            all: true,
            zones: BTreeSet::new(),
        }
    }

    pub fn only(zones: impl IntoIterator<Item = ZoneName>) -> Self {
        Self {
            all: false,
            zones: zones.into_iter().collect(),
        }
    }

    /// Builds a selection from dashboard labels. `"All"` anywhere makes the
    /// selection unrestricted; unknown names are dropped and simply match
    /// nothing.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut sel = Self::only([]);

        for raw in names {
            let name = raw.trim();
            if name.is_empty() {
                continue;
            }
            if name.eq_ignore_ascii_case(ALL_ZONES) {
                sel.all = true;
                continue;
            }
            match ZoneName::parse(name) {
                Some(z) => {
                    sel.zones.insert(z);
                }
                None => debug!(zone = name, "ignoring unknown zone in selection"),
            }
        }

        sel
    }

    pub fn is_all(&self) -> bool {
        self.all
    }

    pub fn contains(&self, zone: ZoneName) -> bool {
        self.all || self.zones.contains(&zone)
    }
}

/// Zones visible under `selection`, in input order.
pub fn filter_zones(zones: &[ZoneMetric], selection: &ZoneSelection) -> Vec<ZoneMetric> {
    if selection.is_all() {
        return zones.to_vec();
    }
    zones
        .iter()
        .filter(|z| selection.contains(z.name))
        .cloned()
        .collect()
}

/// Alerts whose zone is visible under `selection`, in input order.
pub fn filter_alerts(alerts: &[AlertItem], selection: &ZoneSelection) -> Vec<AlertItem> {
    if selection.is_all() {
        return alerts.to_vec();
    }
    alerts
        .iter()
        .filter(|a| selection.contains(a.zone))
        .cloned()
        .collect()
}
