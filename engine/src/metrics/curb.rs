use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CurbUseBlock, OccupancyLevel, clamp_pct};

/// Curb policy what-if applied on top of the static inventory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurbPolicy {
    #[default]
    #[serde(rename = "Current Policy")]
    CurrentPolicy,
    #[serde(rename = "Event Day")]
    EventDay,
    #[serde(rename = "Construction Detour")]
    ConstructionDetour,
}

impl fmt::Display for CurbPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CurbPolicy::CurrentPolicy => "Current Policy",
            CurbPolicy::EventDay => "Event Day",
            CurbPolicy::ConstructionDetour => "Construction Detour",
        })
    }
}

fn bump_tier(level: OccupancyLevel) -> OccupancyLevel {
    match level {
        OccupancyLevel::Low => OccupancyLevel::Med,
        OccupancyLevel::Med | OccupancyLevel::High => OccupancyLevel::High,
    }
}

/// Derived copies of `blocks` under `policy`. The inputs are untouched.
pub fn adjust_blocks(blocks: &[CurbUseBlock], policy: CurbPolicy) -> Vec<CurbUseBlock> {
    blocks
        .iter()
        .map(|block| {
            let mut b = block.clone();
            match policy {
                CurbPolicy::CurrentPolicy => {}
                CurbPolicy::EventDay => {
                    b.current_availability_pct = clamp_pct(b.current_availability_pct - 20.0);
                    b.predicted_occupancy = bump_tier(b.predicted_occupancy);
                }
                CurbPolicy::ConstructionDetour => {
                    b.current_availability_pct = clamp_pct(b.current_availability_pct - 30.0);
                    b.predicted_occupancy = OccupancyLevel::High;
                }
            }
            b
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CurbUseType;

    fn block(availability: f64, tier: OccupancyLevel) -> CurbUseBlock {
        CurbUseBlock {
            id: "block-0".into(),
            street_name: "Polk St".into(),
            start_position_ft: 0.0,
            end_position_ft: 120.0,
            curb_use: CurbUseType::LoadingZone,
            capacity: 4,
            current_availability_pct: availability,
            predicted_occupancy: tier,
            from_street: "Larkin St".into(),
            to_street: "Franklin St".into(),
        }
    }

    #[test]
    fn current_policy_is_identity() {
        let blocks = vec![block(40.0, OccupancyLevel::Low)];
        assert_eq!(adjust_blocks(&blocks, CurbPolicy::CurrentPolicy), blocks);
    }

    #[test]
    fn event_day_bumps_one_tier() {
        let blocks = vec![
            block(50.0, OccupancyLevel::Low),
            block(10.0, OccupancyLevel::Med),
            block(25.0, OccupancyLevel::High),
        ];
        let out = adjust_blocks(&blocks, CurbPolicy::EventDay);

        let tiers: Vec<OccupancyLevel> = out.iter().map(|b| b.predicted_occupancy).collect();
        assert_eq!(
            tiers,
            vec![OccupancyLevel::Med, OccupancyLevel::High, OccupancyLevel::High]
        );
        assert_eq!(out[0].current_availability_pct, 30.0);
        assert_eq!(out[1].current_availability_pct, 0.0);
    }

    #[test]
    fn construction_detour_saturates() {
        let out = adjust_blocks(&[block(20.0, OccupancyLevel::Low)], CurbPolicy::ConstructionDetour);

        assert_eq!(out[0].current_availability_pct, 0.0);
        assert_eq!(out[0].predicted_occupancy, OccupancyLevel::High);
    }
}
