use crate::rng::SimRng;
use crate::types::{CurbUseBlock, CurbUseType, OccupancyLevel};

const STREETS: [&str; 4] = [
    "McAllister St",
    "Van Ness Ave",
    "Redwood St",
    "Golden Gate Ave",
];

const CROSS_STREETS: [&str; 4] = ["Franklin St", "Van Ness Avenue", "Polk St", "Larkin St"];

const BLOCKFACES_PER_STREET: usize = 3;

/// Static curb inventory: three sequential blockfaces per street.
pub fn build_curb_blocks(rng: &mut SimRng) -> Vec<CurbUseBlock> {
    let mut blocks = Vec::with_capacity(STREETS.len() * BLOCKFACES_PER_STREET);

    for (street_idx, street) in STREETS.iter().enumerate() {
        let from_street = CROSS_STREETS[street_idx % CROSS_STREETS.len()];
        let to_street = CROSS_STREETS[(street_idx + 1) % CROSS_STREETS.len()];

        for i in 0..BLOCKFACES_PER_STREET {
            let start = i as f64 * 150.0 + rng.next() * 50.0;
            let end = start + 100.0 + rng.next() * 50.0;
            let curb_use = *rng.pick(&CurbUseType::ALL);
            let capacity = 2 + (rng.next() * 6.0).floor() as u32;
            let availability = rng.next() * 100.0;
            let predicted_occupancy = draw_tier(rng);

            blocks.push(CurbUseBlock {
                id: format!("block-{}", blocks.len()),
                street_name: street.to_string(),
                start_position_ft: start,
                end_position_ft: end,
                curb_use,
                capacity,
                current_availability_pct: availability,
                predicted_occupancy,
                from_street: from_street.to_string(),
                to_street: to_street.to_string(),
            });
        }
    }

    blocks
}

/// LOW a third of the time; otherwise a second draw decides MED vs HIGH.
fn draw_tier(rng: &mut SimRng) -> OccupancyLevel {
    if rng.chance(0.33) {
        OccupancyLevel::Low
    } else if rng.chance(0.66) {
        OccupancyLevel::Med
    } else {
        OccupancyLevel::High
    }
}
