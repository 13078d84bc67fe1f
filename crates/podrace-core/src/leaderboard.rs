//! Leaderboard ordering.
//!
//! Live views rank by `segment`, furthest first. Result views rank by
//! `final_position`, unplaced racers last. Both sorts are stable, so racers
//! tied on the key keep the service's order. The selected driver's row is
//! flagged rather than renamed; the snapshot itself is never modified.

use std::{cmp::Reverse, fmt};

use crate::{DriverId, RaceSnapshot, RacerPosition};

/// Suffix appended to the local user's name.
pub const YOU_SUFFIX: &str = " (you)";

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based rank in this view.
    pub place: usize,
    /// Driver identifier.
    pub id: DriverId,
    /// Display name without the local-user suffix.
    pub driver_name: String,
    /// Progress along the track.
    pub segment: u32,
    /// Whether this row is the local user's driver.
    pub is_you: bool,
}

impl Standing {
    /// Name as displayed, with `" (you)"` for the local user.
    pub fn label(&self) -> String {
        if self.is_you {
            format!("{}{YOU_SUFFIX}", self.driver_name)
        } else {
            self.driver_name.clone()
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.place, self.label())
    }
}

/// Rows for a live snapshot, ordered by segment descending.
pub fn live_standings(snapshot: &RaceSnapshot, you: Option<DriverId>) -> Vec<Standing> {
    let mut positions: Vec<&RacerPosition> = snapshot.positions.iter().collect();
    positions.sort_by_key(|p| Reverse(p.segment));
    rank(&positions, you)
}

/// Rows for a finished snapshot, ordered by final position ascending.
pub fn final_standings(snapshot: &RaceSnapshot, you: Option<DriverId>) -> Vec<Standing> {
    let mut positions: Vec<&RacerPosition> = snapshot.positions.iter().collect();
    positions.sort_by_key(|p| p.final_position.unwrap_or(u32::MAX));
    rank(&positions, you)
}

fn rank(positions: &[&RacerPosition], you: Option<DriverId>) -> Vec<Standing> {
    positions
        .iter()
        .enumerate()
        .map(|(i, p)| Standing {
            place: i + 1,
            id: p.id,
            driver_name: p.driver_name.clone(),
            segment: p.segment,
            is_you: Some(p.id) == you,
        })
        .collect()
}
