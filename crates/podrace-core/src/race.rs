//! Records exchanged with the race service.
//!
//! Field names follow the service's JSON. Snapshots are immutable once
//! received: views sort copies, never the snapshot itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DriverId, RaceId, TrackId};

/// A race track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier.
    pub id: TrackId,
    /// Display name.
    pub name: String,
}

/// A selectable driver and their car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Racer {
    /// Driver identifier.
    pub id: DriverId,
    /// Display name.
    pub driver_name: String,
    /// Top speed rating.
    pub top_speed: u32,
    /// Acceleration rating.
    pub acceleration: u32,
    /// Handling rating.
    pub handling: u32,
}

/// Race returned by create-race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceDescriptor {
    /// Creation-space identifier.
    #[serde(rename = "ID")]
    pub id: RaceId,
    /// Track the race runs on.
    #[serde(rename = "Track")]
    pub track: Track,
}

/// Race status reported by the service.
///
/// The service reports an unstarted race as `"unstarted"`; `"pending"` is
/// accepted as well. Unknown strings are preserved in [`RaceStatus::Other`]
/// so the poller can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RaceStatus {
    /// Created but not started.
    Pending,
    /// Racers are moving.
    InProgress,
    /// Every racer has a final position. Terminal.
    Finished,
    /// Status outside the known set.
    Other(String),
}

impl RaceStatus {
    /// Whether no further polling should happen after this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl From<String> for RaceStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "unstarted" | "pending" => Self::Pending,
            "in-progress" => Self::InProgress,
            "finished" => Self::Finished,
            _ => Self::Other(value),
        }
    }
}

impl From<RaceStatus> for String {
    fn from(status: RaceStatus) -> Self {
        match status {
            RaceStatus::Pending => "unstarted".to_string(),
            RaceStatus::InProgress => "in-progress".to_string(),
            RaceStatus::Finished => "finished".to_string(),
            RaceStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("unstarted"),
            Self::InProgress => f.write_str("in-progress"),
            Self::Finished => f.write_str("finished"),
            Self::Other(value) => f.write_str(value),
        }
    }
}

/// One racer's progress within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacerPosition {
    /// Driver identifier.
    pub id: DriverId,
    /// Display name.
    pub driver_name: String,
    /// Progress along the track. Higher is further.
    pub segment: u32,
    /// Finishing place, set once the racer has finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_position: Option<u32>,
}

/// One poll result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    /// Race status at the time of the fetch.
    pub status: RaceStatus,
    /// Every racer's position.
    pub positions: Vec<RacerPosition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_status_payload() {
        let json = r#"{
            "status": "in-progress",
            "positions": [
                { "id": 1, "driver_name": "Racer 1", "segment": 12, "speed": 140 },
                { "id": 2, "driver_name": "Racer 2", "segment": 9, "final_position": null }
            ]
        }"#;

        let snapshot: RaceSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.status, RaceStatus::InProgress);
        assert_eq!(snapshot.positions.len(), 2);
        assert_eq!(snapshot.positions[0].segment, 12);
        assert_eq!(snapshot.positions[1].final_position, None);
    }

    #[test]
    fn unstarted_maps_to_pending() {
        let status: RaceStatus = serde_json::from_str(r#""unstarted""#).unwrap();
        assert_eq!(status, RaceStatus::Pending);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: RaceStatus = serde_json::from_str(r#""paused""#).unwrap();
        assert_eq!(status, RaceStatus::Other("paused".into()));
        assert!(!status.is_terminal());
        assert_eq!(status.to_string(), "paused");
    }

    #[test]
    fn decodes_create_race_response() {
        let json = r#"{ "ID": 42, "Track": { "id": 2, "name": "Track 2", "segments": [1, 2] } }"#;
        let race: RaceDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(race.id, RaceId(42));
        assert_eq!(race.track.name, "Track 2");
    }
}
