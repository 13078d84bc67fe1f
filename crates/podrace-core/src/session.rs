//! Per-client session state.
//!
//! Writers:
//! - `selected_driver`, `selected_track`: selection handlers, through
//!   [`SessionState::select_driver`] and [`SessionState::select_track`].
//! - `active_race`: the race controller only, on `Idle -> Created`. The
//!   setter is crate-private.

use crate::{DriverId, RaceError, RaceId, TrackId};

/// Selections and the active race of one client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    selected_driver: Option<DriverId>,
    selected_track: Option<TrackId>,
    active_race: Option<RaceId>,
}

impl SessionState {
    /// Empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the user's driver choice.
    pub fn select_driver(&mut self, driver: DriverId) {
        self.selected_driver = Some(driver);
    }

    /// Record the user's track choice.
    pub fn select_track(&mut self, track: TrackId) {
        self.selected_track = Some(track);
    }

    /// Selected driver, if any.
    pub fn selected_driver(&self) -> Option<DriverId> {
        self.selected_driver
    }

    /// Selected track, if any.
    pub fn selected_track(&self) -> Option<TrackId> {
        self.selected_track
    }

    /// Creation-space id of the race created for this session.
    pub fn active_race(&self) -> Option<RaceId> {
        self.active_race
    }

    /// Both selections, or a validation failure naming what is missing.
    pub fn selection(&self) -> Result<(DriverId, TrackId), RaceError> {
        match (self.selected_driver, self.selected_track) {
            (Some(driver), Some(track)) => Ok((driver, track)),
            (None, Some(_)) => Err(RaceError::MissingSelection { missing: "a driver" }),
            (Some(_), None) => Err(RaceError::MissingSelection { missing: "a track" }),
            (None, None) => Err(RaceError::MissingSelection { missing: "a driver and a track" }),
        }
    }

    pub(crate) fn set_active_race(&mut self, race: RaceId) {
        self.active_race = Some(race);
    }
}
