//! Observable application state types.
//!
//! These structures serve as the "View Model" for the application: the
//! subset of race state needed for rendering, already ordered for display.

use podrace_core::{DriverId, RaceDescriptor, RacePhase, Standing};

/// Which screen is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Track and driver selection.
    #[default]
    Selection,
    /// Countdown, live leaderboard and results.
    Race,
}

/// Which selection list receives cursor keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Track list.
    #[default]
    Tracks,
    /// Driver list.
    Racers,
}

impl Focus {
    /// The other list.
    pub fn toggle(self) -> Self {
        match self {
            Self::Tracks => Self::Racers,
            Self::Racers => Self::Tracks,
        }
    }
}

/// Catalog load progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogState {
    /// Request in flight.
    #[default]
    Loading,
    /// Tracks and drivers available.
    Ready,
    /// Load failed; the selection lists stay empty.
    Failed,
}

/// Race screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaceView {
    /// Race as created. `None` before creation.
    pub race: Option<RaceDescriptor>,
    /// Driver the race was created for. Its rows are marked as the user's.
    pub driver: Option<DriverId>,
    /// Last lifecycle phase reported by the controller.
    pub phase: RacePhase,
    /// Countdown value. `None` until the first decrement.
    pub countdown: Option<u32>,
    /// Live leaderboard, furthest first.
    pub standings: Vec<Standing>,
    /// Final leaderboard. Empty until the race finishes.
    pub results: Vec<Standing>,
    /// Acceleration requests sent for this race.
    pub accelerations: u32,
}

impl RaceView {
    /// View for a freshly created race.
    pub fn created(race: RaceDescriptor, driver: DriverId) -> Self {
        Self {
            race: Some(race),
            driver: Some(driver),
            phase: RacePhase::Created,
            ..Self::default()
        }
    }

    /// Whether acceleration requests are meaningful.
    pub fn accepts_acceleration(&self) -> bool {
        matches!(self.phase, RacePhase::Started | RacePhase::Racing)
    }
}
