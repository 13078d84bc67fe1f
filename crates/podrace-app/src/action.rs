//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use podrace_core::{RaceId, SessionState};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Fetch tracks and drivers.
    LoadCatalog,

    /// Run a race for this session.
    StartRace {
        /// Session handed over to the race task.
        session: SessionState,
    },

    /// Send one acceleration request.
    Accelerate {
        /// Creation-space id of the running race.
        race: RaceId,
    },
}
