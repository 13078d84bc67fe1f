//! Error types for the race lifecycle.
//!
//! One enum covers the whole lifecycle: validation failures caught before any
//! remote call, remote call failures, unexpected poll statuses and rejected
//! phase transitions. Whether an error ends the session depends on where it
//! occurs: create and start failures do, status and accelerate failures are
//! logged and skipped.

use std::fmt;

use thiserror::Error;

use crate::RacePhase;

/// Remote operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// List tracks.
    ListTracks,
    /// List drivers.
    ListRacers,
    /// Create a race.
    CreateRace,
    /// Fetch race status.
    RaceStatus,
    /// Start a race.
    StartRace,
    /// Accelerate the player's car.
    Accelerate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ListTracks => "list tracks",
            Self::ListRacers => "list racers",
            Self::CreateRace => "create race",
            Self::RaceStatus => "race status",
            Self::StartRace => "start race",
            Self::Accelerate => "accelerate",
        };
        f.write_str(name)
    }
}

/// Errors produced while driving a race.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    /// Driver or track not selected. No remote call was made.
    #[error("please choose {missing}")]
    MissingSelection {
        /// What still has to be chosen, e.g. `"a driver"`.
        missing: &'static str,
    },

    /// A call to the race service failed.
    #[error("{operation} request failed: {message}")]
    Remote {
        /// Operation that failed.
        operation: Operation,
        /// Service or transport error description.
        message: String,
    },

    /// A status poll returned a status outside the known set.
    #[error("unexpected race status: {status:?}")]
    UnexpectedStatus {
        /// Raw status string.
        status: String,
    },

    /// Lifecycle transition not allowed from the current phase.
    #[error("invalid race transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current phase.
        from: RacePhase,
        /// Requested phase.
        to: RacePhase,
    },
}

impl RaceError {
    /// Wrap a service error for `operation`.
    pub fn remote(operation: Operation, error: &impl fmt::Display) -> Self {
        Self::Remote { operation, message: error.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_selection_names_what_is_missing() {
        let err = RaceError::MissingSelection { missing: "a driver" };
        assert_eq!(err.to_string(), "please choose a driver");
    }

    #[test]
    fn unexpected_status_quotes_raw_value() {
        let err = RaceError::UnexpectedStatus { status: "paused".into() };
        assert_eq!(err.to_string(), "unexpected race status: \"paused\"");
    }

    #[test]
    fn remote_error_mentions_operation() {
        let err = RaceError::remote(Operation::StartRace, &"HTTP 404");
        assert_eq!(err.to_string(), "start race request failed: HTTP 404");
    }
}
