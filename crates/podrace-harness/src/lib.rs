//! Deterministic simulation harness for podrace testing.
//!
//! Virtual-time [`podrace_core::Environment`] and in-process
//! [`podrace_core::RaceService`] implementations, so whole race sessions run
//! without sockets or wall-clock waits and produce the same trace every run.
//!
//! - [`SimEnv`]: virtual clock that advances on every sleep
//! - [`ScriptedService`]: fixed responses and a timestamped call log
//! - [`SimRaceService`]: seeded race simulation, also used by the offline
//!   front-end
//! - [`SimDriver`]: [`podrace_app::Driver`] with injected input

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod scripted;
pub mod sim_driver;
pub mod sim_env;
pub mod sim_service;

pub use scripted::{ScriptedService, ServiceCall, snapshot};
pub use sim_driver::{SimDriver, SimDriverError, SimDriverHandle};
pub use sim_env::SimEnv;
pub use sim_service::{SimRaceService, SimServiceError};
