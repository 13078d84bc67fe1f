//! Podrace core
//!
//! Race lifecycle orchestration against a remote race-simulation service:
//! race creation, pre-race countdown, start, status polling until the race
//! finishes, and fire-and-forget acceleration while racing.
//!
//! # Architecture
//!
//! Protocol logic never touches a clock or a socket directly. Time comes from
//! an [`Environment`] and every remote call goes through the [`RaceService`]
//! trait, so the same controller runs against the HTTP service in production
//! and against scripted services under virtual time in tests.
//!
//! # Components
//!
//! - [`to_reference_id`]: the creation-to-reference identifier offset
//! - [`SessionState`]: selected driver, selected track, active race
//! - [`Countdown`]: single-shot pre-race countdown
//! - [`Poller`]: fixed-period status polling until a terminal snapshot
//! - [`RaceController`]: the lifecycle state machine tying it all together
//! - [`AccelerationDispatcher`]: concurrent acceleration requests

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod accelerate;
mod config;
mod controller;
mod countdown;
pub mod env;
mod error;
mod id;
pub mod leaderboard;
mod lifecycle;
mod poller;
mod race;
mod service;
mod session;

pub use accelerate::AccelerationDispatcher;
pub use config::RaceConfig;
pub use controller::{RaceController, RaceEvent, RaceObserver};
pub use countdown::Countdown;
pub use env::Environment;
pub use error::{Operation, RaceError};
pub use id::{DriverId, RaceId, ReferenceId, TrackId, to_reference_id};
pub use leaderboard::{Standing, final_standings, live_standings};
pub use lifecycle::{RaceLifecycle, RacePhase};
pub use poller::Poller;
pub use race::{RaceDescriptor, RaceSnapshot, RaceStatus, Racer, RacerPosition, Track};
pub use service::RaceService;
pub use session::SessionState;
