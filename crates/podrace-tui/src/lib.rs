//! Terminal UI for Podrace
//!
//! A thin shell over [`podrace_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`podrace_app::Runtime`].
//!
//! This crate only handles terminal input, rendering and process setup.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod logging;
pub mod terminal;
pub mod ui;

pub use podrace_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
