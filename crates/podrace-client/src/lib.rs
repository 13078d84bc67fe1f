//! Podrace client
//!
//! Production implementations of the core's I/O seams:
//!
//! - [`HttpRaceService`]: the race service contract over HTTP/JSON
//! - [`SystemEnv`]: wall-clock time and tokio timers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod error;
mod http;
mod system_env;

pub use config::{DEFAULT_BASE_URL, ServiceConfig};
pub use error::TransportError;
pub use http::{CreateRaceRequest, HttpRaceService};
pub use system_env::SystemEnv;
