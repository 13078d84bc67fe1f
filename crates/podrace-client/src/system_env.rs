//! Production Environment implementation using system time.
//!
//! `SystemEnv` is the production implementation of the Environment trait:
//! real monotonic time (`std::time::Instant`) and tokio timers for actual
//! wall-clock delays. Countdown ticks and poll deadlines therefore follow the
//! wall clock, unlike the harness's virtual clock.

use std::{future::Future, time::Duration};

use podrace_core::Environment;

/// Production environment using system time.
///
/// Sleeping requires a tokio runtime with the time driver enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
