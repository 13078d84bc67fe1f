//! Environment abstraction for deterministic testing.
//!
//! Decouples the countdown and poll loop from the system clock. Production
//! uses tokio timers; simulation uses a virtual clock that advances on every
//! sleep, so a full race runs in microseconds with exact timestamps.

use std::{
    future::Future,
    ops::{Add, Sub},
    time::Duration,
};

/// Abstract environment providing time and async sleeping.
///
/// # Invariants
///
/// - `now()` never goes backwards
/// - after `sleep(d)` resolves, `now()` has advanced by at least `d`
pub trait Environment: Clone + Send + Sync + 'static {
    /// The instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, simulation uses a
    /// virtual offset from the start of the run.
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + std::fmt::Debug
        + Sub<Output = Duration>
        + Add<Duration, Output = Self::Instant>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;

    /// Sleeps until `deadline`. Returns immediately if it has passed.
    fn sleep_until(&self, deadline: Self::Instant) -> impl Future<Output = ()> + Send {
        let now = self.now();
        let remaining = if deadline > now { deadline - now } else { Duration::ZERO };
        self.sleep(remaining)
    }
}
