//! Virtual-time environment.
//!
//! `SimEnv` keeps a virtual clock shared by all clones. `sleep(d)` advances
//! the clock by `d`, records the request and yields once to the scheduler so
//! concurrently spawned tasks still make progress. No wall-clock time passes.

use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use podrace_core::Environment;

#[derive(Debug, Default)]
struct Clock {
    now: Duration,
    sleeps: Vec<Duration>,
}

/// Simulation environment with a virtual clock.
///
/// `Instant` is the virtual offset since the environment was created.
#[derive(Debug, Clone, Default)]
pub struct SimEnv {
    clock: Arc<Mutex<Clock>>,
}

impl SimEnv {
    /// New environment at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sleep duration requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock().sleeps.clone()
    }

    /// Advance the clock without sleeping.
    pub fn advance(&self, duration: Duration) {
        self.lock().now += duration;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Clock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Environment for SimEnv {
    type Instant = Duration;

    fn now(&self) -> Duration {
        self.lock().now
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        {
            let mut clock = self.lock();
            clock.now += duration;
            clock.sleeps.push(duration);
        }
        tokio::task::yield_now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sleep_advances_virtual_time() {
        let env = SimEnv::new();
        env.sleep(Duration::from_millis(500)).await;
        env.sleep(Duration::from_secs(1)).await;

        assert_eq!(env.now(), Duration::from_millis(1500));
        assert_eq!(env.sleeps(), [Duration::from_millis(500), Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn sleep_until_past_deadline_is_zero() {
        let env = SimEnv::new();
        env.advance(Duration::from_secs(2));
        env.sleep_until(Duration::from_secs(1)).await;

        assert_eq!(env.now(), Duration::from_secs(2));
        assert_eq!(env.sleeps(), [Duration::ZERO]);
    }

    #[test]
    fn clones_share_the_clock() {
        let env = SimEnv::new();
        let other = env.clone();
        other.advance(Duration::from_secs(3));
        assert_eq!(env.now(), Duration::from_secs(3));
    }
}
