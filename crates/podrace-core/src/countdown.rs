//! Pre-race countdown.

use std::time::Duration;

use crate::Environment;

/// Single-shot countdown.
///
/// Waits a settle delay, then decrements once per tick from `seconds` down to
/// zero, reporting each value after the decrement. The future resolves
/// exactly once, right after `0` has been reported.
#[derive(Debug, Clone)]
pub struct Countdown<E> {
    env: E,
    settle_delay: Duration,
    tick: Duration,
}

impl<E: Environment> Countdown<E> {
    /// Create a countdown with the given settle delay and tick length.
    pub fn new(env: E, settle_delay: Duration, tick: Duration) -> Self {
        Self { env, settle_delay, tick }
    }

    /// Run the countdown, calling `on_value` with `seconds - 1, ..., 0`.
    pub async fn run<F>(&self, seconds: u32, mut on_value: F)
    where
        F: FnMut(u32) + Send,
    {
        self.env.sleep(self.settle_delay).await;

        let mut remaining = seconds;
        while remaining > 0 {
            self.env.sleep(self.tick).await;
            remaining -= 1;
            on_value(remaining);
        }
    }
}
