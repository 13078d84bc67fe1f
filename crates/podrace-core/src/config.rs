//! Race timing configuration.

use std::time::Duration;

/// Timing parameters for one race session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceConfig {
    /// Countdown length in seconds before the race is started.
    pub countdown_seconds: u32,

    /// Delay before the first countdown decrement, leaving time for the
    /// pre-race view to render.
    pub settle_delay: Duration,

    /// Interval between countdown decrements.
    pub tick: Duration,

    /// Period between race status fetches.
    pub poll_interval: Duration,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            countdown_seconds: 3,
            settle_delay: Duration::from_secs(1),
            tick: Duration::from_secs(1),
            poll_interval: Duration::from_millis(500),
        }
    }
}
