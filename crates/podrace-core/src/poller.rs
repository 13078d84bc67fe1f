//! Race status polling.
//!
//! Fetches run on a fixed schedule: the n-th fetch is issued no earlier than
//! `start + n * interval`. A slow fetch delays the next one but does not
//! shift later deadlines. Fetches are sequential, so when the terminal
//! snapshot is processed no other fetch is in flight and none is issued
//! afterwards.

use std::time::Duration;

use crate::{Environment, RaceError, RaceService, RaceSnapshot, RaceStatus, ReferenceId};

/// Recurring status fetcher for one race.
#[derive(Debug, Clone)]
pub struct Poller<S, E> {
    service: S,
    env: E,
    interval: Duration,
}

impl<S: RaceService, E: Environment> Poller<S, E> {
    /// Create a poller fetching every `interval`.
    pub fn new(service: S, env: E, interval: Duration) -> Self {
        Self { service, env, interval }
    }

    /// Poll `race` until it finishes.
    ///
    /// Non-terminal snapshots (`Pending`, `InProgress`) go to `on_tick`. The
    /// terminal snapshot is the return value, delivered once. Fetch failures
    /// and unknown statuses are logged and the schedule continues. There is
    /// no overall timeout.
    pub async fn run<F>(&self, race: ReferenceId, mut on_tick: F) -> RaceSnapshot
    where
        F: FnMut(&RaceSnapshot) + Send,
    {
        let mut deadline = self.env.now();
        let mut tick: u64 = 0;

        loop {
            deadline = deadline + self.interval;
            self.env.sleep_until(deadline).await;
            tick += 1;

            let snapshot = match self.service.race_status(race).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::warn!(%race, tick, error = %e, "race status request failed");
                    continue;
                },
            };

            match &snapshot.status {
                RaceStatus::Finished => {
                    tracing::info!(%race, tick, "race finished");
                    return snapshot;
                },
                RaceStatus::InProgress | RaceStatus::Pending => on_tick(&snapshot),
                RaceStatus::Other(status) => {
                    let error = RaceError::UnexpectedStatus { status: status.clone() };
                    tracing::warn!(%race, tick, %error, "ignoring race snapshot");
                },
            }
        }
    }
}
