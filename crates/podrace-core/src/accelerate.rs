//! Fire-and-forget acceleration.

use tokio::task::JoinHandle;

use crate::{RaceService, ReferenceId};

/// Relays acceleration requests to the race service.
///
/// Each [`fire`](Self::fire) spawns an independent task. Requests may
/// overlap and complete in any order; acceleration is cumulative on the
/// service, so ordering does not matter. Failures are logged and dropped: a
/// missed acceleration never ends the race.
#[derive(Debug, Clone)]
pub struct AccelerationDispatcher<S> {
    service: S,
}

impl<S: RaceService> AccelerationDispatcher<S> {
    /// Create a dispatcher for `service`.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Issue one acceleration request for `race`.
    ///
    /// Must be called within a tokio runtime. The returned handle can be
    /// dropped; the request still runs to completion.
    pub fn fire(&self, race: ReferenceId) -> JoinHandle<()> {
        let service = self.service.clone();
        tokio::spawn(async move {
            match service.accelerate(race).await {
                Ok(()) => tracing::trace!(%race, "accelerated"),
                Err(e) => tracing::warn!(%race, error = %e, "accelerate request failed"),
            }
        })
    }
}
