//! Remote race service contract.
//!
//! Every operation that addresses an existing race takes a [`ReferenceId`];
//! callers translate the stored [`crate::RaceId`] exactly once with
//! [`crate::to_reference_id`] before calling in.

use std::future::Future;

use crate::{DriverId, RaceDescriptor, RaceSnapshot, Racer, ReferenceId, Track, TrackId};

/// Remote race simulation service.
///
/// Cloning must be cheap and share the underlying connection pool: the
/// controller, the poller and every acceleration task hold their own handle.
///
/// # Implementations
///
/// - **HTTP**: `podrace_client::HttpRaceService`
/// - **Simulation**: `podrace_harness::SimRaceService`, in-process and seeded
/// - **Scripted**: `podrace_harness::ScriptedService`, fixed responses and a
///   call log for tests
pub trait RaceService: Clone + Send + Sync + 'static {
    /// Service error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// All tracks.
    fn list_tracks(&self) -> impl Future<Output = Result<Vec<Track>, Self::Error>> + Send;

    /// All drivers.
    fn list_racers(&self) -> impl Future<Output = Result<Vec<Racer>, Self::Error>> + Send;

    /// Create a race. The returned id is in creation space.
    fn create_race(
        &self,
        driver: DriverId,
        track: TrackId,
    ) -> impl Future<Output = Result<RaceDescriptor, Self::Error>> + Send;

    /// Current snapshot of a race.
    fn race_status(
        &self,
        race: ReferenceId,
    ) -> impl Future<Output = Result<RaceSnapshot, Self::Error>> + Send;

    /// Start a created race.
    fn start_race(&self, race: ReferenceId) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Accelerate the player's car. Cumulative on the service side.
    fn accelerate(&self, race: ReferenceId)
    -> impl Future<Output = Result<(), Self::Error>> + Send;
}
