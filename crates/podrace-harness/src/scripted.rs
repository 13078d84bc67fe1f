//! Scripted race service.
//!
//! Returns pre-programmed responses and records every call with the virtual
//! time it was made, so tests can check which identifier each endpoint
//! received and when.
//!
//! Status responses are consumed in order; once the script is down to its
//! last entry that entry repeats.

use std::{
    collections::VecDeque,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use podrace_core::{
    DriverId, Environment, RaceDescriptor, RaceId, RaceService, RaceSnapshot, RaceStatus, Racer,
    RacerPosition, ReferenceId, Track, TrackId,
};

use crate::{SimEnv, SimServiceError};

/// One recorded service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    /// `list_tracks`.
    ListTracks,
    /// `list_racers`.
    ListRacers,
    /// `create_race`.
    CreateRace {
        /// Driver sent.
        driver: DriverId,
        /// Track sent.
        track: TrackId,
    },
    /// `race_status`.
    RaceStatus(ReferenceId),
    /// `start_race`.
    StartRace(ReferenceId),
    /// `accelerate`.
    Accelerate(ReferenceId),
}

impl ServiceCall {
    /// Race id addressed by this call, if it is a per-race call.
    pub fn reference(&self) -> Option<ReferenceId> {
        match self {
            Self::RaceStatus(r) | Self::StartRace(r) | Self::Accelerate(r) => Some(*r),
            Self::ListTracks | Self::ListRacers | Self::CreateRace { .. } => None,
        }
    }
}

#[derive(Debug)]
struct Script {
    tracks: Vec<Track>,
    racers: Vec<Racer>,
    create: Result<RaceDescriptor, String>,
    start: Result<(), String>,
    accelerate: Result<(), String>,
    statuses: VecDeque<Result<RaceSnapshot, String>>,
    calls: Vec<(Duration, ServiceCall)>,
}

/// Race service returning scripted responses.
#[derive(Debug, Clone)]
pub struct ScriptedService {
    script: Arc<Mutex<Script>>,
    env: SimEnv,
}

impl ScriptedService {
    /// Service whose create-race returns creation id `race_id`, timestamping
    /// calls with `env`'s clock. Starts and accelerations succeed; the status
    /// script is a single finished snapshot until replaced.
    pub fn new(env: SimEnv, race_id: u64) -> Self {
        let track = Track { id: TrackId(1), name: "Track 1".into() };
        let script = Script {
            tracks: vec![track.clone(), Track { id: TrackId(2), name: "Track 2".into() }],
            racers: (1..=3)
                .map(|i| Racer {
                    id: DriverId(i),
                    driver_name: format!("Racer {i}"),
                    top_speed: 500,
                    acceleration: 10,
                    handling: 10,
                })
                .collect(),
            create: Ok(RaceDescriptor { id: RaceId(race_id), track }),
            start: Ok(()),
            accelerate: Ok(()),
            statuses: VecDeque::from([Ok(snapshot(RaceStatus::Finished, &[]))]),
            calls: Vec::new(),
        };
        Self { script: Arc::new(Mutex::new(script)), env }
    }

    /// Replace the status script.
    #[must_use]
    pub fn with_statuses(
        self,
        statuses: impl IntoIterator<Item = Result<RaceSnapshot, String>>,
    ) -> Self {
        self.lock().statuses = statuses.into_iter().collect();
        self
    }

    /// Make create-race fail with `message`.
    #[must_use]
    pub fn failing_create(self, message: &str) -> Self {
        self.lock().create = Err(message.to_string());
        self
    }

    /// Make start-race fail with `message`.
    #[must_use]
    pub fn failing_start(self, message: &str) -> Self {
        self.lock().start = Err(message.to_string());
        self
    }

    /// Make accelerate fail with `message`.
    #[must_use]
    pub fn failing_accelerate(self, message: &str) -> Self {
        self.lock().accelerate = Err(message.to_string());
        self
    }

    /// Every call made so far.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.iter().map(|(_, call)| call.clone()).collect()
    }

    /// Every call made so far with the virtual time it was made at.
    pub fn timed_calls(&self) -> Vec<(Duration, ServiceCall)> {
        self.lock().calls.clone()
    }

    /// Virtual times of the status fetches.
    pub fn status_fetch_times(&self) -> Vec<Duration> {
        self.lock()
            .calls
            .iter()
            .filter(|(_, call)| matches!(call, ServiceCall::RaceStatus(_)))
            .map(|(at, _)| *at)
            .collect()
    }

    fn record(&self, call: ServiceCall) -> std::sync::MutexGuard<'_, Script> {
        let now = self.env.now();
        let mut script = self.lock();
        script.calls.push((now, call));
        script
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build a snapshot from `(id, segment, final_position)` triples.
pub fn snapshot(status: RaceStatus, racers: &[(u64, u32, Option<u32>)]) -> RaceSnapshot {
    RaceSnapshot {
        status,
        positions: racers
            .iter()
            .map(|&(id, segment, final_position)| RacerPosition {
                id: DriverId(id),
                driver_name: format!("Racer {id}"),
                segment,
                final_position,
            })
            .collect(),
    }
}

impl RaceService for ScriptedService {
    type Error = SimServiceError;

    fn list_tracks(&self) -> impl Future<Output = Result<Vec<Track>, Self::Error>> + Send {
        let tracks = self.record(ServiceCall::ListTracks).tracks.clone();
        async move { Ok(tracks) }
    }

    fn list_racers(&self) -> impl Future<Output = Result<Vec<Racer>, Self::Error>> + Send {
        let racers = self.record(ServiceCall::ListRacers).racers.clone();
        async move { Ok(racers) }
    }

    fn create_race(
        &self,
        driver: DriverId,
        track: TrackId,
    ) -> impl Future<Output = Result<RaceDescriptor, Self::Error>> + Send {
        let result = self.record(ServiceCall::CreateRace { driver, track }).create.clone();
        async move { result.map_err(SimServiceError::Scripted) }
    }

    fn race_status(
        &self,
        race: ReferenceId,
    ) -> impl Future<Output = Result<RaceSnapshot, Self::Error>> + Send {
        let result = {
            let mut script = self.record(ServiceCall::RaceStatus(race));
            if script.statuses.len() > 1 {
                script.statuses.pop_front()
            } else {
                script.statuses.front().cloned()
            }
        };
        async move {
            match result {
                Some(status) => status.map_err(SimServiceError::Scripted),
                None => Err(SimServiceError::Scripted("status script is empty".into())),
            }
        }
    }

    fn start_race(&self, race: ReferenceId) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let result = self.record(ServiceCall::StartRace(race)).start.clone();
        async move { result.map_err(SimServiceError::Scripted) }
    }

    fn accelerate(
        &self,
        race: ReferenceId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let result = self.record(ServiceCall::Accelerate(race)).accelerate.clone();
        async move { result.map_err(SimServiceError::Scripted) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn last_status_repeats() {
        let service = ScriptedService::new(SimEnv::new(), 1).with_statuses([
            Ok(snapshot(RaceStatus::InProgress, &[(1, 1, None)])),
            Ok(snapshot(RaceStatus::Finished, &[(1, 2, Some(1))])),
        ]);

        let first = service.race_status(ReferenceId(0)).await.unwrap();
        let second = service.race_status(ReferenceId(0)).await.unwrap();
        let third = service.race_status(ReferenceId(0)).await.unwrap();

        assert_eq!(first.status, RaceStatus::InProgress);
        assert_eq!(second.status, RaceStatus::Finished);
        assert_eq!(third, second);
    }

    #[tokio::test]
    async fn calls_are_timestamped() {
        let env = SimEnv::new();
        let service = ScriptedService::new(env.clone(), 5);

        service.start_race(ReferenceId(4)).await.unwrap();
        env.advance(Duration::from_millis(250));
        service.accelerate(ReferenceId(4)).await.unwrap();

        assert_eq!(service.timed_calls(), [
            (Duration::ZERO, ServiceCall::StartRace(ReferenceId(4))),
            (Duration::from_millis(250), ServiceCall::Accelerate(ReferenceId(4))),
        ]);
    }

    #[tokio::test]
    async fn scripted_failures_surface_as_errors() {
        let service = ScriptedService::new(SimEnv::new(), 1).failing_start("HTTP 500");
        let err = service.start_race(ReferenceId(0)).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500");
    }
}
