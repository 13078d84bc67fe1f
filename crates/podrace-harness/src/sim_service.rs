//! In-process race simulation.
//!
//! `SimRaceService` implements the race service contract, identifier offset
//! included: races are stored by reference id and create-race hands out
//! `reference + 1`. A call made with an untranslated (or doubly translated)
//! id therefore misses the race or hits a different one, the same way the
//! real service behaves.
//!
//! The simulation is step-based: every status fetch of a running race moves
//! each unfinished car forward by its base speed plus seeded jitter; the
//! player's car also gets the accelerations received since the previous
//! step. Cars reaching the end of the track are placed in arrival order and
//! the race finishes once every car is placed. Same seed and same call
//! sequence give the same race.

use std::{
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};

use podrace_core::{
    DriverId, RaceDescriptor, RaceId, RaceService, RaceSnapshot, RaceStatus, Racer,
    RacerPosition, ReferenceId, Track, TrackId,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

/// Segments from start to finish line.
pub const TRACK_LENGTH: u32 = 50;

/// Most accelerations credited to the player per step.
const MAX_BOOST_PER_STEP: u32 = 3;

/// Errors returned by the in-process services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimServiceError {
    /// No race stored under this reference id.
    #[error("race {0} not found")]
    RaceNotFound(ReferenceId),

    /// Unknown driver.
    #[error("driver {0} not found")]
    DriverNotFound(DriverId),

    /// Unknown track.
    #[error("track {0} not found")]
    TrackNotFound(TrackId),

    /// Start requested for a race that is not pending.
    #[error("race {0} already started")]
    AlreadyStarted(ReferenceId),

    /// Acceleration for a race that is not running.
    #[error("race {0} is not running")]
    NotRunning(ReferenceId),

    /// Scripted failure.
    #[error("{0}")]
    Scripted(String),
}

#[derive(Debug)]
struct SimCar {
    racer: Racer,
    segment: u32,
    final_position: Option<u32>,
}

#[derive(Debug)]
struct SimRace {
    player: DriverId,
    status: RaceStatus,
    cars: Vec<SimCar>,
    pending_boost: u32,
    placed: u32,
}

impl SimRace {
    fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            status: self.status.clone(),
            positions: self
                .cars
                .iter()
                .map(|car| RacerPosition {
                    id: car.racer.id,
                    driver_name: car.racer.driver_name.clone(),
                    segment: car.segment,
                    final_position: car.final_position,
                })
                .collect(),
        }
    }

    fn step(&mut self, rng: &mut ChaCha8Rng) {
        let boost = self.pending_boost.min(MAX_BOOST_PER_STEP);
        self.pending_boost = 0;

        for car in self.cars.iter_mut().filter(|car| car.final_position.is_none()) {
            let base = 1 + car.racer.top_speed / 250;
            let jitter = rng.gen_range(0..=car.racer.handling / 5);
            let bonus = if car.racer.id == self.player { boost } else { 0 };

            car.segment = (car.segment + base + jitter + bonus).min(TRACK_LENGTH);
            if car.segment == TRACK_LENGTH {
                self.placed += 1;
                car.final_position = Some(self.placed);
            }
        }

        if self.cars.iter().all(|car| car.final_position.is_some()) {
            self.status = RaceStatus::Finished;
        }
    }
}

#[derive(Debug)]
struct SimState {
    rng: ChaCha8Rng,
    tracks: Vec<Track>,
    racers: Vec<Racer>,
    races: Vec<SimRace>,
}

impl SimState {
    fn race_mut(&mut self, race: ReferenceId) -> Result<&mut SimRace, SimServiceError> {
        usize::try_from(race.0)
            .ok()
            .and_then(|index| self.races.get_mut(index))
            .ok_or(SimServiceError::RaceNotFound(race))
    }
}

/// Seeded in-process race service.
#[derive(Debug, Clone)]
pub struct SimRaceService {
    state: Arc<Mutex<SimState>>,
}

impl SimRaceService {
    /// Service with the default catalog (3 tracks, 5 drivers).
    pub fn with_seed(seed: u64) -> Self {
        let tracks = (1..=3).map(|i| Track { id: TrackId(i), name: format!("Track {i}") }).collect();
        let racers = [(500, 10, 10), (600, 8, 12), (450, 12, 14), (550, 9, 8), (400, 14, 16)]
            .into_iter()
            .zip(1..)
            .map(|((top_speed, acceleration, handling), i)| Racer {
                id: DriverId(i),
                driver_name: format!("Racer {i}"),
                top_speed,
                acceleration,
                handling,
            })
            .collect();

        let state = SimState { rng: ChaCha8Rng::seed_from_u64(seed), tracks, racers, races: Vec::new() };
        Self { state: Arc::new(Mutex::new(state)) }
    }

    /// Number of races created so far.
    pub fn race_count(&self) -> usize {
        self.lock().races.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create(&self, driver: DriverId, track: TrackId) -> Result<RaceDescriptor, SimServiceError> {
        let mut state = self.lock();
        let track =
            state.tracks.iter().find(|t| t.id == track).cloned().ok_or(SimServiceError::TrackNotFound(track))?;
        if !state.racers.iter().any(|r| r.id == driver) {
            return Err(SimServiceError::DriverNotFound(driver));
        }

        let cars = state
            .racers
            .iter()
            .map(|racer| SimCar { racer: racer.clone(), segment: 0, final_position: None })
            .collect();
        state.races.push(SimRace {
            player: driver,
            status: RaceStatus::Pending,
            cars,
            pending_boost: 0,
            placed: 0,
        });

        let reference = state.races.len() as u64 - 1;
        tracing::debug!(reference, %driver, track = %track.id, "simulated race created");
        Ok(RaceDescriptor { id: RaceId(reference + 1), track })
    }

    fn status(&self, race: ReferenceId) -> Result<RaceSnapshot, SimServiceError> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let index = usize::try_from(race.0).map_err(|_| SimServiceError::RaceNotFound(race))?;
        let sim = state.races.get_mut(index).ok_or(SimServiceError::RaceNotFound(race))?;

        if sim.status == RaceStatus::InProgress {
            sim.step(&mut state.rng);
        }
        Ok(sim.snapshot())
    }

    fn start(&self, race: ReferenceId) -> Result<(), SimServiceError> {
        let mut state = self.lock();
        let sim = state.race_mut(race)?;
        if sim.status != RaceStatus::Pending {
            return Err(SimServiceError::AlreadyStarted(race));
        }
        sim.status = RaceStatus::InProgress;
        Ok(())
    }

    fn boost(&self, race: ReferenceId) -> Result<(), SimServiceError> {
        let mut state = self.lock();
        let sim = state.race_mut(race)?;
        if sim.status != RaceStatus::InProgress {
            return Err(SimServiceError::NotRunning(race));
        }
        sim.pending_boost += 1;
        Ok(())
    }
}

impl RaceService for SimRaceService {
    type Error = SimServiceError;

    fn list_tracks(&self) -> impl Future<Output = Result<Vec<Track>, Self::Error>> + Send {
        let tracks = self.lock().tracks.clone();
        async move { Ok(tracks) }
    }

    fn list_racers(&self) -> impl Future<Output = Result<Vec<Racer>, Self::Error>> + Send {
        let racers = self.lock().racers.clone();
        async move { Ok(racers) }
    }

    fn create_race(
        &self,
        driver: DriverId,
        track: TrackId,
    ) -> impl Future<Output = Result<RaceDescriptor, Self::Error>> + Send {
        let result = self.create(driver, track);
        async move { result }
    }

    fn race_status(
        &self,
        race: ReferenceId,
    ) -> impl Future<Output = Result<RaceSnapshot, Self::Error>> + Send {
        let result = self.status(race);
        async move { result }
    }

    fn start_race(&self, race: ReferenceId) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let result = self.start(race);
        async move { result }
    }

    fn accelerate(
        &self,
        race: ReferenceId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        let result = self.boost(race);
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run_to_finish(service: &SimRaceService, race: ReferenceId) -> (RaceSnapshot, usize) {
        let mut fetches = 0;
        loop {
            fetches += 1;
            let snapshot = service.race_status(race).await.unwrap();
            if snapshot.status.is_terminal() {
                return (snapshot, fetches);
            }
            assert!(fetches < 1000, "race never finished");
        }
    }

    #[tokio::test]
    async fn created_id_is_one_above_reference() {
        let service = SimRaceService::with_seed(1);
        let first = service.create_race(DriverId(1), TrackId(1)).await.unwrap();
        let second = service.create_race(DriverId(2), TrackId(1)).await.unwrap();

        assert_eq!(first.id, RaceId(1));
        assert_eq!(second.id, RaceId(2));
        assert!(service.race_status(ReferenceId(1)).await.is_ok());
        assert_eq!(
            service.race_status(ReferenceId(2)).await,
            Err(SimServiceError::RaceNotFound(ReferenceId(2)))
        );
    }

    #[tokio::test]
    async fn pending_race_does_not_move() {
        let service = SimRaceService::with_seed(1);
        let race = service.create_race(DriverId(1), TrackId(1)).await.unwrap();
        let snapshot = service.race_status(race.id.to_reference()).await.unwrap();

        assert_eq!(snapshot.status, RaceStatus::Pending);
        assert!(snapshot.positions.iter().all(|p| p.segment == 0));
    }

    #[tokio::test]
    async fn race_finishes_with_every_car_placed() {
        let service = SimRaceService::with_seed(7);
        let race = service.create_race(DriverId(3), TrackId(2)).await.unwrap();
        let reference = race.id.to_reference();
        service.start_race(reference).await.unwrap();

        let (snapshot, _) = run_to_finish(&service, reference).await;
        let mut places: Vec<u32> = snapshot.positions.iter().filter_map(|p| p.final_position).collect();
        places.sort_unstable();
        assert_eq!(places, (1..=5).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn same_seed_same_race() {
        let mut results = Vec::new();
        for _ in 0..2 {
            let service = SimRaceService::with_seed(99);
            let race = service.create_race(DriverId(1), TrackId(1)).await.unwrap();
            service.start_race(race.id.to_reference()).await.unwrap();
            results.push(run_to_finish(&service, race.id.to_reference()).await);
        }
        assert_eq!(results[0], results[1]);
    }

    #[tokio::test]
    async fn accelerate_requires_running_race() {
        let service = SimRaceService::with_seed(1);
        let race = service.create_race(DriverId(1), TrackId(1)).await.unwrap();
        let reference = race.id.to_reference();

        assert_eq!(service.accelerate(reference).await, Err(SimServiceError::NotRunning(reference)));
        service.start_race(reference).await.unwrap();
        assert!(service.accelerate(reference).await.is_ok());
        assert_eq!(
            service.start_race(reference).await,
            Err(SimServiceError::AlreadyStarted(reference))
        );
    }

    #[tokio::test]
    async fn unknown_selection_is_rejected() {
        let service = SimRaceService::with_seed(1);
        assert_eq!(
            service.create_race(DriverId(99), TrackId(1)).await,
            Err(SimServiceError::DriverNotFound(DriverId(99)))
        );
        assert_eq!(
            service.create_race(DriverId(1), TrackId(99)).await,
            Err(SimServiceError::TrackNotFound(TrackId(99)))
        );
    }
}
