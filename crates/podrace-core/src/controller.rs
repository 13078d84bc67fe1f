//! Race lifecycle controller.
//!
//! Sequences one race session: create, countdown, start, poll, finish. Each
//! step is reported to a [`RaceObserver`] as a [`RaceEvent`]; the observer
//! owns all presentation.
//!
//! # Failure policy
//!
//! - Missing selection: reported as [`RaceEvent::Rejected`], no remote call,
//!   phase stays `Idle`.
//! - Create or start failure: phase `Failed`, reported as
//!   [`RaceEvent::Failed`], workflow halts. No retry.
//! - Poll failures never reach the controller; the poller logs and continues.

use crate::{
    Countdown, DriverId, Environment, Operation, Poller, RaceConfig, RaceDescriptor, RaceError,
    RaceLifecycle, RacePhase, RaceService, RaceSnapshot, SessionState,
};

/// Lifecycle notifications produced by [`RaceController::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceEvent {
    /// Start request refused before any remote call.
    Rejected {
        /// Validation failure.
        error: RaceError,
    },

    /// Race created. The pre-race view can be shown.
    Created {
        /// Race as returned by the service (creation-space id).
        race: RaceDescriptor,
        /// Driver the race was created for.
        driver: DriverId,
    },

    /// Countdown value after a decrement.
    Countdown {
        /// Seconds remaining.
        remaining: u32,
    },

    /// Start request accepted; acceleration is now meaningful.
    Started,

    /// Intermediate snapshot.
    Progress(RaceSnapshot),

    /// Terminal snapshot. Delivered once.
    Finished(RaceSnapshot),

    /// A lifecycle step failed. Nothing follows.
    Failed {
        /// Failure cause.
        error: RaceError,
    },
}

/// Receives [`RaceEvent`]s from the controller.
pub trait RaceObserver: Send {
    /// Handle one event.
    fn on_event(&mut self, event: RaceEvent);
}

impl RaceObserver for Vec<RaceEvent> {
    fn on_event(&mut self, event: RaceEvent) {
        self.push(event);
    }
}

/// Drives one race session through its lifecycle.
///
/// A controller is single-use: once `Finished` or `Failed`, [`Self::run`]
/// returns [`RaceError::InvalidTransition`]. Start a new session with a new
/// controller.
#[derive(Debug)]
pub struct RaceController<S, E> {
    service: S,
    env: E,
    config: RaceConfig,
    lifecycle: RaceLifecycle,
}

impl<S: RaceService, E: Environment> RaceController<S, E> {
    /// Create a controller in `Idle`.
    pub fn new(service: S, env: E, config: RaceConfig) -> Self {
        Self { service, env, config, lifecycle: RaceLifecycle::new() }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RacePhase {
        self.lifecycle.phase()
    }

    /// Run a full race for the selections in `session`.
    ///
    /// On success the terminal snapshot is returned (and was reported as
    /// [`RaceEvent::Finished`]). `session.active_race()` is set once the race
    /// is created and stays set afterwards.
    pub async fn run<O: RaceObserver>(
        &mut self,
        session: &mut SessionState,
        observer: &mut O,
    ) -> Result<RaceSnapshot, RaceError> {
        if self.phase() != RacePhase::Idle {
            return Err(RaceError::InvalidTransition {
                from: self.phase(),
                to: RacePhase::Created,
            });
        }

        let (driver, track) = match session.selection() {
            Ok(selection) => selection,
            Err(error) => {
                tracing::info!(%error, "race start rejected");
                observer.on_event(RaceEvent::Rejected { error: error.clone() });
                return Err(error);
            },
        };

        tracing::info!(%driver, %track, "creating race");
        let race = match self.service.create_race(driver, track).await {
            Ok(race) => race,
            Err(e) => return Err(self.fail(observer, RaceError::remote(Operation::CreateRace, &e))),
        };

        session.set_active_race(race.id);
        self.lifecycle.transition(RacePhase::Created)?;
        tracing::info!(race = %race.id, track = %race.track.name, "race created");
        observer.on_event(RaceEvent::Created { race: race.clone(), driver });

        self.lifecycle.transition(RacePhase::Countdown)?;
        let countdown =
            Countdown::new(self.env.clone(), self.config.settle_delay, self.config.tick);
        countdown
            .run(self.config.countdown_seconds, |remaining| {
                observer.on_event(RaceEvent::Countdown { remaining });
            })
            .await;

        let reference = race.id.to_reference();
        if let Err(e) = self.service.start_race(reference).await {
            return Err(self.fail(observer, RaceError::remote(Operation::StartRace, &e)));
        }
        self.lifecycle.transition(RacePhase::Started)?;
        tracing::info!(race = %race.id, %reference, "race started");
        observer.on_event(RaceEvent::Started);

        self.lifecycle.transition(RacePhase::Racing)?;
        let poller = Poller::new(self.service.clone(), self.env.clone(), self.config.poll_interval);
        let terminal = poller
            .run(reference, |snapshot| observer.on_event(RaceEvent::Progress(snapshot.clone())))
            .await;

        self.lifecycle.transition(RacePhase::Finished)?;
        observer.on_event(RaceEvent::Finished(terminal.clone()));
        Ok(terminal)
    }

    fn fail<O: RaceObserver>(&mut self, observer: &mut O, error: RaceError) -> RaceError {
        tracing::error!(phase = ?self.phase(), %error, "race failed");
        if let Err(e) = self.lifecycle.transition(RacePhase::Failed) {
            tracing::warn!(error = %e, "race already terminal");
        }
        observer.on_event(RaceEvent::Failed { error: error.clone() });
        error
    }
}
