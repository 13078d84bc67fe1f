//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`RaceController`]: one race session, run as a spawned task
//! - [`AccelerationDispatcher`]: fire-and-forget acceleration requests
//! - [`Driver`]: Platform-specific I/O
//!
//! Race events travel from the race task back to the loop over an unbounded
//! channel, so the App stays the only writer of view state.

use podrace_core::{
    AccelerationDispatcher, Environment, Operation, RaceConfig, RaceController, RaceError,
    RaceEvent, RaceObserver, RaceService, SessionState,
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{App, AppAction, AppEvent, Driver};

/// Forwards controller notifications into the runtime's event channel.
struct RaceEventForwarder {
    events: mpsc::UnboundedSender<AppEvent>,
}

impl RaceObserver for RaceEventForwarder {
    fn on_event(&mut self, event: RaceEvent) {
        if self.events.send(AppEvent::Race(event)).is_err() {
            tracing::debug!("runtime gone, race event dropped");
        }
    }
}

/// Generic runtime that orchestrates App, race tasks and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Race service (HTTP in production, simulated in tests)
/// - `E`: Environment supplying time to the countdown and poller
pub struct Runtime<D, S, E>
where
    D: Driver,
    S: RaceService,
    E: Environment,
{
    driver: D,
    app: App,
    service: S,
    env: E,
    config: RaceConfig,
    dispatcher: AccelerationDispatcher<S>,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    race_task: Option<JoinHandle<()>>,
}

impl<D, S, E> Runtime<D, S, E>
where
    D: Driver,
    S: RaceService,
    E: Environment,
{
    /// Create a new runtime with the given driver, service and environment.
    pub fn new(driver: D, service: S, env: E, config: RaceConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let dispatcher = AccelerationDispatcher::new(service.clone());
        Self {
            driver,
            app: App::new(),
            service,
            env,
            config,
            dispatcher,
            events_tx,
            events_rx,
            race_task: None,
        }
    }

    /// Run the main event loop.
    ///
    /// Loads the catalog, then handles driver input and race notifications
    /// until the App quits or the driver's input closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        if !self.process_actions(vec![AppAction::Render, AppAction::LoadCatalog]).await? {
            loop {
                let event = tokio::select! {
                    input = self.driver.next_event() => match input? {
                        Some(event) => event,
                        None => break,
                    },
                    Some(event) = self.events_rx.recv() => event,
                };

                let actions = self.app.handle(event);
                if self.process_actions(actions).await? {
                    break;
                }
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::LoadCatalog => {
                        let event = load_catalog(&self.service).await;
                        pending_actions.extend(self.app.handle(event));
                    },
                    AppAction::StartRace { session } => {
                        if !self.start_race(session) {
                            self.app.set_status("A race is already running");
                            pending_actions.push(AppAction::Render);
                        }
                    },
                    AppAction::Accelerate { race } => {
                        drop(self.dispatcher.fire(race.to_reference()));
                    },
                }
            }
        }
        Ok(false)
    }

    /// Spawn the race task for `session`.
    ///
    /// Returns `false` without spawning if a race task is still running.
    fn start_race(&mut self, mut session: SessionState) -> bool {
        if self.race_task.as_ref().is_some_and(|task| !task.is_finished()) {
            tracing::warn!("race already running, start ignored");
            return false;
        }

        let mut controller =
            RaceController::new(self.service.clone(), self.env.clone(), self.config.clone());
        let mut forwarder = RaceEventForwarder { events: self.events_tx.clone() };

        self.race_task = Some(tokio::spawn(async move {
            match controller.run(&mut session, &mut forwarder).await {
                Ok(snapshot) => {
                    tracing::info!(racers = snapshot.positions.len(), "race session complete");
                },
                Err(error) => tracing::debug!(%error, "race session ended without result"),
            }
        }));
        true
    }
}

impl<D, S, E> Drop for Runtime<D, S, E>
where
    D: Driver,
    S: RaceService,
    E: Environment,
{
    fn drop(&mut self) {
        if let Some(task) = self.race_task.take() {
            task.abort();
        }
    }
}

/// Fetch tracks and drivers concurrently.
async fn load_catalog<S: RaceService>(service: &S) -> AppEvent {
    let (tracks, racers) = tokio::join!(service.list_tracks(), service.list_racers());

    match (tracks, racers) {
        (Ok(tracks), Ok(racers)) => {
            tracing::info!(tracks = tracks.len(), racers = racers.len(), "catalog loaded");
            AppEvent::CatalogLoaded { tracks, racers }
        },
        (Err(e), _) => catalog_failed(Operation::ListTracks, &e),
        (_, Err(e)) => catalog_failed(Operation::ListRacers, &e),
    }
}

fn catalog_failed(operation: Operation, error: &impl std::fmt::Display) -> AppEvent {
    let error = RaceError::remote(operation, error);
    tracing::error!(%error, "catalog load failed");
    AppEvent::CatalogFailed { message: error.to_string() }
}
