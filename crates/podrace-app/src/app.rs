//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the interactive
//! state of the application completely decoupled from I/O and race
//! mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Owns the [`SessionState`] while the user selects a track and driver, and
//!   hands a copy to the runtime when a race is started.
//! - Turns race lifecycle notifications into the race screen's view model.
//! - Stores terminal dimensions to handle resize events.

use podrace_core::{
    RaceEvent, RacePhase, Racer, SessionState, Track, final_standings, live_standings,
};

use crate::{AppAction, AppEvent, CatalogState, Focus, KeyInput, RaceView, Screen};

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Screen currently shown.
    screen: Screen,
    /// Selections made so far.
    session: SessionState,
    /// Catalog load progress.
    catalog: CatalogState,
    /// Available tracks.
    tracks: Vec<Track>,
    /// Available drivers.
    racers: Vec<Racer>,
    /// List receiving cursor keys.
    focus: Focus,
    /// Highlighted track index.
    track_cursor: usize,
    /// Highlighted driver index.
    racer_cursor: usize,
    /// Race screen state.
    race: RaceView,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create an App on the selection screen with an empty session.
    pub fn new() -> Self {
        Self { terminal_size: (80, 24), ..Self::default() }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::CatalogLoaded { tracks, racers } => {
                self.tracks = tracks;
                self.racers = racers;
                self.track_cursor = 0;
                self.racer_cursor = 0;
                self.catalog = CatalogState::Ready;
                vec![AppAction::Render]
            },
            AppEvent::CatalogFailed { message } => {
                self.catalog = CatalogState::Failed;
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
            AppEvent::Race(event) => self.handle_race_event(event),
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if matches!(key, KeyInput::Esc | KeyInput::Char('q')) {
            return self.quit();
        }

        match self.screen {
            Screen::Selection => match key {
                KeyInput::Tab => {
                    self.focus = self.focus.toggle();
                    vec![AppAction::Render]
                },
                KeyInput::Up => {
                    self.move_cursor(false);
                    vec![AppAction::Render]
                },
                KeyInput::Down => {
                    self.move_cursor(true);
                    vec![AppAction::Render]
                },
                KeyInput::Enter => self.select_highlighted(),
                KeyInput::Char('s') => self.start_race(),
                _ => vec![],
            },
            Screen::Race => match key {
                KeyInput::Char(' ') => self.accelerate(),
                KeyInput::Char('n') => self.new_session(),
                _ => vec![],
            },
        }
    }

    fn handle_race_event(&mut self, event: RaceEvent) -> Vec<AppAction> {
        match event {
            RaceEvent::Rejected { error } => {
                self.status_message = Some(error.to_string());
            },
            RaceEvent::Created { race, driver } => {
                self.status_message = Some(format!("Race on {} created", race.track.name));
                self.race = RaceView::created(race, driver);
                self.screen = Screen::Race;
            },
            RaceEvent::Countdown { remaining } => {
                self.race.phase = RacePhase::Countdown;
                self.race.countdown = Some(remaining);
            },
            RaceEvent::Started => {
                self.race.phase = RacePhase::Started;
                self.status_message = Some("Race started, press space to accelerate".into());
            },
            RaceEvent::Progress(snapshot) => {
                self.race.phase = RacePhase::Racing;
                self.race.standings = live_standings(&snapshot, self.race.driver);
            },
            RaceEvent::Finished(snapshot) => {
                let you = self.race.driver;
                self.race.phase = RacePhase::Finished;
                self.race.standings = live_standings(&snapshot, you);
                self.race.results = final_standings(&snapshot, you);
                self.status_message = Some("Race finished, press n for a new race".into());
            },
            RaceEvent::Failed { error } => {
                self.race.phase = RacePhase::Failed;
                self.status_message = Some(format!("Error: {error}"));
            },
        }
        vec![AppAction::Render]
    }

    fn move_cursor(&mut self, down: bool) {
        let (cursor, len) = match self.focus {
            Focus::Tracks => (&mut self.track_cursor, self.tracks.len()),
            Focus::Racers => (&mut self.racer_cursor, self.racers.len()),
        };
        if down {
            *cursor = (*cursor + 1).min(len.saturating_sub(1));
        } else {
            *cursor = cursor.saturating_sub(1);
        }
    }

    fn select_highlighted(&mut self) -> Vec<AppAction> {
        match self.focus {
            Focus::Tracks => {
                if let Some(track) = self.tracks.get(self.track_cursor) {
                    self.session.select_track(track.id);
                    self.status_message = Some(format!("Track: {}", track.name));
                }
            },
            Focus::Racers => {
                if let Some(racer) = self.racers.get(self.racer_cursor) {
                    self.session.select_driver(racer.id);
                    self.status_message = Some(format!("Driver: {}", racer.driver_name));
                }
            },
        }
        vec![AppAction::Render]
    }

    /// Ask the runtime to run a race for the current selections.
    ///
    /// Validation happens in the race controller; a missing selection comes
    /// back as [`RaceEvent::Rejected`].
    pub fn start_race(&mut self) -> Vec<AppAction> {
        self.status_message = Some("Starting race...".into());
        vec![AppAction::StartRace { session: self.session }, AppAction::Render]
    }

    /// Request one acceleration. Ignored unless the race is started.
    pub fn accelerate(&mut self) -> Vec<AppAction> {
        match &self.race.race {
            Some(race) if self.race.accepts_acceleration() => {
                let race = race.id;
                self.race.accelerations += 1;
                vec![AppAction::Accelerate { race }, AppAction::Render]
            },
            _ => vec![],
        }
    }

    /// Discard the finished session and return to selection.
    ///
    /// Ignored while the race is still running.
    pub fn new_session(&mut self) -> Vec<AppAction> {
        if !self.race.phase.is_terminal() {
            return vec![];
        }
        self.session = SessionState::new();
        self.race = RaceView::default();
        self.screen = Screen::Selection;
        self.focus = Focus::Tracks;
        self.catalog = CatalogState::Loading;
        self.status_message = None;
        vec![AppAction::LoadCatalog, AppAction::Render]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Screen currently shown.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Selections made so far.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Catalog load progress.
    pub fn catalog(&self) -> CatalogState {
        self.catalog
    }

    /// Available tracks.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Available drivers.
    pub fn racers(&self) -> &[Racer] {
        &self.racers
    }

    /// List receiving cursor keys.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Highlighted track index.
    pub fn track_cursor(&self) -> usize {
        self.track_cursor
    }

    /// Highlighted driver index.
    pub fn racer_cursor(&self) -> usize {
        self.racer_cursor
    }

    /// Race screen state.
    pub fn race(&self) -> &RaceView {
        &self.race
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
