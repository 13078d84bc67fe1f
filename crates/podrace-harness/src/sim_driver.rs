//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`podrace_app::Runtime`] orchestration code runs in both production and
//! simulation. Input is injected through a [`SimDriverHandle`]; every render
//! publishes a clone of the [`App`] that tests can wait on.

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use podrace_app::{App, AppEvent, Driver, KeyInput};
use thiserror::Error;
use tokio::sync::{mpsc, watch};

/// Error type for simulation driver.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimDriverError {
    /// The runtime dropped the driver before the awaited state was rendered.
    #[error("runtime stopped before the expected state was rendered")]
    RuntimeStopped,
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`podrace_app::Runtime`]
/// orchestration code runs in both production TUI and simulation tests.
#[derive(Debug)]
pub struct SimDriver {
    events: mpsc::UnboundedReceiver<AppEvent>,
    frames: watch::Sender<Option<App>>,
    renders: Arc<AtomicUsize>,
    stopped: Arc<AtomicBool>,
}

/// Test-side end of a [`SimDriver`].
///
/// Dropping the handle closes the driver's input, which ends the runtime.
#[derive(Debug)]
pub struct SimDriverHandle {
    events: mpsc::UnboundedSender<AppEvent>,
    frames: watch::Receiver<Option<App>>,
    renders: Arc<AtomicUsize>,
    stopped: Arc<AtomicBool>,
}

impl SimDriver {
    /// Create a driver and the handle used to feed it.
    pub fn new() -> (Self, SimDriverHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (frames_tx, frames_rx) = watch::channel(None);
        let renders = Arc::new(AtomicUsize::new(0));
        let stopped = Arc::new(AtomicBool::new(false));

        let driver = Self {
            events: events_rx,
            frames: frames_tx,
            renders: Arc::clone(&renders),
            stopped: Arc::clone(&stopped),
        };
        let handle = SimDriverHandle { events: events_tx, frames: frames_rx, renders, stopped };
        (driver, handle)
    }
}

impl SimDriverHandle {
    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("sim driver gone, event dropped");
        }
    }

    /// Inject key presses in order.
    pub fn press(&self, keys: impl IntoIterator<Item = KeyInput>) {
        for key in keys {
            self.inject_event(AppEvent::Key(key));
        }
    }

    /// Most recently rendered App. `None` before the first render.
    pub fn last_frame(&self) -> Option<App> {
        self.frames.borrow().clone()
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    /// Whether the runtime called [`Driver::stop`].
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Wait until a rendered App satisfies `predicate` and return it.
    ///
    /// Checks the latest frame first, then every later one.
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&App) -> bool,
    ) -> Result<App, SimDriverError> {
        let frame = self
            .frames
            .wait_for(|frame| frame.as_ref().is_some_and(&mut predicate))
            .await
            .map_err(|_| SimDriverError::RuntimeStopped)?;
        frame.clone().ok_or(SimDriverError::RuntimeStopped)
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn next_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.events.recv().await)
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        self.frames.send_replace(Some(app.clone()));
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use podrace_app::{AppAction, Screen};

    use super::*;

    #[tokio::test]
    async fn injected_events_arrive_in_order() {
        let (mut driver, handle) = SimDriver::new();
        handle.press([KeyInput::Tab, KeyInput::Enter]);

        assert!(matches!(driver.next_event().await, Ok(Some(AppEvent::Key(KeyInput::Tab)))));
        assert!(matches!(driver.next_event().await, Ok(Some(AppEvent::Key(KeyInput::Enter)))));
    }

    #[tokio::test]
    async fn dropping_handle_closes_input() {
        let (mut driver, handle) = SimDriver::new();
        drop(handle);
        assert!(matches!(driver.next_event().await, Ok(None)));
    }

    #[tokio::test]
    async fn render_publishes_frame() {
        let (mut driver, mut handle) = SimDriver::new();
        assert!(handle.last_frame().is_none());

        let mut app = App::new();
        let actions = app.handle(AppEvent::Resize(100, 40));
        assert_eq!(actions, [AppAction::Render]);
        driver.render(&app).unwrap();

        let frame = handle.wait_for(|app| app.terminal_size() == (100, 40)).await.unwrap();
        assert_eq!(frame.screen(), Screen::Selection);
        assert_eq!(handle.render_count(), 1);
    }

    #[tokio::test]
    async fn wait_fails_once_driver_is_gone() {
        let (driver, mut handle) = SimDriver::new();
        drop(driver);
        assert_eq!(handle.wait_for(|_| true).await.unwrap_err(), SimDriverError::RuntimeStopped);
    }
}
