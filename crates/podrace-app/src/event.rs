//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize).
//! - Service results: the catalog load and race lifecycle notifications.

use podrace_core::{RaceEvent, Racer, Track};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Tracks and drivers fetched.
    CatalogLoaded {
        /// Available tracks.
        tracks: Vec<Track>,
        /// Available drivers.
        racers: Vec<Racer>,
    },

    /// Catalog fetch failed.
    CatalogFailed {
        /// Error description.
        message: String,
    },

    /// Notification from the race controller.
    Race(RaceEvent),
}
