//! Property-based tests for App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.

use podrace_app::{App, AppAction, AppEvent, KeyInput, Screen};
use podrace_core::{DriverId, RaceDescriptor, RaceEvent, RaceId, Racer, Track, TrackId};
use proptest::prelude::*;

fn catalog(tracks: u64, racers: u64) -> AppEvent {
    AppEvent::CatalogLoaded {
        tracks: (1..=tracks)
            .map(|i| Track { id: TrackId(i), name: format!("Track {i}") })
            .collect(),
        racers: (1..=racers)
            .map(|i| Racer {
                id: DriverId(i),
                driver_name: format!("Racer {i}"),
                top_speed: 500,
                acceleration: 10,
                handling: 10,
            })
            .collect(),
    }
}

fn race() -> RaceDescriptor {
    RaceDescriptor { id: RaceId(9), track: Track { id: TrackId(1), name: "Track 1".into() } }
}

fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        Just(KeyInput::Up),
        Just(KeyInput::Down),
        Just(KeyInput::Tab),
        Just(KeyInput::Enter),
        Just(KeyInput::Char('s')),
        Just(KeyInput::Char(' ')),
        Just(KeyInput::Char('n')),
        Just(KeyInput::Char('x')),
    ]
}

/// Generate random app events, excluding quit keys.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        4 => key_strategy().prop_map(AppEvent::Key),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
        1 => (0u64..4, 0u64..6).prop_map(|(t, r)| catalog(t, r)),
        1 => Just(AppEvent::Race(RaceEvent::Created { race: race(), driver: DriverId(1) })),
        1 => Just(AppEvent::Race(RaceEvent::Started)),
        1 => (0u32..4).prop_map(|remaining| AppEvent::Race(RaceEvent::Countdown { remaining })),
    ]
}

proptest! {
    #[test]
    fn prop_cursors_stay_in_bounds(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut app = App::new();
        for event in events {
            let _ = app.handle(event);
            prop_assert!(app.tracks().is_empty() || app.track_cursor() < app.tracks().len());
            prop_assert!(app.racers().is_empty() || app.racer_cursor() < app.racers().len());
        }
    }

    #[test]
    fn prop_race_screen_requires_created_race(
        events in prop::collection::vec(event_strategy(), 0..60)
    ) {
        let mut app = App::new();
        for event in events {
            let _ = app.handle(event);
            if app.screen() == Screen::Race {
                prop_assert!(app.race().race.is_some());
            }
        }
    }

    #[test]
    fn prop_accelerate_actions_match_counter(
        events in prop::collection::vec(event_strategy(), 0..60)
    ) {
        let mut app = App::new();
        let mut sent = 0u32;
        for event in events {
            let before = app.race().race.clone();
            let actions = app.handle(event);
            let fired =
                actions.iter().filter(|a| matches!(a, AppAction::Accelerate { .. })).count();
            prop_assert!(fired <= 1);
            if fired == 1 {
                prop_assert!(before.is_some());
            }
            sent += fired as u32;
            if app.race().accelerations == 0 {
                sent = 0;
            }
            prop_assert_eq!(app.race().accelerations, sent);
        }
    }

    #[test]
    fn prop_selection_only_from_catalog(
        events in prop::collection::vec(event_strategy(), 0..60)
    ) {
        let mut app = App::new();
        for event in events {
            let _ = app.handle(event);
        }
        // Catalog ids are 1..=n, so any selection is in that range.
        if let Some(track) = app.session().selected_track() {
            prop_assert!((1..=3).contains(&track.0));
        }
        if let Some(driver) = app.session().selected_driver() {
            prop_assert!((1..=5).contains(&driver.0));
        }
    }
}

#[test]
fn quit_keys_always_quit() {
    for key in [KeyInput::Esc, KeyInput::Char('q')] {
        let mut app = App::new();
        let _ = app.handle(catalog(2, 2));
        assert_eq!(app.handle(AppEvent::Key(key)), [AppAction::Quit]);
    }
}
