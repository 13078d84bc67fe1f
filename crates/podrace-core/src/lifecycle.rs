//! Race lifecycle phases.
//!
//! ```text
//! Idle -> Created -> Countdown -> Started -> Racing -> Finished
//!   any non-terminal phase -> Failed
//! ```
//!
//! `Finished` and `Failed` are absorbing: once reached, no transition is
//! accepted and a new race needs a new session starting from `Idle`.

use crate::RaceError;

/// Phase of one race session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RacePhase {
    /// Nothing created yet.
    #[default]
    Idle,
    /// Race created on the service.
    Created,
    /// Pre-race countdown running.
    Countdown,
    /// Start request accepted.
    Started,
    /// Status polling in progress.
    Racing,
    /// Terminal snapshot received. Absorbing.
    Finished,
    /// A lifecycle step failed. Absorbing.
    Failed,
}

impl RacePhase {
    /// Whether this phase accepts no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (from, _) if from.is_terminal() => false,
            (_, Self::Failed) => true,
            (Self::Idle, Self::Created)
            | (Self::Created, Self::Countdown)
            | (Self::Countdown, Self::Started)
            | (Self::Started, Self::Racing)
            | (Self::Racing, Self::Finished) => true,
            _ => false,
        }
    }
}

/// Guarded holder of the current [`RacePhase`].
#[derive(Debug, Clone, Default)]
pub struct RaceLifecycle {
    phase: RacePhase,
}

impl RaceLifecycle {
    /// New lifecycle in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Move to `next`, rejecting illegal transitions.
    pub fn transition(&mut self, next: RacePhase) -> Result<(), RaceError> {
        if !self.phase.can_transition_to(next) {
            return Err(RaceError::InvalidTransition { from: self.phase, to: next });
        }
        tracing::debug!(from = ?self.phase, to = ?next, "race phase transition");
        self.phase = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const ALL: [RacePhase; 7] = [
        RacePhase::Idle,
        RacePhase::Created,
        RacePhase::Countdown,
        RacePhase::Started,
        RacePhase::Racing,
        RacePhase::Finished,
        RacePhase::Failed,
    ];

    #[test]
    fn happy_path_is_accepted() {
        let mut lifecycle = RaceLifecycle::new();
        for next in [
            RacePhase::Created,
            RacePhase::Countdown,
            RacePhase::Started,
            RacePhase::Racing,
            RacePhase::Finished,
        ] {
            lifecycle.transition(next).unwrap();
        }
        assert_eq!(lifecycle.phase(), RacePhase::Finished);
    }

    #[test]
    fn skipping_a_phase_is_rejected() {
        let mut lifecycle = RaceLifecycle::new();
        let err = lifecycle.transition(RacePhase::Started).unwrap_err();

        assert_eq!(err, RaceError::InvalidTransition {
            from: RacePhase::Idle,
            to: RacePhase::Started
        });
        assert_eq!(lifecycle.phase(), RacePhase::Idle);
    }

    #[test]
    fn any_live_phase_can_fail() {
        for phase in ALL.into_iter().filter(|p| !p.is_terminal()) {
            assert!(phase.can_transition_to(RacePhase::Failed), "{phase:?}");
        }
    }

    fn phase_strategy() -> impl Strategy<Value = RacePhase> {
        prop::sample::select(ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_terminal_phases_are_absorbing(
            terminal in prop::sample::select(vec![RacePhase::Finished, RacePhase::Failed]),
            attempts in prop::collection::vec(phase_strategy(), 1..20),
        ) {
            let mut lifecycle = RaceLifecycle { phase: terminal };
            for next in attempts {
                prop_assert!(lifecycle.transition(next).is_err());
                prop_assert_eq!(lifecycle.phase(), terminal);
            }
        }

        #[test]
        fn prop_rejected_transition_keeps_phase(
            attempts in prop::collection::vec(phase_strategy(), 0..30),
        ) {
            let mut lifecycle = RaceLifecycle::new();
            for next in attempts {
                let before = lifecycle.phase();
                match lifecycle.transition(next) {
                    Ok(()) => prop_assert_eq!(lifecycle.phase(), next),
                    Err(_) => prop_assert_eq!(lifecycle.phase(), before),
                }
            }
        }
    }
}
