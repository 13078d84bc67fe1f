//! Identifiers assigned by the race service.
//!
//! The service hands out race identifiers in one space (the value returned by
//! create-race) and expects them in another for every later per-race call:
//! `reference = creation - 1`. The two spaces are separate types so a
//! creation id cannot reach a per-race endpoint untranslated, and a reference
//! id cannot be translated a second time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Race identifier as returned by create-race (creation space).
///
/// This is the value stored in [`crate::SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceId(pub u64);

/// Race identifier expected by status, start and accelerate (reference
/// space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceId(pub u64);

/// Driver (car) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DriverId(pub u64);

/// Track identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

/// Translate a creation-space race id into the reference space.
///
/// Computes `creation - 1`. Wraps at zero so the function is total; the
/// service never issues a creation id of zero.
pub const fn to_reference_id(creation: RaceId) -> ReferenceId {
    ReferenceId(creation.0.wrapping_sub(1))
}

impl RaceId {
    /// Reference-space id for this race. See [`to_reference_id`].
    pub const fn to_reference(self) -> ReferenceId {
        to_reference_id(self)
    }
}

impl fmt::Display for RaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn prop_reference_is_creation_minus_one(c in 1..=u64::MAX) {
            prop_assert_eq!(to_reference_id(RaceId(c)), ReferenceId(c - 1));
            prop_assert_eq!(RaceId(c).to_reference(), to_reference_id(RaceId(c)));
        }
    }

    #[test]
    fn reference_is_one_below_creation() {
        assert_eq!(to_reference_id(RaceId(42)), ReferenceId(41));
        assert_eq!(RaceId(1).to_reference(), ReferenceId(0));
    }

    #[test]
    fn translation_is_total() {
        assert_eq!(to_reference_id(RaceId(0)), ReferenceId(u64::MAX));
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&RaceId(7)).unwrap();
        assert_eq!(json, "7");

        let id: DriverId = serde_json::from_str("3").unwrap();
        assert_eq!(id, DriverId(3));
    }
}
