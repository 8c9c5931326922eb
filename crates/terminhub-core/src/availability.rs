//! Slot availability checks.

use serde::{Deserialize, Serialize};

/// The identity of a bookable slot: exact date, time and service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "terminDatum")]
    pub termin_datum: String,
    #[serde(rename = "terminZeit")]
    pub termin_zeit: String,
    pub dienstleistung: String,
}

impl Slot {
    /// Creates a slot from its three identity fields.
    pub fn new(
        termin_datum: impl Into<String>,
        termin_zeit: impl Into<String>,
        dienstleistung: impl Into<String>,
    ) -> Self {
        Self {
            termin_datum: termin_datum.into(),
            termin_zeit: termin_zeit.into(),
            dienstleistung: dienstleistung.into(),
        }
    }
}

/// Returns `true` when no stored slot matches the candidate on all three
/// fields.
///
/// Comparison is exact and case-sensitive; pass canonical values (see
/// [`crate::normalize`]) for a meaningful answer. A matching date and
/// time with a different service still counts as free.
///
/// The check is advisory only: it is not atomic with a subsequent create,
/// so two concurrent callers can both see a free slot before either one
/// persists it. The record store exposes no conditional write to close
/// that gap.
pub fn is_slot_free(candidate: &Slot, existing: &[Slot]) -> bool {
    !existing.iter().any(|slot| slot == candidate)
}
