//! Termin record types.
//!
//! This module provides the three views of an appointment:
//! - [`TerminSubmission`]: untrusted input as it arrives from the voice assistant
//! - [`Termin`]: the canonical form produced by [`crate::normalize::normalize`]
//! - [`TerminRecord`]: a stored appointment as reported by the record store

use serde::{Deserialize, Serialize};

use crate::availability::Slot;

/// Status given to appointments that arrive without one.
pub const DEFAULT_STATUS: &str = "Geplant";

/// A raw appointment submission.
///
/// Every value is untrusted free text. Date, time and email may come
/// brace-wrapped (`{14:30}`) depending on how the assistant filled its
/// slots; `terminDatum`/`terminZeit` also accept the older `datum`/
/// `uhrzeit` keys. Absent keys deserialize to empty strings so the
/// required-field check can report them by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TerminSubmission {
    #[serde(default)]
    pub kunde: String,
    #[serde(default)]
    pub telefonnummer: String,
    #[serde(default, rename = "terminDatum", alias = "datum")]
    pub termin_datum: String,
    #[serde(default, rename = "terminZeit", alias = "uhrzeit")]
    pub termin_zeit: String,
    #[serde(default)]
    pub dienstleistung: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub email: String,
}

impl TerminSubmission {
    /// Creates a submission with the required fields set.
    pub fn new(
        kunde: impl Into<String>,
        telefonnummer: impl Into<String>,
        termin_datum: impl Into<String>,
        termin_zeit: impl Into<String>,
        dienstleistung: impl Into<String>,
    ) -> Self {
        Self {
            kunde: kunde.into(),
            telefonnummer: telefonnummer.into(),
            termin_datum: termin_datum.into(),
            termin_zeit: termin_zeit.into(),
            dienstleistung: dienstleistung.into(),
            status: String::new(),
            email: String::new(),
        }
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builder method to set the email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

/// A fully normalized appointment, safe to hand to the record store.
///
/// Instances come out of [`crate::normalize::normalize`] only; every one
/// satisfies the field invariants: kunde, telefonnummer, terminDatum,
/// terminZeit and dienstleistung are non-empty, the date is `YYYY-MM-DD`,
/// the time is zero-padded `HH:MM`, the email is well-formed or empty and
/// the status is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termin {
    pub kunde: String,
    pub telefonnummer: String,
    #[serde(rename = "terminDatum")]
    pub termin_datum: String,
    #[serde(rename = "terminZeit")]
    pub termin_zeit: String,
    pub dienstleistung: String,
    pub status: String,
    pub email: String,
}

impl Termin {
    /// Returns the slot identity of this appointment.
    pub fn slot(&self) -> Slot {
        Slot::new(&self.termin_datum, &self.termin_zeit, &self.dienstleistung)
    }
}

impl From<Termin> for TerminSubmission {
    fn from(termin: Termin) -> Self {
        Self {
            kunde: termin.kunde,
            telefonnummer: termin.telefonnummer,
            termin_datum: termin.termin_datum,
            termin_zeit: termin.termin_zeit,
            dienstleistung: termin.dienstleistung,
            status: termin.status,
            email: termin.email,
        }
    }
}

/// A stored appointment as reported by the record store.
///
/// The store owns these records entirely; fields it does not carry are
/// reported as empty strings. Serialization yields the flat shape the
/// list endpoint returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminRecord {
    pub id: String,
    #[serde(default)]
    pub kunde: String,
    #[serde(default)]
    pub telefonnummer: String,
    #[serde(default, rename = "terminDatum")]
    pub termin_datum: String,
    #[serde(default, rename = "terminZeit")]
    pub termin_zeit: String,
    #[serde(default)]
    pub dienstleistung: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub email: String,
}

impl TerminRecord {
    /// Returns the slot identity of this record.
    pub fn slot(&self) -> Slot {
        Slot::new(&self.termin_datum, &self.termin_zeit, &self.dienstleistung)
    }
}
