//! Submission normalization pipeline.
//!
//! This module turns a raw [`TerminSubmission`] into a canonical
//! [`Termin`], or reports the first check that failed.
//!
//! The pipeline, in order:
//! 1. Strips `{...}` wrappers and surrounding whitespace from date, time
//!    and email
//! 2. Parses the date to `YYYY-MM-DD`
//! 3. Normalizes the time to zero-padded `HH:MM`
//! 4. Validates the email shape (empty is allowed)
//! 5. Checks the required fields and names the absent ones
//! 6. Rewrites a leading `0` on the phone number to `+49`
//! 7. Defaults an empty status to [`DEFAULT_STATUS`]
//!
//! Empty date and time values skip their parse steps so the
//! required-field check can report them by name instead of masking them
//! as parse failures.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use thiserror::Error;

use crate::availability::Slot;
use crate::termin::{DEFAULT_STATUS, Termin, TerminSubmission};

/// Shape every normalized time must have.
static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("invalid time regex"));

/// `local@domain.tld`: no whitespace, no second `@`, a dot in the domain.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Datetime layouts tried after RFC 3339 fails. Only the date component
/// survives.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Plain date layouts tried after the ISO form fails. The dotted form is
/// what German-speaking callers dictate; the slash form is what the
/// assistant platform produces when it re-renders a date.
const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// A submission field that failed its shape check.
///
/// These are deterministic input failures: the same submission always
/// produces the same error, so retries never apply. Callers branch on
/// the variant, not on the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The date could not be read as a calendar date.
    #[error("terminDatum ist ungültig: {0}")]
    InvalidDate(String),

    /// The time could not be reduced to `HH:MM`.
    #[error("terminZeit ist ungültig: {0}")]
    InvalidTime(String),

    /// The email is non-empty but not `local@domain.tld`-shaped.
    #[error("email ist ungültig: {0}")]
    InvalidEmail(String),

    /// Required fields are absent, listed by their wire names.
    #[error("Pflichtfelder fehlen: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

impl ValidationError {
    /// Returns a stable machine-readable name for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidTime(_) => "invalid_time",
            Self::InvalidEmail(_) => "invalid_email",
            Self::MissingFields(_) => "missing_fields",
        }
    }
}

/// Normalizes a raw submission into a canonical [`Termin`].
///
/// Pure function: the only outcome is the returned value. The first
/// failing check wins; see the module docs for the check order.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first check the submission
/// fails.
pub fn normalize(raw: &TerminSubmission) -> Result<Termin, ValidationError> {
    let kunde = raw.kunde.trim();
    let telefonnummer = raw.telefonnummer.trim();
    let dienstleistung = raw.dienstleistung.trim();

    let datum_raw = strip_braces(&raw.termin_datum);
    let zeit_raw = strip_braces(&raw.termin_zeit);
    let email_raw = strip_braces(&raw.email);

    let termin_datum = if datum_raw.is_empty() {
        String::new()
    } else {
        normalize_datum(&datum_raw)?
    };
    let termin_zeit = if zeit_raw.is_empty() {
        String::new()
    } else {
        normalize_uhrzeit(&zeit_raw)?
    };
    let email = validate_email(&email_raw)?;

    let mut missing = Vec::new();
    if kunde.is_empty() {
        missing.push("kunde");
    }
    if telefonnummer.is_empty() {
        missing.push("telefonnummer");
    }
    if termin_datum.is_empty() {
        missing.push("terminDatum");
    }
    if termin_zeit.is_empty() {
        missing.push("terminZeit");
    }
    if dienstleistung.is_empty() {
        missing.push("dienstleistung");
    }
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(
            missing.into_iter().map(String::from).collect(),
        ));
    }

    let status = match raw.status.trim() {
        "" => DEFAULT_STATUS.to_string(),
        status => status.to_string(),
    };

    Ok(Termin {
        kunde: kunde.to_string(),
        telefonnummer: normalize_telefonnummer(telefonnummer),
        termin_datum,
        termin_zeit,
        dienstleistung: dienstleistung.to_string(),
        status,
        email,
    })
}

/// Normalizes an availability query into a canonical [`Slot`].
///
/// Runs the same brace stripping and date/time normalization as
/// [`normalize`], so raw assistant values can be compared against stored
/// records.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] / [`ValidationError::InvalidTime`]
/// for unparseable values and [`ValidationError::MissingFields`] for empty
/// ones.
pub fn normalize_slot(
    termin_datum: &str,
    termin_zeit: &str,
    dienstleistung: &str,
) -> Result<Slot, ValidationError> {
    let datum_raw = strip_braces(termin_datum);
    let zeit_raw = strip_braces(termin_zeit);
    let dienstleistung = dienstleistung.trim();

    let datum = if datum_raw.is_empty() {
        String::new()
    } else {
        normalize_datum(&datum_raw)?
    };
    let zeit = if zeit_raw.is_empty() {
        String::new()
    } else {
        normalize_uhrzeit(&zeit_raw)?
    };

    let mut missing = Vec::new();
    if datum.is_empty() {
        missing.push("terminDatum");
    }
    if zeit.is_empty() {
        missing.push("terminZeit");
    }
    if dienstleistung.is_empty() {
        missing.push("dienstleistung");
    }
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(
            missing.into_iter().map(String::from).collect(),
        ));
    }

    Ok(Slot::new(datum, zeit, dienstleistung))
}

/// Removes a `{...}` wrapper and surrounding whitespace.
///
/// Unbalanced braces are left alone.
fn strip_braces(value: &str) -> String {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(trimmed);
    inner.trim().to_string()
}

/// Reduces a non-empty date value to its ISO `YYYY-MM-DD` form.
fn normalize_datum(value: &str) -> Result<String, ValidationError> {
    parse_datum(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ValidationError::InvalidDate(value.to_string()))
}

fn parse_datum(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    None
}

/// Reduces a non-empty time value to zero-padded `HH:MM`.
///
/// `.` and `-` delimiters are unified to `:`, a seconds component is
/// dropped and a single-digit hour is padded. The result is checked
/// lexically only; `25:99` passes.
fn normalize_uhrzeit(value: &str) -> Result<String, ValidationError> {
    let unified = value.replace(['.', '-'], ":");
    let mut parts: Vec<&str> = unified.split(':').collect();
    if parts.len() == 3 {
        parts.truncate(2);
    }

    let normalized = match parts.as_slice() {
        [hour, minute] => {
            let hour = if hour.len() == 1 {
                format!("0{hour}")
            } else {
                (*hour).to_string()
            };
            format!("{hour}:{minute}")
        }
        _ => unified.clone(),
    };

    if TIME_SHAPE.is_match(&normalized) {
        Ok(normalized)
    } else {
        Err(ValidationError::InvalidTime(value.to_string()))
    }
}

/// Passes an empty email through and checks the shape of a non-empty one.
fn validate_email(value: &str) -> Result<String, ValidationError> {
    if value.is_empty() || EMAIL_SHAPE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(ValidationError::InvalidEmail(value.to_string()))
    }
}

/// Rewrites a leading national trunk `0` to the `+49` calling prefix.
///
/// No other cleanup happens here: digits are not stripped and the length
/// is not checked, matching what the store already contains.
fn normalize_telefonnummer(value: &str) -> String {
    match value.strip_prefix('0') {
        Some(rest) => format!("+49{rest}"),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_submission() -> TerminSubmission {
        TerminSubmission::new(
            "Max Mustermann",
            "017612345678",
            "2025-02-11",
            "15:00",
            "Haarschnitt",
        )
        .with_email("max@example.com")
    }

    mod dates {
        use super::*;

        #[test]
        fn iso_date_passes_through() {
            let termin = normalize(&sample_submission()).unwrap();
            assert_eq!(termin.termin_datum, "2025-02-11");
        }

        #[test]
        fn brace_wrapped_date_is_unwrapped() {
            let mut submission = sample_submission();
            submission.termin_datum = "{2025-02-11}".to_string();
            let termin = normalize(&submission).unwrap();
            assert_eq!(termin.termin_datum, "2025-02-11");
        }

        #[test]
        fn rfc3339_reduces_to_date_component() {
            let mut submission = sample_submission();
            submission.termin_datum = "2025-02-11T15:00:00+01:00".to_string();
            let termin = normalize(&submission).unwrap();
            assert_eq!(termin.termin_datum, "2025-02-11");
        }

        #[test]
        fn naive_datetime_reduces_to_date_component() {
            let mut submission = sample_submission();
            submission.termin_datum = "2025-02-11 15:00:00".to_string();
            let termin = normalize(&submission).unwrap();
            assert_eq!(termin.termin_datum, "2025-02-11");
        }

        #[test]
        fn german_dotted_date_is_accepted() {
            let mut submission = sample_submission();
            submission.termin_datum = "11.02.2025".to_string();
            let termin = normalize(&submission).unwrap();
            assert_eq!(termin.termin_datum, "2025-02-11");
        }

        #[test]
        fn slash_date_is_accepted() {
            let mut submission = sample_submission();
            submission.termin_datum = "02/11/2025".to_string();
            let termin = normalize(&submission).unwrap();
            assert_eq!(termin.termin_datum, "2025-02-11");
        }

        #[test]
        fn unparseable_date_is_rejected() {
            let mut submission = sample_submission();
            submission.termin_datum = "morgen früh".to_string();
            assert_eq!(
                normalize(&submission),
                Err(ValidationError::InvalidDate("morgen früh".to_string()))
            );
        }

        #[test]
        fn date_failure_wins_over_later_checks() {
            let mut submission = sample_submission();
            submission.termin_datum = "not-a-date".to_string();
            submission.termin_zeit = "not-a-time".to_string();
            submission.kunde = String::new();
            assert!(matches!(
                normalize(&submission),
                Err(ValidationError::InvalidDate(_))
            ));
        }
    }

    mod times {
        use super::*;

        fn normalize_time_of(zeit: &str) -> Result<String, ValidationError> {
            let mut submission = sample_submission();
            submission.termin_zeit = zeit.to_string();
            normalize(&submission).map(|termin| termin.termin_zeit)
        }

        #[test]
        fn canonical_time_passes_through() {
            assert_eq!(normalize_time_of("15:00").unwrap(), "15:00");
        }

        #[test]
        fn single_digit_hour_is_padded() {
            assert_eq!(normalize_time_of("9:15").unwrap(), "09:15");
        }

        #[test]
        fn dot_delimiter_is_unified() {
            assert_eq!(normalize_time_of("14.30").unwrap(), "14:30");
        }

        #[test]
        fn dash_delimiter_is_unified() {
            assert_eq!(normalize_time_of("14-30").unwrap(), "14:30");
        }

        #[test]
        fn seconds_are_truncated() {
            assert_eq!(normalize_time_of("15:00:00").unwrap(), "15:00");
        }

        #[test]
        fn brace_wrapped_time_is_unwrapped() {
            assert_eq!(normalize_time_of("{9.15}").unwrap(), "09:15");
        }

        #[test]
        fn out_of_range_time_is_only_checked_lexically() {
            // The shape check is lexical; 25:99 is preserved as-is.
            assert_eq!(normalize_time_of("25:99").unwrap(), "25:99");
        }

        #[test]
        fn single_digit_minute_is_rejected() {
            assert_eq!(
                normalize_time_of("9:5"),
                Err(ValidationError::InvalidTime("9:5".to_string()))
            );
        }

        #[test]
        fn digits_without_delimiter_are_rejected() {
            assert_eq!(
                normalize_time_of("1500"),
                Err(ValidationError::InvalidTime("1500".to_string()))
            );
        }

        #[test]
        fn four_component_time_is_rejected() {
            assert!(normalize_time_of("15:00:00:00").is_err());
        }
    }

    mod emails {
        use super::*;

        #[test]
        fn empty_email_is_valid() {
            let mut submission = sample_submission();
            submission.email = String::new();
            assert_eq!(normalize(&submission).unwrap().email, "");
        }

        #[test]
        fn short_valid_email_is_accepted() {
            let mut submission = sample_submission();
            submission.email = "a@b.co".to_string();
            assert_eq!(normalize(&submission).unwrap().email, "a@b.co");
        }

        #[test]
        fn brace_wrapped_email_is_unwrapped() {
            let mut submission = sample_submission();
            submission.email = "{max@example.com}".to_string();
            assert_eq!(normalize(&submission).unwrap().email, "max@example.com");
        }

        #[test]
        fn word_without_at_is_rejected() {
            let mut submission = sample_submission();
            submission.email = "not-an-email".to_string();
            assert_eq!(
                normalize(&submission),
                Err(ValidationError::InvalidEmail("not-an-email".to_string()))
            );
        }

        #[test]
        fn domain_without_dot_is_rejected() {
            let mut submission = sample_submission();
            submission.email = "max@localhost".to_string();
            assert!(matches!(
                normalize(&submission),
                Err(ValidationError::InvalidEmail(_))
            ));
        }
    }

    mod phone {
        use super::*;

        #[test]
        fn leading_zero_becomes_country_prefix() {
            let termin = normalize(&sample_submission()).unwrap();
            assert_eq!(termin.telefonnummer, "+4917612345678");
        }

        #[test]
        fn international_number_is_untouched() {
            let mut submission = sample_submission();
            submission.telefonnummer = "+4917612345678".to_string();
            let termin = normalize(&submission).unwrap();
            assert_eq!(termin.telefonnummer, "+4917612345678");
        }

        #[test]
        fn non_digit_content_is_not_cleaned() {
            // Only the trunk prefix is rewritten; spacing survives.
            let mut submission = sample_submission();
            submission.telefonnummer = "0176 12345678".to_string();
            let termin = normalize(&submission).unwrap();
            assert_eq!(termin.telefonnummer, "+49176 12345678");
        }
    }

    mod required_fields {
        use super::*;

        #[test]
        fn all_absent_fields_are_named() {
            let submission = TerminSubmission::default();
            assert_eq!(
                normalize(&submission),
                Err(ValidationError::MissingFields(vec![
                    "kunde".to_string(),
                    "telefonnummer".to_string(),
                    "terminDatum".to_string(),
                    "terminZeit".to_string(),
                    "dienstleistung".to_string(),
                ]))
            );
        }

        #[test]
        fn only_absent_fields_are_named() {
            let mut submission = sample_submission();
            submission.kunde = String::new();
            submission.dienstleistung = "   ".to_string();
            assert_eq!(
                normalize(&submission),
                Err(ValidationError::MissingFields(vec![
                    "kunde".to_string(),
                    "dienstleistung".to_string(),
                ]))
            );
        }

        #[test]
        fn empty_date_reports_missing_not_invalid() {
            let mut submission = sample_submission();
            submission.termin_datum = String::new();
            assert_eq!(
                normalize(&submission),
                Err(ValidationError::MissingFields(vec![
                    "terminDatum".to_string()
                ]))
            );
        }

        #[test]
        fn empty_braces_count_as_missing() {
            let mut submission = sample_submission();
            submission.termin_zeit = "{}".to_string();
            assert_eq!(
                normalize(&submission),
                Err(ValidationError::MissingFields(vec![
                    "terminZeit".to_string()
                ]))
            );
        }
    }

    mod status {
        use super::*;

        #[test]
        fn absent_status_defaults_to_geplant() {
            let termin = normalize(&sample_submission()).unwrap();
            assert_eq!(termin.status, DEFAULT_STATUS);
        }

        #[test]
        fn explicit_status_passes_through() {
            let submission = sample_submission().with_status("Bestätigt");
            let termin = normalize(&submission).unwrap();
            assert_eq!(termin.status, "Bestätigt");
        }
    }

    mod idempotence {
        use super::*;

        #[test]
        fn normalizing_a_normalized_record_is_identity() {
            let first = normalize(&sample_submission()).unwrap();
            let second = normalize(&TerminSubmission::from(first.clone())).unwrap();
            assert_eq!(first, second);
        }
    }

    mod slots {
        use super::*;

        #[test]
        fn raw_slot_values_are_normalized() {
            let slot = normalize_slot("{11.02.2025}", "9.15", "Haarschnitt").unwrap();
            assert_eq!(slot.termin_datum, "2025-02-11");
            assert_eq!(slot.termin_zeit, "09:15");
            assert_eq!(slot.dienstleistung, "Haarschnitt");
        }

        #[test]
        fn empty_slot_fields_are_named() {
            assert_eq!(
                normalize_slot("", "15:00", ""),
                Err(ValidationError::MissingFields(vec![
                    "terminDatum".to_string(),
                    "dienstleistung".to_string(),
                ]))
            );
        }

        #[test]
        fn invalid_slot_time_is_rejected() {
            assert!(matches!(
                normalize_slot("2025-02-11", "later", "Haarschnitt"),
                Err(ValidationError::InvalidTime(_))
            ));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn kinds_are_stable() {
            assert_eq!(ValidationError::InvalidDate(String::new()).kind(), "invalid_date");
            assert_eq!(ValidationError::InvalidTime(String::new()).kind(), "invalid_time");
            assert_eq!(
                ValidationError::InvalidEmail(String::new()).kind(),
                "invalid_email"
            );
            assert_eq!(
                ValidationError::MissingFields(Vec::new()).kind(),
                "missing_fields"
            );
        }

        #[test]
        fn missing_fields_message_lists_names() {
            let error = ValidationError::MissingFields(vec![
                "kunde".to_string(),
                "terminZeit".to_string(),
            ]);
            assert_eq!(error.to_string(), "Pflichtfelder fehlen: kunde, terminZeit");
        }
    }
}
