//! Core types: Termin records, normalization, availability checks

pub mod availability;
pub mod normalize;
pub mod termin;
pub mod tracing;

pub use availability::{Slot, is_slot_free};
pub use normalize::{ValidationError, normalize, normalize_slot};
pub use termin::{DEFAULT_STATUS, Termin, TerminRecord, TerminSubmission};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
