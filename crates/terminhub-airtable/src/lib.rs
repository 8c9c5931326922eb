//! Airtable-backed Termin store.
//!
//! This crate owns everything that talks to the remote table:
//! - [`TerminStore`]: the seam the HTTP surface depends on
//! - [`AirtableClient`]: the reqwest-based implementation
//! - [`AirtableConfig`]: explicit connection configuration
//! - [`StoreError`]: transport and upstream failures, surfaced verbatim

mod client;
mod config;
mod error;
mod store;

pub use client::AirtableClient;
pub use config::{AirtableConfig, ConfigError};
pub use error::{StoreError, StoreResult};
pub use store::{BoxFuture, DeletedRecord, TerminStore};
