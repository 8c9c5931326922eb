//! HTTP surface: routes, handlers, config.
//!
//! The server glues the pure core (normalization, availability) to the
//! record store behind [`terminhub_airtable::TerminStore`]. Handlers
//! normalize first, talk to the store second, and surface both kinds of
//! failure as structured JSON.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::{AppState, StoreIdentity, app};
