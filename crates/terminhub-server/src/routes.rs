//! Router assembly and shared state.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, post};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use terminhub_airtable::{AirtableConfig, TerminStore};

use crate::handlers;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The record store behind the API.
    pub store: Arc<dyn TerminStore>,
    /// What `/check-env` reports.
    pub store_identity: StoreIdentity,
}

/// What the configured store looks like from the outside: the base id
/// and whether a token is present, never the token itself.
#[derive(Debug, Clone, Serialize)]
pub struct StoreIdentity {
    #[serde(rename = "AIRTABLE_BASE_ID")]
    pub base_id: String,
    #[serde(rename = "AIRTABLE_ACCESS_TOKEN")]
    pub access_token: &'static str,
}

impl StoreIdentity {
    /// Derives the reportable identity from a store configuration.
    pub fn from_config(config: &AirtableConfig) -> Self {
        Self {
            base_id: config.base_id.clone(),
            access_token: if config.has_access_token() {
                "EXISTS"
            } else {
                "MISSING"
            },
        }
    }
}

/// Builds the application router.
///
/// CORS is deliberately permissive: the assistant platform calls from
/// changing origins.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/check-env", get(handlers::check_env))
        .route(
            "/api/termine",
            get(handlers::list_termine).post(handlers::create_termin),
        )
        .route(
            "/api/termine/verfuegbarkeit",
            post(handlers::check_verfuegbarkeit),
        )
        .route("/api/termine/{id}", delete(handlers::delete_termin))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
