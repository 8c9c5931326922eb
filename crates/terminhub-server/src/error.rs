//! Error responses for the HTTP surface.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use terminhub_airtable::StoreError;
use terminhub_core::ValidationError;

/// Anything a handler can fail with.
///
/// Validation failures are detected before any store call and map to a
/// client error; store failures are surfaced with the upstream payload
/// attached and never retried.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The submission failed a local shape check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Talking to the record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(validation) => {
                let fields = match &validation {
                    ValidationError::MissingFields(names) => Some(names.clone()),
                    _ => None,
                };
                let body = ErrorBody {
                    error: validation.kind(),
                    message: validation.to_string(),
                    fields,
                    upstream: None,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::Store(store) => {
                let status = match &store {
                    StoreError::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_GATEWAY,
                };
                error!(error = %store, "store call failed");
                let body = ErrorBody {
                    error: "store_error",
                    message: store.to_string(),
                    fields: None,
                    upstream: store.payload().cloned(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
