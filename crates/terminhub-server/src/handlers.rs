//! Request handlers.

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use terminhub_airtable::DeletedRecord;
use terminhub_core::{Slot, TerminRecord, TerminSubmission, is_slot_free, normalize, normalize_slot};

use crate::error::ApiError;
use crate::routes::{AppState, StoreIdentity};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Liveness line, kept word for word from the original deployment.
pub async fn root() -> &'static str {
    "Airtable Backend läuft!"
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": VERSION }))
}

/// Reports which store the server is wired to, without the token itself.
pub async fn check_env(State(state): State<AppState>) -> Json<StoreIdentity> {
    Json(state.store_identity.clone())
}

/// Lists every stored appointment in the flat record shape.
pub async fn list_termine(
    State(state): State<AppState>,
) -> Result<Json<Vec<TerminRecord>>, ApiError> {
    let records = state.store.list().await?;
    Ok(Json(records))
}

/// Response of a successful create.
#[derive(Debug, Serialize)]
pub struct CreateTerminResponse {
    pub success: bool,
    pub termin: TerminRecord,
}

/// Normalizes a submission and persists it.
pub async fn create_termin(
    State(state): State<AppState>,
    Json(submission): Json<TerminSubmission>,
) -> Result<Json<CreateTerminResponse>, ApiError> {
    let termin = normalize(&submission)?;

    info!(
        kunde = %termin.kunde,
        datum = %termin.termin_datum,
        zeit = %termin.termin_zeit,
        dienstleistung = %termin.dienstleistung,
        "creating termin"
    );

    let record = state.store.create(&termin).await?;
    Ok(Json(CreateTerminResponse {
        success: true,
        termin: record,
    }))
}

/// Body of an availability query; same aliases and brace tolerance as a
/// submission.
#[derive(Debug, Default, Deserialize)]
pub struct VerfuegbarkeitRequest {
    #[serde(default, rename = "terminDatum", alias = "datum")]
    pub termin_datum: String,
    #[serde(default, rename = "terminZeit", alias = "uhrzeit")]
    pub termin_zeit: String,
    #[serde(default)]
    pub dienstleistung: String,
}

#[derive(Debug, Serialize)]
pub struct VerfuegbarkeitResponse {
    pub verfuegbar: bool,
}

/// Checks whether a slot is still free.
///
/// The answer is advisory: the check and a later create are separate
/// requests, so a concurrent caller can take the slot in between.
pub async fn check_verfuegbarkeit(
    State(state): State<AppState>,
    Json(query): Json<VerfuegbarkeitRequest>,
) -> Result<Json<VerfuegbarkeitResponse>, ApiError> {
    let candidate = normalize_slot(&query.termin_datum, &query.termin_zeit, &query.dienstleistung)?;

    let records = state.store.list().await?;
    let existing: Vec<Slot> = records.iter().map(TerminRecord::slot).collect();

    Ok(Json(VerfuegbarkeitResponse {
        verfuegbar: is_slot_free(&candidate, &existing),
    }))
}

/// Deletes a stored appointment and relays the store acknowledgement.
pub async fn delete_termin(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTerminResponse>, ApiError> {
    let response = state.store.delete(&id).await?;
    Ok(Json(DeleteTerminResponse {
        message: "Termin gelöscht!",
        response,
    }))
}

/// Response of a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteTerminResponse {
    pub message: &'static str,
    pub response: DeletedRecord,
}
