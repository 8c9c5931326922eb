//! Airtable REST client.
//!
//! Speaks the Airtable records API: bearer-authenticated JSON over
//! HTTPS, list responses paginated through an `offset` cursor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use terminhub_core::{Termin, TerminRecord};

use crate::config::AirtableConfig;
use crate::error::{StoreError, StoreResult};
use crate::store::{BoxFuture, DeletedRecord, TerminStore};

/// Client for the Airtable records API.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    http: reqwest::Client,
    config: AirtableConfig,
}

impl AirtableClient {
    /// Creates a client for the given configuration.
    pub fn new(config: AirtableConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to create HTTP client");

        Self { http, config }
    }

    /// Returns the configuration this client talks to.
    pub fn config(&self) -> &AirtableConfig {
        &self.config
    }

    async fn list_impl(&self) -> StoreResult<Vec<TerminRecord>> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(self.config.records_url())
                .bearer_auth(&self.config.access_token);

            if let Some(ref cursor) = offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let response = request.send().await?;
            let page: RecordsResponse = read_json(response).await?;

            records.extend(page.records.into_iter().map(ApiRecord::into_termin_record));

            match page.offset {
                Some(cursor) => offset = Some(cursor),
                None => break,
            }
        }

        debug!(count = records.len(), "fetched records from store");
        Ok(records)
    }

    async fn create_impl(&self, termin: &Termin) -> StoreResult<TerminRecord> {
        let body = CreateRequest {
            records: vec![CreateRecord { fields: termin }],
        };

        let response = self
            .http
            .post(self.config.records_url())
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await?;

        let created: RecordsResponse = read_json(response).await?;
        created
            .records
            .into_iter()
            .next()
            .map(ApiRecord::into_termin_record)
            .ok_or_else(|| StoreError::invalid_response("create response contained no records"))
    }

    async fn delete_impl(&self, id: &str) -> StoreResult<DeletedRecord> {
        let response = self
            .http
            .delete(self.config.record_url(id))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        read_json(response).await
    }
}

impl TerminStore for AirtableClient {
    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<TerminRecord>>> {
        Box::pin(self.list_impl())
    }

    fn create<'a>(&'a self, termin: &'a Termin) -> BoxFuture<'a, StoreResult<TerminRecord>> {
        Box::pin(self.create_impl(termin))
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<DeletedRecord>> {
        Box::pin(self.delete_impl(id))
    }
}

/// Checks the status and decodes a JSON body, attaching the upstream
/// payload on error statuses.
async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> StoreResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let payload = serde_json::from_str(&body).ok();
        return Err(StoreError::upstream(status.as_u16(), payload));
    }

    serde_json::from_str(&body)
        .map_err(|error| StoreError::invalid_response(error.to_string()))
}

/// Response shape of the list and create endpoints.
#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<ApiRecord>,
    offset: Option<String>,
}

/// A single record from the records API.
#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    #[serde(default)]
    fields: ApiFields,
}

/// The field columns of a record; absent columns default to empty.
#[derive(Debug, Default, Deserialize)]
struct ApiFields {
    #[serde(default)]
    kunde: String,
    #[serde(default)]
    telefonnummer: String,
    #[serde(default, rename = "terminDatum")]
    termin_datum: String,
    #[serde(default, rename = "terminZeit")]
    termin_zeit: String,
    #[serde(default)]
    dienstleistung: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    email: String,
}

impl ApiRecord {
    fn into_termin_record(self) -> TerminRecord {
        TerminRecord {
            id: self.id,
            kunde: self.fields.kunde,
            telefonnummer: self.fields.telefonnummer,
            termin_datum: self.fields.termin_datum,
            termin_zeit: self.fields.termin_zeit,
            dienstleistung: self.fields.dienstleistung,
            status: self.fields.status,
            email: self.fields.email,
        }
    }
}

/// Body of a create request.
#[derive(Debug, Serialize)]
struct CreateRequest<'a> {
    records: Vec<CreateRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct CreateRecord<'a> {
    fields: &'a Termin,
}
