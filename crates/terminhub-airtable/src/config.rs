//! Airtable connection configuration.
//!
//! Built once by the composition root (usually from the environment) and
//! passed into [`crate::AirtableClient`] explicitly; nothing in this
//! crate reads process-wide state on its own.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Base URL of the Airtable REST API.
const DEFAULT_API_BASE: &str = "https://api.airtable.com/v0";

/// Table the original deployment imported its records into.
const DEFAULT_TABLE_NAME: &str = "Imported table";

/// Default timeout for store requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

/// Connection settings for the Airtable records API.
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    /// API base URL; overridable for tests against a local server.
    pub api_base: Url,
    /// The Airtable base identifier.
    pub base_id: String,
    /// The table holding the Termin records.
    pub table_name: String,
    /// Bearer token for the Airtable API.
    pub access_token: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl AirtableConfig {
    /// Creates a configuration for the given base with default table,
    /// API base and timeout.
    pub fn new(base_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("invalid default API base"),
            base_id: base_id.into(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            access_token: access_token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder: set the table name.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    /// Builder: set the API base URL.
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = api_base;
        self
    }

    /// Builder: set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `AIRTABLE_BASE_ID`, `AIRTABLE_ACCESS_TOKEN` and the optional
    /// `AIRTABLE_TABLE_NAME` from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when a required variable is
    /// absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_id =
            env::var("AIRTABLE_BASE_ID").map_err(|_| ConfigError::MissingVar("AIRTABLE_BASE_ID"))?;
        let access_token = env::var("AIRTABLE_ACCESS_TOKEN")
            .map_err(|_| ConfigError::MissingVar("AIRTABLE_ACCESS_TOKEN"))?;

        let mut config = Self::new(base_id, access_token);
        if let Ok(table_name) = env::var("AIRTABLE_TABLE_NAME") {
            config = config.with_table_name(table_name);
        }
        Ok(config)
    }

    /// Whether a non-empty access token is configured.
    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// URL of the records endpoint, table name percent-encoded.
    pub fn records_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.api_base.as_str().trim_end_matches('/'),
            self.base_id,
            urlencoding::encode(&self.table_name)
        )
    }

    /// URL of a single record.
    pub fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.records_url(), urlencoding::encode(id))
    }
}
