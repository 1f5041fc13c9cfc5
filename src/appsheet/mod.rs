//! Client for the AppSheet table API.
//!
//! Every read goes through a `Find` action: `POST
//! /apps/{app}/tables/{table}/Action` with a fixed locale/timezone/location
//! context, authenticated by a static access-key header. The response body is
//! a bare JSON array of flat string-keyed row maps. No pagination, no retries.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::AppSheetConfig;
use crate::errors::ServiceError;

pub mod selector;

pub use selector::{Criterion, FieldValue, Selector};

/// Table names as defined in the AppSheet app.
pub mod tables {
    pub const PROJECTS: &str = "Projects";
    pub const ORDERS: &str = "Orders";
    pub const ITEMS: &str = "Items";
    pub const ITEM_REQUESTS: &str = "ItemRequests";
    pub const SHEETS: &str = "Sheets";
    pub const SHEET_INVENTORY: &str = "SheetInventory";
    pub const DELIVERIES: &str = "Deliveries";
    pub const ALLOWANCES: &str = "Allowances";
}

#[derive(Serialize)]
struct FindRequest<'a> {
    #[serde(rename = "Action")]
    action: &'static str,
    #[serde(rename = "Properties")]
    properties: FindProperties<'a>,
    #[serde(rename = "Rows")]
    rows: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct FindProperties<'a> {
    #[serde(rename = "Locale")]
    locale: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Timezone")]
    timezone: &'a str,
    #[serde(rename = "Selector", skip_serializing_if = "Option::is_none")]
    selector: Option<String>,
}

/// Thin client over the AppSheet HTTP API.
#[derive(Clone)]
pub struct AppSheetClient {
    http: Client,
    config: AppSheetConfig,
}

impl AppSheetClient {
    /// Build a client with a default reqwest client and the configured
    /// request timeout.
    pub fn new(config: AppSheetConfig) -> Result<Self, ServiceError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ServiceError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(config, http))
    }

    /// Build a client from an existing reqwest client (useful for testing).
    pub fn with_client(config: AppSheetConfig, http: Client) -> Self {
        Self { http, config }
    }

    fn action_url(&self, table: &str) -> String {
        format!(
            "{}/apps/{}/tables/{}/Action",
            self.config.base_url.trim_end_matches('/'),
            self.config.app_id,
            table
        )
    }

    fn headers(&self) -> Result<HeaderMap, ServiceError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "ApplicationAccessKey",
            HeaderValue::from_str(&self.config.access_key)
                .map_err(|e| ServiceError::Internal(format!("invalid access key: {e}")))?,
        );
        Ok(headers)
    }

    /// Run a `Find` against `table`, optionally scoped by a selector, and
    /// decode the returned rows. A `None` selector fetches the whole table.
    pub async fn find<T: DeserializeOwned>(
        &self,
        table: &str,
        selector: Option<Selector>,
    ) -> Result<Vec<T>, ServiceError> {
        let rendered = selector.as_ref().map(Selector::render);
        debug!(table, selector = rendered.as_deref(), "AppSheet find");

        let body = FindRequest {
            action: "Find",
            properties: FindProperties {
                locale: &self.config.locale,
                location: &self.config.location,
                timezone: &self.config.timezone,
                selector: rendered,
            },
            rows: Vec::new(),
        };

        let response = self
            .http
            .post(self.action_url(table))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes);
            return Err(ServiceError::ExternalApi(format!(
                "table {table} responded with status {status}: {text}"
            )));
        }

        let rows: Vec<T> = serde_json::from_slice(&bytes)?;
        debug!(table, count = rows.len(), "AppSheet rows fetched");
        Ok(rows)
    }
}
