//! # ecfr-client — Paginated eCFR API Client
//!
//! Fetches complete listings from the public eCFR API
//! (`https://www.ecfr.gov`) by following each response's `next` link until
//! the server stops supplying one.
//!
//! ## Endpoints
//!
//! | Constant                | Path                            |
//! |-------------------------|---------------------------------|
//! | [`AGENCIES_PATH`]       | `/api/admin/v1/agencies.json`   |
//! | [`SEARCH_COUNT_PATH`]   | `/api/search/v1/count`          |
//! | [`SEARCH_RESULTS_PATH`] | `/api/search/v1/results`        |
//!
//! ## Failure policy
//!
//! [`EcfrClient::fetch_all`] is best-effort. A transport error, a non-2xx
//! status, or an undecodable body ends pagination for that endpoint and the
//! items gathered so far are returned. Nothing is retried. Callers must
//! accept empty or truncated listings.

pub mod config;
pub mod error;
pub mod pagination;

pub use config::EcfrApiConfig;
pub use error::FetchError;
pub use pagination::{NextLink, Page};

use std::time::Duration;

use serde_json::Value;

/// Agency listing.
pub const AGENCIES_PATH: &str = "/api/admin/v1/agencies.json";
/// Search-count listing.
pub const SEARCH_COUNT_PATH: &str = "/api/search/v1/count";
/// Search-results listing.
pub const SEARCH_RESULTS_PATH: &str = "/api/search/v1/results";

/// eCFR API client. Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct EcfrClient {
    http: reqwest::Client,
    base_prefix: String,
}

impl EcfrClient {
    /// Create a new client from configuration.
    pub fn new(config: EcfrApiConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| FetchError::Http {
            url: "client_init".into(),
            source: e,
        })?;

        Ok(Self {
            http,
            base_prefix: config.base_prefix(),
        })
    }

    /// Fetch every page of an endpoint, in server order.
    ///
    /// Never fails: the first error is logged and ends pagination.
    pub async fn fetch_all(&self, endpoint: &str) -> Vec<Value> {
        let mut results = Vec::new();
        let mut next_url = Some(format!("{}{}", self.base_prefix, endpoint));

        while let Some(url) = next_url.take() {
            tracing::info!(%url, "fetching eCFR page");
            let page = match self.fetch_page(&url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(endpoint, "stopping pagination: {e}");
                    break;
                }
            };
            results.extend(page.items);
            next_url = match page.next {
                NextLink::End => None,
                NextLink::Follow(link) => Some(link),
                NextLink::Malformed(value) => {
                    tracing::warn!(endpoint, next = %value, "stopping pagination: next link is not a string");
                    None
                }
            };
        }

        tracing::info!(endpoint, total = results.len(), "total items fetched");
        results
    }

    /// Fetch and decode a single page by absolute URL.
    pub async fn fetch_page(&self, url: &str) -> Result<Page, FetchError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                url: url.into(),
                source: e,
            })?;

        let status = resp.status();
        tracing::debug!(%url, status = status.as_u16(), "eCFR response");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::ApiError {
                url: url.into(),
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = resp.json().await.map_err(|e| FetchError::Deserialization {
            url: url.into(),
            source: e,
        })?;

        Page::from_payload(payload, &self.base_prefix).map_err(|body| FetchError::UnexpectedShape {
            url: url.into(),
            reason: format!("expected a JSON object, got {}", json_kind(&body)),
        })
    }

    /// All agencies.
    pub async fn agencies(&self) -> Vec<Value> {
        self.fetch_all(AGENCIES_PATH).await
    }

    /// All search-count entries.
    pub async fn search_counts(&self) -> Vec<Value> {
        self.fetch_all(SEARCH_COUNT_PATH).await
    }

    /// All search results.
    pub async fn search_results(&self) -> Vec<Value> {
        self.fetch_all(SEARCH_RESULTS_PATH).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
