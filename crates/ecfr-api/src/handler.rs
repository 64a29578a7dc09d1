//! # Request Router
//!
//! Dispatches one API-Gateway proxy event:
//!
//! | Method    | Outcome                                                  |
//! |-----------|----------------------------------------------------------|
//! | `OPTIONS` | 200, CORS preflight headers, empty body                  |
//! | `POST`    | refresh per `action`, dual write, 200 or 500             |
//! | other     | 400, `"Bad Request"`                                     |
//!
//! The refresh sequence is strictly ordered: fetch, stamp, write the blob,
//! write the record. A failed blob write skips the record write. A failed
//! record write leaves the blob in place.

use std::collections::BTreeMap;

use ecfr_core::{Action, AnalysisBundle, AnalysisRecord, RunStamp};
use ecfr_store::JSON_CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RefreshError;
use crate::state::AppState;

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";

/// Request headers a browser may send on the refresh call.
pub const PREFLIGHT_ALLOWED_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const PREFLIGHT_ALLOWED_METHODS: &str = "OPTIONS,POST";

pub const SUCCESS_MESSAGE: &str = "Data fetched and processed successfully";

/// The subset of an API-Gateway proxy event the router reads.
///
/// Unknown event fields are ignored. A missing method routes to 400; a
/// missing or `null` body is treated as an empty request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl ProxyRequest {
    pub fn new(http_method: impl Into<String>, body: Option<String>) -> Self {
        Self {
            http_method: http_method.into(),
            body,
        }
    }
}

/// API-Gateway proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    /// CORS preflight answer: exactly three headers and an empty body.
    pub fn preflight() -> Self {
        Self {
            status_code: 200,
            headers: BTreeMap::from([
                (ALLOW_ORIGIN.to_string(), "*".to_string()),
                (ALLOW_HEADERS.to_string(), PREFLIGHT_ALLOWED_HEADERS.to_string()),
                (ALLOW_METHODS.to_string(), PREFLIGHT_ALLOWED_METHODS.to_string()),
            ]),
            body: String::new(),
        }
    }

    /// A JSON body with the permissive origin header.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, body: &T) -> Self {
        Self {
            status_code,
            headers: BTreeMap::from([(ALLOW_ORIGIN.to_string(), "*".to_string())]),
            body: serde_json::to_string(body).unwrap_or_default(),
        }
    }

    pub fn bad_request() -> Self {
        Self::json(400, "Bad Request")
    }
}

/// Body of a successful refresh response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub message: String,
    pub s3_key: String,
    pub timestamp: String,
    /// The requested action value, echoed verbatim.
    pub action: Value,
}

/// Route one proxy event. Never fails; every outcome is a response.
pub async fn handle(state: &AppState, request: ProxyRequest) -> ProxyResponse {
    tracing::debug!(method = %request.http_method, body = ?request.body, "received event");

    match request.http_method.as_str() {
        "OPTIONS" => {
            tracing::info!("answering CORS preflight");
            ProxyResponse::preflight()
        }
        "POST" => {
            let action = requested_action(request.body.as_deref());
            tracing::info!(%action, "refresh requested");
            match refresh(state, action).await {
                Ok(summary) => ProxyResponse::json(200, &summary),
                Err(e) => e.into_response(),
            }
        }
        other => {
            tracing::warn!(method = other, "unsupported HTTP method");
            ProxyResponse::bad_request()
        }
    }
}

/// Extract the raw `action` value from a request body.
///
/// An unparseable, missing, or non-object body counts as `{}`, and a missing
/// `action` defaults to `"refresh"`. Any value that is present, strings or
/// not, is returned as sent.
pub fn requested_action(body: Option<&str>) -> Value {
    let parsed = match body.map(|raw| serde_json::from_str::<Value>(raw)) {
        None => Value::Null,
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            tracing::warn!("error parsing request body: {e}");
            Value::Null
        }
    };

    parsed
        .get("action")
        .cloned()
        .unwrap_or_else(|| Value::String(Action::DEFAULT_NAME.to_string()))
}

async fn refresh(state: &AppState, action: Value) -> Result<RefreshSummary, RefreshError> {
    let plan = Action::from_value(&action);
    if !action.is_string() {
        tracing::warn!(%action, %plan, "non-string action; using default plan");
    }
    let bundle = fetch_bundle(state, plan).await;
    tracing::debug!(items = bundle.item_count(), ?bundle, "final analysis data");

    let stamp = RunStamp::now();
    let s3_key = stamp.object_key();

    let objects = &state.stores.objects;
    tracing::info!(location = %objects.describe(), key = %s3_key, "writing analysis blob");
    objects
        .put_object(&s3_key, bundle.to_json_bytes()?, JSON_CONTENT_TYPE)
        .await
        .map_err(RefreshError::ObjectStore)?;

    let records = &state.stores.records;
    let record = AnalysisRecord::new(stamp, &action, &bundle);
    tracing::info!(location = %records.describe(), id = %record.id, "writing analysis record");
    records
        .put_record(&record)
        .await
        .map_err(RefreshError::RecordStore)?;

    tracing::info!(key = %s3_key, %action, "refresh complete");
    Ok(RefreshSummary {
        message: SUCCESS_MESSAGE.to_string(),
        s3_key,
        timestamp: stamp.to_string(),
        action,
    })
}

async fn fetch_bundle(state: &AppState, action: Action) -> AnalysisBundle {
    let client = &state.client;
    match action {
        Action::FullRefresh => {
            let agencies = client.agencies().await;
            let search_counts = client.search_counts().await;
            AnalysisBundle::full(agencies, search_counts)
        }
        Action::Detailed => AnalysisBundle::Detailed {
            detailed_data: client.search_results().await,
        },
        Action::Refresh => AnalysisBundle::Agencies {
            agencies: client.agencies().await,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_read_from_object_body() {
        assert_eq!(requested_action(Some(r#"{"action":"detailed"}"#)), json!("detailed"));
        assert_eq!(requested_action(Some(r#"{"action":"whatever"}"#)), json!("whatever"));
    }

    #[test]
    fn action_defaults_when_missing_or_unreadable() {
        for body in [None, Some(""), Some("{not json"), Some("{}"), Some(r#"["action"]"#), Some("null")] {
            assert_eq!(requested_action(body), json!("refresh"), "body {body:?}");
        }
    }

    #[test]
    fn non_string_action_is_returned_as_sent() {
        assert_eq!(requested_action(Some(r#"{"action":5}"#)), json!(5));
        assert_eq!(requested_action(Some(r#"{"action":null}"#)), Value::Null);
        assert_eq!(
            requested_action(Some(r#"{"action":{"kind":"detailed"}}"#)),
            json!({"kind": "detailed"})
        );
    }

    #[test]
    fn preflight_has_exactly_three_headers() {
        let resp = ProxyResponse::preflight();
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.headers.len(), 3);
        assert_eq!(resp.headers[ALLOW_ORIGIN], "*");
        assert_eq!(resp.headers[ALLOW_METHODS], "OPTIONS,POST");
        assert!(resp.body.is_empty());
    }

    #[test]
    fn bad_request_body_is_json_string() {
        let resp = ProxyResponse::bad_request();
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.body, r#""Bad Request""#);
        assert_eq!(resp.headers[ALLOW_ORIGIN], "*");
    }

    #[test]
    fn proxy_event_field_names() {
        let req: ProxyRequest = serde_json::from_str(
            r#"{"httpMethod":"POST","body":null,"path":"/refresh","headers":{}}"#,
        )
        .unwrap();
        assert_eq!(req, ProxyRequest::new("POST", None));

        let resp = serde_json::to_value(ProxyResponse::bad_request()).unwrap();
        assert_eq!(resp["statusCode"], 400);
        assert_eq!(resp["headers"]["Access-Control-Allow-Origin"], "*");
    }
}
