//! HTTP adapter for the request router.
//!
//! Converts an axum request into a [`ProxyRequest`] and the router's
//! [`ProxyResponse`] back into an HTTP response. Headers are copied
//! verbatim and no content type is added.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;

use crate::handler::{self, ProxyRequest, ProxyResponse};
use crate::state::AppState;

/// Refresh routes. The endpoint is mounted at `/refresh` and at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/refresh", any(refresh))
        .route("/", any(refresh))
}

async fn refresh(State(state): State<AppState>, method: Method, body: Bytes) -> ProxyResponse {
    let body = (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned());
    handler::handle(&state, ProxyRequest::new(method.as_str(), body)).await
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "dropping invalid response header"),
            }
        }

        (status, headers, Body::from(self.body)).into_response()
    }
}
