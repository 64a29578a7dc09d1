//! # ecfr-api — Refresh Endpoint
//!
//! Top of the workspace dependency DAG. Receives refresh requests, fetches
//! from the eCFR API through `ecfr-client`, and persists the result through
//! `ecfr-store`.
//!
//! The request router ([`handler::handle`]) works on API-Gateway proxy
//! events, so the same code path serves both surfaces:
//!
//! - `/refresh` and `/` over HTTP, adapted by [`routes`];
//! - one event from a file or stdin via the `invoke` CLI command.
//!
//! ## Routes
//!
//! - `ANY /refresh`, `ANY /`: dispatched on method (OPTIONS, POST, else 400)
//! - `GET /health/liveness`: liveness probe
//!
//! ## Crate Policy
//!
//! - Fetch failures are tolerated and shrink the result; persistence
//!   failures fail the request with a 500.
//! - No error escapes the router; every outcome is a proxy response.

pub mod error;
pub mod handler;
pub mod routes;
pub mod state;

pub use error::RefreshError;
pub use handler::{handle, ProxyRequest, ProxyResponse};
pub use state::{AppConfig, AppState};

use axum::Router;
use tower_http::trace::TraceLayer;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    let api = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new().route("/health/liveness", axum::routing::get(liveness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}
