//! eCFR client error types.
//!
//! The paginator never returns these to its caller; they are logged and end
//! pagination. They are public because single-page fetches surface them.

/// Errors from eCFR API calls.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error calling {url}: {source}")]
    Http { url: String, source: reqwest::Error },
    /// The API returned a non-2xx status.
    #[error("eCFR API {url} returned {status}: {body}")]
    ApiError {
        url: String,
        status: u16,
        body: String,
    },
    /// The response body was not JSON.
    #[error("failed to deserialize response from {url}: {source}")]
    Deserialization { url: String, source: reqwest::Error },
    /// The response was JSON but not an object.
    #[error("unexpected response shape from {url}: {reason}")]
    UnexpectedShape { url: String, reason: String },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
