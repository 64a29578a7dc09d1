//! eCFR client configuration.
//!
//! Defaults point at the public production API. Override via environment
//! variables or explicit construction for tests against a local stub.

use url::Url;

/// Default eCFR API host.
pub const DEFAULT_BASE_URL: &str = "https://www.ecfr.gov";

/// Configuration for the eCFR API client.
#[derive(Debug, Clone)]
pub struct EcfrApiConfig {
    /// Host that endpoint paths and relative `next` links are appended to.
    pub base_url: Url,
    /// Per-request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl EcfrApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `ECFR_BASE_URL` (default: `https://www.ecfr.gov`)
    /// - `ECFR_TIMEOUT_SECS` (default: unset, no explicit timeout)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("ECFR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url: parse_url("ECFR_BASE_URL", &raw)?,
            timeout_secs: std::env::var("ECFR_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        })
    }

    /// Configuration pointing at an explicit base URL, e.g. a mock server.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("base_url", base_url)?,
            timeout_secs: None,
        })
    }

    /// Base URL as a string prefix, without a trailing slash.
    pub(crate) fn base_prefix(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_host_prefix() {
        let cfg = EcfrApiConfig::with_base_url(DEFAULT_BASE_URL).unwrap();
        assert_eq!(cfg.base_url.as_str(), "https://www.ecfr.gov/");
        assert_eq!(cfg.base_prefix(), "https://www.ecfr.gov");
        assert!(cfg.timeout_secs.is_none());
    }

    #[test]
    fn explicit_base_url_drops_trailing_slash_in_prefix() {
        let cfg = EcfrApiConfig::with_base_url("http://127.0.0.1:9000/").unwrap();
        assert_eq!(cfg.base_prefix(), "http://127.0.0.1:9000");
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(EcfrApiConfig::with_base_url("not a url").is_err());
    }
}
