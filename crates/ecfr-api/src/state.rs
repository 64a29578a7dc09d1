//! # Application State
//!
//! Clients are built once at startup and shared by every request. The eCFR
//! client clones its connection pool handle; the stores sit behind `Arc`.

use ecfr_client::{EcfrApiConfig, EcfrClient, FetchError};
use ecfr_store::{StoreConfig, Stores};

/// Port the HTTP server binds when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8080;

/// Startup configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub ecfr: EcfrApiConfig,
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `PORT` (default 8080) here and delegates the rest to
    /// [`EcfrApiConfig::from_env`] and [`StoreConfig::from_env`]. An
    /// unparseable `PORT` falls back to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            ecfr: EcfrApiConfig::from_env()?,
            store: StoreConfig::from_env()?,
        })
    }
}

/// Configuration errors surfaced at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Ecfr(#[from] ecfr_client::config::ConfigError),
    #[error(transparent)]
    Store(#[from] ecfr_store::config::ConfigError),
}

/// Shared handles passed to the request router.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: EcfrClient,
    pub stores: Stores,
}

impl AppState {
    pub fn new(client: EcfrClient, stores: Stores) -> Self {
        Self { client, stores }
    }

    /// Build the eCFR client and the configured stores.
    pub async fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        let client = EcfrClient::new(config.ecfr.clone())?;
        let stores = Stores::from_config(&config.store).await;
        Ok(Self::new(client, stores))
    }
}
