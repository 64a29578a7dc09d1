//! Persistence configuration.
//!
//! Names the bucket and table the analyzer writes to and selects the
//! backend. Defaults match the deployed stack.

use std::fmt;
use std::str::FromStr;

/// Default object-store bucket.
pub const DEFAULT_BUCKET: &str = "ecfr-analyzer-data-5655123";
/// Default record-store table.
pub const DEFAULT_TABLE: &str = "ECFRAnalysis";

/// Which implementation backs the two stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// S3 for blobs, DynamoDB for records.
    #[default]
    Aws,
    /// Process-local maps; nothing survives a restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aws" => Ok(Self::Aws),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aws => f.write_str("aws"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Configuration for both persistence targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Object-store bucket for analysis blobs.
    pub bucket: String,
    /// Record-store table for analysis records.
    pub table: String,
    /// AWS region override. `None` defers to the AWS environment chain.
    pub region: Option<String>,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `STORE_BACKEND` (`aws` or `memory`, default: `aws`)
    /// - `S3_BUCKET` (default: `ecfr-analyzer-data-5655123`)
    /// - `DYNAMO_TABLE` (default: `ECFRAnalysis`)
    /// - `AWS_REGION` (default: resolved by the AWS SDK)
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match std::env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreBackend::default(),
        };
        Ok(Self {
            backend,
            bucket: env_or("S3_BUCKET", DEFAULT_BUCKET),
            table: env_or("DYNAMO_TABLE", DEFAULT_TABLE),
            region: std::env::var("AWS_REGION").ok(),
        })
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            bucket: DEFAULT_BUCKET.to_string(),
            table: DEFAULT_TABLE.to_string(),
            region: None,
        }
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown store backend {0:?} (expected \"aws\" or \"memory\")")]
    InvalidBackend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployed_names() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.bucket, "ecfr-analyzer-data-5655123");
        assert_eq!(cfg.table, "ECFRAnalysis");
        assert_eq!(cfg.backend, StoreBackend::Aws);
    }

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("AWS".parse::<StoreBackend>().unwrap(), StoreBackend::Aws);
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn env_or_uses_default_when_var_absent() {
        assert_eq!(env_or("NONEXISTENT_VAR_ECFR_54321", "fallback"), "fallback");
    }
}
