//! # ecfr-store — Persistence Targets
//!
//! Each refresh is written twice:
//!
//! - an **object store** receives the bundle as a JSON blob, floats intact;
//! - a **record store** receives an [`AnalysisRecord`] whose floats have
//!   been converted to exact decimals, because it rejects native floats.
//!
//! Both are traits so the request router can be wired to AWS in production
//! and to in-memory maps in tests and local runs.
//!
//! | Trait           | AWS implementation       | In-memory                 |
//! |-----------------|--------------------------|---------------------------|
//! | [`ObjectStore`] | [`s3::S3ObjectStore`]    | [`memory::MemoryObjectStore`] |
//! | [`RecordStore`] | [`dynamo::DynamoRecordStore`] | [`memory::MemoryRecordStore`] |
//!
//! Writes are single attempts. A failed write is returned to the caller,
//! which decides whether the request fails; nothing is retried or rolled
//! back here.

pub mod config;
pub mod dynamo;
pub mod error;
pub mod memory;
pub mod s3;

pub use config::{StoreBackend, StoreConfig};
pub use error::StoreError;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use ecfr_core::AnalysisRecord;

/// Content type of analysis blobs.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Key/body blob storage.
///
/// Implementations must be `Send + Sync` so a single instance can be shared
/// across requests behind an `Arc`.
#[async_trait]
pub trait ObjectStore: Send + Sync + fmt::Debug {
    /// Write `body` under `key`, replacing any existing object.
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str)
        -> Result<(), StoreError>;

    /// Human-readable location, e.g. `s3://bucket`.
    fn describe(&self) -> String;
}

/// Single-item structured record storage keyed by `AnalysisRecord::id`.
#[async_trait]
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Write one record, replacing any record with the same id.
    async fn put_record(&self, record: &AnalysisRecord) -> Result<(), StoreError>;

    /// Human-readable location, e.g. `dynamodb://table`.
    fn describe(&self) -> String;
}

/// The pair of stores a router writes to.
#[derive(Debug, Clone)]
pub struct Stores {
    pub objects: Arc<dyn ObjectStore>,
    pub records: Arc<dyn RecordStore>,
}

impl Stores {
    /// Build the configured backend.
    ///
    /// For [`StoreBackend::Aws`] this resolves credentials and region from
    /// the environment once; the returned clients are reused for every
    /// request.
    pub async fn from_config(config: &StoreConfig) -> Self {
        match config.backend {
            StoreBackend::Aws => {
                let sdk_config = load_aws_config(config.region.as_deref()).await;
                tracing::info!(
                    bucket = %config.bucket,
                    table = %config.table,
                    "using AWS persistence"
                );
                Self {
                    objects: Arc::new(s3::S3ObjectStore::new(&sdk_config, &config.bucket)),
                    records: Arc::new(dynamo::DynamoRecordStore::new(&sdk_config, &config.table)),
                }
            }
            StoreBackend::Memory => {
                tracing::warn!("using in-memory persistence; results will not survive restarts");
                Self::in_memory()
            }
        }
    }

    /// Fresh, empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            objects: Arc::new(memory::MemoryObjectStore::new()),
            records: Arc::new(memory::MemoryRecordStore::new()),
        }
    }
}

/// Resolve AWS configuration from the environment, with an optional region
/// override.
pub async fn load_aws_config(region: Option<&str>) -> aws_config::SdkConfig {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(r) = region {
        loader = loader.region(aws_config::Region::new(r.to_string()));
    }
    loader.load().await
}
