//! DynamoDB record store.
//!
//! DynamoDB has no float type: numbers travel as decimal strings
//! (`AttributeValue::N`). Records therefore carry the normalized tree, and
//! this module maps it onto attribute values one to one.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use ecfr_core::{AnalysisRecord, RecordValue};

use crate::{RecordStore, StoreError};

/// Writes analysis records to one DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl DynamoRecordStore {
    pub fn new(sdk_config: &aws_config::SdkConfig, table: &str) -> Self {
        Self::from_client(aws_sdk_dynamodb::Client::new(sdk_config), table)
    }

    /// Wrap an already configured client (custom endpoint, test credentials).
    pub fn from_client(client: aws_sdk_dynamodb::Client, table: &str) -> Self {
        Self {
            client,
            table: table.to_string(),
        }
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put_record(&self, record: &AnalysisRecord) -> Result<(), StoreError> {
        tracing::info!(table = %self.table, id = %record.id, "writing analysis record to DynamoDB");
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(record_item(record)))
            .send()
            .await
            .map_err(|e| StoreError::RecordWrite {
                id: record.id.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("dynamodb://{}", self.table)
    }
}

/// DynamoDB item for a record: `id`, `action`, `results`, `timestamp`.
pub fn record_item(record: &AnalysisRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("id".to_string(), AttributeValue::S(record.id.clone())),
        ("action".to_string(), to_attribute_value(&record.action)),
        ("results".to_string(), to_attribute_value(&record.results)),
        ("timestamp".to_string(), AttributeValue::S(record.timestamp.clone())),
    ])
}

/// Map a normalized value onto a DynamoDB attribute.
pub fn to_attribute_value(value: &RecordValue) -> AttributeValue {
    match value {
        RecordValue::Null => AttributeValue::Null(true),
        RecordValue::Bool(b) => AttributeValue::Bool(*b),
        RecordValue::Integer(i) => AttributeValue::N(i.to_string()),
        RecordValue::Decimal(d) => AttributeValue::N(d.to_string()),
        RecordValue::BigNumber(text) => AttributeValue::N(text.clone()),
        RecordValue::String(s) => AttributeValue::S(s.clone()),
        RecordValue::List(items) => AttributeValue::L(items.iter().map(to_attribute_value).collect()),
        RecordValue::Map(entries) => AttributeValue::M(
            entries
                .iter()
                .map(|(key, item)| (key.clone(), to_attribute_value(item)))
                .collect(),
        ),
    }
}
