//! Refresh failures.
//!
//! Only persistence can fail a refresh. Each variant renders as the message
//! returned to the caller inside a JSON-encoded string body.

use ecfr_store::StoreError;

use crate::handler::ProxyResponse;

/// A refresh that fetched its data but could not persist it.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The blob write failed; the record store was not touched.
    #[error("Error writing to S3: {0}")]
    ObjectStore(#[source] StoreError),
    /// The record write failed after the blob was written.
    #[error("Error writing to DynamoDB: {0}")]
    RecordStore(#[source] StoreError),
    /// The bundle could not be encoded as a blob body.
    #[error("Error writing to S3: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RefreshError {
    pub fn status_code(&self) -> u16 {
        500
    }

    /// Render as the proxy response returned to the caller.
    pub fn into_response(self) -> ProxyResponse {
        tracing::error!(error = %self, "refresh failed");
        ProxyResponse::json(self.status_code(), &self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_store_failure_body_is_json_string() {
        let err = RefreshError::ObjectStore(StoreError::ObjectWrite {
            key: "analysis/20260101T000000Z.json".into(),
            message: "Access Denied".into(),
        });
        let resp = err.into_response();
        assert_eq!(resp.status_code, 500);
        assert_eq!(resp.body, r#""Error writing to S3: Access Denied""#);
        assert_eq!(resp.headers.len(), 1);
    }

    #[test]
    fn record_store_failure_names_the_record_store() {
        let err = RefreshError::RecordStore(StoreError::RecordWrite {
            id: "20260101T000000Z".into(),
            message: "table missing".into(),
        });
        assert_eq!(err.to_string(), "Error writing to DynamoDB: table missing");
    }
}
