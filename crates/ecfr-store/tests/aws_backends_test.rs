//! AWS-backed stores against wiremock stand-ins for S3 and DynamoDB.
//!
//! The SDK clients are pointed at the mock server with static credentials,
//! so these tests exercise the real request serialization and error
//! decoding without touching AWS.

use chrono::{TimeZone, Utc};
use ecfr_core::{AnalysisBundle, AnalysisRecord, RunStamp};
use ecfr_store::dynamo::DynamoRecordStore;
use ecfr_store::s3::S3ObjectStore;
use ecfr_store::{ObjectStore, RecordStore, StoreError, JSON_CONTENT_TYPE};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn s3_store(mock_server: &MockServer) -> S3ObjectStore {
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "static"))
        .endpoint_url(mock_server.uri())
        .force_path_style(true)
        .build();
    S3ObjectStore::from_client(aws_sdk_s3::Client::from_conf(config), "test-bucket")
}

fn dynamo_store(mock_server: &MockServer) -> DynamoRecordStore {
    use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
    let config = aws_sdk_dynamodb::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "static"))
        .endpoint_url(mock_server.uri())
        .build();
    DynamoRecordStore::from_client(aws_sdk_dynamodb::Client::from_conf(config), "ECFRAnalysis")
}

fn sample_record() -> AnalysisRecord {
    let stamp = RunStamp::from_utc(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    let bundle = AnalysisBundle::Agencies {
        agencies: vec![json!({"ratio": 0.1})],
    };
    AnalysisRecord::new(stamp, &json!("refresh"), &bundle)
}

// ── S3 PutObject ─────────────────────────────────────────────────────

#[tokio::test]
async fn s3_put_sends_bucket_key_and_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/test-bucket/analysis/20260101T000000Z.json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = s3_store(&mock_server);
    store
        .put_object(
            "analysis/20260101T000000Z.json",
            br#"{"agencies":[]}"#.to_vec(),
            JSON_CONTENT_TYPE,
        )
        .await
        .unwrap();
    assert_eq!(store.describe(), "s3://test-bucket");
}

#[tokio::test]
async fn s3_error_is_reported_with_service_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("content-type", "application/xml")
                .set_body_string(
                    "<Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>",
                ),
        )
        .mount(&mock_server)
        .await;

    let store = s3_store(&mock_server);
    let err = store
        .put_object("analysis/x.json", Vec::new(), JSON_CONTENT_TYPE)
        .await
        .unwrap_err();
    match err {
        StoreError::ObjectWrite { key, message } => {
            assert_eq!(key, "analysis/x.json");
            assert!(message.contains("AccessDenied"), "unexpected message: {message}");
        }
        other => panic!("expected ObjectWrite, got: {other:?}"),
    }
}

// ── DynamoDB PutItem ─────────────────────────────────────────────────

#[tokio::test]
async fn dynamo_put_sends_normalized_item() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("x-amz-target", "DynamoDB_20120810.PutItem"))
        .and(body_partial_json(json!({
            "TableName": "ECFRAnalysis",
            "Item": {
                "id": {"S": "20260101T000000Z"},
                "action": {"S": "refresh"},
                "timestamp": {"S": "20260101T000000Z"},
                "results": {"M": {"agencies": {"L": [{"M": {"ratio": {"N": "0.1"}}}]}}}
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/x-amz-json-1.0")
                .set_body_string("{}"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = dynamo_store(&mock_server);
    store.put_record(&sample_record()).await.unwrap();
    assert_eq!(store.describe(), "dynamodb://ECFRAnalysis");
}

#[tokio::test]
async fn dynamo_error_is_reported_with_service_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("content-type", "application/x-amz-json-1.0")
                .set_body_string(
                    r#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException","message":"Requested resource not found"}"#,
                ),
        )
        .mount(&mock_server)
        .await;

    let store = dynamo_store(&mock_server);
    let err = store.put_record(&sample_record()).await.unwrap_err();
    match err {
        StoreError::RecordWrite { id, message } => {
            assert_eq!(id, "20260101T000000Z");
            assert!(
                message.contains("ResourceNotFoundException"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected RecordWrite, got: {other:?}"),
    }
}
