//! Structured record written to the record store for each refresh.

use serde_json::Value;

use crate::bundle::AnalysisBundle;
use crate::normalize::{normalize, RecordValue};
use crate::stamp::RunStamp;

/// One persisted refresh, keyed by its run stamp.
///
/// `id` and `timestamp` carry the same stamp text; `id` is the partition key
/// and `timestamp` is kept as a plain attribute for queries.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRecord {
    pub id: String,
    /// Action value exactly as requested (normalized), not the resolved plan.
    pub action: RecordValue,
    /// Normalized bundle, floats already converted to decimals.
    pub results: RecordValue,
    pub timestamp: String,
}

impl AnalysisRecord {
    pub fn new(stamp: RunStamp, action: &Value, bundle: &AnalysisBundle) -> Self {
        let stamp = stamp.to_string();
        Self {
            id: stamp.clone(),
            action: normalize(action),
            results: bundle.normalized(),
            timestamp: stamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn record_shares_stamp_and_normalizes_results() {
        let stamp = RunStamp::from_utc(Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap());
        let bundle = AnalysisBundle::Agencies {
            agencies: vec![json!({"ratio": 0.5})],
        };
        let record = AnalysisRecord::new(stamp, &json!("something_else"), &bundle);

        assert_eq!(record.id, "20260301T080000Z");
        assert_eq!(record.timestamp, record.id);
        assert_eq!(record.action, RecordValue::String("something_else".into()));
        let first = &record.results.get("agencies").unwrap().as_list().unwrap()[0];
        assert_eq!(first.get("ratio").unwrap().as_decimal().unwrap().to_string(), "0.5");
    }

    #[test]
    fn non_string_action_is_kept_as_sent() {
        let stamp = RunStamp::from_utc(Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap());
        let bundle = AnalysisBundle::Agencies { agencies: vec![] };

        let numeric = AnalysisRecord::new(stamp, &json!(5), &bundle);
        assert_eq!(numeric.action, RecordValue::Integer(5));

        let null = AnalysisRecord::new(stamp, &serde_json::Value::Null, &bundle);
        assert_eq!(null.action, RecordValue::Null);
    }
}
