//! # Analysis Bundles
//!
//! The result of one refresh. Its shape depends on the requested action, so
//! it is an enum with one variant per shape rather than a free-form map.
//! Serialized untagged, each variant is the plain JSON object that ends up
//! in the blob:
//!
//! | Variant    | JSON shape                                         |
//! |------------|----------------------------------------------------|
//! | `Full`     | `{"agencies", "search_counts", "custom_metric"}`   |
//! | `Detailed` | `{"detailed_data"}`                                |
//! | `Agencies` | `{"agencies"}`                                     |
//!
//! Bundles are built fresh per request and serialized once for each store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::metric::{compute_custom_metric, CustomMetric};
use crate::normalize::{normalize_items, RecordValue};

/// Per-request analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisBundle {
    /// `full_refresh`: both listings and the derived metric.
    Full {
        agencies: Vec<Value>,
        search_counts: Vec<Value>,
        custom_metric: CustomMetric,
    },
    /// `detailed`: search results.
    Detailed { detailed_data: Vec<Value> },
    /// Default plan: agencies only.
    Agencies { agencies: Vec<Value> },
}

impl AnalysisBundle {
    /// Assemble a full bundle, computing the metric from the two listings.
    pub fn full(agencies: Vec<Value>, search_counts: Vec<Value>) -> Self {
        let custom_metric = compute_custom_metric(&agencies, &search_counts);
        Self::Full {
            agencies,
            search_counts,
            custom_metric,
        }
    }

    /// Total number of fetched items across every collection.
    pub fn item_count(&self) -> usize {
        match self {
            Self::Full {
                agencies,
                search_counts,
                ..
            } => agencies.len() + search_counts.len(),
            Self::Detailed { detailed_data } => detailed_data.len(),
            Self::Agencies { agencies } => agencies.len(),
        }
    }

    /// Blob body: the bundle as JSON with floats kept as floats.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Record copy: the same object with every float turned into a decimal.
    pub fn normalized(&self) -> RecordValue {
        let mut entries = BTreeMap::new();
        match self {
            Self::Full {
                agencies,
                search_counts,
                custom_metric,
            } => {
                entries.insert("agencies".to_string(), normalize_items(agencies));
                entries.insert("search_counts".to_string(), normalize_items(search_counts));
                entries.insert(
                    "custom_metric".to_string(),
                    RecordValue::Map(BTreeMap::from([(
                        "combined_total".to_string(),
                        RecordValue::Integer(custom_metric.combined_total.into()),
                    )])),
                );
            }
            Self::Detailed { detailed_data } => {
                entries.insert("detailed_data".to_string(), normalize_items(detailed_data));
            }
            Self::Agencies { agencies } => {
                entries.insert("agencies".to_string(), normalize_items(agencies));
            }
        }
        RecordValue::Map(entries)
    }
}
