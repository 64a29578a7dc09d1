//! # Custom Metric
//!
//! `combined_total` is the number of agencies plus the number of
//! search-count entries. A collection that is not a sequence contributes 0.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Derived summary stored alongside a full refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMetric {
    pub combined_total: u64,
}

/// Anything that may or may not be a sequence of items.
///
/// Returns `None` when the value is not a sequence at all, which the metric
/// counts as zero.
pub trait ItemCount {
    fn item_count(&self) -> Option<usize>;
}

impl ItemCount for Value {
    fn item_count(&self) -> Option<usize> {
        self.as_array().map(Vec::len)
    }
}

impl<T> ItemCount for [T] {
    fn item_count(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> ItemCount for Vec<T> {
    fn item_count(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// Compute the custom metric from the agencies and search-count collections.
pub fn compute_custom_metric<A, S>(agencies: &A, search_counts: &S) -> CustomMetric
where
    A: ItemCount + ?Sized,
    S: ItemCount + ?Sized,
{
    let total_agencies = agencies.item_count().unwrap_or(0) as u64;
    let total_search = search_counts.item_count().unwrap_or(0) as u64;
    CustomMetric {
        combined_total: total_agencies + total_search,
    }
}
