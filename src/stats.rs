//! Stats aggregator: summary counters derived from a collection snapshot.
//!
//! Recomputed in full on every call. Collections here are tens to low
//! thousands of rows, so there is no caching and no incremental update --
//! a summary is always consistent with the snapshot it was derived from.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::Filterable;

/// Bucket for records missing an optional status or category. They still
/// count toward the total rather than being dropped.
pub const UNKNOWN_BUCKET: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub total: u32,
    /// Count per literal status value (lowercased). The status set is open:
    /// a status the UI has never heard of still shows up here.
    pub by_status: BTreeMap<String, u32>,
    /// Count per category/type code.
    pub by_category: BTreeMap<String, u32>,
}

impl StatsSummary {
    pub fn status_count(&self, status: &str) -> u32 {
        self.by_status.get(&status.to_lowercase()).copied().unwrap_or(0)
    }

    pub fn category_count(&self, category: &str) -> u32 {
        self.by_category.get(category).copied().unwrap_or(0)
    }
}

/// Derive summary counts from `items`. Pure; `summary.total` always equals
/// `items.len()`.
pub fn aggregate<T: Filterable>(items: &[T]) -> StatsSummary {
    let mut summary = StatsSummary {
        total: items.len() as u32,
        ..StatsSummary::default()
    };
    for item in items {
        let status = item
            .status()
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| UNKNOWN_BUCKET.to_string());
        *summary.by_status.entry(status).or_insert(0) += 1;

        let category = item.category().unwrap_or(UNKNOWN_BUCKET).to_string();
        *summary.by_category.entry(category).or_insert(0) += 1;
    }
    summary
}
