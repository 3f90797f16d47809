//! Per-run reconciliation statistics.

use crate::types::EndpointKey;
use serde::{Deserialize, Serialize};

/// Accumulator filled in while events are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationStats {
    /// Distinct endpoints indexed from the old collection
    pub old_endpoint_count: usize,
    /// Matched endpoints, in merge traversal order
    pub updated_endpoints: Vec<EndpointKey>,
    /// Event objects copied across all matches
    pub updated_events_count: usize,
    /// Nodes in the new collection that were neither folder nor request
    #[serde(default)]
    pub skipped_nodes: usize,
}

impl ReconciliationStats {
    pub fn new(old_endpoint_count: usize) -> Self {
        Self {
            old_endpoint_count,
            ..Self::default()
        }
    }

    pub fn record_match(&mut self, key: EndpointKey, copied_events: usize) {
        self.updated_endpoints.push(key);
        self.updated_events_count += copied_events;
    }

    pub fn record_skipped(&mut self) {
        self.skipped_nodes += 1;
    }

    pub fn updated_count(&self) -> usize {
        self.updated_endpoints.len()
    }
}
