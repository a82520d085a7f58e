//! Batch results and the queue's partial-failure response.

use crate::error::ItemError;
use serde::{Deserialize, Serialize};

/// Outcome of one queued message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResult {
    /// 0-indexed position in the inbound batch.
    pub index: usize,
    pub message_id: String,
    /// Set once the request has been mapped, even if a later stage failed.
    pub filename: Option<String>,
    pub document_type: Option<String>,
    /// Rendered PDF size in bytes; set once rendering succeeded.
    pub file_size: Option<usize>,
    pub retries: u32,
    pub duration_ms: u64,
    pub error: Option<ItemError>,
}

impl ItemResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate statistics for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total_items: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_bytes: u64,
    pub total_duration_ms: u64,
}

/// Result of processing a whole batch. Items are in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutput {
    pub items: Vec<ItemResult>,
    pub stats: BatchStats,
}

impl BatchOutput {
    /// Messages the queue should redeliver.
    pub fn batch_item_failures(&self) -> BatchResponse {
        BatchResponse {
            batch_item_failures: self
                .items
                .iter()
                .filter(|item| !item.is_success())
                .map(|item| BatchItemFailure {
                    item_identifier: item.message_id.clone(),
                })
                .collect(),
        }
    }
}

/// Partial batch response returned to the queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub batch_item_failures: Vec<BatchItemFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailure {
    pub item_identifier: String,
}
