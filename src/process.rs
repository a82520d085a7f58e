//! Eager (whole-batch) processing entry points.
//!
//! [`process_batch`] drives every message of a queue event through
//! decode → map → render → upload, with up to `config.concurrency` messages
//! in flight, and returns once every message has been attempted. Use
//! [`crate::stream::process_stream`] to observe outcomes as they complete.
//!
//! A failing message never aborts its siblings: its [`ItemError`] is kept in
//! the matching [`ItemResult`] and surfaces in
//! [`BatchOutput::batch_item_failures`].

use crate::config::DocGenConfig;
use crate::documents::{build_document, metadata::FILE_SIZE};
use crate::error::{DocGenError, ItemError};
use crate::model::document::DocumentModel;
use crate::output::{BatchOutput, BatchStats, ItemResult};
use crate::pipeline::decode::{decode_request, parse_event, QueueEvent, QueueMessage};
use crate::pipeline::render::{render_with_retry, Renderer};
use crate::pipeline::upload::DocumentStore;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Process every message of a queue event.
///
/// # Returns
/// `Ok(BatchOutput)` whenever the batch could be attempted, even if every
/// message failed (check `output.stats.failed`).
///
/// # Errors
/// [`DocGenError::EmptyBatch`] when the event has no records.
pub async fn process_batch(
    event: &QueueEvent,
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn DocumentStore>,
    config: &DocGenConfig,
) -> Result<BatchOutput, DocGenError> {
    let start = Instant::now();
    ensure_not_empty(event)?;

    let total = event.len();
    info!(
        "Processing batch of {} messages (environment {}, concurrency {})",
        total, config.environment, config.concurrency
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let mut items: Vec<ItemResult> = stream::iter(event.records.iter().enumerate().map(
        |(index, message)| {
            let renderer = Arc::clone(&renderer);
            let store = Arc::clone(&store);
            async move {
                process_item(index, total, message, renderer.as_ref(), store.as_ref(), config)
                    .await
            }
        },
    ))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;

    // Completion order is arbitrary; report in input order
    items.sort_by_key(|item| item.index);

    let stats = compute_stats(&items, start.elapsed().as_millis() as u64);
    info!(
        "Batch complete: {}/{} stored, {} failed, {}ms",
        stats.succeeded, stats.total_items, stats.failed, stats.total_duration_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, stats.succeeded);
    }

    Ok(BatchOutput { items, stats })
}

/// Parse a queue event from JSON and process it.
pub async fn process_event_json(
    json: &str,
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn DocumentStore>,
    config: &DocGenConfig,
) -> Result<BatchOutput, DocGenError> {
    let event = parse_event(json)?;
    process_batch(&event, renderer, store, config).await
}

/// Synchronous wrapper around [`process_batch`].
///
/// Creates a temporary tokio runtime internally.
pub fn process_batch_sync(
    event: &QueueEvent,
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn DocumentStore>,
    config: &DocGenConfig,
) -> Result<BatchOutput, DocGenError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| DocGenError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(process_batch(event, renderer, store, config))
}

/// A message mapped without rendering.
#[derive(Debug, Clone, Serialize)]
pub struct MappedItem {
    pub message_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

/// Decode and map every message without rendering or storing anything.
///
/// Does not require a renderer or a store.
pub fn map_batch(event: &QueueEvent, config: &DocGenConfig) -> Result<Vec<MappedItem>, DocGenError> {
    ensure_not_empty(event)?;
    Ok(event
        .records
        .iter()
        .map(|message| {
            match decode_request(&message.body).and_then(|req| build_document(&req, config)) {
                Ok(document) => MappedItem {
                    message_id: message.message_id.clone(),
                    document: Some(document),
                    error: None,
                },
                Err(e) => {
                    warn!("{}: {}", message.message_id, e);
                    MappedItem {
                        message_id: message.message_id.clone(),
                        document: None,
                        error: Some(e),
                    }
                }
            }
        })
        .collect())
}

// ── Internal helpers ─────────────────────────────────────────────────────

pub(crate) fn ensure_not_empty(event: &QueueEvent) -> Result<(), DocGenError> {
    if event.is_empty() {
        error!("Event is empty: no records to process");
        return Err(DocGenError::EmptyBatch);
    }
    Ok(())
}

/// Run one message through every stage. Always returns an `ItemResult`.
pub(crate) async fn process_item(
    index: usize,
    total: usize,
    message: &QueueMessage,
    renderer: &dyn Renderer,
    store: &dyn DocumentStore,
    config: &DocGenConfig,
) -> ItemResult {
    let start = Instant::now();
    if let Some(ref cb) = config.progress_callback {
        cb.on_item_start(index, total);
    }

    let mut result = ItemResult {
        index,
        message_id: message.message_id.clone(),
        filename: None,
        document_type: None,
        file_size: None,
        retries: 0,
        duration_ms: 0,
        error: None,
    };

    let outcome = run_stages(message, renderer, store, config, &mut result).await;
    result.duration_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(()) => {
            let filename = result.filename.as_deref().unwrap_or_default();
            debug!(
                "{}: stored {} in {}ms",
                message.message_id, filename, result.duration_ms
            );
            if let Some(ref cb) = config.progress_callback {
                cb.on_item_complete(index, total, filename);
            }
        }
        Err(e) => {
            warn!("{}: {}", message.message_id, e);
            if let ItemError::RenderFailed { retries, .. } = &e {
                result.retries = *retries;
            }
            if let Some(ref cb) = config.progress_callback {
                cb.on_item_error(index, total, &e.to_string());
            }
            result.error = Some(e);
        }
    }
    result
}

async fn run_stages(
    message: &QueueMessage,
    renderer: &dyn Renderer,
    store: &dyn DocumentStore,
    config: &DocGenConfig,
    result: &mut ItemResult,
) -> Result<(), ItemError> {
    let request = decode_request(&message.body)?;
    let mut document = build_document(&request, config)?;
    result.filename = Some(document.filename.clone());
    result.document_type = Some(document.kind.as_str().to_string());

    let (bytes, retries) = render_with_retry(renderer, &document, config).await?;
    result.retries = retries;
    result.file_size = Some(bytes.len());
    document
        .metadata
        .insert(FILE_SIZE.to_string(), bytes.len().to_string());

    store
        .upload(&document.filename, &bytes, &document.metadata)
        .await
        .map_err(|e| ItemError::UploadFailed {
            filename: document.filename.clone(),
            detail: e.to_string(),
        })
}

fn compute_stats(items: &[ItemResult], total_duration_ms: u64) -> BatchStats {
    let succeeded = items.iter().filter(|i| i.is_success()).count();
    BatchStats {
        total_items: items.len(),
        succeeded,
        failed: items.len() - succeeded,
        total_bytes: items
            .iter()
            .filter(|i| i.is_success())
            .filter_map(|i| i.file_size)
            .map(|n| n as u64)
            .sum(),
        total_duration_ms,
    }
}
