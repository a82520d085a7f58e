//! Streaming batch API: emit item outcomes as they complete.
//!
//! Unlike the eager [`crate::process::process_batch`], which returns only
//! after every message has been attempted, [`process_stream`] yields each
//! [`ItemResult`] as soon as its message is stored or has failed. Items
//! arrive in completion order; sort by `index` if order matters.

use crate::config::DocGenConfig;
use crate::error::DocGenError;
use crate::output::ItemResult;
use crate::pipeline::decode::QueueEvent;
use crate::pipeline::render::Renderer;
use crate::pipeline::upload::DocumentStore;
use crate::process::{ensure_not_empty, process_item};
use futures::stream::{self, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;
use tracing::info;

/// A boxed stream of item outcomes.
pub type ItemStream = Pin<Box<dyn Stream<Item = ItemResult> + Send>>;

/// Process a queue event, streaming item outcomes as they are ready.
///
/// # Returns
/// - `Ok(ItemStream)`: one [`ItemResult`] per message; failed messages carry
///   their error
/// - `Err(DocGenError::EmptyBatch)`: the event has no records
///
/// # Example
/// ```rust,no_run
/// use vehicle_docgen::pipeline::decode::parse_event;
/// use vehicle_docgen::pipeline::render::HttpRenderer;
/// use vehicle_docgen::pipeline::upload::FileSystemStore;
/// use vehicle_docgen::{process_stream, DocGenConfig};
/// use futures::StreamExt;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DocGenConfig::from_env()?;
/// let event = parse_event(&std::fs::read_to_string("event.json")?)?;
/// let renderer = Arc::new(HttpRenderer::new("http://localhost:3001", &config)?);
/// let store = Arc::new(FileSystemStore::new("out", config.environment.clone()));
///
/// let mut items = process_stream(event, renderer, store, &config)?;
/// while let Some(item) = items.next().await {
///     match item.error {
///         None => println!("{} stored", item.message_id),
///         Some(e) => eprintln!("{} failed: {e}", item.message_id),
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub fn process_stream(
    event: QueueEvent,
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn DocumentStore>,
    config: &DocGenConfig,
) -> Result<ItemStream, DocGenError> {
    ensure_not_empty(&event)?;

    let total = event.len();
    info!("Starting streaming batch of {} messages", total);
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    let concurrency = config.concurrency;
    let config = Arc::new(config.clone());

    let s = stream::iter(event.records.into_iter().enumerate().map(
        move |(index, message)| {
            let renderer = Arc::clone(&renderer);
            let store = Arc::clone(&store);
            let cfg = Arc::clone(&config);
            async move {
                process_item(
                    index,
                    total,
                    &message,
                    renderer.as_ref(),
                    store.as_ref(),
                    &cfg,
                )
                .await
            }
        },
    ))
    .buffer_unordered(concurrency);

    Ok(Box::pin(s))
}
