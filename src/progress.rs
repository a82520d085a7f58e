//! Progress-callback trait for per-item batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::DocGenConfigBuilder::progress_callback`] to receive
//! events as the pipeline processes each queued request.
//!
//! # Example
//!
//! ```rust
//! use vehicle_docgen::{BatchProgressCallback, DocGenConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     stored: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for CountingCallback {
//!     fn on_item_complete(&self, _index: usize, _total: usize, filename: &str) {
//!         self.stored.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("stored {filename}");
//!     }
//! }
//!
//! let config = DocGenConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { stored: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by the batch pipeline as it processes each item.
///
/// Items are processed concurrently, so `on_item_*` methods may be called
/// from different tasks at the same time. All methods default to no-ops.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before any item is processed.
    fn on_batch_start(&self, total_items: usize) {
        let _ = total_items;
    }

    /// Called when an item starts decoding.
    ///
    /// # Arguments
    /// * `index`: 0-indexed position of the item in the batch
    /// * `total`: number of items in the batch
    fn on_item_start(&self, index: usize, total: usize) {
        let _ = (index, total);
    }

    /// Called when an item has been rendered and stored.
    fn on_item_complete(&self, index: usize, total: usize, filename: &str) {
        let _ = (index, total, filename);
    }

    /// Called when an item fails; the rest of the batch continues.
    fn on_item_error(&self, index: usize, total: usize, error: &str) {
        let _ = (index, total, error);
    }

    /// Called once after every item has been attempted.
    fn on_batch_complete(&self, total_items: usize, success_count: usize) {
        let _ = (total_items, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::DocGenConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
