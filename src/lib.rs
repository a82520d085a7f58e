//! # vehicle-docgen
//!
//! Generate vehicle documents (ministry plates, ADR pass certificates and
//! trailer into service letters) from queued requests.
//!
//! The heart of the crate is the **document-model mapping layer** in
//! [`documents`]: rules that turn a heterogeneous, category-dependent vehicle
//! technical record into the exact payload a PDF renderer template expects,
//! plus the metadata the stored document is tagged with. Rendering and
//! storage sit behind the [`Renderer`] and [`DocumentStore`] traits.
//!
//! ## Pipeline Overview
//!
//! ```text
//! queue event
//!  │
//!  ├─ 1. Decode   Records[].body → DocumentRequest (per-item failures)
//!  ├─ 2. Map      DocumentRequest → DocumentModel { filename, payload, metadata }
//!  ├─ 3. Render   payload → PDF bytes (retry + backoff)
//!  ├─ 4. Tag      metadata["file-size"] = rendered length
//!  ├─ 5. Upload   PDF + metadata → DocumentStore
//!  └─ 6. Report   batchItemFailures for the queue to redeliver
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vehicle_docgen::{process_event_json, DocGenConfig, FileSystemStore, HttpRenderer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // BRANCH, SHOULD_EMAIL_CERTIFICATE, DOCUMENT_LINK_URL, DOC_GEN_NAME
//!     let config = DocGenConfig::from_env()?;
//!     let renderer = Arc::new(HttpRenderer::new("http://localhost:3001", &config)?);
//!     let store = Arc::new(FileSystemStore::new("documents", config.environment.clone()));
//!
//!     let event = std::fs::read_to_string("event.json")?;
//!     let output = process_event_json(&event, renderer, store, &config).await?;
//!     println!("{}", serde_json::to_string(&output.batch_item_failures())?);
//!     Ok(())
//! }
//! ```
//!
//! Mapping alone needs neither a renderer nor a store:
//!
//! ```rust
//! use vehicle_docgen::pipeline::decode::decode_request;
//! use vehicle_docgen::{build_document, DocGenConfig};
//!
//! let body = r#"{
//!     "documentName": "VTG6_VTG7",
//!     "techRecord": { "techRecord_vehicleType": "hgv", "primaryVrm": "AB12CDE" },
//!     "plate": { "plateSerialNumber": "12345", "plateIssueDate": "2024-01-01" }
//! }"#;
//! let request = decode_request(body).unwrap();
//! let model = build_document(&request, &DocGenConfig::default()).unwrap();
//! assert_eq!(model.filename, "plate_12345");
//! assert_eq!(model.metadata["vrm"], "AB12CDE");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docgen` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! vehicle-docgen = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod documents;
pub mod error;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod progress;
pub mod stream;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{DocGenConfig, DocGenConfigBuilder};
pub use documents::{build_document, build_document_at};
pub use error::{DocGenError, ItemError};
pub use model::{DocumentKind, DocumentModel, DocumentPayload, DocumentRequest, Metadata};
pub use output::{BatchOutput, BatchResponse, BatchStats, ItemResult};
pub use pipeline::render::{HttpRenderer, Renderer};
pub use pipeline::upload::{DocumentStore, FileSystemStore};
pub use process::{map_batch, process_batch, process_batch_sync, process_event_json};
pub use progress::{BatchProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::process_stream;
