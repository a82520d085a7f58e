//! Error types for the vehicle-docgen library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`DocGenError`]: **Fatal**: the batch cannot be processed at all
//!   (empty event, malformed event envelope, invalid configuration).
//!   Returned as `Err(DocGenError)` from the top-level `process*` functions.
//!
//! * [`ItemError`]: **Non-fatal**: a single queued request failed (bad
//!   body, unsupported document, renderer or upload failure) but every other
//!   request in the batch is unaffected. Stored inside
//!   [`crate::output::ItemResult`] so the queue can redeliver just that
//!   message.

use thiserror::Error;

/// All fatal errors returned by the vehicle-docgen library.
///
/// Item-level failures use [`ItemError`] and are stored in
/// [`crate::output::ItemResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum DocGenError {
    // ── Batch errors ──────────────────────────────────────────────────────
    /// The inbound event carried no records, so there is no item to fail.
    #[error("Event is empty: no records to process")]
    EmptyBatch,

    /// The inbound event itself could not be decoded.
    #[error("Invalid queue event: {detail}")]
    InvalidEvent { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single queued request.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum ItemError {
    /// The message body is not a valid document request.
    #[error("Request could not be decoded: {detail}")]
    DecodeFailed { detail: String },

    /// No builder exists for the requested document.
    #[error("Document Type is not supported: '{document_name}'")]
    UnsupportedDocument { document_name: String },

    /// The request names a document whose context block is missing.
    #[error("Request for '{document_name}' is missing its '{field}' details")]
    MissingContext {
        document_name: String,
        field: String,
    },

    /// The external renderer failed after retries.
    #[error("Rendering failed after {retries} retries: {detail}")]
    RenderFailed { retries: u32, detail: String },

    /// The rendered document could not be stored.
    #[error("Upload of '{filename}' failed: {detail}")]
    UploadFailed { filename: String, detail: String },
}
