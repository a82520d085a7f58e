//! Pipeline stages around the mapping core.
//!
//! ```text
//! decode ──▶ documents::build_document ──▶ render ──▶ upload
//! (queue)        (pure mapping)            (PDF)     (store)
//! ```
//!
//! 1. [`decode`]: queue event and message body → `DocumentRequest`
//! 2. [`render`]: `DocumentModel` → PDF bytes through a [`render::Renderer`],
//!    with timeout and retry/backoff; the only stage with network I/O
//! 3. [`upload`]: PDF + metadata → [`upload::DocumentStore`]

pub mod decode;
pub mod render;
pub mod upload;
