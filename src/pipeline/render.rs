//! Rendering: hand a [`DocumentModel`] to the external PDF renderer.
//!
//! The renderer is a seam ([`Renderer`]) so the pipeline can be driven by a
//! stub in tests and by [`HttpRenderer`] in deployments.
//!
//! ## Retry Strategy
//!
//! Renderer cold starts and throttling produce transient failures under a
//! full batch. [`render_with_retry`] retries with exponential backoff
//! (`retry_backoff_ms * 2^(attempt-1)`): with a 500 ms base and 3 retries
//! the waits are 500 ms → 1 s → 2 s. Each attempt is bounded by
//! `render_timeout_secs`.

use crate::config::DocGenConfig;
use crate::error::{DocGenError, ItemError};
use crate::model::document::DocumentModel;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

/// Directory the renderer resolves templates from.
pub const DOCUMENT_DIRECTORY: &str = "CVS";

/// A single failed render attempt.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer request failed: {0}")]
    Transport(String),

    #[error("renderer returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("renderer response could not be decoded: {0}")]
    InvalidResponse(String),

    #[error("payload could not be serialised: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("render timed out after {0}s")]
    Timeout(u64),
}

/// Turns a document model into PDF bytes.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, document: &DocumentModel) -> Result<Vec<u8>, RenderError>;
}

/// Function-invocation request understood by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    pub http_method: String,
    pub path_parameters: PathParameters,
    pub json: bool,
    /// The payload, JSON-encoded a second time.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathParameters {
    pub document_name: String,
    pub document_directory: String,
}

impl InvocationRequest {
    pub fn for_document(document: &DocumentModel) -> Result<Self, serde_json::Error> {
        Ok(Self {
            http_method: "POST".to_string(),
            path_parameters: PathParameters {
                document_name: document.kind.as_str().to_string(),
                document_directory: DOCUMENT_DIRECTORY.to_string(),
            },
            json: true,
            body: document.payload_json()?,
        })
    }
}

/// Renderer reply; `body` is the base64-encoded PDF.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    #[serde(default)]
    pub status_code: Option<u16>,
    pub body: String,
}

impl InvocationResponse {
    /// Validate the embedded status and decode the PDF bytes.
    pub fn into_pdf(self) -> Result<Vec<u8>, RenderError> {
        if let Some(status) = self.status_code {
            if !(200..300).contains(&status) {
                return Err(RenderError::Status {
                    status,
                    detail: truncate(&self.body, 200),
                });
            }
        }
        BASE64
            .decode(self.body.trim())
            .map_err(|e| RenderError::InvalidResponse(format!("body is not base64: {e}")))
    }
}

/// Renderer reached over HTTP through the function-invocation API.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRenderer {
    /// `base_url` is the invocation API root; the target comes from
    /// `config.renderer_target`.
    pub fn new(base_url: &str, config: &DocGenConfig) -> Result<Self, DocGenError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.render_timeout_secs))
            .build()
            .map_err(|e| DocGenError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: invocation_url(base_url, &config.renderer_target),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// `{base}/2015-03-31/functions/{target}/invocations`.
pub fn invocation_url(base_url: &str, target: &str) -> String {
    format!(
        "{}/2015-03-31/functions/{}/invocations",
        base_url.trim_end_matches('/'),
        target
    )
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, document: &DocumentModel) -> Result<Vec<u8>, RenderError> {
        let request = InvocationRequest::for_document(document)?;

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RenderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(RenderError::Status {
                status: status.as_u16(),
                detail: truncate(&detail, 200),
            });
        }

        let reply: InvocationResponse = response
            .json()
            .await
            .map_err(|e| RenderError::InvalidResponse(e.to_string()))?;
        reply.into_pdf()
    }
}

/// Render with timeout and exponential-backoff retries.
///
/// Returns the PDF bytes and the number of retries used, or
/// [`ItemError::RenderFailed`] once every attempt has failed.
pub async fn render_with_retry(
    renderer: &dyn Renderer,
    document: &DocumentModel,
    config: &DocGenConfig,
) -> Result<(Vec<u8>, u32), ItemError> {
    let mut last_err: Option<String> = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let backoff = backoff_ms(config.retry_backoff_ms, attempt);
            warn!(
                "{}: render retry {}/{} after {}ms",
                document.filename, attempt, config.max_retries, backoff
            );
            sleep(Duration::from_millis(backoff)).await;
        }

        let outcome = timeout(
            Duration::from_secs(config.render_timeout_secs),
            renderer.render(document),
        )
        .await
        .unwrap_or(Err(RenderError::Timeout(config.render_timeout_secs)));

        match outcome {
            Ok(bytes) => {
                debug!("{}: rendered {} bytes", document.filename, bytes.len());
                return Ok((bytes, attempt));
            }
            Err(e) => {
                warn!(
                    "{}: render attempt {} failed: {}",
                    document.filename,
                    attempt + 1,
                    e
                );
                last_err = Some(e.to_string());
            }
        }
    }

    Err(ItemError::RenderFailed {
        retries: config.max_retries,
        detail: last_err.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Delay before retry `attempt` (1-based): `base * 2^(attempt-1)`, saturating.
fn backoff_ms(base: u64, attempt: u32) -> u64 {
    base.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)))
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
