//! Configuration for document generation.
//!
//! Every deployment-level input the mapping layer reads (environment name,
//! email flag, document link base URL, renderer target) lives in
//! [`DocGenConfig`]. The value is built once at process start and passed by
//! reference into builders and pipeline stages; nothing below this module
//! reads the process environment.

use crate::error::DocGenError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Deployment environment in which documents are valid.
pub const PRODUCTION_ENVIRONMENT: &str = "prod";

/// Watermark stamped on every document generated outside production.
pub const NOT_VALID_WATERMARK: &str = "NOT VALID";

/// Configuration for a document generation run.
///
/// Built via [`DocGenConfig::builder()`], [`DocGenConfig::from_env()`] or
/// [`DocGenConfig::default()`].
///
/// # Example
/// ```rust
/// use vehicle_docgen::DocGenConfig;
///
/// let config = DocGenConfig::builder()
///     .environment("prod")
///     .document_link_url("https://documents.example.com")
///     .concurrency(4)
///     .build()
///     .unwrap();
/// assert_eq!(config.watermark(), "");
/// ```
#[derive(Clone)]
pub struct DocGenConfig {
    /// Deployment environment name (`BRANCH`). Default: "local".
    ///
    /// Only the exact value `prod` produces unwatermarked documents.
    pub environment: String,

    /// Value copied verbatim into the `should-email-certificate` metadata
    /// tag (`SHOULD_EMAIL_CERTIFICATE`). Default: "false".
    pub should_email_certificate: String,

    /// Base URL prefixed to every filename in `link-to-document`
    /// (`DOCUMENT_LINK_URL`). Default: empty.
    pub document_link_url: String,

    /// Identifier of the renderer function to invoke (`DOC_GEN_NAME`).
    pub renderer_target: String,

    /// Number of batch items processed concurrently. Default: 10.
    pub concurrency: usize,

    /// Maximum retry attempts on a renderer failure. Default: 3.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds (exponential backoff). Default: 500.
    pub retry_backoff_ms: u64,

    /// Per-render timeout in seconds. Default: 60.
    pub render_timeout_secs: u64,

    /// Optional per-item progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for DocGenConfig {
    fn default() -> Self {
        Self {
            environment: "local".to_string(),
            should_email_certificate: "false".to_string(),
            document_link_url: String::new(),
            renderer_target: "doc-gen".to_string(),
            concurrency: 10,
            max_retries: 3,
            retry_backoff_ms: 500,
            render_timeout_secs: 60,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for DocGenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocGenConfig")
            .field("environment", &self.environment)
            .field("should_email_certificate", &self.should_email_certificate)
            .field("document_link_url", &self.document_link_url)
            .field("renderer_target", &self.renderer_target)
            .field("concurrency", &self.concurrency)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("render_timeout_secs", &self.render_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl DocGenConfig {
    /// Create a new builder for `DocGenConfig`.
    pub fn builder() -> DocGenConfigBuilder {
        DocGenConfigBuilder {
            config: Self::default(),
        }
    }

    /// Read configuration from the process environment.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `BRANCH` | `environment` |
    /// | `SHOULD_EMAIL_CERTIFICATE` | `should_email_certificate` |
    /// | `DOCUMENT_LINK_URL` | `document_link_url` |
    /// | `DOC_GEN_NAME` | `renderer_target` |
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, DocGenError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DocGenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(v) = lookup("BRANCH") {
            builder = builder.environment(v);
        }
        if let Some(v) = lookup("SHOULD_EMAIL_CERTIFICATE") {
            builder = builder.should_email_certificate(v);
        }
        if let Some(v) = lookup("DOCUMENT_LINK_URL") {
            builder = builder.document_link_url(v);
        }
        if let Some(v) = lookup("DOC_GEN_NAME") {
            builder = builder.renderer_target(v);
        }
        builder.build()
    }

    /// Whether documents produced under this configuration are valid.
    pub fn is_production(&self) -> bool {
        self.environment == PRODUCTION_ENVIRONMENT
    }

    /// Watermark text for documents generated under this configuration.
    ///
    /// Empty in production, [`NOT_VALID_WATERMARK`] everywhere else.
    pub fn watermark(&self) -> &'static str {
        if self.is_production() {
            ""
        } else {
            NOT_VALID_WATERMARK
        }
    }
}

/// Builder for [`DocGenConfig`].
#[derive(Debug)]
pub struct DocGenConfigBuilder {
    config: DocGenConfig,
}

impl DocGenConfigBuilder {
    pub fn environment(mut self, env: impl Into<String>) -> Self {
        self.config.environment = env.into();
        self
    }

    pub fn should_email_certificate(mut self, v: impl Into<String>) -> Self {
        self.config.should_email_certificate = v.into();
        self
    }

    pub fn document_link_url(mut self, url: impl Into<String>) -> Self {
        self.config.document_link_url = url.into();
        self
    }

    pub fn renderer_target(mut self, target: impl Into<String>) -> Self {
        self.config.renderer_target = target.into();
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn render_timeout_secs(mut self, secs: u64) -> Self {
        self.config.render_timeout_secs = secs;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<DocGenConfig, DocGenError> {
        let c = &self.config;
        if c.environment.trim().is_empty() {
            return Err(DocGenError::InvalidConfig(
                "Environment name must not be empty".into(),
            ));
        }
        if c.renderer_target.trim().is_empty() {
            return Err(DocGenError::InvalidConfig(
                "Renderer target must not be empty".into(),
            ));
        }
        if c.concurrency == 0 {
            return Err(DocGenError::InvalidConfig("Concurrency must be ≥ 1".into()));
        }
        Ok(self.config)
    }
}
