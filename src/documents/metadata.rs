//! Storage metadata shared by every document kind.

use crate::config::DocGenConfig;
use crate::model::document::Metadata;
use crate::model::request::DocumentKind;
use chrono::{DateTime, SecondsFormat, Utc};

pub const FILE_FORMAT: &str = "file-format";
pub const DATE_OF_ISSUE: &str = "date-of-issue";
pub const DOCUMENT_TYPE: &str = "document-type";
pub const EMAIL: &str = "email";
pub const SHOULD_EMAIL_CERTIFICATE: &str = "should-email-certificate";
pub const LINK_TO_DOCUMENT: &str = "link-to-document";
pub const FILE_SIZE: &str = "file-size";

/// Inputs to [`derive_metadata`].
#[derive(Debug, Clone, Copy)]
pub struct MetadataInput<'a> {
    pub kind: DocumentKind,
    pub filename: &'a str,
    pub recipient_email: Option<&'a str>,
    /// Issue date as printed; builders choose the source and fall back to
    /// the construction time.
    pub date_of_issue: &'a str,
}

/// Compute the base metadata for a document.
///
/// Always sets `file-format`, `date-of-issue`, `document-type`, `email`
/// (empty without a recipient), `should-email-certificate` and
/// `link-to-document`.
pub fn derive_metadata(input: MetadataInput<'_>, config: &DocGenConfig) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(FILE_FORMAT.into(), "pdf".into());
    metadata.insert(DOCUMENT_TYPE.into(), input.kind.as_str().into());
    metadata.insert(
        EMAIL.into(),
        input.recipient_email.unwrap_or_default().to_string(),
    );
    metadata.insert(
        SHOULD_EMAIL_CERTIFICATE.into(),
        config.should_email_certificate.clone(),
    );
    metadata.insert(
        LINK_TO_DOCUMENT.into(),
        document_link(&config.document_link_url, input.filename),
    );
    metadata.insert(DATE_OF_ISSUE.into(), input.date_of_issue.to_string());
    metadata
}

/// `{base}/{filename}`, concatenated as-is.
pub fn document_link(base: &str, filename: &str) -> String {
    format!("{base}/{filename}")
}

/// ISO-8601 timestamp with millisecond precision and a `Z` suffix.
pub fn issue_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Insert `key` only when `value` is present.
pub(crate) fn insert_opt(metadata: &mut Metadata, key: &str, value: Option<impl Into<String>>) {
    if let Some(v) = value {
        metadata.insert(key.to_string(), v.into());
    }
}
