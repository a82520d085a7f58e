//! Inbound decoding: queue event → messages → [`DocumentRequest`].
//!
//! Two levels of failure:
//! - the event envelope itself is malformed → [`DocGenError::InvalidEvent`]
//!   (nothing can be reported per item);
//! - a single message body is bad → [`ItemError`] for that message only.
//!
//! The body is decoded in two passes: first `documentName` alone, so an
//! unsupported document is reported as such even when the rest of the body
//! would not parse, then the tech record and the kind's context block.

use crate::error::{DocGenError, ItemError};
use crate::model::request::{
    AdrCertificateDetails, DocumentContext, DocumentKind, DocumentRequest, LetterDetails,
    PlateDetails,
};
use crate::model::tech_record::TechRecord;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A batch of queued messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueMessage>,
}

/// One queued message; `body` is a JSON-encoded document request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMessage {
    #[serde(rename = "messageId")]
    pub message_id: String,
    pub body: String,
}

impl QueueEvent {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Raw request body. Every field is kept as JSON until the kind is known.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestEnvelope {
    document_name: Option<String>,
    #[serde(alias = "vehicle")]
    tech_record: Option<Value>,
    recipient_email_address: Option<String>,
    plate: Option<Value>,
    adr_certificate: Option<Value>,
    letter: Option<Value>,
}

/// Parse a queue event from JSON.
pub fn parse_event(json: &str) -> Result<QueueEvent, DocGenError> {
    serde_json::from_str(json).map_err(|e| DocGenError::InvalidEvent {
        detail: e.to_string(),
    })
}

/// Decode one message body into a request.
pub fn decode_request(body: &str) -> Result<DocumentRequest, ItemError> {
    let envelope: RequestEnvelope = serde_json::from_str(body).map_err(|e| {
        ItemError::DecodeFailed {
            detail: e.to_string(),
        }
    })?;

    let document_name = envelope.document_name.unwrap_or_default();
    let kind = DocumentKind::from_name(&document_name).ok_or(ItemError::UnsupportedDocument {
        document_name: document_name.clone(),
    })?;

    let tech_record: TechRecord = match envelope.tech_record {
        Some(value) => from_value(value, "techRecord")?,
        None => {
            return Err(ItemError::DecodeFailed {
                detail: "missing field `techRecord`".into(),
            })
        }
    };

    let missing = || ItemError::MissingContext {
        document_name: kind.as_str().to_string(),
        field: kind.context_field().to_string(),
    };

    let context = match kind {
        DocumentKind::MinistryPlate | DocumentKind::MinistryPlateTrl => DocumentContext::Plate(
            from_value::<PlateDetails>(envelope.plate.ok_or_else(missing)?, "plate")?,
        ),
        DocumentKind::AdrPassCertificate => {
            DocumentContext::AdrCertificate(from_value::<AdrCertificateDetails>(
                envelope.adr_certificate.ok_or_else(missing)?,
                "adrCertificate",
            )?)
        }
        DocumentKind::TrailerIntoService => DocumentContext::Letter(from_value::<LetterDetails>(
            envelope.letter.ok_or_else(missing)?,
            "letter",
        )?),
    };

    debug!(
        "Decoded {} request for {} vehicle",
        kind,
        tech_record.vehicle_type.as_str()
    );

    Ok(DocumentRequest {
        kind,
        tech_record,
        recipient_email_address: envelope.recipient_email_address,
        context,
    })
}

fn from_value<T: DeserializeOwned>(value: Value, field: &str) -> Result<T, ItemError> {
    serde_json::from_value(value).map_err(|e| ItemError::DecodeFailed {
        detail: format!("{field}: {e}"),
    })
}
