//! The output of a builder: what gets rendered and how it is stored.

use crate::model::payload::{
    AdrPassCertificateDocument, MinistryPlateDocument, TrailerIntoServiceLetter,
};
use crate::model::request::DocumentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Storage tags attached to a stored document. Ordered for stable output.
pub type Metadata = BTreeMap<String, String>;

/// Kind-specific renderer payload.
///
/// Serialises as the inner document with no enum tag, which is the exact
/// JSON the renderer templates expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentPayload {
    MinistryPlate(MinistryPlateDocument),
    AdrPassCertificate(AdrPassCertificateDocument),
    TrailerIntoService(TrailerIntoServiceLetter),
}

impl DocumentPayload {
    /// Watermark carried by the payload.
    pub fn watermark(&self) -> &str {
        match self {
            DocumentPayload::MinistryPlate(d) => &d.watermark,
            DocumentPayload::AdrPassCertificate(d) => &d.watermark,
            DocumentPayload::TrailerIntoService(d) => &d.watermark,
        }
    }
}

/// A fully mapped document, ready for the renderer.
///
/// `filename` has no extension; `metadata["link-to-document"]` always ends
/// with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    pub kind: DocumentKind,
    pub filename: String,
    pub payload: DocumentPayload,
    pub metadata: Metadata,
}

impl DocumentModel {
    /// Payload as the JSON string handed to the renderer.
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.payload)
    }
}
