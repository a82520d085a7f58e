//! Inbound document requests.
//!
//! One [`DocumentRequest`] is decoded from each queue message body (see
//! [`crate::pipeline::decode`]) and consumed once by
//! [`crate::documents::build_document`].

use crate::model::tech_record::TechRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document kinds this crate can build, keyed by their wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Ministry plate (VTG6/VTG7).
    #[serde(rename = "VTG6_VTG7")]
    MinistryPlate,
    /// Ministry plate requested for a trailer.
    #[serde(rename = "VTG6_VTG7_TRL")]
    MinistryPlateTrl,
    /// ADR dangerous-goods pass certificate.
    #[serde(rename = "ADR_PASS_CERTIFICATE")]
    AdrPassCertificate,
    /// Trailer into service authorisation or rejection letter.
    #[serde(rename = "TRL_INTO_SERVICE")]
    TrailerIntoService,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::MinistryPlate,
        DocumentKind::MinistryPlateTrl,
        DocumentKind::AdrPassCertificate,
        DocumentKind::TrailerIntoService,
    ];

    /// Wire name, also used as `document-type` metadata and as the
    /// renderer's document name.
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::MinistryPlate => "VTG6_VTG7",
            DocumentKind::MinistryPlateTrl => "VTG6_VTG7_TRL",
            DocumentKind::AdrPassCertificate => "ADR_PASS_CERTIFICATE",
            DocumentKind::TrailerIntoService => "TRL_INTO_SERVICE",
        }
    }

    /// Look up a kind by wire name. `None` for unsupported documents.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Request field that carries the kind-specific context.
    pub fn context_field(self) -> &'static str {
        match self {
            DocumentKind::MinistryPlate | DocumentKind::MinistryPlateTrl => "plate",
            DocumentKind::AdrPassCertificate => "adrCertificate",
            DocumentKind::TrailerIntoService => "letter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a plate is being issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReasonForIssue {
    #[serde(rename = "Free replacement")]
    FreeReplacement,
    #[serde(rename = "Replacement")]
    Replacement,
    #[serde(rename = "Destroyed")]
    Destroyed,
    #[serde(rename = "Provisional")]
    Provisional,
    #[serde(rename = "Original")]
    Original,
    #[serde(rename = "Manual")]
    Manual,
}

/// Plate context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateDetails {
    #[serde(default)]
    pub plate_serial_number: Option<String>,
    #[serde(default)]
    pub plate_issue_date: Option<String>,
    #[serde(default)]
    pub plate_reason_for_issue: Option<ReasonForIssue>,
    #[serde(default)]
    pub plate_issuer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdrCertificateType {
    Pass,
    Replacement,
}

impl AdrCertificateType {
    pub fn as_str(self) -> &'static str {
        match self {
            AdrCertificateType::Pass => "PASS",
            AdrCertificateType::Replacement => "REPLACEMENT",
        }
    }
}

/// ADR certificate context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdrCertificateDetails {
    #[serde(default)]
    pub certificate_id: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub certificate_type: Option<AdrCertificateType>,
    #[serde(default)]
    pub generated_timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterType {
    #[serde(rename = "trailer authorisation")]
    TrailerAuthorisation,
    #[serde(rename = "trailer rejection")]
    TrailerRejection,
}

impl LetterType {
    pub fn as_str(self) -> &'static str {
        match self {
            LetterType::TrailerAuthorisation => "trailer authorisation",
            LetterType::TrailerRejection => "trailer rejection",
        }
    }
}

/// Letter context. `paragraph_id` selects the letter body (3 to 7).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterDetails {
    #[serde(default)]
    pub letter_type: Option<LetterType>,
    #[serde(default, alias = "paragraphID")]
    pub paragraph_id: Option<u8>,
    #[serde(default)]
    pub letter_issuer: Option<String>,
    #[serde(default)]
    pub letter_date_requested: Option<String>,
}

/// Kind-specific request context.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentContext {
    Plate(PlateDetails),
    AdrCertificate(AdrCertificateDetails),
    Letter(LetterDetails),
}

/// A decoded request for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    pub tech_record: TechRecord,
    pub recipient_email_address: Option<String>,
    pub context: DocumentContext,
}
