//! Data types shared by the mapping layer and the pipeline.
//!
//! ```text
//! TechRecord + context ──▶ DocumentRequest ──▶ DocumentModel { payload, metadata }
//! ```
//!
//! - [`tech_record`]: inbound vehicle technical record
//! - [`request`]    : decoded request with its kind-specific context
//! - [`payload`]    : renderer-ready payload shapes, one per document kind
//! - [`document`]   : builder output handed to the renderer and the store

pub mod document;
pub mod payload;
pub mod request;
pub mod tech_record;

pub use document::{DocumentModel, DocumentPayload, Metadata};
pub use request::{
    AdrCertificateDetails, AdrCertificateType, DocumentContext, DocumentKind, DocumentRequest,
    LetterDetails, LetterType, PlateDetails, ReasonForIssue,
};
pub use tech_record::{
    AdrDetails, CompatibilityGroupJ, TechRecord, TechRecordAxle, VehicleConfiguration,
    VehicleType,
};
