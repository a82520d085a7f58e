//! Trailer into service letter builder (`TRL_INTO_SERVICE`).

use crate::config::DocGenConfig;
use crate::documents::metadata::{derive_metadata, insert_opt, issue_timestamp, MetadataInput};
use crate::model::document::{DocumentModel, DocumentPayload};
use crate::model::payload::{ApplicantDetails, TrailerIntoServiceLetter};
use crate::model::request::{DocumentKind, LetterDetails};
use crate::model::tech_record::TechRecord;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

pub fn build_letter(
    record: &TechRecord,
    letter: &LetterDetails,
    recipient_email: Option<&str>,
    config: &DocGenConfig,
    now: DateTime<Utc>,
) -> DocumentModel {
    let kind = DocumentKind::TrailerIntoService;

    if record.system_number.is_none() || record.vin.is_none() {
        warn!("Letter request is missing systemNumber or vin; filename has empty segments");
    }
    let filename = format!(
        "letter_{}_{}",
        record.system_number.as_deref().unwrap_or_default(),
        record.vin.as_deref().unwrap_or_default()
    );
    let watermark = config.watermark();

    let payload = TrailerIntoServiceLetter {
        vin: record.vin.clone(),
        trailer_id: record.trailer_id.clone(),
        applicant_details: ApplicantDetails {
            name: record.applicant_name.clone(),
            address1: record.applicant_address1.clone(),
            address2: record.applicant_address2.clone(),
            post_town: record.applicant_post_town.clone(),
            address3: record.applicant_address3.clone(),
            post_code: record.applicant_post_code.clone(),
            telephone_number: record.applicant_telephone_number.clone(),
            email_address: record.applicant_email_address.clone(),
        },
        letter_date_requested: letter.letter_date_requested.clone(),
        approval_type_number: record.approval_type_number.clone(),
        paragraph_id: letter.paragraph_id,
        watermark: watermark.to_string(),
    };

    let issued_now = issue_timestamp(now);
    let mut metadata = derive_metadata(
        MetadataInput {
            kind,
            filename: &filename,
            recipient_email,
            date_of_issue: letter
                .letter_date_requested
                .as_deref()
                .unwrap_or(&issued_now),
        },
        config,
    );
    insert_opt(&mut metadata, "vin", record.vin.as_deref());
    insert_opt(&mut metadata, "trailer-id", record.trailer_id.as_deref());
    insert_opt(
        &mut metadata,
        "approval-type-number",
        record.approval_type_number.as_deref(),
    );
    insert_opt(&mut metadata, "letter-type", letter.letter_type.map(|t| t.as_str()));
    insert_opt(
        &mut metadata,
        "paragraph-id",
        letter.paragraph_id.map(|p| p.to_string()),
    );

    debug!("Mapped {} {} (watermark {:?})", kind, filename, watermark);

    DocumentModel {
        kind,
        filename,
        payload: DocumentPayload::TrailerIntoService(payload),
        metadata,
    }
}
