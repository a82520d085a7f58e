//! Document-model mapping: technical record + request context → renderer payload.
//!
//! Everything in this module is synchronous and free of I/O. The only input
//! besides the request is the immutable [`DocGenConfig`].
//!
//! ## Layout
//!
//! ```text
//! DocumentRequest ──▶ build_document ──┬─▶ plate::build_plate
//!                                      ├─▶ adr::build_adr_certificate
//!                                      └─▶ letter::build_letter
//!                                            │
//!            adapter (category rules) ◀──────┤
//!            axles   (4-slot projection) ◀───┤
//!            metadata (storage tags) ◀───────┘
//! ```
//!
//! Builders never fail on missing attributes: absent inputs stay absent in
//! the payload. The only failure here is a request whose context block does
//! not match its document kind.

pub mod adapter;
pub mod adr;
pub mod axles;
pub mod letter;
pub mod metadata;
pub mod plate;

use crate::config::DocGenConfig;
use crate::error::ItemError;
use crate::model::document::DocumentModel;
use crate::model::request::{DocumentContext, DocumentKind, DocumentRequest};
use chrono::{DateTime, Utc};

/// Map a decoded request to its document model.
///
/// # Errors
/// [`ItemError::MissingContext`] when the request's context does not belong
/// to its document kind.
pub fn build_document(
    request: &DocumentRequest,
    config: &DocGenConfig,
) -> Result<DocumentModel, ItemError> {
    build_document_at(request, config, Utc::now())
}

/// [`build_document`] with an explicit construction time.
///
/// ADR certificates are always dated `now`; plates and letters fall back to
/// it when the request carries no issue date.
pub fn build_document_at(
    request: &DocumentRequest,
    config: &DocGenConfig,
    now: DateTime<Utc>,
) -> Result<DocumentModel, ItemError> {
    let email = request.recipient_email_address.as_deref();
    let record = &request.tech_record;

    match (request.kind, &request.context) {
        (
            kind @ (DocumentKind::MinistryPlate | DocumentKind::MinistryPlateTrl),
            DocumentContext::Plate(plate),
        ) => Ok(plate::build_plate(kind, record, plate, email, config, now)),
        (DocumentKind::AdrPassCertificate, DocumentContext::AdrCertificate(cert)) => Ok(
            adr::build_adr_certificate(record, cert, email, config, now),
        ),
        (DocumentKind::TrailerIntoService, DocumentContext::Letter(letter)) => {
            Ok(letter::build_letter(record, letter, email, config, now))
        }
        (kind, _) => Err(ItemError::MissingContext {
            document_name: kind.as_str().to_string(),
            field: kind.context_field().to_string(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::payload::MinistryPlateDocument;
    use crate::model::request::{
        AdrCertificateDetails, AdrCertificateType, LetterDetails, LetterType, PlateDetails,
        ReasonForIssue,
    };
    use crate::model::tech_record::{
        AdrDetails, TechRecord, TechRecordAxle, VehicleConfiguration, VehicleType,
    };
    use crate::model::DocumentPayload;
    use chrono::TimeZone;

    // ── Fixtures shared by the builder tests ─────────────────────────────

    pub(crate) fn axle(number: u32, gb_weight: u32) -> TechRecordAxle {
        TechRecordAxle {
            axle_number: Some(f64::from(number)),
            gb_weight: Some(f64::from(gb_weight)),
            eec_weight: Some(f64::from(gb_weight + gb_weight / 10)),
            design_weight: Some(f64::from(gb_weight + 500)),
            tyre_size: Some("295/80-22.5".into()),
            ply_rating: Some("16".into()),
            fitment_code: Some("single".into()),
            data_tr_axles: None,
        }
    }

    fn empty_record(vehicle_type: VehicleType) -> TechRecord {
        TechRecord {
            system_number: None,
            vin: None,
            primary_vrm: None,
            trailer_id: None,
            vehicle_type,
            make: None,
            model: None,
            variant_number: None,
            approval_type_number: None,
            dtp_number: None,
            regn_date: None,
            manufacture_year: None,
            vehicle_configuration: None,
            road_friendly: None,
            speed_limiter_mrk: None,
            tyre_use_code: None,
            gross_gb_weight: None,
            gross_eec_weight: None,
            gross_design_weight: None,
            train_gb_weight: None,
            train_eec_weight: None,
            train_design_weight: None,
            max_train_gb_weight: None,
            max_train_eec_weight: None,
            max_load_on_coupling: None,
            dimension_length: None,
            dimension_width: None,
            front_vehicle_to_5th_wheel_coupling_min: None,
            front_vehicle_to_5th_wheel_coupling_max: None,
            coupling_center_to_rear_trl_min: None,
            coupling_center_to_rear_trl_max: None,
            coupling_center_to_rear_axle_max: None,
            axles: None,
            applicant_name: None,
            applicant_address1: None,
            applicant_address2: None,
            applicant_address3: None,
            applicant_post_town: None,
            applicant_post_code: None,
            applicant_telephone_number: None,
            applicant_email_address: None,
            adr: AdrDetails::default(),
            adr_pass_certificate_details: None,
        }
    }

    pub(crate) fn hgv_record() -> TechRecord {
        TechRecord {
            system_number: Some("1234567".into()),
            vin: Some("ABCDEFGH123456789".into()),
            primary_vrm: Some("AB12CDE".into()),
            make: Some("DAF".into()),
            model: Some("XF".into()),
            variant_number: Some("V1".into()),
            approval_type_number: Some("e4*2007/46*1234".into()),
            dtp_number: Some("1234AB".into()),
            regn_date: Some("2019-06-01".into()),
            manufacture_year: Some(2019.0),
            vehicle_configuration: Some(VehicleConfiguration::Articulated),
            road_friendly: Some(true),
            speed_limiter_mrk: Some(true),
            tyre_use_code: Some("2B".into()),
            gross_gb_weight: Some(26_000.0),
            gross_eec_weight: Some(26_100.0),
            gross_design_weight: Some(26_500.0),
            train_gb_weight: Some(44_000.0),
            train_eec_weight: Some(44_100.0),
            train_design_weight: Some(44_500.0),
            max_train_gb_weight: Some(44_000.0),
            max_train_eec_weight: Some(44_100.0),
            max_load_on_coupling: Some(5_000.0),
            dimension_length: Some(7_500.0),
            dimension_width: Some(2_550.0),
            front_vehicle_to_5th_wheel_coupling_min: Some(1_200.0),
            front_vehicle_to_5th_wheel_coupling_max: Some(1_500.0),
            axles: Some(vec![axle(1, 7_000), axle(2, 11_500)]),
            adr: AdrDetails {
                applicant_name: Some("Haulage Ltd".into()),
                applicant_street: Some("1 Depot Road".into()),
                applicant_city: Some("Bristol".into()),
                applicant_town: Some("Filton".into()),
                applicant_postcode: Some("BS1 1AA".into()),
                vehicle_type: Some("AT vehicle".into()),
                permitted_dangerous_goods: Some(vec!["FP <61 (FL)".into()]),
                brake_endurance: Some(true),
                weight: Some(7_800.0),
                tank_code: Some("L4BN".into()),
                ..AdrDetails::default()
            },
            ..empty_record(VehicleType::Hgv)
        }
    }

    pub(crate) fn trl_record() -> TechRecord {
        TechRecord {
            system_number: Some("7654321".into()),
            vin: Some("TRLVIN0000001".into()),
            trailer_id: Some("C123456".into()),
            make: Some("Schmitz".into()),
            model: Some("S.KO".into()),
            approval_type_number: Some("e11*2007/46*0001".into()),
            manufacture_year: Some(2021.0),
            vehicle_configuration: Some(VehicleConfiguration::SemiTrailer),
            road_friendly: Some(true),
            // recorded on trailers but never printed
            speed_limiter_mrk: Some(false),
            gross_gb_weight: Some(18_000.0),
            gross_eec_weight: Some(18_100.0),
            gross_design_weight: Some(18_500.0),
            max_load_on_coupling: Some(1_000.0),
            coupling_center_to_rear_trl_min: Some(1_000.0),
            coupling_center_to_rear_trl_max: Some(9_000.0),
            coupling_center_to_rear_axle_max: Some(11_000.0),
            front_vehicle_to_5th_wheel_coupling_min: Some(900.0),
            axles: Some(vec![axle(1, 9_000), axle(2, 9_000), axle(3, 9_000)]),
            applicant_name: Some("Trailer Co".into()),
            applicant_address1: Some("2 Yard Lane".into()),
            applicant_post_town: Some("London".into()),
            applicant_post_code: Some("SW1A 1AA".into()),
            applicant_email_address: Some("ops@trailer.example.com".into()),
            ..empty_record(VehicleType::Trl)
        }
    }

    pub(crate) fn lgv_record() -> TechRecord {
        TechRecord {
            system_number: Some("5550001".into()),
            vin: Some("LGVVIN0000001".into()),
            primary_vrm: Some("LG12VAN".into()),
            ..empty_record(VehicleType::Lgv)
        }
    }

    pub(crate) fn plate_details() -> PlateDetails {
        PlateDetails {
            plate_serial_number: Some("12345".into()),
            plate_issue_date: Some("2024-01-01".into()),
            plate_reason_for_issue: Some(ReasonForIssue::Replacement),
            plate_issuer: Some("user".into()),
        }
    }

    pub(crate) fn adr_details() -> AdrCertificateDetails {
        AdrCertificateDetails {
            certificate_id: Some("adrPass_1234567_1".into()),
            created_by_name: Some("mr example".into()),
            certificate_type: Some(AdrCertificateType::Pass),
            generated_timestamp: Some("2024-05-01T09:00:00.000Z".into()),
        }
    }

    pub(crate) fn letter_details() -> LetterDetails {
        LetterDetails {
            letter_type: Some(LetterType::TrailerAuthorisation),
            paragraph_id: Some(3),
            letter_issuer: Some("issuer".into()),
            letter_date_requested: Some("2024-02-14".into()),
        }
    }

    fn request(kind: DocumentKind, record: TechRecord, context: DocumentContext) -> DocumentRequest {
        DocumentRequest {
            kind,
            tech_record: record,
            recipient_email_address: Some("customer@example.com".into()),
            context,
        }
    }

    // ── Dispatch ─────────────────────────────────────────────────────────

    #[test]
    fn dispatches_each_kind() {
        let config = DocGenConfig::default();
        let cases = [
            request(
                DocumentKind::MinistryPlate,
                hgv_record(),
                DocumentContext::Plate(plate_details()),
            ),
            request(
                DocumentKind::MinistryPlateTrl,
                trl_record(),
                DocumentContext::Plate(plate_details()),
            ),
            request(
                DocumentKind::AdrPassCertificate,
                hgv_record(),
                DocumentContext::AdrCertificate(adr_details()),
            ),
            request(
                DocumentKind::TrailerIntoService,
                trl_record(),
                DocumentContext::Letter(letter_details()),
            ),
        ];

        for req in &cases {
            let model = build_document(req, &config).unwrap();
            assert_eq!(model.kind, req.kind);
            assert_eq!(model.metadata["document-type"], req.kind.as_str());
            assert_eq!(model.metadata["file-format"], "pdf");
            assert!(model.metadata.contains_key("date-of-issue"));
            assert!(model.metadata.contains_key("should-email-certificate"));
            assert_eq!(model.metadata["email"], "customer@example.com");
            assert!(model.metadata["link-to-document"].ends_with(&model.filename));
        }
    }

    #[test]
    fn mismatched_context_fails_item() {
        let req = request(
            DocumentKind::AdrPassCertificate,
            hgv_record(),
            DocumentContext::Plate(plate_details()),
        );
        let err = build_document(&req, &DocGenConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ItemError::MissingContext {
                document_name: "ADR_PASS_CERTIFICATE".into(),
                field: "adrCertificate".into(),
            }
        );
    }

    #[test]
    fn eec_fields_only_for_qualifying_vehicles() {
        let config = DocGenConfig::default();
        let mut far_trl = trl_record();
        far_trl.coupling_center_to_rear_axle_max = Some(15_000.0);

        let expectations = [
            (hgv_record(), true),
            (trl_record(), true),
            (far_trl, false),
            (lgv_record(), false),
        ];

        for (record, expect_eec) in expectations {
            let req = request(
                DocumentKind::MinistryPlate,
                record,
                DocumentContext::Plate(plate_details()),
            );
            let model = build_document(&req, &config).unwrap();
            let DocumentPayload::MinistryPlate(MinistryPlateDocument { plates_data, .. }) =
                model.payload
            else {
                panic!("expected plate payload");
            };
            assert_eq!(
                plates_data.gross_eec_weight.is_some(),
                expect_eec,
                "{:?}",
                req.tech_record.vehicle_type
            );
            let axle_eec = plates_data
                .axles
                .as_ref()
                .and_then(|a| a.axle1.weights.as_ref())
                .and_then(|w| w.eec_weight.as_ref());
            assert_eq!(axle_eec.is_some(), expect_eec);
        }
    }

    #[test]
    fn watermark_follows_environment() {
        let req = request(
            DocumentKind::TrailerIntoService,
            trl_record(),
            DocumentContext::Letter(letter_details()),
        );
        let prod = DocGenConfig::builder().environment("prod").build().unwrap();
        let dev = DocGenConfig::builder().environment("develop").build().unwrap();
        assert_eq!(build_document(&req, &prod).unwrap().payload.watermark(), "");
        assert_eq!(
            build_document(&req, &dev).unwrap().payload.watermark(),
            "NOT VALID"
        );
    }

    #[test]
    fn adr_issue_date_is_construction_time() {
        let req = request(
            DocumentKind::AdrPassCertificate,
            trl_record(),
            DocumentContext::AdrCertificate(adr_details()),
        );
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let model = build_document_at(&req, &DocGenConfig::default(), now).unwrap();
        assert_eq!(model.metadata["date-of-issue"], "2025-12-31T23:59:59.000Z");
    }
}
