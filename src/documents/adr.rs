//! ADR pass certificate builder (`ADR_PASS_CERTIFICATE`).

use crate::config::DocGenConfig;
use crate::documents::adapter::{numeric_text, VehicleAdapter};
use crate::documents::metadata::{derive_metadata, insert_opt, issue_timestamp, MetadataInput};
use crate::model::document::{DocumentModel, DocumentPayload};
use crate::model::payload::{
    AdrApplicantDetails, AdrCertificateData, AdrPassCertificateDocument, TankStatement,
};
use crate::model::request::{AdrCertificateDetails, AdrCertificateType, DocumentKind};
use crate::model::tech_record::{AdrDetails, CompatibilityGroupJ, TechRecord};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Certificate type code stored with every ADR pass certificate.
pub const ADR_CERT_TYPE: &str = "ADR01C";
/// Test type name stored with every ADR pass certificate.
pub const ADR_TEST_TYPE_NAME: &str = "ADR";

/// Build an ADR pass certificate document model issued at `now`.
pub fn build_adr_certificate(
    record: &TechRecord,
    certificate: &AdrCertificateDetails,
    recipient_email: Option<&str>,
    config: &DocGenConfig,
    now: DateTime<Utc>,
) -> DocumentModel {
    let kind = DocumentKind::AdrPassCertificate;
    let vehicle = VehicleAdapter::new(record);

    if record.system_number.is_none() || certificate.generated_timestamp.is_none() {
        warn!(
            "ADR certificate request is missing systemNumber or generatedTimestamp; \
             filename has empty segments"
        );
    }
    let filename = format!(
        "adr_pass_{}_{}",
        record.system_number.as_deref().unwrap_or_default(),
        certificate.generated_timestamp.as_deref().unwrap_or_default()
    );
    let watermark = config.watermark();
    let adr = &record.adr;

    let adr_data = AdrCertificateData {
        vin: record.vin.clone(),
        make: vehicle.adr_make(),
        vrm: vehicle.registration_identifier().map(str::to_string),
        applicant_details: AdrApplicantDetails {
            name: adr.applicant_name.clone(),
            address1: adr.applicant_street.clone(),
            address2: adr.applicant_city.clone(),
            post_town: adr.applicant_town.clone(),
            post_code: adr.applicant_postcode.clone(),
        },
        adr_vehicle_type: adr.vehicle_type.clone(),
        permitted_dangerous_goods: adr.permitted_dangerous_goods.clone(),
        compatibility_group_j: adr.compatibility_group_j == Some(CompatibilityGroupJ::I),
        brake_endurance: adr.brake_endurance,
        weight: numeric_text(adr.weight),
        tank_manufacturer: adr.tank_manufacturer.clone(),
        tc2_init_approval_no: adr.tc2_intermediate_approval_no.clone(),
        tank_manufacture_serial_no: adr.tank_manufacturer_serial_no.clone(),
        year_of_manufacture: numeric_text(adr.tank_year_of_manufacture),
        tank_code: adr.tank_code.clone(),
        special_provisions: adr.special_provisions.clone(),
        tank_statement: TankStatement {
            substances_permitted: adr.substances_permitted.clone(),
            statements: adr.statement.clone(),
            product_list: format_product_list(adr),
        },
        notes: adr.certificate_notes.clone(),
        replacement: certificate.certificate_type == Some(AdrCertificateType::Replacement),
    };

    let date_of_issue = issue_timestamp(now);
    let mut metadata = derive_metadata(
        MetadataInput {
            kind,
            filename: &filename,
            recipient_email,
            date_of_issue: &date_of_issue,
        },
        config,
    );
    insert_opt(&mut metadata, "vin", record.vin.as_deref());
    insert_opt(&mut metadata, "vrm", vehicle.registration_identifier());
    metadata.insert("cert-type".into(), ADR_CERT_TYPE.into());
    metadata.insert("cert-index".into(), "1".into());
    metadata.insert("total-certs".into(), total_certs(record).to_string());
    metadata.insert("test-type-name".into(), ADR_TEST_TYPE_NAME.into());
    insert_opt(
        &mut metadata,
        "test-type-result",
        certificate
            .certificate_type
            .map(|t| t.as_str().to_lowercase()),
    );

    debug!("Mapped {} {} (watermark {:?})", kind, filename, watermark);

    DocumentModel {
        kind,
        filename,
        payload: DocumentPayload::AdrPassCertificate(AdrPassCertificateDocument {
            adr_data,
            watermark: watermark.to_string(),
        }),
        metadata,
    }
}

/// Tank product list as printed on the certificate.
///
/// Every UN number followed by a space, then the reference number followed
/// by a space. `None` when neither is recorded; an empty UN list counts as
/// not recorded.
pub fn format_product_list(adr: &AdrDetails) -> Option<String> {
    let un_numbers = adr
        .product_list_un_no
        .as_deref()
        .filter(|list| !list.is_empty());
    if un_numbers.is_none() && adr.product_list_ref_no.is_none() {
        return None;
    }
    let mut list = String::new();
    for un_no in un_numbers.into_iter().flatten() {
        list.push_str(un_no);
        list.push(' ');
    }
    if let Some(ref_no) = &adr.product_list_ref_no {
        list.push_str(ref_no);
        list.push(' ');
    }
    Some(list)
}

/// Number of previously recorded pass certificates, at least one.
fn total_certs(record: &TechRecord) -> usize {
    record
        .adr_pass_certificate_details
        .as_ref()
        .map_or(1, Vec::len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::tests::{adr_details, hgv_record, lgv_record, trl_record};
    use crate::model::tech_record::VehicleType;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    fn build(record: &TechRecord, certificate: &AdrCertificateDetails) -> (AdrCertificateData, DocumentModel) {
        let config = DocGenConfig::builder()
            .environment("prod")
            .document_link_url("https://docs.example.com")
            .build()
            .unwrap();
        let model = build_adr_certificate(
            record,
            certificate,
            Some("customer@example.com"),
            &config,
            now(),
        );
        match &model.payload {
            DocumentPayload::AdrPassCertificate(doc) => {
                assert_eq!(doc.watermark, "");
                (doc.adr_data.clone(), model)
            }
            other => panic!("expected ADR payload, got {other:?}"),
        }
    }

    #[test]
    fn filename_embeds_system_number_and_timestamp() {
        let (_, model) = build(&hgv_record(), &adr_details());
        assert_eq!(model.filename, "adr_pass_1234567_2024-05-01T09:00:00.000Z");
        assert_eq!(
            model.metadata["link-to-document"],
            "https://docs.example.com/adr_pass_1234567_2024-05-01T09:00:00.000Z"
        );
    }

    #[test]
    fn metadata_entries() {
        let (_, model) = build(&hgv_record(), &adr_details());
        let m = &model.metadata;
        assert_eq!(m["document-type"], "ADR_PASS_CERTIFICATE");
        assert_eq!(m["date-of-issue"], "2024-05-01T09:30:00.000Z");
        assert_eq!(m["email"], "customer@example.com");
        assert_eq!(m["vin"], "ABCDEFGH123456789");
        assert_eq!(m["vrm"], "AB12CDE");
        assert_eq!(m["cert-type"], "ADR01C");
        assert_eq!(m["cert-index"], "1");
        assert_eq!(m["total-certs"], "1");
        assert_eq!(m["test-type-name"], "ADR");
        assert_eq!(m["test-type-result"], "pass");
    }

    #[test]
    fn total_certs_counts_recorded_certificates() {
        let mut record = hgv_record();
        record.adr_pass_certificate_details =
            Some(vec![serde_json::json!({}), serde_json::json!({})]);
        let (_, model) = build(&record, &adr_details());
        assert_eq!(model.metadata["total-certs"], "2");
    }

    #[test]
    fn vrm_by_category() {
        let (data, _) = build(&trl_record(), &adr_details());
        assert_eq!(data.vrm.as_deref(), Some("C123456"));

        let (data, model) = build(&lgv_record(), &adr_details());
        assert_eq!(data.vrm, None);
        assert!(!model.metadata.contains_key("vrm"));
    }

    #[test]
    fn make_blank_for_lgv() {
        let mut lgv = lgv_record();
        lgv.make = Some("Ford".into());
        assert_eq!(lgv.vehicle_type, VehicleType::Lgv);
        let (data, _) = build(&lgv, &adr_details());
        assert_eq!(data.make.as_deref(), Some(""));

        let (data, _) = build(&hgv_record(), &adr_details());
        assert_eq!(data.make.as_deref(), Some("DAF"));
    }

    #[test]
    fn applicant_details_mapping() {
        let (data, _) = build(&hgv_record(), &adr_details());
        let a = data.applicant_details;
        assert_eq!(a.name.as_deref(), Some("Haulage Ltd"));
        assert_eq!(a.address1.as_deref(), Some("1 Depot Road"));
        assert_eq!(a.address2.as_deref(), Some("Bristol"));
        assert_eq!(a.post_town.as_deref(), Some("Filton"));
        assert_eq!(a.post_code.as_deref(), Some("BS1 1AA"));
    }

    #[test]
    fn replacement_and_group_j() {
        let mut record = hgv_record();
        record.adr.compatibility_group_j = Some(CompatibilityGroupJ::I);
        let mut cert = adr_details();
        cert.certificate_type = Some(AdrCertificateType::Replacement);
        let (data, model) = build(&record, &cert);
        assert!(data.replacement);
        assert!(data.compatibility_group_j);
        assert_eq!(model.metadata["test-type-result"], "replacement");

        record.adr.compatibility_group_j = Some(CompatibilityGroupJ::E);
        cert.certificate_type = Some(AdrCertificateType::Pass);
        let (data, _) = build(&record, &cert);
        assert!(!data.replacement);
        assert!(!data.compatibility_group_j);
    }

    #[test]
    fn numbers_stringified_only_when_present() {
        let mut record = hgv_record();
        record.adr.weight = Some(1000.0);
        record.adr.tank_year_of_manufacture = Some(2020.0);
        let (data, _) = build(&record, &adr_details());
        assert_eq!(data.weight.as_deref(), Some("1000"));
        assert_eq!(data.year_of_manufacture.as_deref(), Some("2020"));

        record.adr.weight = None;
        record.adr.tank_year_of_manufacture = None;
        let (data, _) = build(&record, &adr_details());
        assert_eq!(data.weight, None);
        assert_eq!(data.year_of_manufacture, None);
    }

    #[test]
    fn product_list_formats() {
        let mut adr = AdrDetails::default();
        assert_eq!(format_product_list(&adr), None);

        adr.product_list_un_no = Some(vec!["A".into(), "B".into()]);
        assert_eq!(format_product_list(&adr).as_deref(), Some("A B "));

        adr.product_list_ref_no = Some("C".into());
        assert_eq!(format_product_list(&adr).as_deref(), Some("A B C "));

        adr.product_list_un_no = None;
        assert_eq!(format_product_list(&adr).as_deref(), Some("C "));
    }

    #[test]
    fn empty_un_list_without_reference_is_absent() {
        let mut adr = AdrDetails {
            product_list_un_no: Some(vec![]),
            ..AdrDetails::default()
        };
        assert_eq!(format_product_list(&adr), None);

        adr.product_list_ref_no = Some("REF-9".into());
        assert_eq!(format_product_list(&adr).as_deref(), Some("REF-9 "));
    }

    #[test]
    fn product_list_reaches_tank_statement() {
        let mut record = trl_record();
        record.adr.product_list_un_no = Some(vec!["1203".into()]);
        let (data, _) = build(&record, &adr_details());
        assert_eq!(data.tank_statement.product_list.as_deref(), Some("1203 "));
    }
}
