//! Ministry plate builder (`VTG6_VTG7`, `VTG6_VTG7_TRL`).

use crate::config::DocGenConfig;
use crate::documents::adapter::{numeric_text, CategoryFields, VehicleAdapter};
use crate::documents::axles::project_axles;
use crate::documents::metadata::{derive_metadata, insert_opt, issue_timestamp, MetadataInput};
use crate::model::document::{DocumentModel, DocumentPayload};
use crate::model::payload::{MinistryPlate, MinistryPlateDocument, Reissue};
use crate::model::request::{DocumentKind, PlateDetails};
use crate::model::tech_record::TechRecord;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Build a plate document model.
///
/// `date-of-issue` is the plate issue date, or `now` when the request
/// carries none.
pub fn build_plate(
    kind: DocumentKind,
    record: &TechRecord,
    plate: &PlateDetails,
    recipient_email: Option<&str>,
    config: &DocGenConfig,
    now: DateTime<Utc>,
) -> DocumentModel {
    let vehicle = VehicleAdapter::new(record);

    if plate.plate_serial_number.is_none() {
        warn!("Plate request has no plate serial number; filename segment is empty");
    }
    let filename = format!(
        "plate_{}",
        plate.plate_serial_number.as_deref().unwrap_or_default()
    );
    let watermark = config.watermark();

    let payload = MinistryPlateDocument {
        plates_data: plate_data(&vehicle, plate),
        reissue: Reissue {
            reason: plate.plate_reason_for_issue,
        },
        watermark: watermark.to_string(),
    };

    let issued_now = issue_timestamp(now);
    let mut metadata = derive_metadata(
        MetadataInput {
            kind,
            filename: &filename,
            recipient_email,
            date_of_issue: plate.plate_issue_date.as_deref().unwrap_or(&issued_now),
        },
        config,
    );
    insert_opt(&mut metadata, "vrm", vehicle.registration_identifier());

    debug!(
        "Mapped {} for {} vehicle: {} (watermark {:?})",
        kind,
        vehicle.vehicle_type().as_str(),
        filename,
        watermark
    );

    DocumentModel {
        kind,
        filename,
        payload: DocumentPayload::MinistryPlate(payload),
        metadata,
    }
}

/// `PLATES_DATA` for the vehicle. Light goods vehicles get an empty object.
fn plate_data(vehicle: &VehicleAdapter<'_>, plate: &PlateDetails) -> MinistryPlate {
    let r = vehicle.record();
    let mut data = match vehicle.category_fields() {
        CategoryFields::Lgv => return MinistryPlate::default(),
        CategoryFields::Hgv(hgv) => MinistryPlate {
            front_vehicle_to_5th_wheel_coupling_min: hgv.front_vehicle_to_5th_wheel_coupling_min,
            front_vehicle_to_5th_wheel_coupling_max: hgv.front_vehicle_to_5th_wheel_coupling_max,
            speed_limiter_mrk: hgv.speed_limiter_mrk,
            train_gb_weight: hgv.train_gb_weight,
            train_eec_weight: hgv.train_eec_weight,
            train_design_weight: hgv.train_design_weight,
            max_train_gb_weight: hgv.max_train_gb_weight,
            max_train_eec_weight: hgv.max_train_eec_weight,
            ..MinistryPlate::default()
        },
        CategoryFields::Trl(trl) => MinistryPlate {
            max_load_on_coupling: trl.max_load_on_coupling,
            coupling_center_to_rear_trl_max: trl.coupling_center_to_rear_trl_max,
            coupling_center_to_rear_trl_min: trl.coupling_center_to_rear_trl_min,
            ..MinistryPlate::default()
        },
    };

    data.plate_serial_number = plate.plate_serial_number.clone();
    data.dtp_number = r.dtp_number.clone();
    data.primary_vrm = vehicle.registration_identifier().map(str::to_string);
    data.vin = r.vin.clone();
    data.variant_number = r.variant_number.clone();
    data.approval_type_number = r.approval_type_number.clone();
    data.function_code = vehicle.function_code();
    data.make = r.make.clone();
    data.model = r.model.clone();
    data.regn_date = r.regn_date.clone();
    data.manufacture_year = numeric_text(r.manufacture_year);
    data.gross_gb_weight = numeric_text(r.gross_gb_weight);
    data.gross_eec_weight = vehicle.gated_eec(r.gross_eec_weight);
    data.gross_design_weight = numeric_text(r.gross_design_weight);
    data.dimension_length = numeric_text(r.dimension_length);
    data.dimension_width = numeric_text(r.dimension_width);
    data.plate_issue_date = plate.plate_issue_date.clone();
    data.tyre_use_code = r.tyre_use_code.clone();
    data.axles = Some(project_axles(vehicle));
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::tests::{axle, hgv_record, lgv_record, plate_details, trl_record};
    use crate::model::request::ReasonForIssue;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 8, 15, 0).unwrap()
    }

    fn build(record: &TechRecord) -> (MinistryPlateDocument, DocumentModel) {
        let config = DocGenConfig::builder()
            .document_link_url("https://docs.example.com")
            .build()
            .unwrap();
        let model = build_plate(
            DocumentKind::MinistryPlate,
            record,
            &plate_details(),
            Some("customer@example.com"),
            &config,
            now(),
        );
        match &model.payload {
            DocumentPayload::MinistryPlate(doc) => (doc.clone(), model),
            other => panic!("expected plate payload, got {other:?}"),
        }
    }

    #[test]
    fn filename_and_metadata() {
        let (_, model) = build(&hgv_record());
        assert_eq!(model.filename, "plate_12345");
        assert_eq!(model.metadata["date-of-issue"], "2024-01-01");
        assert_eq!(model.metadata["document-type"], "VTG6_VTG7");
        assert_eq!(model.metadata["vrm"], "AB12CDE");
        assert_eq!(
            model.metadata["link-to-document"],
            "https://docs.example.com/plate_12345"
        );
    }

    #[test]
    fn missing_issue_date_falls_back_to_construction_time() {
        let mut plate = plate_details();
        plate.plate_issue_date = None;
        let model = build_plate(
            DocumentKind::MinistryPlate,
            &hgv_record(),
            &plate,
            None,
            &DocGenConfig::default(),
            now(),
        );
        assert_eq!(model.metadata["date-of-issue"], "2024-06-30T08:15:00.000Z");
    }

    #[test]
    fn hgv_plate_has_hgv_only_fields() {
        let (doc, _) = build(&hgv_record());
        let data = doc.plates_data;
        assert_eq!(data.primary_vrm.as_deref(), Some("AB12CDE"));
        assert_eq!(data.train_gb_weight.as_deref(), Some("44000"));
        assert_eq!(data.train_eec_weight.as_deref(), Some("44100"));
        assert_eq!(data.gross_eec_weight.as_deref(), Some("26100"));
        assert_eq!(data.front_vehicle_to_5th_wheel_coupling_min.as_deref(), Some("1200"));
        assert_eq!(data.speed_limiter_mrk.as_deref(), Some("Yes"));
        assert_eq!(data.function_code.as_deref(), Some("ARTIC R"));
        assert_eq!(data.max_load_on_coupling, None);
        assert_eq!(data.coupling_center_to_rear_trl_max, None);
        assert_eq!(doc.reissue.reason, Some(ReasonForIssue::Replacement));
        assert_eq!(doc.watermark, "NOT VALID");
    }

    #[test]
    fn trl_plate_has_trl_only_fields() {
        let (doc, model) = build(&trl_record());
        let data = doc.plates_data;
        assert_eq!(data.primary_vrm.as_deref(), Some("C123456"));
        assert_eq!(data.max_load_on_coupling.as_deref(), Some("1000"));
        assert_eq!(data.coupling_center_to_rear_trl_max.as_deref(), Some("9000"));
        assert_eq!(data.train_gb_weight, None);
        assert_eq!(data.speed_limiter_mrk, None);
        assert_eq!(data.front_vehicle_to_5th_wheel_coupling_min, None);
        assert_eq!(data.function_code.as_deref(), Some("R"));
        assert_eq!(model.metadata["vrm"], "C123456");
    }

    #[test]
    fn trl_over_coupling_limit_has_no_eec_weights() {
        let mut trl = trl_record();
        trl.coupling_center_to_rear_axle_max = Some(12_500.0);
        trl.axles = Some(vec![axle(1, 9000)]);
        let (doc, _) = build(&trl);
        let data = doc.plates_data;
        assert_eq!(data.gross_eec_weight, None);
        assert_eq!(data.gross_gb_weight.as_deref(), Some("18000"));
        let axles = data.axles.unwrap();
        assert_eq!(axles.axle1.weights.unwrap().eec_weight, None);
    }

    #[test]
    fn lgv_plate_data_is_empty_object() {
        let (doc, model) = build(&lgv_record());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["PLATES_DATA"], json!({}));
        assert!(!model.metadata.contains_key("vrm"));
        assert_eq!(model.filename, "plate_12345");
    }

    #[test]
    fn absent_numbers_stay_absent() {
        let mut hgv = hgv_record();
        hgv.dimension_length = None;
        hgv.manufacture_year = None;
        let (doc, _) = build(&hgv);
        let value = serde_json::to_value(&doc.plates_data).unwrap();
        assert!(value.get("dimensionLength").is_none());
        assert!(value.get("manufactureYear").is_none());
    }

    #[test]
    fn missing_serial_number_gives_empty_segment() {
        let config = DocGenConfig::default();
        let mut plate = plate_details();
        plate.plate_serial_number = None;
        let model = build_plate(
            DocumentKind::MinistryPlateTrl,
            &trl_record(),
            &plate,
            None,
            &config,
            now(),
        );
        assert_eq!(model.filename, "plate_");
        assert_eq!(model.metadata["link-to-document"], "/plate_");
        assert_eq!(model.metadata["document-type"], "VTG6_VTG7_TRL");
    }

    #[test]
    fn five_axle_hgv_keeps_first_four_by_number() {
        let mut hgv = hgv_record();
        hgv.axles = Some(vec![
            axle(5, 5000),
            axle(2, 2000),
            axle(4, 4000),
            axle(1, 1000),
            axle(3, 3000),
        ]);
        let (doc, _) = build(&hgv);
        let axles = doc.plates_data.axles.unwrap();
        let fourth = axles.axle4.weights.as_ref().unwrap();
        assert_eq!(fourth.gb_weight.as_deref(), Some("4000"));
        assert_eq!(fourth.eec_weight.as_deref(), Some("4400"));

        let json = serde_json::to_string(&axles).unwrap();
        assert!(!json.contains("5000"));
    }
}
