//! Renderer-ready payloads, one per document kind.
//!
//! Field names match the renderer templates exactly, which is why several
//! structs mix casing conventions (`PLATES_DATA`, `Watermark`, `plateSerialNumber`).
//! Every optional field is skipped when absent so the renderer never sees a
//! fabricated zero or empty string.

use crate::model::request::ReasonForIssue;
use serde::{Deserialize, Serialize};

// ── Ministry plate ───────────────────────────────────────────────────────

/// Weights carried on one plate axle slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxleWeights {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gb_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub eec_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub design_weight: Option<String>,
}

/// Tyres carried on one plate axle slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxleTyres {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tyre_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ply_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fitment_code: Option<String>,
}

/// One positional axle slot. An unused slot serialises as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateAxle {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weights: Option<AxleWeights>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tyres: Option<AxleTyres>,
}

impl PlateAxle {
    pub fn is_empty(&self) -> bool {
        self.weights.is_none() && self.tyres.is_none()
    }
}

/// The four axle slots printed on a plate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateAxles {
    pub axle1: PlateAxle,
    pub axle2: PlateAxle,
    pub axle3: PlateAxle,
    pub axle4: PlateAxle,
}

impl PlateAxles {
    /// Slots in positional order.
    pub fn slots(&self) -> [&PlateAxle; 4] {
        [&self.axle1, &self.axle2, &self.axle3, &self.axle4]
    }
}

/// Data printed on a ministry plate.
///
/// Light goods vehicles get `MinistryPlate::default()`, which serialises as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinistryPlate {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub plate_serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dtp_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub primary_vrm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub variant_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub approval_type_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub speed_limiter_mrk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub function_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub regn_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub manufacture_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gross_gb_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gross_eec_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gross_design_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub train_gb_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub train_eec_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub train_design_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_train_gb_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_train_eec_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_load_on_coupling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dimension_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dimension_width: Option<String>,
    #[serde(
        rename = "frontVehicleTo5thWheelCouplingMin",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub front_vehicle_to_5th_wheel_coupling_min: Option<String>,
    #[serde(
        rename = "frontVehicleTo5thWheelCouplingMax",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub front_vehicle_to_5th_wheel_coupling_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub coupling_center_to_rear_trl_max: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub coupling_center_to_rear_trl_min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub plate_issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tyre_use_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub axles: Option<PlateAxles>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reissue {
    #[serde(rename = "Reason", skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<ReasonForIssue>,
}

/// Payload sent to the renderer for plate documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinistryPlateDocument {
    #[serde(rename = "PLATES_DATA")]
    pub plates_data: MinistryPlate,
    #[serde(rename = "Reissue")]
    pub reissue: Reissue,
    #[serde(rename = "Watermark")]
    pub watermark: String,
}

// ── ADR pass certificate ─────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdrApplicantDetails {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post_town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TankStatement {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub substances_permitted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub statements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub product_list: Option<String>,
}

/// Data printed on an ADR pass certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdrCertificateData {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vrm: Option<String>,
    pub applicant_details: AdrApplicantDetails,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub adr_vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub permitted_dangerous_goods: Option<Vec<String>>,
    pub compatibility_group_j: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub brake_endurance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tank_manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tc2_init_approval_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tank_manufacture_serial_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub year_of_manufacture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tank_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub special_provisions: Option<String>,
    pub tank_statement: TankStatement,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
    pub replacement: bool,
}

/// Payload sent to the renderer for ADR pass certificates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdrPassCertificateDocument {
    #[serde(rename = "ADR_DATA")]
    pub adr_data: AdrCertificateData,
    #[serde(rename = "Watermark")]
    pub watermark: String,
}

// ── Trailer into service letter ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetails {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post_town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub address3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub telephone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email_address: Option<String>,
}

/// Payload sent to the renderer for trailer into service letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailerIntoServiceLetter {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trailer_id: Option<String>,
    pub applicant_details: ApplicantDetails,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub letter_date_requested: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub approval_type_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub paragraph_id: Option<u8>,
    #[serde(rename = "Watermark")]
    pub watermark: String,
}
