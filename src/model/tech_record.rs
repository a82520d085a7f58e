//! Vehicle technical record, as carried on the queue.
//!
//! The record arrives as the flattened technical-record JSON where every
//! attribute is a top-level `techRecord_*` key. Which keys are meaningful
//! depends on [`VehicleType`]; keys outside that subset are ignored rather
//! than validated. Unknown keys are dropped during deserialisation.

use serde::{Deserialize, Serialize};

/// Vehicle category. Decides which attribute subset is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    /// Heavy goods vehicle.
    Hgv,
    /// Trailer.
    Trl,
    /// Light goods vehicle.
    Lgv,
}

impl VehicleType {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Hgv => "hgv",
            VehicleType::Trl => "trl",
            VehicleType::Lgv => "lgv",
        }
    }
}

/// Body configuration. Only `rigid` and `articulated` influence documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleConfiguration {
    #[serde(rename = "rigid")]
    Rigid,
    #[serde(rename = "articulated")]
    Articulated,
    #[serde(rename = "centre axle drawbar")]
    CentreAxleDrawbar,
    #[serde(rename = "semi-car transporter")]
    SemiCarTransporter,
    #[serde(rename = "semi-trailer")]
    SemiTrailer,
    #[serde(rename = "low loader")]
    LowLoader,
    #[serde(rename = "drawbar")]
    Drawbar,
    #[serde(rename = "four-in-line")]
    FourInLine,
    #[serde(rename = "dolly")]
    Dolly,
    #[serde(rename = "full drawbar")]
    FullDrawbar,
    #[serde(other)]
    Other,
}

/// ADR compatibility group J marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompatibilityGroupJ {
    /// Group J included.
    I,
    /// Group J excluded.
    E,
}

/// One axle of a technical record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechRecordAxle {
    #[serde(rename = "axleNumber", default)]
    pub axle_number: Option<f64>,
    #[serde(rename = "weights_gbWeight", default)]
    pub gb_weight: Option<f64>,
    #[serde(rename = "weights_eecWeight", default)]
    pub eec_weight: Option<f64>,
    #[serde(rename = "weights_designWeight", default)]
    pub design_weight: Option<f64>,
    #[serde(rename = "tyres_tyreSize", default)]
    pub tyre_size: Option<String>,
    #[serde(rename = "tyres_plyRating", default)]
    pub ply_rating: Option<String>,
    #[serde(rename = "tyres_fitmentCode", default)]
    pub fitment_code: Option<String>,
    /// Load index recorded for trailer axles; preferred over ply rating.
    #[serde(rename = "tyres_dataTrAxles", default)]
    pub data_tr_axles: Option<f64>,
}

/// A vehicle technical record.
///
/// Every attribute except the category is optional: absent attributes stay
/// absent all the way to the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechRecord {
    // ── Identity ──────────────────────────────────────────────────────────
    #[serde(rename = "systemNumber", default)]
    pub system_number: Option<String>,
    #[serde(default)]
    pub vin: Option<String>,
    #[serde(rename = "primaryVrm", default)]
    pub primary_vrm: Option<String>,
    #[serde(rename = "trailerId", default)]
    pub trailer_id: Option<String>,
    #[serde(rename = "techRecord_vehicleType")]
    pub vehicle_type: VehicleType,

    // ── Descriptive ───────────────────────────────────────────────────────
    #[serde(rename = "techRecord_make", default)]
    pub make: Option<String>,
    #[serde(rename = "techRecord_model", default)]
    pub model: Option<String>,
    #[serde(rename = "techRecord_variantNumber", default)]
    pub variant_number: Option<String>,
    #[serde(rename = "techRecord_approvalTypeNumber", default)]
    pub approval_type_number: Option<String>,
    #[serde(rename = "techRecord_brakes_dtpNumber", default)]
    pub dtp_number: Option<String>,
    #[serde(rename = "techRecord_regnDate", default)]
    pub regn_date: Option<String>,
    #[serde(rename = "techRecord_manufactureYear", default)]
    pub manufacture_year: Option<f64>,
    #[serde(rename = "techRecord_vehicleConfiguration", default)]
    pub vehicle_configuration: Option<VehicleConfiguration>,
    #[serde(rename = "techRecord_roadFriendly", default)]
    pub road_friendly: Option<bool>,
    #[serde(rename = "techRecord_speedLimiterMrk", default)]
    pub speed_limiter_mrk: Option<bool>,
    #[serde(rename = "techRecord_tyreUseCode", default)]
    pub tyre_use_code: Option<String>,

    // ── Weights ───────────────────────────────────────────────────────────
    #[serde(rename = "techRecord_grossGbWeight", default)]
    pub gross_gb_weight: Option<f64>,
    #[serde(rename = "techRecord_grossEecWeight", default)]
    pub gross_eec_weight: Option<f64>,
    #[serde(rename = "techRecord_grossDesignWeight", default)]
    pub gross_design_weight: Option<f64>,
    #[serde(rename = "techRecord_trainGbWeight", default)]
    pub train_gb_weight: Option<f64>,
    #[serde(rename = "techRecord_trainEecWeight", default)]
    pub train_eec_weight: Option<f64>,
    #[serde(rename = "techRecord_trainDesignWeight", default)]
    pub train_design_weight: Option<f64>,
    #[serde(rename = "techRecord_maxTrainGbWeight", default)]
    pub max_train_gb_weight: Option<f64>,
    #[serde(rename = "techRecord_maxTrainEecWeight", default)]
    pub max_train_eec_weight: Option<f64>,
    #[serde(rename = "techRecord_maxLoadOnCoupling", default)]
    pub max_load_on_coupling: Option<f64>,

    // ── Dimensions & coupling ─────────────────────────────────────────────
    #[serde(rename = "techRecord_dimensions_length", default)]
    pub dimension_length: Option<f64>,
    #[serde(rename = "techRecord_dimensions_width", default)]
    pub dimension_width: Option<f64>,
    #[serde(rename = "techRecord_frontVehicleTo5thWheelCouplingMin", default)]
    pub front_vehicle_to_5th_wheel_coupling_min: Option<f64>,
    #[serde(rename = "techRecord_frontVehicleTo5thWheelCouplingMax", default)]
    pub front_vehicle_to_5th_wheel_coupling_max: Option<f64>,
    #[serde(rename = "techRecord_couplingCenterToRearTrlMin", default)]
    pub coupling_center_to_rear_trl_min: Option<f64>,
    #[serde(rename = "techRecord_couplingCenterToRearTrlMax", default)]
    pub coupling_center_to_rear_trl_max: Option<f64>,
    #[serde(rename = "techRecord_couplingCenterToRearAxleMax", default)]
    pub coupling_center_to_rear_axle_max: Option<f64>,

    #[serde(rename = "techRecord_axles", default)]
    pub axles: Option<Vec<TechRecordAxle>>,

    // ── Applicant (letters) ───────────────────────────────────────────────
    #[serde(rename = "techRecord_applicantDetails_name", default)]
    pub applicant_name: Option<String>,
    #[serde(rename = "techRecord_applicantDetails_address1", default)]
    pub applicant_address1: Option<String>,
    #[serde(rename = "techRecord_applicantDetails_address2", default)]
    pub applicant_address2: Option<String>,
    #[serde(rename = "techRecord_applicantDetails_address3", default)]
    pub applicant_address3: Option<String>,
    #[serde(rename = "techRecord_applicantDetails_postTown", default)]
    pub applicant_post_town: Option<String>,
    #[serde(rename = "techRecord_applicantDetails_postCode", default)]
    pub applicant_post_code: Option<String>,
    #[serde(rename = "techRecord_applicantDetails_telephoneNumber", default)]
    pub applicant_telephone_number: Option<String>,
    #[serde(rename = "techRecord_applicantDetails_emailAddress", default)]
    pub applicant_email_address: Option<String>,

    // ── ADR ───────────────────────────────────────────────────────────────
    #[serde(flatten)]
    pub adr: AdrDetails,

    /// Previously issued ADR pass certificates; only the count is used.
    #[serde(rename = "techRecord_adrPassCertificateDetails", default)]
    pub adr_pass_certificate_details: Option<Vec<serde_json::Value>>,
}

/// ADR (dangerous goods) attributes of a technical record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdrDetails {
    #[serde(rename = "techRecord_adrDetails_applicantDetails_name", default)]
    pub applicant_name: Option<String>,
    #[serde(rename = "techRecord_adrDetails_applicantDetails_street", default)]
    pub applicant_street: Option<String>,
    #[serde(rename = "techRecord_adrDetails_applicantDetails_city", default)]
    pub applicant_city: Option<String>,
    #[serde(rename = "techRecord_adrDetails_applicantDetails_town", default)]
    pub applicant_town: Option<String>,
    #[serde(rename = "techRecord_adrDetails_applicantDetails_postcode", default)]
    pub applicant_postcode: Option<String>,
    #[serde(rename = "techRecord_adrDetails_vehicleDetails_type", default)]
    pub vehicle_type: Option<String>,
    #[serde(rename = "techRecord_adrDetails_permittedDangerousGoods", default)]
    pub permitted_dangerous_goods: Option<Vec<String>>,
    #[serde(rename = "techRecord_adrDetails_compatibilityGroupJ", default)]
    pub compatibility_group_j: Option<CompatibilityGroupJ>,
    #[serde(rename = "techRecord_adrDetails_brakeEndurance", default)]
    pub brake_endurance: Option<bool>,
    #[serde(rename = "techRecord_adrDetails_weight", default)]
    pub weight: Option<f64>,
    #[serde(rename = "techRecord_adrDetails_adrCertificateNotes", default)]
    pub certificate_notes: Option<String>,
    #[serde(rename = "techRecord_adrDetails_tank_tankDetails_tankManufacturer", default)]
    pub tank_manufacturer: Option<String>,
    #[serde(rename = "techRecord_adrDetails_tank_tankDetails_tankManufacturerSerialNo", default)]
    pub tank_manufacturer_serial_no: Option<String>,
    #[serde(
        rename = "techRecord_adrDetails_tank_tankDetails_tc2Details_tc2IntermediateApprovalNo",
        default
    )]
    pub tc2_intermediate_approval_no: Option<String>,
    #[serde(rename = "techRecord_adrDetails_tank_tankDetails_yearOfManufacture", default)]
    pub tank_year_of_manufacture: Option<f64>,
    #[serde(rename = "techRecord_adrDetails_tank_tankDetails_tankCode", default)]
    pub tank_code: Option<String>,
    #[serde(rename = "techRecord_adrDetails_tank_tankDetails_specialProvisions", default)]
    pub special_provisions: Option<String>,
    #[serde(
        rename = "techRecord_adrDetails_tank_tankDetails_tankStatement_substancesPermitted",
        default
    )]
    pub substances_permitted: Option<String>,
    #[serde(rename = "techRecord_adrDetails_tank_tankDetails_tankStatement_statement", default)]
    pub statement: Option<String>,
    #[serde(
        rename = "techRecord_adrDetails_tank_tankDetails_tankStatement_productListUnNo",
        default
    )]
    pub product_list_un_no: Option<Vec<String>>,
    #[serde(
        rename = "techRecord_adrDetails_tank_tankDetails_tankStatement_productListRefNo",
        default
    )]
    pub product_list_ref_no: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialises_minimal_record() {
        let record: TechRecord =
            serde_json::from_value(json!({ "techRecord_vehicleType": "lgv" })).unwrap();
        assert_eq!(record.vehicle_type, VehicleType::Lgv);
        assert!(record.vin.is_none());
        assert!(record.axles.is_none());
        assert_eq!(record.adr, AdrDetails::default());
    }

    #[test]
    fn unknown_vehicle_type_is_rejected() {
        let result: Result<TechRecord, _> =
            serde_json::from_value(json!({ "techRecord_vehicleType": "psv" }));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_configuration_maps_to_other() {
        let record: TechRecord = serde_json::from_value(json!({
            "techRecord_vehicleType": "hgv",
            "techRecord_vehicleConfiguration": "space frame",
        }))
        .unwrap();
        assert_eq!(record.vehicle_configuration, Some(VehicleConfiguration::Other));
    }

    #[test]
    fn flattened_adr_fields_are_read() {
        let record: TechRecord = serde_json::from_value(json!({
            "techRecord_vehicleType": "trl",
            "techRecord_adrDetails_tank_tankDetails_tankCode": "L4BN",
            "techRecord_adrDetails_compatibilityGroupJ": "I",
            "techRecord_adrDetails_tank_tankDetails_tankStatement_productListUnNo": ["1203"],
        }))
        .unwrap();
        assert_eq!(record.adr.tank_code.as_deref(), Some("L4BN"));
        assert_eq!(record.adr.compatibility_group_j, Some(CompatibilityGroupJ::I));
        assert_eq!(record.adr.product_list_un_no, Some(vec!["1203".to_string()]));
    }

    #[test]
    fn axle_fields_are_read() {
        let axle: TechRecordAxle = serde_json::from_value(json!({
            "axleNumber": 2,
            "weights_gbWeight": 8000,
            "tyres_tyreSize": "295/80-22.5",
            "tyres_dataTrAxles": 152,
        }))
        .unwrap();
        assert_eq!(axle.axle_number, Some(2.0));
        assert_eq!(axle.gb_weight, Some(8000.0));
        assert_eq!(axle.data_tr_axles, Some(152.0));
        assert!(axle.eec_weight.is_none());
    }
}
