//! Uniform read surface over a technical record.
//!
//! Several attributes mean different things (or nothing) depending on the
//! vehicle category. [`VehicleAdapter`] resolves those differences once so
//! builders never branch on [`VehicleType`] themselves.
//!
//! Numeric attributes are exposed as their decimal string only when present.
//! An absent attribute stays absent; it never becomes `"0"`.

use crate::model::tech_record::{TechRecord, VehicleConfiguration, VehicleType};

/// Trailers only carry EEC weights when the coupling-centre-to-rear-axle
/// distance is within this limit (millimetres).
pub const TRL_EEC_WEIGHT_LIMIT: f64 = 12_000.0;

/// Format an optional number as its canonical decimal string.
///
/// Integral values print without a fraction (`7500.0` → `"7500"`), others
/// keep their shortest decimal form (`7.5` → `"7.5"`).
pub fn numeric_text(value: Option<f64>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// Attributes that only exist for one vehicle category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFields {
    Hgv(HgvFields),
    Trl(TrlFields),
    Lgv,
}

/// Heavy goods vehicle only attributes, already rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HgvFields {
    pub front_vehicle_to_5th_wheel_coupling_min: Option<String>,
    pub front_vehicle_to_5th_wheel_coupling_max: Option<String>,
    pub speed_limiter_mrk: Option<String>,
    pub train_gb_weight: Option<String>,
    pub train_eec_weight: Option<String>,
    pub train_design_weight: Option<String>,
    pub max_train_gb_weight: Option<String>,
    pub max_train_eec_weight: Option<String>,
}

/// Trailer only attributes, already rendered as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrlFields {
    pub max_load_on_coupling: Option<String>,
    pub coupling_center_to_rear_trl_max: Option<String>,
    pub coupling_center_to_rear_trl_min: Option<String>,
}

/// Borrowing view over a [`TechRecord`] with category-aware getters.
#[derive(Debug, Clone, Copy)]
pub struct VehicleAdapter<'a> {
    record: &'a TechRecord,
}

impl<'a> VehicleAdapter<'a> {
    pub fn new(record: &'a TechRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &'a TechRecord {
        self.record
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.record.vehicle_type
    }

    /// Primary VRM for heavy goods vehicles, trailer id for trailers,
    /// nothing for light goods vehicles.
    pub fn registration_identifier(&self) -> Option<&'a str> {
        match self.record.vehicle_type {
            VehicleType::Hgv => self.record.primary_vrm.as_deref(),
            VehicleType::Trl => self.record.trailer_id.as_deref(),
            VehicleType::Lgv => None,
        }
    }

    /// Whether EEC weights may be printed for this vehicle.
    ///
    /// Always for HGVs; for trailers only when the coupling distance is
    /// recorded and within [`TRL_EEC_WEIGHT_LIMIT`].
    pub fn eec_weights_allowed(&self) -> bool {
        match self.record.vehicle_type {
            VehicleType::Hgv => true,
            VehicleType::Trl => self
                .record
                .coupling_center_to_rear_axle_max
                .is_some_and(|d| d <= TRL_EEC_WEIGHT_LIMIT),
            VehicleType::Lgv => false,
        }
    }

    /// Plate function code.
    ///
    /// | Category | Configuration | Road friendly | Code |
    /// |----------|---------------|---------------|------|
    /// | trl | any | yes | `R` |
    /// | hgv | articulated | no / yes | `ARTIC` / `ARTIC R` |
    /// | hgv | rigid | no / yes | `RIGID` / `RIGID R` |
    ///
    /// Anything else, including an HGV with another configuration, has no code.
    pub fn function_code(&self) -> Option<String> {
        let road_friendly = self.record.road_friendly.unwrap_or(false);
        match self.record.vehicle_type {
            VehicleType::Trl if road_friendly => Some("R".to_string()),
            VehicleType::Hgv => {
                let base = match self.record.vehicle_configuration {
                    Some(VehicleConfiguration::Articulated) => "ARTIC",
                    Some(VehicleConfiguration::Rigid) => "RIGID",
                    _ => return None,
                };
                Some(if road_friendly {
                    format!("{base} R")
                } else {
                    base.to_string()
                })
            }
            _ => None,
        }
    }

    /// `"Yes"` / `"No"` when the speed limiter marker is recorded. An
    /// unrecorded marker stays absent rather than printing `"No"`.
    pub fn speed_limiter_mrk(&self) -> Option<String> {
        self.record
            .speed_limiter_mrk
            .map(|fitted| if fitted { "Yes" } else { "No" }.to_string())
    }

    /// Make as printed on ADR certificates; light goods vehicles print blank.
    pub fn adr_make(&self) -> Option<String> {
        match self.record.vehicle_type {
            VehicleType::Lgv => Some(String::new()),
            _ => self.record.make.clone(),
        }
    }

    /// EEC value gated by [`eec_weights_allowed`](Self::eec_weights_allowed).
    pub fn gated_eec(&self, value: Option<f64>) -> Option<String> {
        if self.eec_weights_allowed() {
            numeric_text(value)
        } else {
            None
        }
    }

    /// Category-only attribute group.
    pub fn category_fields(&self) -> CategoryFields {
        match self.record.vehicle_type {
            VehicleType::Hgv => CategoryFields::Hgv(self.hgv_fields()),
            VehicleType::Trl => CategoryFields::Trl(self.trl_fields()),
            VehicleType::Lgv => CategoryFields::Lgv,
        }
    }

    fn hgv_fields(&self) -> HgvFields {
        let r = self.record;
        HgvFields {
            front_vehicle_to_5th_wheel_coupling_min: numeric_text(
                r.front_vehicle_to_5th_wheel_coupling_min,
            ),
            front_vehicle_to_5th_wheel_coupling_max: numeric_text(
                r.front_vehicle_to_5th_wheel_coupling_max,
            ),
            speed_limiter_mrk: self.speed_limiter_mrk(),
            train_gb_weight: numeric_text(r.train_gb_weight),
            train_eec_weight: self.gated_eec(r.train_eec_weight),
            train_design_weight: numeric_text(r.train_design_weight),
            max_train_gb_weight: numeric_text(r.max_train_gb_weight),
            max_train_eec_weight: self.gated_eec(r.max_train_eec_weight),
        }
    }

    fn trl_fields(&self) -> TrlFields {
        let r = self.record;
        TrlFields {
            max_load_on_coupling: numeric_text(r.max_load_on_coupling),
            coupling_center_to_rear_trl_max: numeric_text(r.coupling_center_to_rear_trl_max),
            coupling_center_to_rear_trl_min: numeric_text(r.coupling_center_to_rear_trl_min),
        }
    }
}
