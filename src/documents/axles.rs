//! Axle projection: an unordered axle list into the four plate slots.

use crate::documents::adapter::{numeric_text, VehicleAdapter};
use crate::model::payload::{AxleTyres, AxleWeights, PlateAxle, PlateAxles};
use crate::model::tech_record::TechRecordAxle;
use std::cmp::Ordering;

/// Number of axle slots printed on a plate.
pub const PLATE_AXLE_SLOTS: usize = 4;

/// Project the record's axles into exactly four positional slots.
///
/// Axles are stable-sorted by axle number (unnumbered axles last), so
/// duplicate numbers keep their input order. The first four populate
/// `axle1..axle4`; the rest are dropped. Unused slots stay empty.
pub fn project_axles(vehicle: &VehicleAdapter<'_>) -> PlateAxles {
    let axles = vehicle.record().axles.as_deref().unwrap_or_default();

    let mut sorted: Vec<&TechRecordAxle> = axles.iter().collect();
    sorted.sort_by(|a, b| match (a.axle_number, b.axle_number) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let mut slots = sorted
        .into_iter()
        .take(PLATE_AXLE_SLOTS)
        .map(|axle| project_axle(vehicle, axle));

    PlateAxles {
        axle1: slots.next().unwrap_or_default(),
        axle2: slots.next().unwrap_or_default(),
        axle3: slots.next().unwrap_or_default(),
        axle4: slots.next().unwrap_or_default(),
    }
}

fn project_axle(vehicle: &VehicleAdapter<'_>, axle: &TechRecordAxle) -> PlateAxle {
    PlateAxle {
        weights: Some(AxleWeights {
            gb_weight: numeric_text(axle.gb_weight),
            eec_weight: vehicle.gated_eec(axle.eec_weight),
            design_weight: numeric_text(axle.design_weight),
        }),
        tyres: Some(AxleTyres {
            tyre_size: axle.tyre_size.clone(),
            // load index, when recorded, replaces the ply rating
            ply_rating: numeric_text(axle.data_tr_axles).or_else(|| axle.ply_rating.clone()),
            fitment_code: axle.fitment_code.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::tests::{axle, hgv_record, trl_record};

    fn gb_weights(axles: &PlateAxles) -> Vec<Option<String>> {
        axles
            .slots()
            .iter()
            .map(|s| s.weights.as_ref().and_then(|w| w.gb_weight.clone()))
            .collect()
    }

    #[test]
    fn always_four_slots_with_empty_remainder() {
        let mut record = hgv_record();
        record.axles = Some(vec![axle(1, 7000), axle(2, 8000)]);
        let projected = project_axles(&VehicleAdapter::new(&record));

        assert!(!projected.axle1.is_empty());
        assert!(!projected.axle2.is_empty());
        assert!(projected.axle3.is_empty());
        assert!(projected.axle4.is_empty());
    }

    #[test]
    fn zero_axles_give_four_empty_slots() {
        let mut record = hgv_record();
        record.axles = None;
        let projected = project_axles(&VehicleAdapter::new(&record));
        assert!(projected.slots().iter().all(|s| s.is_empty()));

        record.axles = Some(vec![]);
        let projected = project_axles(&VehicleAdapter::new(&record));
        assert_eq!(projected, PlateAxles::default());
    }

    #[test]
    fn sorts_by_axle_number_and_drops_extras() {
        let mut record = hgv_record();
        record.axles = Some(vec![
            axle(5, 5000),
            axle(3, 3000),
            axle(1, 1000),
            axle(4, 4000),
            axle(2, 2000),
        ]);
        let projected = project_axles(&VehicleAdapter::new(&record));
        assert_eq!(
            gb_weights(&projected),
            vec![
                Some("1000".to_string()),
                Some("2000".to_string()),
                Some("3000".to_string()),
                Some("4000".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_axle_numbers_keep_input_order() {
        let mut record = hgv_record();
        record.axles = Some(vec![axle(2, 2100), axle(1, 1000), axle(2, 2200)]);
        let projected = project_axles(&VehicleAdapter::new(&record));
        assert_eq!(
            gb_weights(&projected),
            vec![
                Some("1000".to_string()),
                Some("2100".to_string()),
                Some("2200".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn unnumbered_axles_sort_last() {
        let mut record = hgv_record();
        let mut unnumbered = axle(0, 9000);
        unnumbered.axle_number = None;
        record.axles = Some(vec![unnumbered, axle(2, 2000), axle(1, 1000)]);
        let projected = project_axles(&VehicleAdapter::new(&record));
        assert_eq!(
            gb_weights(&projected)[2].as_deref(),
            Some("9000"),
        );
    }

    #[test]
    fn eec_weight_follows_gate() {
        let mut trl = trl_record();
        trl.axles = Some(vec![axle(1, 1000)]);

        trl.coupling_center_to_rear_axle_max = Some(13_000.0);
        let projected = project_axles(&VehicleAdapter::new(&trl));
        let weights = projected.axle1.weights.unwrap();
        assert_eq!(weights.eec_weight, None);
        assert_eq!(weights.gb_weight.as_deref(), Some("1000"));

        trl.coupling_center_to_rear_axle_max = Some(11_000.0);
        let projected = project_axles(&VehicleAdapter::new(&trl));
        assert_eq!(
            projected.axle1.weights.unwrap().eec_weight.as_deref(),
            Some("1100")
        );
    }

    #[test]
    fn load_index_preferred_over_ply_rating() {
        let mut record = trl_record();
        let mut a = axle(1, 1000);
        a.ply_rating = Some("16".into());
        a.data_tr_axles = Some(152.0);
        let mut b = axle(2, 1000);
        b.ply_rating = Some("18".into());
        record.axles = Some(vec![a, b]);

        let projected = project_axles(&VehicleAdapter::new(&record));
        assert_eq!(
            projected.axle1.tyres.unwrap().ply_rating.as_deref(),
            Some("152")
        );
        assert_eq!(
            projected.axle2.tyres.unwrap().ply_rating.as_deref(),
            Some("18")
        );
    }
}
