//! Surface-area calculation results.

use crate::domain::EquipmentShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The result of a surface-area calculation for one classified shape.
///
/// All internal values are in millimeters squared; the cm² and m² fields
/// are fixed-division conveniences attached for display. Results are
/// immutable and terminal: a new image run produces a new result, never a
/// mutation of a prior one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceAreaResult {
    /// The shape the formula was applied for.
    pub shape: EquipmentShape,
    /// The area of the side wall, excluding caps.
    pub lateral_area_mm2: f64,
    /// The summed area of whichever flat caps the shape closes
    /// (zero, one, or two terms depending on the shape).
    pub cap_area_mm2: f64,
    /// Lateral plus cap area.
    pub total_area_mm2: f64,
    /// Total area in square centimeters (mm² / 100).
    pub total_area_cm2: f64,
    /// Total area in square meters (mm² / 1e6).
    pub total_area_m2: f64,
    /// The semantic role each input value was assigned, e.g.
    /// `"top_diameter_mm" -> 250.0`.
    pub dimensions_used: BTreeMap<String, f64>,
}

impl SurfaceAreaResult {
    /// Assembles a result from lateral and cap areas, deriving the totals
    /// and unit conversions.
    pub fn new(
        shape: EquipmentShape,
        lateral_area_mm2: f64,
        cap_area_mm2: f64,
        dimensions_used: BTreeMap<String, f64>,
    ) -> Self {
        let total_area_mm2 = lateral_area_mm2 + cap_area_mm2;
        Self {
            shape,
            lateral_area_mm2,
            cap_area_mm2,
            total_area_mm2,
            total_area_cm2: total_area_mm2 / 100.0,
            total_area_m2: total_area_mm2 / 1_000_000.0,
            dimensions_used,
        }
    }

    /// Returns true if the computed areas are not usable: non-finite
    /// (degenerate slant input) or non-positive (negative or zero input
    /// dimensions).
    ///
    /// Anomalous results are surfaced as warnings with the numeric values
    /// intact so they stay inspectable; they are never silently dropped.
    pub fn is_anomalous(&self) -> bool {
        !self.total_area_mm2.is_finite()
            || !self.lateral_area_mm2.is_finite()
            || self.total_area_mm2 <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_is_sum_and_conversions() {
        let result = SurfaceAreaResult::new(
            EquipmentShape::Cylinder,
            150_000.0,
            50_000.0,
            BTreeMap::new(),
        );
        assert_eq!(result.total_area_mm2, 200_000.0);
        assert_eq!(result.total_area_cm2, 2_000.0);
        assert_eq!(result.total_area_m2, 0.2);
        assert!(!result.is_anomalous());
    }

    #[test]
    fn test_anomaly_detection() {
        let nan = SurfaceAreaResult::new(EquipmentShape::Frustum, f64::NAN, 10.0, BTreeMap::new());
        assert!(nan.is_anomalous());

        let negative =
            SurfaceAreaResult::new(EquipmentShape::Cylinder, -500.0, 0.0, BTreeMap::new());
        assert!(negative.is_anomalous());

        let zero = SurfaceAreaResult::new(EquipmentShape::Cylinder, 0.0, 0.0, BTreeMap::new());
        assert!(zero.is_anomalous());
    }
}
