//! Closed-form surface-area formulas for the supported shapes.
//!
//! All inputs and outputs are in millimeters; unit conversions happen on
//! the [`SurfaceAreaResult`] itself. Formulas never validate their inputs:
//! a non-positive or degenerate dimension propagates into the result and
//! is caught downstream by [`SurfaceAreaResult::is_anomalous`], so a bad
//! image cannot crash a batch while the anomalous numbers stay
//! inspectable.
//!
//! Which raw value plays which role ("top", "bottom", "height") is decided
//! by [`RoleAssignment`], a policy deliberately kept separate from the
//! formulas: OCR gives no positional labels, so the current
//! magnitude-based guesses can later be replaced by bounding-box-position
//! inference without touching any math here.

use crate::domain::{EquipmentShape, SurfaceAreaResult};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Dimension roles for a two-value shape: a cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderRoles {
    /// Diameter in millimeters.
    pub diameter_mm: f64,
    /// Height in millimeters.
    pub height_mm: f64,
}

/// Dimension roles for a tapered vessel: frustum, bucket, or scoop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperedRoles {
    /// Top diameter in millimeters.
    pub top_diameter_mm: f64,
    /// Bottom diameter in millimeters.
    pub bottom_diameter_mm: f64,
    /// Height in millimeters.
    pub height_mm: f64,
    /// Explicit slant height, when a fourth value supplied one.
    pub slant_height_mm: Option<f64>,
}

/// Assigns semantic roles to an unordered, unlabeled set of measurements.
///
/// These are magnitude heuristics tuned on labeled equipment photos, and
/// they are fragile by nature: nothing guarantees the largest value is the
/// diameter. They live behind this policy type so a more principled
/// strategy can swap in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleAssignment;

impl RoleAssignment {
    /// Pairs two values as diameter and height: the larger reads as the
    /// diameter.
    pub fn cylinder(&self, values_mm: &[f64]) -> Option<CylinderRoles> {
        match values_mm {
            [a, b, ..] => Some(CylinderRoles {
                diameter_mm: a.max(*b),
                height_mm: a.min(*b),
            }),
            _ => None,
        }
    }

    /// Assigns top, bottom, and height for a tapered vessel: the larger of
    /// the first two values is the top, the smaller the bottom, the third
    /// is the height (falling back to the second when only two are
    /// available). A fourth value, when present, is taken as an explicit
    /// slant height.
    pub fn tapered(&self, values_mm: &[f64]) -> Option<TaperedRoles> {
        match values_mm {
            [a, b, rest @ ..] => Some(TaperedRoles {
                top_diameter_mm: a.max(*b),
                bottom_diameter_mm: a.min(*b),
                height_mm: rest.first().copied().unwrap_or(*b),
                slant_height_mm: rest.get(1).copied(),
            }),
            _ => None,
        }
    }

    /// Takes three values as length, width, and height in presentation
    /// order.
    pub fn rectangular(&self, values_mm: &[f64]) -> Option<(f64, f64, f64)> {
        match values_mm {
            [l, w, h, ..] => Some((*l, *w, *h)),
            _ => None,
        }
    }
}

/// Computes surface areas for classified shapes.
#[derive(Debug, Clone, Default)]
pub struct SurfaceAreaCalculator {
    roles: RoleAssignment,
}

impl SurfaceAreaCalculator {
    /// Creates a calculator with the default role-assignment policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cylinder: lateral = 2πrh, caps = 2πr² when included.
    pub fn cylinder(&self, diameter_mm: f64, height_mm: f64, include_caps: bool) -> SurfaceAreaResult {
        let radius = diameter_mm / 2.0;
        let lateral = 2.0 * PI * radius * height_mm;
        let caps = if include_caps {
            2.0 * PI * radius * radius
        } else {
            0.0
        };

        let mut used = BTreeMap::new();
        used.insert("diameter_mm".to_string(), diameter_mm);
        used.insert("height_mm".to_string(), height_mm);
        used.insert("radius_mm".to_string(), radius);
        SurfaceAreaResult::new(EquipmentShape::Cylinder, lateral, caps, used)
    }

    /// Rectangular box: lateral = 2(lh + wh), caps = 2lw when included.
    pub fn rectangular(
        &self,
        length_mm: f64,
        width_mm: f64,
        height_mm: f64,
        include_caps: bool,
    ) -> SurfaceAreaResult {
        let lateral = 2.0 * (length_mm * height_mm + width_mm * height_mm);
        let caps = if include_caps {
            2.0 * length_mm * width_mm
        } else {
            0.0
        };

        let mut used = BTreeMap::new();
        used.insert("length_mm".to_string(), length_mm);
        used.insert("width_mm".to_string(), width_mm);
        used.insert("height_mm".to_string(), height_mm);
        SurfaceAreaResult::new(EquipmentShape::Rectangular, lateral, caps, used)
    }

    /// Frustum with both caps closed: lateral = π(R + r)·slant,
    /// caps = πR² + πr². The slant defaults to √(h² + (R − r)²) when no
    /// explicit value is given.
    pub fn frustum(
        &self,
        top_diameter_mm: f64,
        bottom_diameter_mm: f64,
        height_mm: f64,
        slant_height_mm: Option<f64>,
    ) -> SurfaceAreaResult {
        let top_radius = top_diameter_mm / 2.0;
        let bottom_radius = bottom_diameter_mm / 2.0;
        let slant = slant_height_mm
            .unwrap_or_else(|| (height_mm.powi(2) + (top_radius - bottom_radius).powi(2)).sqrt());

        let lateral = PI * (top_radius + bottom_radius) * slant;
        let caps = PI * top_radius.powi(2) + PI * bottom_radius.powi(2);

        let mut used = BTreeMap::new();
        used.insert("top_diameter_mm".to_string(), top_diameter_mm);
        used.insert("bottom_diameter_mm".to_string(), bottom_diameter_mm);
        used.insert("height_mm".to_string(), height_mm);
        used.insert("slant_height_mm".to_string(), slant);
        SurfaceAreaResult::new(EquipmentShape::Frustum, lateral, caps, used)
    }

    /// Bucket: frustum wall with an open top and a closed bottom cap.
    pub fn bucket(
        &self,
        top_diameter_mm: f64,
        bottom_diameter_mm: f64,
        height_mm: f64,
    ) -> SurfaceAreaResult {
        self.open_tapered(
            EquipmentShape::Bucket,
            top_diameter_mm,
            bottom_diameter_mm,
            height_mm,
        )
    }

    /// Scoop: geometrically identical to a bucket; the tag differs for
    /// reporting only.
    pub fn scoop(
        &self,
        top_diameter_mm: f64,
        bottom_diameter_mm: f64,
        height_mm: f64,
    ) -> SurfaceAreaResult {
        self.open_tapered(
            EquipmentShape::Scoop,
            top_diameter_mm,
            bottom_diameter_mm,
            height_mm,
        )
    }

    fn open_tapered(
        &self,
        shape: EquipmentShape,
        top_diameter_mm: f64,
        bottom_diameter_mm: f64,
        height_mm: f64,
    ) -> SurfaceAreaResult {
        let top_radius = top_diameter_mm / 2.0;
        let bottom_radius = bottom_diameter_mm / 2.0;
        let slant = (height_mm.powi(2) + (top_radius - bottom_radius).powi(2)).sqrt();

        let lateral = PI * (top_radius + bottom_radius) * slant;
        let bottom_cap = PI * bottom_radius.powi(2);

        let mut used = BTreeMap::new();
        used.insert("top_diameter_mm".to_string(), top_diameter_mm);
        used.insert("bottom_diameter_mm".to_string(), bottom_diameter_mm);
        used.insert("height_mm".to_string(), height_mm);
        SurfaceAreaResult::new(shape, lateral, bottom_cap, used)
    }

    /// Dispatches to the formula for `shape`, assigning roles to the raw
    /// millimeter values first.
    ///
    /// Returns `None` when the shape is unknown or too few values are
    /// available for its formula. Callers must supply at least two values;
    /// tapered shapes need three.
    pub fn calculate(&self, shape: EquipmentShape, values_mm: &[f64]) -> Option<SurfaceAreaResult> {
        if values_mm.len() < 2 {
            return None;
        }

        match shape {
            EquipmentShape::Cylinder => {
                let roles = self.roles.cylinder(values_mm)?;
                Some(self.cylinder(roles.diameter_mm, roles.height_mm, false))
            }
            EquipmentShape::Rectangular => {
                let (l, w, h) = self.roles.rectangular(values_mm)?;
                Some(self.rectangular(l, w, h, false))
            }
            EquipmentShape::Bucket | EquipmentShape::Scoop => {
                if values_mm.len() < 3 {
                    return None;
                }
                let roles = self.roles.tapered(values_mm)?;
                Some(if shape == EquipmentShape::Bucket {
                    self.bucket(roles.top_diameter_mm, roles.bottom_diameter_mm, roles.height_mm)
                } else {
                    self.scoop(roles.top_diameter_mm, roles.bottom_diameter_mm, roles.height_mm)
                })
            }
            EquipmentShape::Frustum | EquipmentShape::Hopper => {
                if values_mm.len() < 3 {
                    return None;
                }
                let roles = self.roles.tapered(values_mm)?;
                Some(self.frustum(
                    roles.top_diameter_mm,
                    roles.bottom_diameter_mm,
                    roles.height_mm,
                    roles.slant_height_mm,
                ))
            }
            EquipmentShape::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_cylinder_without_caps() {
        let calc = SurfaceAreaCalculator::new();
        let result = calc.cylinder(250.0, 250.0, false);
        // 2π · 125 · 250
        assert_close(result.lateral_area_mm2, 196_349.54, 0.01);
        assert_eq!(result.cap_area_mm2, 0.0);
        assert_eq!(result.total_area_mm2, result.lateral_area_mm2);
        assert_eq!(result.dimensions_used["radius_mm"], 125.0);
    }

    #[test]
    fn test_cylinder_with_caps() {
        let calc = SurfaceAreaCalculator::new();
        let result = calc.cylinder(250.0, 250.0, true);
        assert_close(result.cap_area_mm2, 2.0 * PI * 125.0 * 125.0, 1e-6);
        assert_close(
            result.total_area_mm2,
            result.lateral_area_mm2 + result.cap_area_mm2,
            1e-9,
        );
    }

    #[test]
    fn test_rectangular_box() {
        let calc = SurfaceAreaCalculator::new();
        let open = calc.rectangular(330.0, 270.0, 200.0, false);
        assert_eq!(open.lateral_area_mm2, 2.0 * (330.0 * 200.0 + 270.0 * 200.0));
        assert_eq!(open.cap_area_mm2, 0.0);

        let closed = calc.rectangular(330.0, 270.0, 200.0, true);
        assert_eq!(closed.cap_area_mm2, 2.0 * 330.0 * 270.0);
    }

    #[test]
    fn test_bucket_worked_example() {
        // Top 25 cm, bottom 17.8 cm, height 25 cm.
        let calc = SurfaceAreaCalculator::new();
        let result = calc.bucket(250.0, 178.0, 250.0);

        let slant = (250.0f64.powi(2) + (125.0f64 - 89.0).powi(2)).sqrt();
        assert_close(result.lateral_area_mm2, PI * (125.0 + 89.0) * slant, 1e-6);
        assert_close(result.cap_area_mm2, PI * 89.0 * 89.0, 1e-6);
        assert_close(result.cap_area_mm2, 24_884.6, 0.1);
        // ≈ 1947 cm² for this vessel.
        assert_close(result.total_area_cm2, 1_947.1, 0.5);
        assert_eq!(result.shape, EquipmentShape::Bucket);
    }

    #[test]
    fn test_scoop_matches_bucket_geometry() {
        let calc = SurfaceAreaCalculator::new();
        let bucket = calc.bucket(250.0, 178.0, 250.0);
        let scoop = calc.scoop(250.0, 178.0, 250.0);
        assert_eq!(bucket.total_area_mm2, scoop.total_area_mm2);
        assert_eq!(scoop.shape, EquipmentShape::Scoop);
    }

    #[test]
    fn test_cylinder_as_bowl_worked_example() {
        // A straight-walled bowl: diameter 58.8 cm, height 57 cm, closed
        // bottom, open top. Equal top and bottom diameters reduce the
        // open tapered formula to lateral 2πrh plus one cap.
        let calc = SurfaceAreaCalculator::new();
        let result = calc.bucket(588.0, 588.0, 570.0);
        assert_close(result.lateral_area_mm2, 2.0 * PI * 294.0 * 570.0, 1e-6);
        assert_close(result.cap_area_mm2, PI * 294.0 * 294.0, 1e-6);
        // Source verification cites 13,244.83 cm²; allow ±0.5%.
        assert_close(result.total_area_cm2, 13_244.83, 13_244.83 * 0.005);
    }

    #[test]
    fn test_frustum_closed_caps_and_explicit_slant() {
        let calc = SurfaceAreaCalculator::new();
        let derived = calc.frustum(250.0, 178.0, 250.0, None);
        let slant = (250.0f64.powi(2) + 36.0f64.powi(2)).sqrt();
        assert_close(derived.dimensions_used["slant_height_mm"], slant, 1e-9);
        assert_close(
            derived.cap_area_mm2,
            PI * 125.0 * 125.0 + PI * 89.0 * 89.0,
            1e-6,
        );

        let explicit = calc.frustum(250.0, 178.0, 250.0, Some(260.0));
        assert_close(explicit.lateral_area_mm2, PI * (125.0 + 89.0) * 260.0, 1e-6);
    }

    #[test]
    fn test_role_assignment_cylinder() {
        let roles = RoleAssignment.cylinder(&[570.0, 588.0]).unwrap();
        assert_eq!(roles.diameter_mm, 588.0);
        assert_eq!(roles.height_mm, 570.0);
        assert!(RoleAssignment.cylinder(&[570.0]).is_none());
    }

    #[test]
    fn test_role_assignment_tapered() {
        let roles = RoleAssignment.tapered(&[178.0, 250.0, 240.0, 260.0]).unwrap();
        assert_eq!(roles.top_diameter_mm, 250.0);
        assert_eq!(roles.bottom_diameter_mm, 178.0);
        assert_eq!(roles.height_mm, 240.0);
        assert_eq!(roles.slant_height_mm, Some(260.0));

        // Height falls back to the second value when only two exist.
        let short = RoleAssignment.tapered(&[250.0, 178.0]).unwrap();
        assert_eq!(short.height_mm, 178.0);
        assert_eq!(short.slant_height_mm, None);
    }

    #[test]
    fn test_calculate_dispatch() {
        let calc = SurfaceAreaCalculator::new();

        let cylinder = calc
            .calculate(EquipmentShape::Cylinder, &[588.0, 570.0])
            .unwrap();
        assert_eq!(cylinder.shape, EquipmentShape::Cylinder);
        // Smart dispatch excludes caps for open vessels.
        assert_eq!(cylinder.cap_area_mm2, 0.0);

        let scoop = calc
            .calculate(EquipmentShape::Scoop, &[250.0, 178.0, 250.0])
            .unwrap();
        assert_eq!(scoop.shape, EquipmentShape::Scoop);

        let hopper = calc
            .calculate(EquipmentShape::Hopper, &[900.0, 300.0, 700.0, 750.0])
            .unwrap();
        // Hoppers route through the frustum formula with the fourth value
        // as explicit slant.
        assert_eq!(hopper.shape, EquipmentShape::Frustum);
        assert_eq!(hopper.dimensions_used["slant_height_mm"], 750.0);
    }

    #[test]
    fn test_calculate_refuses_insufficient_values() {
        let calc = SurfaceAreaCalculator::new();
        assert!(calc.calculate(EquipmentShape::Cylinder, &[250.0]).is_none());
        assert!(
            calc.calculate(EquipmentShape::Bucket, &[250.0, 178.0])
                .is_none()
        );
        assert!(
            calc.calculate(EquipmentShape::Unknown, &[250.0, 178.0])
                .is_none()
        );
    }

    #[test]
    fn test_degenerate_inputs_propagate_as_anomalies() {
        let calc = SurfaceAreaCalculator::new();
        let zero = calc.cylinder(0.0, 0.0, false);
        assert!(zero.is_anomalous());

        let negative = calc.rectangular(-330.0, 270.0, 200.0, false);
        assert!(negative.total_area_mm2 < 0.0 || negative.is_anomalous());
    }
}
