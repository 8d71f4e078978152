//! Equipment shape archetypes.

use serde::{Deserialize, Serialize};

/// The geometric archetype inferred for a piece of equipment.
///
/// A closed tag set: each variant determines which surface-area formula
/// applies and which semantic roles the extracted dimensions are assigned.
/// Bucket and scoop are geometrically identical (open-top frustum); the
/// distinction is carried for labeling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentShape {
    /// A straight-walled cylindrical vessel (diameter + height).
    Cylinder,
    /// A rectangular box or tank (length + width + height).
    Rectangular,
    /// A truncated cone with both caps closed.
    Frustum,
    /// An open-top tapered vessel with a closed bottom.
    Bucket,
    /// Same geometry as a bucket, labeled as a scoop.
    Scoop,
    /// A large tapered feed vessel; computed as a frustum.
    Hopper,
    /// No shape could be determined from the available measurements.
    Unknown,
}

impl EquipmentShape {
    /// Returns true if a surface-area formula exists for this shape.
    pub fn is_known(self) -> bool {
        !matches!(self, EquipmentShape::Unknown)
    }

    /// Returns the lowercase tag used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentShape::Cylinder => "cylinder",
            EquipmentShape::Rectangular => "rectangular",
            EquipmentShape::Frustum => "frustum",
            EquipmentShape::Bucket => "bucket",
            EquipmentShape::Scoop => "scoop",
            EquipmentShape::Hopper => "hopper",
            EquipmentShape::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for EquipmentShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_known() {
        assert!(EquipmentShape::Bucket.is_known());
        assert!(!EquipmentShape::Unknown.is_known());
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_string(&EquipmentShape::Frustum).unwrap();
        assert_eq!(json, "\"frustum\"");
        let shape: EquipmentShape = serde_json::from_str("\"scoop\"").unwrap();
        assert_eq!(shape, EquipmentShape::Scoop);
    }
}
