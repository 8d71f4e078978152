//! Measurement units and normalized dimension values.
//!
//! All downstream computation happens in millimeters. A [`Dimension`] pairs
//! the value as printed on the equipment with its canonical millimeter
//! form, the OCR confidence, and the source text it was extracted from.

use crate::processors::BoundingBox;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A recognized measurement unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimeters.
    Mm,
    /// Centimeters.
    Cm,
    /// Meters.
    M,
}

impl Unit {
    /// Returns the multiplication factor that converts this unit to
    /// millimeters.
    #[inline]
    pub fn factor_mm(self) -> f64 {
        match self {
            Unit::Mm => 1.0,
            Unit::Cm => 10.0,
            Unit::M => 1000.0,
        }
    }

    /// Parses a unit token, accepting case-insensitive abbreviations and
    /// spelled-out aliases ("centimeter", "millimeter", "meter").
    ///
    /// Returns `None` for unrecognized tokens; callers must reject those
    /// before converting values.
    pub fn parse_token(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        match token.as_str() {
            "mm" | "millimeter" | "millimeters" => Some(Unit::Mm),
            "cm" | "centimeter" | "centimeters" => Some(Unit::Cm),
            "m" | "meter" | "meters" => Some(Unit::M),
            _ => None,
        }
    }

    /// Returns the canonical abbreviation for this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Converts a value in the given unit to millimeters.
///
/// Pure conversion with no failure modes for the three recognized units.
#[inline]
pub fn to_mm(value: f64, unit: Unit) -> f64 {
    value * unit.factor_mm()
}

/// A single normalized measurement extracted from recognized text.
///
/// Dimensions are value objects: the parser creates them from raw
/// detections and they are never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    /// The numeric value as printed, in `unit`.
    pub raw_value: f64,
    /// The unit the value was printed in (or inferred for it).
    pub unit: Unit,
    /// The canonical value in millimeters.
    pub value_mm: f64,
    /// The confidence score of the source detection.
    pub confidence: f32,
    /// The original text fragment the value was extracted from.
    pub source_text: Arc<str>,
    /// The bounding polygon of the source detection.
    pub bounding_box: BoundingBox,
}

impl Dimension {
    /// Creates a dimension, deriving the canonical millimeter value from
    /// the raw value and unit.
    pub fn new(
        raw_value: f64,
        unit: Unit,
        confidence: f32,
        source_text: Arc<str>,
        bounding_box: BoundingBox,
    ) -> Self {
        Self {
            raw_value,
            unit,
            value_mm: to_mm(raw_value, unit),
            confidence,
            source_text,
            bounding_box,
        }
    }

    /// Returns the uniqueness key used for deduplication: the millimeter
    /// value rounded to one decimal place, paired with the unit.
    pub fn dedup_key(&self) -> (i64, Unit) {
        ((self.value_mm * 10.0).round() as i64, self.unit)
    }
}
