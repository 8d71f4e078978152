//! Shape classification from sparse measurement sets.
//!
//! Equipment photos rarely label which number is a diameter and which is a
//! height, so classification works from two weak signals: keywords in the
//! hint text (usually the file name, including localized supplier terms)
//! and the count and spread of the extracted values. The rules form an
//! ordered table evaluated most-specific first; the first rule that
//! produces a shape wins. This is a deterministic rule tree, not a learned
//! classifier: with this few measurements per image, domain naming
//! conventions beat statistical inference.

use crate::core::ClassifierConfig;
use crate::domain::{Dimension, EquipmentShape};

/// Everything a classification rule may look at.
#[derive(Debug)]
struct RuleInput<'a> {
    /// Millimeter values in the parser's presentation order
    /// (confidence descending).
    values_mm: &'a [f64],
    /// Lowercased hint text.
    hint: &'a str,
}

impl RuleInput<'_> {
    fn count(&self) -> usize {
        self.values_mm.len()
    }

    fn contains_any(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.hint.contains(k.as_str()))
    }
}

/// A single entry in the rule table.
struct Rule {
    /// Name used when tracing which rule fired.
    name: &'static str,
    predicate: fn(&RuleInput<'_>, &ClassifierConfig) -> Option<EquipmentShape>,
}

/// Rule table in precedence order: explicit keyword rules first, bare
/// count heuristics last.
const RULES: &[Rule] = &[
    Rule {
        name: "scoop-keyword",
        predicate: |input, config| {
            (input.contains_any(&config.scoop_keywords) && input.count() >= 3)
                .then_some(EquipmentShape::Scoop)
        },
    },
    Rule {
        name: "bucket-keyword",
        predicate: |input, config| {
            (input.contains_any(&config.bucket_keywords) && input.count() >= 3)
                .then_some(EquipmentShape::Bucket)
        },
    },
    Rule {
        name: "hopper-keyword",
        predicate: |input, config| {
            input.contains_any(&config.hopper_keywords).then(|| {
                if input.count() >= 4 {
                    EquipmentShape::Hopper
                } else {
                    EquipmentShape::Frustum
                }
            })
        },
    },
    Rule {
        name: "tank-keyword",
        predicate: |input, config| {
            if !input.contains_any(&config.tank_keywords) {
                return None;
            }
            match input.values_mm {
                [_, _] => Some(EquipmentShape::Cylinder),
                // Two comparable cross-section values read as a round tank,
                // otherwise a rectangular one.
                [a, b, _] if (a - b).abs() < a * 0.1 => Some(EquipmentShape::Cylinder),
                [_, _, _] => Some(EquipmentShape::Rectangular),
                _ => None,
            }
        },
    },
    Rule {
        name: "mixer-keyword",
        predicate: |input, config| {
            (input.contains_any(&config.mixer_keywords) && input.count() >= 3)
                .then_some(EquipmentShape::Frustum)
        },
    },
    Rule {
        name: "two-values",
        predicate: |input, _| {
            // Sanity check that the pair is plausibly diameter-and-height
            // rather than two unrelated small numbers.
            match input.values_mm {
                [first, second] if *first > second * 0.5 => Some(EquipmentShape::Cylinder),
                _ => None,
            }
        },
    },
    Rule {
        name: "three-values",
        predicate: |input, _| match input.values_mm {
            [a, b, _] => {
                let largest = input.values_mm.iter().fold(f64::MIN, |m, v| m.max(*v));
                if (a - b).abs() < largest * 0.2 {
                    // Two comparable values suggest a box cross-section.
                    Some(EquipmentShape::Rectangular)
                } else {
                    // A clear large/small split suggests a tapered vessel.
                    Some(EquipmentShape::Frustum)
                }
            }
            _ => None,
        },
    },
    Rule {
        name: "many-values",
        predicate: |input, _| (input.count() >= 4).then_some(EquipmentShape::Frustum),
    },
];

/// Infers the equipment shape for a set of extracted dimensions.
#[derive(Debug, Clone, Default)]
pub struct ShapeClassifier {
    config: ClassifierConfig,
}

impl ShapeClassifier {
    /// Creates a classifier with the given keyword lexicon.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classifies the equipment described by `dimensions`.
    ///
    /// # Arguments
    ///
    /// * `dimensions` - Extracted dimensions in presentation order.
    /// * `hint_text` - Optional context such as a file name; matched
    ///   case-insensitively against the keyword lexicon.
    ///
    /// # Returns
    ///
    /// The first shape produced by the rule table, or
    /// [`EquipmentShape::Unknown`] if no rule fires.
    pub fn identify(&self, dimensions: &[Dimension], hint_text: &str) -> EquipmentShape {
        let values_mm: Vec<f64> = dimensions.iter().map(|d| d.value_mm).collect();
        let hint = hint_text.to_lowercase();
        let input = RuleInput {
            values_mm: &values_mm,
            hint: &hint,
        };

        for rule in RULES {
            if let Some(shape) = (rule.predicate)(&input, &self.config) {
                tracing::debug!(rule = rule.name, shape = %shape, "classification rule fired");
                return shape;
            }
        }
        EquipmentShape::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::BoundingBox;
    use crate::domain::Unit;
    use std::sync::Arc;

    fn dims(values_mm: &[f64]) -> Vec<Dimension> {
        values_mm
            .iter()
            .map(|&v| {
                Dimension::new(
                    v,
                    Unit::Mm,
                    0.9,
                    Arc::from("test"),
                    BoundingBox::from_coords(0.0, 0.0, 1.0, 1.0),
                )
            })
            .collect()
    }

    fn classifier() -> ShapeClassifier {
        ShapeClassifier::new(ClassifierConfig::default())
    }

    #[test]
    fn test_scoop_keyword_needs_three_values() {
        let c = classifier();
        assert_eq!(
            c.identify(&dims(&[250.0, 178.0, 250.0]), "scoop_01.jpg"),
            EquipmentShape::Scoop
        );
        // Two values fall through to the cylinder fallback.
        assert_eq!(
            c.identify(&dims(&[250.0, 178.0]), "scoop_01.jpg"),
            EquipmentShape::Cylinder
        );
    }

    #[test]
    fn test_bucket_keyword_and_localized_synonym() {
        let c = classifier();
        assert_eq!(
            c.identify(&dims(&[250.0, 178.0, 250.0]), "BUCKET_photo.png"),
            EquipmentShape::Bucket
        );
        assert_eq!(
            c.identify(&dims(&[250.0, 178.0, 250.0]), "파란_통_3.jpg"),
            EquipmentShape::Bucket
        );
    }

    #[test]
    fn test_hopper_keyword() {
        let c = classifier();
        assert_eq!(
            c.identify(&dims(&[900.0, 300.0, 700.0, 750.0]), "hopper.jpg"),
            EquipmentShape::Hopper
        );
        // Too few values for a full hopper reading, still tapered.
        assert_eq!(
            c.identify(&dims(&[900.0, 300.0, 700.0]), "호퍼.jpg"),
            EquipmentShape::Frustum
        );
    }

    #[test]
    fn test_tank_keyword_branches() {
        let c = classifier();
        assert_eq!(
            c.identify(&dims(&[600.0, 900.0]), "tank.jpg"),
            EquipmentShape::Cylinder
        );
        // Two near-equal cross-section values: round tank.
        assert_eq!(
            c.identify(&dims(&[600.0, 590.0, 900.0]), "water_tank.jpg"),
            EquipmentShape::Cylinder
        );
        // Distinct cross-section values: rectangular tank.
        assert_eq!(
            c.identify(&dims(&[600.0, 400.0, 900.0]), "container_2.jpg"),
            EquipmentShape::Rectangular
        );
    }

    #[test]
    fn test_mixer_keyword() {
        assert_eq!(
            classifier().identify(&dims(&[800.0, 300.0, 600.0]), "mixer_drum.jpg"),
            EquipmentShape::Frustum
        );
    }

    #[test]
    fn test_two_value_fallback_with_sanity_check() {
        let c = classifier();
        assert_eq!(
            c.identify(&dims(&[588.0, 570.0]), ""),
            EquipmentShape::Cylinder
        );
        // First value far smaller than the second: implausible pair.
        assert_eq!(
            c.identify(&dims(&[40.0, 570.0]), ""),
            EquipmentShape::Unknown
        );
    }

    #[test]
    fn test_three_value_fallback_split() {
        let c = classifier();
        // Two comparable leading values: box.
        assert_eq!(
            c.identify(&dims(&[330.0, 270.0, 200.0]), ""),
            EquipmentShape::Rectangular
        );
        // Clear taper split: frustum.
        assert_eq!(
            c.identify(&dims(&[250.0, 178.0, 250.0]), ""),
            EquipmentShape::Frustum
        );
    }

    #[test]
    fn test_four_or_more_values_fallback() {
        assert_eq!(
            classifier().identify(&dims(&[900.0, 300.0, 700.0, 750.0]), ""),
            EquipmentShape::Frustum
        );
    }

    #[test]
    fn test_no_rule_fires() {
        let c = classifier();
        assert_eq!(c.identify(&dims(&[250.0]), ""), EquipmentShape::Unknown);
        assert_eq!(c.identify(&[], ""), EquipmentShape::Unknown);
    }

    #[test]
    fn test_determinism() {
        let c = classifier();
        let d = dims(&[250.0, 178.0, 250.0]);
        let first = c.identify(&d, "");
        for _ in 0..10 {
            assert_eq!(c.identify(&d, ""), first);
        }
    }
}
