//! Extraction of dimension annotations from raw OCR text.
//!
//! OCR output on industrial equipment photos is noisy: unit tokens come in
//! mixed case or spelled out, digits get misread as letters, and stray
//! numbers (confidence scores, reference indices) sit next to real
//! measurements. The [`DimensionParser`] turns that soup into a
//! deduplicated, confidence-sorted list of normalized [`Dimension`] values.
//!
//! Patterns are applied in order of increasing generality: an explicit
//! `<number><unit>` form first, then `<number> x <number> <unit>` pairs,
//! then a bare-number fallback whose unit is inferred by magnitude. A
//! number span consumed by an earlier, more specific pattern is never
//! re-matched by a later one.

use crate::core::ParserConfig;
use crate::domain::{Dimension, RawDetection, Unit};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// `<number><optional space><unit token>` with a word boundary after the
/// unit. Spelled-out aliases are listed before their abbreviations so the
/// longest token wins.
static VALUE_WITH_UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+\.?\d*)\s*(centimeters?|millimeters?|meters?|cm|mm|m)\b")
        .expect("valid unit pattern")
});

/// `<number> x <number> <unit token>` for paired annotations such as
/// "330 x 270 mm". The unit applies to both numbers.
static PAIRED_VALUES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+\.?\d*)\s*[x×]\s*(\d+\.?\d*)\s*(cm|mm|m)\b").expect("valid pair pattern")
});

/// Bare-number fallback with no unit token.
static BARE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+\.?\d*\b").expect("valid number pattern"));

/// A numeric match found in one text fragment, before unit resolution.
#[derive(Debug)]
struct Candidate {
    value: f64,
    unit: Option<Unit>,
    /// Byte span of the number in the cleaned text.
    start: usize,
    end: usize,
}

impl Candidate {
    fn overlaps(&self, others: &[Candidate]) -> bool {
        others.iter().any(|o| self.start < o.end && o.start < self.end)
    }
}

/// Parses raw OCR detections into normalized dimensions.
#[derive(Debug, Clone, Default)]
pub struct DimensionParser {
    config: ParserConfig,
}

impl DimensionParser {
    /// Creates a parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Converts a sequence of detections into a deduplicated list of
    /// dimensions, sorted by confidence descending (stable, so ties keep
    /// detection order).
    ///
    /// An empty input produces an empty output. Fragments that match no
    /// pattern, or whose matches all fail the plausibility filter, are
    /// skipped without error.
    pub fn parse(&self, detections: &[RawDetection]) -> Vec<Dimension> {
        let mut seen: HashSet<(i64, Unit)> = HashSet::new();
        let mut dimensions = Vec::new();

        for detection in detections {
            let cleaned = clean_numeric_text(&detection.text);

            for candidate in self.extract_candidates(&cleaned) {
                let Some(unit) = self.resolve_unit(&candidate, &cleaned) else {
                    continue;
                };

                let dimension = Dimension::new(
                    candidate.value,
                    unit,
                    detection.confidence,
                    detection.text.clone(),
                    detection.bounding_box.clone(),
                );
                if seen.insert(dimension.dedup_key()) {
                    dimensions.push(dimension);
                }
            }
        }

        dimensions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        dimensions
    }

    /// Runs the pattern family over one cleaned fragment. Later, more
    /// general patterns skip number spans already claimed by earlier ones.
    fn extract_candidates(&self, cleaned: &str) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = Vec::new();

        for caps in VALUE_WITH_UNIT_RE.captures_iter(cleaned) {
            let (Some(number), Some(unit_token)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let Ok(value) = number.as_str().parse::<f64>() else {
                continue;
            };
            // The whole match span is claimed so the unit token's digits
            // cannot be re-read as bare numbers.
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            candidates.push(Candidate {
                value,
                unit: Unit::parse_token(unit_token.as_str()),
                start: whole.0,
                end: whole.1,
            });
        }

        for caps in PAIRED_VALUES_RE.captures_iter(cleaned) {
            let unit = caps.get(3).and_then(|m| Unit::parse_token(m.as_str()));
            for group in [1, 2] {
                let Some(number) = caps.get(group) else {
                    continue;
                };
                let Ok(value) = number.as_str().parse::<f64>() else {
                    continue;
                };
                let candidate = Candidate {
                    value,
                    unit,
                    start: number.start(),
                    end: number.end(),
                };
                if !candidate.overlaps(&candidates) {
                    candidates.push(candidate);
                }
            }
        }

        for found in BARE_NUMBER_RE.find_iter(cleaned) {
            let Ok(value) = found.as_str().parse::<f64>() else {
                continue;
            };
            let candidate = Candidate {
                value,
                unit: None,
                start: found.start(),
                end: found.end(),
            };
            if !candidate.overlaps(&candidates) {
                candidates.push(candidate);
            }
        }

        candidates
    }

    /// Determines the unit for a candidate, or rejects it.
    ///
    /// An explicit unit token always wins. Bare numbers below the
    /// minimum-plausibility threshold are rejected; in particular a small
    /// number sitting immediately inside parentheses is an enclosed
    /// confidence-score fragment, not a measurement. Remaining bare
    /// numbers get a magnitude-inferred unit (below the cutoff reads as
    /// centimeters, at or above it as millimeters) unless inference is
    /// disabled.
    fn resolve_unit(&self, candidate: &Candidate, cleaned: &str) -> Option<Unit> {
        if let Some(unit) = candidate.unit {
            return Some(unit);
        }

        if candidate.value < self.config.min_plausible_value {
            if cleaned[..candidate.start].ends_with('(') {
                debug!(
                    value = candidate.value,
                    "rejecting parenthesized fragment as confidence-score artifact"
                );
            } else {
                debug!(
                    value = candidate.value,
                    threshold = self.config.min_plausible_value,
                    "rejecting bare number below plausibility threshold"
                );
            }
            return None;
        }

        if !self.config.infer_units {
            debug!(
                value = candidate.value,
                "dropping bare number, unit inference disabled"
            );
            return None;
        }

        if candidate.value < self.config.unit_inference_cutoff {
            Some(Unit::Cm)
        } else {
            Some(Unit::Mm)
        }
    }
}

/// Corrects OCR digit misreads in numeric contexts.
///
/// Only characters that are unambiguous substitution candidates next to a
/// digit are replaced (`O`/`o` to `0`, `l`/`I` to `1`); text with no
/// adjacent digit is left untouched. Substitutions are ASCII one-for-one,
/// so byte offsets into the cleaned string line up with the original.
fn clean_numeric_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let is_digit_like = |c: Option<&char>| matches!(c, Some(ch) if ch.is_ascii_digit());

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let near_digit =
                is_digit_like(i.checked_sub(1).and_then(|p| chars.get(p))) || is_digit_like(chars.get(i + 1));
            match c {
                'O' | 'o' if near_digit => '0',
                'l' | 'I' if near_digit => '1',
                _ => c,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::BoundingBox;

    fn detection(text: &str, confidence: f32) -> RawDetection {
        RawDetection::new(text, confidence, BoundingBox::from_coords(0.0, 0.0, 50.0, 20.0))
    }

    fn parser() -> DimensionParser {
        DimensionParser::new(ParserConfig::default())
    }

    #[test]
    fn test_empty_input() {
        assert!(parser().parse(&[]).is_empty());
    }

    #[test]
    fn test_simple_value_with_unit() {
        let dims = parser().parse(&[detection("25cm", 0.95)]);
        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].raw_value, 25.0);
        assert_eq!(dims[0].unit, Unit::Cm);
        assert_eq!(dims[0].value_mm, 250.0);
    }

    #[test]
    fn test_unit_aliases_and_case() {
        let dims = parser().parse(&[
            detection("250MM", 0.9),
            detection("1.2 meters", 0.8),
            detection("17.8 centimeter", 0.7),
        ]);
        assert_eq!(dims.len(), 3);
        assert_eq!(dims[0].value_mm, 250.0);
        assert_eq!(dims[1].value_mm, 1200.0);
        assert_eq!(dims[2].value_mm, 178.0);
    }

    #[test]
    fn test_paired_dimensions_share_unit() {
        let dims = parser().parse(&[detection("330 x 270 mm", 0.9)]);
        assert_eq!(dims.len(), 2);
        let mut values: Vec<f64> = dims.iter().map(|d| d.value_mm).collect();
        values.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(values, vec![270.0, 330.0]);
        assert!(dims.iter().all(|d| d.unit == Unit::Mm));
    }

    #[test]
    fn test_paired_with_per_value_units() {
        // Both numbers carry their own token; the pair pattern must not
        // double-report them under a different unit.
        let dims = parser().parse(&[detection("330mm x 270mm", 0.9)]);
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0].value_mm, 330.0);
        assert_eq!(dims[1].value_mm, 270.0);
    }

    #[test]
    fn test_bare_number_unit_inference() {
        let dims = parser().parse(&[detection("588", 0.9), detection("1500", 0.8)]);
        assert_eq!(dims.len(), 2);
        // Below the cutoff reads as centimeters.
        assert_eq!(dims[0].unit, Unit::Cm);
        assert_eq!(dims[0].value_mm, 5880.0);
        // At or above the cutoff reads as millimeters.
        assert_eq!(dims[1].unit, Unit::Mm);
        assert_eq!(dims[1].value_mm, 1500.0);
    }

    #[test]
    fn test_inference_disabled_drops_bare_numbers() {
        let config = ParserConfig {
            infer_units: false,
            ..ParserConfig::default()
        };
        let dims = DimensionParser::new(config).parse(&[detection("588", 0.9)]);
        assert!(dims.is_empty());
    }

    #[test]
    fn test_confidence_artifact_rejected() {
        // A trailing "(0.95)" from an annotation overlay is not a
        // measurement.
        let dims = parser().parse(&[detection("25cm (0.95)", 0.95)]);
        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].value_mm, 250.0);
    }

    #[test]
    fn test_small_bare_number_rejected_but_small_with_unit_kept() {
        let dims = parser().parse(&[detection("1.5", 0.9), detection("1.5 cm", 0.9)]);
        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].value_mm, 15.0);
    }

    #[test]
    fn test_ocr_digit_misreads_corrected() {
        let dims = parser().parse(&[detection("25Ocm", 0.9), detection("I5 cm", 0.8)]);
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0].value_mm, 2500.0);
        assert_eq!(dims[1].value_mm, 150.0);
    }

    #[test]
    fn test_cleanup_leaves_plain_words_alone() {
        // No adjacent digit, so "Oil" must not become a number.
        let dims = parser().parse(&[detection("Oil level", 0.9)]);
        assert!(dims.is_empty());
        assert_eq!(clean_numeric_text("Oil level"), "Oil level");
    }

    #[test]
    fn test_dedup_idempotence() {
        let d = detection("25cm", 0.95);
        let dims = parser().parse(&[d.clone(), d]);
        assert_eq!(dims.len(), 1);
    }

    #[test]
    fn test_source_text_preserved() {
        let dims = parser().parse(&[detection("지름 25Ocm", 0.9)]);
        assert_eq!(dims.len(), 1);
        assert_eq!(&*dims[0].source_text, "지름 25Ocm");
    }

    #[test]
    fn test_confidence_descending_order() {
        let dims = parser().parse(&[
            detection("10cm", 0.5),
            detection("20cm", 0.9),
            detection("30cm", 0.7),
        ]);
        let confidences: Vec<f32> = dims.iter().map(|d| d.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.7, 0.5]);
    }

    #[test]
    fn test_no_numeric_content() {
        let dims = parser().parse(&[detection("주의 warning", 0.99)]);
        assert!(dims.is_empty());
    }
}
