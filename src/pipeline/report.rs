//! Per-image and batch result records.
//!
//! One [`ImageAnalysis`] record is produced for every image that enters
//! the pipeline, successful or not; a [`BatchReport`] aggregates them with
//! summary statistics. Reports serialize to JSON via `serde_json`, and
//! `Display` renders the plain-text report format used for operator
//! review.

use crate::core::{AnalysisError, AnalysisResult, ProcessingStage};
use crate::domain::{Dimension, EquipmentShape, SurfaceAreaResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// How the analysis of one image concluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// A surface area was computed.
    Calculated,
    /// A surface area was computed but its value is degenerate
    /// (non-finite or non-positive); the numbers are kept for inspection.
    AnomalousCalculation,
    /// The detector returned no usable text fragments.
    NoDimensions,
    /// Fewer than two dimensions survived parsing; classification and
    /// calculation were skipped.
    InsufficientDimensions,
    /// The classifier could not determine a shape; calculation was
    /// skipped.
    UnknownShape,
    /// The detector or image loading failed for this image.
    DetectionFailed {
        /// The failure description, preserved for the report.
        message: String,
    },
}

impl AnalysisOutcome {
    /// Returns true for outcomes that count as per-image failures.
    pub fn is_failure(&self) -> bool {
        matches!(self, AnalysisOutcome::DetectionFailed { .. })
    }

    /// Short human-readable description for text reports.
    pub fn description(&self) -> String {
        match self {
            AnalysisOutcome::Calculated => "calculated".to_string(),
            AnalysisOutcome::AnomalousCalculation => "calculated (anomalous values)".to_string(),
            AnalysisOutcome::NoDimensions => "no dimensions detected".to_string(),
            AnalysisOutcome::InsufficientDimensions => "insufficient data".to_string(),
            AnalysisOutcome::UnknownShape => "shape unknown".to_string(),
            AnalysisOutcome::DetectionFailed { message } => {
                format!("detection failed: {message}")
            }
        }
    }
}

/// The complete analysis record for one image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Identifier for the image, usually its path or file name.
    pub image_id: String,
    /// Extracted dimensions in confidence-descending order.
    pub dimensions: Vec<Dimension>,
    /// The classified shape, when classification ran.
    pub shape: Option<EquipmentShape>,
    /// The computed surface area, when calculation ran.
    pub calculation: Option<SurfaceAreaResult>,
    /// How the analysis concluded.
    pub outcome: AnalysisOutcome,
}

impl ImageAnalysis {
    /// Creates a failure record for an image whose detection never
    /// produced output.
    pub fn failed(image_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            dimensions: Vec::new(),
            shape: None,
            calculation: None,
            outcome: AnalysisOutcome::DetectionFailed {
                message: message.into(),
            },
        }
    }
}

/// Summary statistics across a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of images processed, including failures.
    pub processed: usize,
    /// Number of images with at least one extracted dimension.
    pub with_dimensions: usize,
    /// Number of images that produced a calculation (anomalous included).
    pub calculated: usize,
    /// Number of per-image failures.
    pub failed: usize,
    /// Sum of total areas across all calculated images, in cm².
    pub total_area_cm2: f64,
}

/// A batch of per-image records plus summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-image analysis records in input order.
    pub images: Vec<ImageAnalysis>,
    /// Aggregated statistics.
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Builds a report from per-image records, deriving the summary.
    pub fn from_records(images: Vec<ImageAnalysis>) -> Self {
        let summary = BatchSummary {
            processed: images.len(),
            with_dimensions: images.iter().filter(|r| !r.dimensions.is_empty()).count(),
            calculated: images.iter().filter(|r| r.calculation.is_some()).count(),
            failed: images.iter().filter(|r| r.outcome.is_failure()).count(),
            total_area_cm2: images
                .iter()
                .filter_map(|r| r.calculation.as_ref())
                .map(|c| c.total_area_cm2)
                .sum(),
        };
        Self { images, summary }
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> AnalysisResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AnalysisError::processing(ProcessingStage::Reporting, "failed to serialize report", e)
        })
    }

    /// Writes the report as JSON to the given path.
    pub fn save_json(&self, path: &Path) -> AnalysisResult<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::processing(
                ProcessingStage::Reporting,
                format!("failed to write report to {}", path.display()),
                e,
            )
        })
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(72))?;
        writeln!(f, "EQUIPMENT DIMENSION ANALYSIS REPORT")?;
        writeln!(f, "{}", "=".repeat(72))?;

        for (i, record) in self.images.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Image {}: {}", i + 1, record.image_id)?;
            writeln!(f, "{}", "-".repeat(72))?;
            writeln!(f, "Status: {}", record.outcome.description())?;

            if !record.dimensions.is_empty() {
                writeln!(f, "Extracted dimensions:")?;
                for dim in &record.dimensions {
                    writeln!(
                        f,
                        "  - {} {} ({} mm) [confidence: {:.2}] from \"{}\"",
                        dim.raw_value, dim.unit, dim.value_mm, dim.confidence, dim.source_text
                    )?;
                }
            }

            if let Some(calc) = &record.calculation {
                writeln!(f, "Shape: {}", calc.shape)?;
                writeln!(f, "Lateral area: {:.2} mm²", calc.lateral_area_mm2)?;
                writeln!(f, "Cap area: {:.2} mm²", calc.cap_area_mm2)?;
                writeln!(
                    f,
                    "Total area: {:.2} mm² = {:.2} cm² = {:.6} m²",
                    calc.total_area_mm2, calc.total_area_cm2, calc.total_area_m2
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", "=".repeat(72))?;
        writeln!(f, "Processed: {}", self.summary.processed)?;
        writeln!(f, "With dimensions: {}", self.summary.with_dimensions)?;
        writeln!(f, "Calculated: {}", self.summary.calculated)?;
        writeln!(f, "Failed: {}", self.summary.failed)?;
        writeln!(f, "Total surface area: {:.2} cm²", self.summary.total_area_cm2)?;
        Ok(())
    }
}
