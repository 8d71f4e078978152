//! The pipeline orchestrator.
//!
//! Sequences detection, parsing, classification, and area calculation for
//! one image or a batch, with per-image failure isolation: one image's OCR
//! or parsing failure never aborts the batch. Batches above a configurable
//! size are processed in parallel; this is safe without any locking
//! because every per-image value is locally scoped and immutable after
//! construction.

use crate::core::{AnalysisError, AnalysisResult, PipelineConfig};
use crate::domain::RawDetection;
use crate::pipeline::detector::{TextDetector, filter_by_confidence};
use crate::pipeline::report::{AnalysisOutcome, BatchReport, ImageAnalysis};
use crate::pipeline::stats::{PipelineStats, StatsManager};
use crate::processors::{DimensionParser, ShapeClassifier, SurfaceAreaCalculator};
use image::RgbImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Image file extensions considered when scanning a directory.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff"];

/// Strategy for processing multiple images.
#[derive(Debug, Clone)]
pub enum ProcessingStrategy {
    /// Always process sequentially.
    Sequential,
    /// Always process in parallel.
    Parallel,
    /// Automatically decide based on a batch-size threshold.
    Auto(usize),
}

impl ProcessingStrategy {
    /// Determines if parallel processing should be used for the given
    /// item count.
    pub fn should_use_parallel(&self, item_count: usize) -> bool {
        match self {
            ProcessingStrategy::Sequential => false,
            ProcessingStrategy::Parallel => true,
            ProcessingStrategy::Auto(threshold) => item_count > *threshold,
        }
    }
}

/// End-to-end analyzer for equipment photos.
///
/// Owns a single shared [`TextDetector`] handle (injected, never ambient
/// global state) plus the three pure processing stages. Construct once,
/// reuse for any number of images.
///
/// # Example
///
/// ```rust,no_run
/// use equimeter::prelude::*;
/// use std::path::Path;
/// use std::sync::Arc;
///
/// # fn detector() -> Arc<dyn TextDetector> { unimplemented!() }
/// let analyzer = EquipmentAnalyzer::new(detector());
/// let record = analyzer.analyze_path(Path::new("photos/bucket_01.jpg"));
/// println!("{}", record.outcome.description());
/// ```
pub struct EquipmentAnalyzer {
    detector: Arc<dyn TextDetector>,
    parser: DimensionParser,
    classifier: ShapeClassifier,
    calculator: SurfaceAreaCalculator,
    config: PipelineConfig,
    stats: StatsManager,
}

impl EquipmentAnalyzer {
    /// Creates an analyzer with default configuration.
    pub fn new(detector: Arc<dyn TextDetector>) -> Self {
        Self::with_config(detector, PipelineConfig::default())
    }

    /// Creates an analyzer with explicit configuration.
    pub fn with_config(detector: Arc<dyn TextDetector>, config: PipelineConfig) -> Self {
        Self {
            detector,
            parser: DimensionParser::new(config.parser.clone()),
            classifier: ShapeClassifier::new(config.classifier.clone()),
            calculator: SurfaceAreaCalculator::new(),
            config,
            stats: StatsManager::new(),
        }
    }

    /// Analyzes a single image file.
    ///
    /// Loading or detection errors become a `DetectionFailed` record
    /// rather than an `Err`, so batch callers can treat every image
    /// uniformly.
    pub fn analyze_path(&self, path: &Path) -> ImageAnalysis {
        let image_id = path.display().to_string();
        let image = match crate::utils::load_image(path) {
            Ok(image) => image,
            Err(e) => {
                warn!(image = %image_id, error = %e, "failed to load image");
                return ImageAnalysis::failed(image_id, e.to_string());
            }
        };
        // The file stem often names the equipment ("bucket_01"), which the
        // classifier uses as a hint.
        let hint = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        self.analyze_rgb_with_hint(&image, &image_id, &hint)
    }

    /// Analyzes an in-memory image under the given identifier, which also
    /// serves as the classifier hint.
    pub fn analyze_rgb(&self, image: &RgbImage, image_id: &str) -> ImageAnalysis {
        self.analyze_rgb_with_hint(image, image_id, image_id)
    }

    fn analyze_rgb_with_hint(&self, image: &RgbImage, image_id: &str, hint: &str) -> ImageAnalysis {
        let detections = match self.detector.detect(image) {
            Ok(detections) => detections,
            Err(e) => {
                warn!(image = %image_id, error = %e, "text detection failed");
                return ImageAnalysis::failed(image_id, e.to_string());
            }
        };
        self.analyze_detections(detections, image_id, hint)
    }

    /// Runs the parse → classify → calculate stages over raw detections.
    ///
    /// Exposed so callers that already hold OCR output (for instance from
    /// a remote detection service) can skip image handling entirely.
    pub fn analyze_detections(
        &self,
        detections: Vec<RawDetection>,
        image_id: &str,
        hint: &str,
    ) -> ImageAnalysis {
        let confident =
            filter_by_confidence(detections, self.config.parser.confidence_threshold);
        let dimensions = self.parser.parse(&confident);
        debug!(
            image = %image_id,
            dimensions = dimensions.len(),
            "parsed dimensions"
        );

        if dimensions.is_empty() {
            return ImageAnalysis {
                image_id: image_id.to_string(),
                dimensions,
                shape: None,
                calculation: None,
                outcome: AnalysisOutcome::NoDimensions,
            };
        }
        if dimensions.len() < 2 {
            return ImageAnalysis {
                image_id: image_id.to_string(),
                dimensions,
                shape: None,
                calculation: None,
                outcome: AnalysisOutcome::InsufficientDimensions,
            };
        }

        let shape = self.classifier.identify(&dimensions, hint);
        let values_mm: Vec<f64> = dimensions.iter().map(|d| d.value_mm).collect();
        let calculation = self.calculator.calculate(shape, &values_mm);

        let outcome = match &calculation {
            None => AnalysisOutcome::UnknownShape,
            Some(result) if result.is_anomalous() => {
                warn!(
                    image = %image_id,
                    total_area_mm2 = result.total_area_mm2,
                    "surface-area calculation produced anomalous values"
                );
                AnalysisOutcome::AnomalousCalculation
            }
            Some(result) => {
                info!(
                    image = %image_id,
                    shape = %shape,
                    total_area_cm2 = format!("{:.2}", result.total_area_cm2),
                    "surface area calculated"
                );
                AnalysisOutcome::Calculated
            }
        };

        ImageAnalysis {
            image_id: image_id.to_string(),
            dimensions,
            shape: shape.is_known().then_some(shape),
            calculation,
            outcome,
        }
    }

    /// Analyzes a batch of image files with the `Auto` strategy.
    pub fn analyze_batch(&self, paths: &[PathBuf]) -> BatchReport {
        self.analyze_batch_with_strategy(
            paths,
            ProcessingStrategy::Auto(self.config.parallel_threshold),
        )
    }

    /// Analyzes a batch of image files with an explicit processing
    /// strategy.
    ///
    /// Every path yields exactly one record; per-image failures are
    /// recorded and the batch continues.
    pub fn analyze_batch_with_strategy(
        &self,
        paths: &[PathBuf],
        strategy: ProcessingStrategy,
    ) -> BatchReport {
        info!(images = paths.len(), "starting batch analysis");

        let records: Vec<ImageAnalysis> = if strategy.should_use_parallel(paths.len()) {
            paths.par_iter().map(|p| self.analyze_path(p)).collect()
        } else {
            paths.iter().map(|p| self.analyze_path(p)).collect()
        };

        let report = BatchReport::from_records(records);
        self.stats.update_stats(
            report.summary.processed,
            report.summary.calculated,
            report.summary.with_dimensions,
            report.summary.failed,
        );
        info!(
            processed = report.summary.processed,
            calculated = report.summary.calculated,
            failed = report.summary.failed,
            "batch analysis finished"
        );
        report
    }

    /// Analyzes every image file in a directory (non-recursive), matching
    /// by extension.
    pub fn analyze_dir(&self, dir: &Path) -> AnalysisResult<BatchReport> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            AnalysisError::invalid_input(format!("cannot read directory {}: {e}", dir.display()))
        })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        Ok(self.analyze_batch(&paths))
    }

    /// Returns a snapshot of the accumulated pipeline statistics.
    pub fn stats(&self) -> PipelineStats {
        self.stats.get_stats()
    }
}
