//! The text-detection collaborator boundary.
//!
//! OCR engine internals (model loading, inference) are outside this crate.
//! The pipeline only needs something that turns an image into text
//! fragments with confidences and bounding polygons, expressed by the
//! [`TextDetector`] trait. The orchestrator owns one detector handle for
//! its whole lifetime and reuses it across images, since real engines pay
//! a heavy one-time model-loading cost.

use crate::core::AnalysisResult;
use crate::domain::RawDetection;
use image::RgbImage;

/// An external text-detection engine.
///
/// Implementations must be `Send + Sync`: the orchestrator shares one
/// handle across worker threads when processing batches in parallel. The
/// call is blocking from the pipeline's point of view; callers that need
/// timeouts impose them around the implementation.
pub trait TextDetector: Send + Sync {
    /// Detects text fragments in the given image.
    ///
    /// # Returns
    ///
    /// One [`RawDetection`] per recognized fragment. An image with no
    /// readable text yields an empty vector, which is not an error.
    fn detect(&self, image: &RgbImage) -> AnalysisResult<Vec<RawDetection>>;
}

/// Drops detections below the confidence threshold.
///
/// Applied between the detector and the parser so that low-quality
/// fragments never reach pattern matching.
pub fn filter_by_confidence(
    detections: Vec<RawDetection>,
    threshold: f32,
) -> Vec<RawDetection> {
    detections
        .into_iter()
        .filter(|d| d.confidence > threshold)
        .collect()
}
