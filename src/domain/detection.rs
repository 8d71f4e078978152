//! Raw text-detection output from the OCR collaborator.

use crate::processors::BoundingBox;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single text fragment detected in an image.
///
/// This is the input boundary of the pipeline: the external OCR engine
/// produces one `RawDetection` per recognized text fragment. Instances are
/// immutable once created; everything downstream derives new value objects
/// from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDetection {
    /// The recognized text fragment.
    pub text: Arc<str>,
    /// The confidence score for the recognized text, in [0, 1].
    pub confidence: f32,
    /// The bounding polygon of the detected text region.
    pub bounding_box: BoundingBox,
}

impl RawDetection {
    /// Creates a new detection from recognized text, its confidence, and
    /// its bounding polygon.
    pub fn new(text: impl Into<Arc<str>>, confidence: f32, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            confidence,
            bounding_box,
        }
    }
}
