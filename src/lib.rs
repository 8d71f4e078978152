//! # equimeter
//!
//! Extracts printed dimension annotations from photographs of industrial
//! equipment (scoops, buckets, hoppers, tanks) and computes the
//! equipment's surface area from them.
//!
//! The pipeline runs in four stages over the output of an external OCR
//! engine:
//!
//! - **Dimension parsing**: noisy OCR text fragments become normalized
//!   millimeter measurements, with OCR-misread correction, unit inference,
//!   plausibility filtering, and deduplication.
//! - **Shape classification**: a prioritized rule table infers the
//!   geometric archetype (cylinder, box, frustum, bucket, scoop, hopper)
//!   from the measurement set and file-name hints.
//! - **Surface-area calculation**: closed-form formulas per shape, with
//!   magnitude-heuristic role assignment kept behind a swappable policy.
//! - **Orchestration**: per-image records and batch reports with failure
//!   isolation; one bad image never aborts a batch.
//!
//! OCR itself is a collaborator behind the [`pipeline::TextDetector`]
//! trait; this crate contains no model inference.
//!
//! ## Modules
//!
//! * [`core`] - Error handling and configuration
//! * [`domain`] - Immutable value objects (detections, dimensions, shapes, results)
//! * [`processors`] - Pure transformation stages (parser, classifier, calculator)
//! * [`pipeline`] - Orchestration, reports, and the detector boundary
//! * [`utils`] - Image loading helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use equimeter::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # fn detector() -> Arc<dyn TextDetector> { unimplemented!() }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // The detector handle is created once and shared across all images.
//! let analyzer = EquipmentAnalyzer::new(detector());
//!
//! let paths = vec![
//!     PathBuf::from("photos/scoop_01.jpg"),
//!     PathBuf::from("photos/bucket_02.jpg"),
//! ];
//! let report = analyzer.analyze_batch(&paths);
//! println!("{report}");
//! report.save_json(std::path::Path::new("results.json"))?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod pipeline;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use equimeter::prelude::*;
/// ```
pub mod prelude {
    // Error handling
    pub use crate::core::{AnalysisError, AnalysisResult};

    // Configuration
    pub use crate::core::{ClassifierConfig, ConfigLoader, ParserConfig, PipelineConfig};

    // Domain types
    pub use crate::domain::{Dimension, EquipmentShape, RawDetection, SurfaceAreaResult, Unit, to_mm};

    // Geometry types
    pub use crate::processors::{BoundingBox, Point};

    // Processing stages
    pub use crate::processors::{DimensionParser, ShapeClassifier, SurfaceAreaCalculator};

    // Pipeline (high-level API)
    pub use crate::pipeline::{
        AnalysisOutcome, BatchReport, EquipmentAnalyzer, ImageAnalysis, PipelineStats,
        ProcessingStrategy, TextDetector,
    };

    // Image utilities
    pub use crate::utils::load_image;
}
