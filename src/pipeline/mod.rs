//! Pipeline orchestration.
//!
//! Wires the detector boundary and the pure processing stages into an
//! end-to-end analyzer, and defines the per-image and batch result
//! records it produces.

pub mod analyzer;
pub mod detector;
pub mod report;
pub mod stats;

pub use analyzer::{EquipmentAnalyzer, ProcessingStrategy};
pub use detector::{TextDetector, filter_by_confidence};
pub use report::{AnalysisOutcome, BatchReport, BatchSummary, ImageAnalysis};
pub use stats::{PipelineStats, StatsManager};
