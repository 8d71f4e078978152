//! Core error and configuration types shared across the pipeline.

pub mod config;
pub mod errors;

pub use config::{ClassifierConfig, ConfigFormat, ConfigLoader, ParserConfig, PipelineConfig};
pub use errors::{AnalysisError, AnalysisResult, ProcessingStage};
