//! Error types for the dimension-analysis pipeline.
//!
//! This module defines the error types that can occur while turning raw OCR
//! detections into surface-area results: image loading errors, processing
//! errors tagged with the pipeline stage they occurred in, detector
//! (collaborator) errors, and configuration errors. Helper constructors are
//! provided so call sites can build well-formed errors without boilerplate.

use thiserror::Error;

/// Enum representing different stages of processing in the analysis pipeline.
///
/// This enum is used to identify which stage of the pipeline an error
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred while parsing dimensions out of OCR text.
    DimensionParsing,
    /// Error occurred during shape classification.
    ShapeClassification,
    /// Error occurred during surface-area calculation.
    AreaCalculation,
    /// Error occurred during batch processing.
    BatchProcessing,
    /// Error occurred while serializing or writing a report.
    Reporting,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::DimensionParsing => write!(f, "dimension parsing"),
            ProcessingStage::ShapeClassification => write!(f, "shape classification"),
            ProcessingStage::AreaCalculation => write!(f, "area calculation"),
            ProcessingStage::BatchProcessing => write!(f, "batch processing"),
            ProcessingStage::Reporting => write!(f, "reporting"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing errors that can occur in the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error reported by the external text-detection collaborator.
    #[error("text detection: {message}")]
    Detection {
        /// A message describing the detector failure.
        message: String,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },
}

/// Convenient result alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

impl AnalysisError {
    /// Creates a processing error with the given stage, context, and source.
    pub fn processing(
        kind: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AnalysisError::Processing {
            kind,
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Creates a detector-failure error with the given message.
    pub fn detection(message: impl Into<String>) -> Self {
        AnalysisError::Detection {
            message: message.into(),
        }
    }

    /// Creates an invalid-input error with the given message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error with the given message.
    pub fn config_error(message: impl Into<String>) -> Self {
        AnalysisError::ConfigError {
            message: message.into(),
        }
    }
}
