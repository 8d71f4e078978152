//! Configuration types for the analysis pipeline.
//!
//! The thresholds used by the dimension parser and the keyword lexicon used
//! by the shape classifier were tuned empirically on field photos, so they
//! are kept configurable rather than hard-wired. Configuration can be loaded
//! from TOML or JSON files, auto-detected by extension.

use crate::core::AnalysisError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the dimension parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Detections below this confidence are discarded before parsing.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f32,
    /// Bare numbers (no unit token) below this value are rejected as
    /// likely confidence-score fragments or reference indices.
    #[serde(default = "default_min_plausible_value")]
    pub min_plausible_value: f64,
    /// Magnitude cutoff for unit inference on bare numbers: values below
    /// the cutoff are read as centimeters, values at or above it as
    /// millimeters.
    #[serde(default = "default_unit_inference_cutoff")]
    pub unit_inference_cutoff: f64,
    /// When false, bare numbers without a unit token are dropped instead
    /// of having their unit inferred by magnitude.
    #[serde(default = "default_true")]
    pub infer_units: bool,
}

fn default_confidence_threshold() -> f32 {
    0.3
}

fn default_min_plausible_value() -> f64 {
    2.0
}

fn default_unit_inference_cutoff() -> f64 {
    1000.0
}

fn default_true() -> bool {
    true
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            min_plausible_value: default_min_plausible_value(),
            unit_inference_cutoff: default_unit_inference_cutoff(),
            infer_units: true,
        }
    }
}

/// Keyword lexicon consulted by the shape classifier's hint rules.
///
/// Keywords are matched as substrings of the lowercased hint text (usually
/// a file name). Localized synonyms observed on supplier labels are part of
/// the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Keywords identifying scoops.
    #[serde(default = "default_scoop_keywords")]
    pub scoop_keywords: Vec<String>,
    /// Keywords identifying buckets.
    #[serde(default = "default_bucket_keywords")]
    pub bucket_keywords: Vec<String>,
    /// Keywords identifying hoppers.
    #[serde(default = "default_hopper_keywords")]
    pub hopper_keywords: Vec<String>,
    /// Keywords identifying tanks and containers.
    #[serde(default = "default_tank_keywords")]
    pub tank_keywords: Vec<String>,
    /// Keywords identifying mixers.
    #[serde(default = "default_mixer_keywords")]
    pub mixer_keywords: Vec<String>,
}

fn default_scoop_keywords() -> Vec<String> {
    vec!["scoop".into()]
}

fn default_bucket_keywords() -> Vec<String> {
    vec!["bucket".into(), "통".into(), "바스켓".into()]
}

fn default_hopper_keywords() -> Vec<String> {
    vec!["hopper".into(), "호퍼".into()]
}

fn default_tank_keywords() -> Vec<String> {
    vec!["tank".into(), "탱크".into(), "container".into()]
}

fn default_mixer_keywords() -> Vec<String> {
    vec!["mixer".into(), "혼합".into()]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            scoop_keywords: default_scoop_keywords(),
            bucket_keywords: default_bucket_keywords(),
            hopper_keywords: default_hopper_keywords(),
            tank_keywords: default_tank_keywords(),
            mixer_keywords: default_mixer_keywords(),
        }
    }
}

/// Top-level configuration for the analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Dimension parser settings.
    #[serde(default)]
    pub parser: ParserConfig,
    /// Shape classifier lexicon.
    #[serde(default)]
    pub classifier: ClassifierConfig,
    /// Batches larger than this are processed in parallel when the
    /// processing strategy is `Auto`.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_parallel_threshold() -> usize {
    8
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            classifier: ClassifierConfig::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

/// Configuration file format.
#[derive(Debug, Clone, Copy)]
pub enum ConfigFormat {
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Loader for pipeline configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from a file, auto-detecting the format from the
    /// extension.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// A Result containing the loaded PipelineConfig or an AnalysisError
    pub fn load_from_file(path: &Path) -> Result<PipelineConfig, AnalysisError> {
        let format =
            ConfigFormat::from_extension(path).ok_or_else(|| AnalysisError::ConfigError {
                message: format!("Unsupported config file extension: {:?}", path.extension()),
            })?;

        let content = std::fs::read_to_string(path).map_err(|e| AnalysisError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        Self::load_from_string(&content, format)
    }

    /// Loads configuration from a string with the specified format.
    pub fn load_from_string(
        content: &str,
        format: ConfigFormat,
    ) -> Result<PipelineConfig, AnalysisError> {
        match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| AnalysisError::ConfigError {
                message: format!("Failed to parse TOML config: {e}"),
            }),
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| AnalysisError::ConfigError {
                    message: format!("Failed to parse JSON config: {e}"),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.confidence_threshold, 0.3);
        assert_eq!(config.min_plausible_value, 2.0);
        assert_eq!(config.unit_inference_cutoff, 1000.0);
        assert!(config.infer_units);
    }

    #[test]
    fn test_classifier_defaults_include_localized_synonyms() {
        let config = ClassifierConfig::default();
        assert!(config.bucket_keywords.iter().any(|k| k == "통"));
        assert!(config.hopper_keywords.iter().any(|k| k == "호퍼"));
        assert!(config.tank_keywords.iter().any(|k| k == "container"));
    }

    #[test]
    fn test_load_partial_toml() {
        let toml = r#"
            parallel_threshold = 16

            [parser]
            min_plausible_value = 5.0
        "#;
        let config = ConfigLoader::load_from_string(toml, ConfigFormat::Toml).unwrap();
        assert_eq!(config.parallel_threshold, 16);
        assert_eq!(config.parser.min_plausible_value, 5.0);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.parser.confidence_threshold, 0.3);
        assert!(!config.classifier.scoop_keywords.is_empty());
    }

    #[test]
    fn test_load_json() {
        let json = r#"{"parser": {"infer_units": false}}"#;
        let config = ConfigLoader::load_from_string(json, ConfigFormat::Json).unwrap();
        assert!(!config.parser.infer_units);
    }

    #[test]
    fn test_format_detection() {
        assert!(matches!(
            ConfigFormat::from_extension(Path::new("pipeline.toml")),
            Some(ConfigFormat::Toml)
        ));
        assert!(matches!(
            ConfigFormat::from_extension(Path::new("pipeline.json")),
            Some(ConfigFormat::Json)
        ));
        assert!(ConfigFormat::from_extension(Path::new("pipeline.yaml")).is_none());
    }
}
