//! Configuration management for the skill gap analyzer

use crate::error::{Result, SkillGapError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Weights of the composite fit score and TF-IDF vectorizer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub required_weight: f64,
    pub preferred_weight: f64,
    pub similarity_weight: f64,
    pub max_features: usize,
    pub ngram_range: (usize, usize),
    pub min_df: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub name_scan_lines: usize,
    pub context_before: usize,
    pub context_after: usize,
    pub min_skill_length: usize,
    pub max_skill_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            required_weight: 60.0,
            preferred_weight: 20.0,
            similarity_weight: 20.0,
            max_features: 1000,
            ngram_range: (1, 2),
            min_df: 1,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            name_scan_lines: 5,
            context_before: 50,
            context_after: 150,
            min_skill_length: 2,
            max_skill_length: 50,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location (written with
    /// defaults on first use).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(SkillGapError::Configuration(format!(
                        "Config file does not exist: {}",
                        explicit.display()
                    )));
                }
                let content = std::fs::read_to_string(explicit)?;
                Self::from_toml_str(&content)
            }
            None => {
                let config_path = Self::config_path();

                if config_path.exists() {
                    let content = std::fs::read_to_string(&config_path)?;
                    Self::from_toml_str(&content)
                } else {
                    let config = Self::default();
                    config.save()?;
                    Ok(config)
                }
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SkillGapError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-gap")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        let weights = [
            scoring.required_weight,
            scoring.preferred_weight,
            scoring.similarity_weight,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(SkillGapError::Configuration(
                "Scoring weights must be finite and non-negative".to_string(),
            ));
        }
        if weights.iter().sum::<f64>() > 100.0 + f64::EPSILON {
            return Err(SkillGapError::Configuration(
                "Scoring weights must not sum to more than 100".to_string(),
            ));
        }

        let (low, high) = scoring.ngram_range;
        if low == 0 || low > high {
            return Err(SkillGapError::Configuration(format!(
                "Invalid ngram_range ({}, {})",
                low, high
            )));
        }
        if scoring.max_features == 0 || scoring.min_df == 0 {
            return Err(SkillGapError::Configuration(
                "max_features and min_df must be at least 1".to_string(),
            ));
        }

        let extraction = &self.extraction;
        if extraction.min_skill_length > extraction.max_skill_length {
            return Err(SkillGapError::Configuration(
                "min_skill_length must not exceed max_skill_length".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scoring_model() {
        let config = Config::default();
        assert_eq!(config.scoring.required_weight, 60.0);
        assert_eq!(config.scoring.preferred_weight, 20.0);
        assert_eq!(config.scoring.similarity_weight, 20.0);
        assert_eq!(config.scoring.max_features, 1000);
        assert_eq!(config.scoring.ngram_range, (1, 2));
        assert_eq!(config.extraction.name_scan_lines, 5);
        assert_eq!(config.extraction.context_before, 50);
        assert_eq!(config.extraction.context_after, 150);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.color_output);
        assert_eq!(config.scoring.required_weight, 60.0);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml_str(&serialized).unwrap();
        assert_eq!(parsed.scoring.ngram_range, config.scoring.ngram_range);
        assert_eq!(parsed.output.format, config.output.format);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let result = Config::from_toml_str(
            r#"
            [scoring]
            required_weight = 90.0
            preferred_weight = 20.0
            "#,
        );
        assert!(matches!(result, Err(SkillGapError::Configuration(_))));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let result = Config::load(Some(Path::new("/definitely/not/here/config.toml")));
        assert!(matches!(result, Err(SkillGapError::Configuration(_))));
    }
}
