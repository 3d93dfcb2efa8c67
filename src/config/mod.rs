//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::{Objective, DEFAULT_BAND_MARGIN};
use crate::models::MetricKey;
use crate::teams::DEFAULT_LOW_CONFIDENCE_MARGIN;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Analysis tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Fraction of the leading team's votes within which the runner-up
    /// makes an inferred attribution low-confidence
    #[serde(default = "default_low_confidence_margin")]
    pub low_confidence_margin: f64,

    /// Points either side of a metric threshold banded as marginal
    #[serde(default = "default_band_margin")]
    pub band_margin: f64,

    /// Rows returned by rankings
    #[serde(default = "default_ranking_limit")]
    pub ranking_limit: usize,

    /// Timeline window length in minutes
    #[serde(default = "default_timeline_window")]
    pub timeline_window_minutes: u64,
}

fn default_low_confidence_margin() -> f64 {
    DEFAULT_LOW_CONFIDENCE_MARGIN
}

fn default_band_margin() -> f64 {
    DEFAULT_BAND_MARGIN
}

fn default_ranking_limit() -> usize {
    10
}

fn default_timeline_window() -> u64 {
    10
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            low_confidence_margin: default_low_confidence_margin(),
            band_margin: default_band_margin(),
            ranking_limit: default_ranking_limit(),
            timeline_window_minutes: default_timeline_window(),
        }
    }
}

impl AnalysisConfig {
    pub fn timeline_window_ms(&self) -> u64 {
        self.timeline_window_minutes.saturating_mul(60 * 1000)
    }
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Metric slug to objective expression. An empty expression disables
    /// the catalog default for that metric.
    #[serde(default)]
    pub objectives: BTreeMap<String, String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            analysis: AnalysisConfig::default(),
            objectives: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let margin = self.analysis.low_confidence_margin;
        if !(0.0..=1.0).contains(&margin) {
            return Err(ConfigError::ValidationError(format!(
                "low_confidence_margin must be between 0 and 1, got {}",
                margin
            )));
        }

        let band = self.analysis.band_margin;
        if !(0.0..=50.0).contains(&band) {
            return Err(ConfigError::ValidationError(format!(
                "band_margin must be between 0 and 50 points, got {}",
                band
            )));
        }

        if self.analysis.ranking_limit == 0 {
            return Err(ConfigError::ValidationError(
                "ranking_limit must be greater than 0".to_string(),
            ));
        }

        if self.analysis.timeline_window_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "timeline_window_minutes must be greater than 0".to_string(),
            ));
        }

        self.objective_overrides()?;
        Ok(())
    }

    /// Objective overrides keyed by metric.
    pub fn objective_overrides(&self) -> Result<BTreeMap<MetricKey, String>, ConfigError> {
        let mut overrides = BTreeMap::new();
        for (slug, expression) in &self.objectives {
            let key = MetricKey::from_slug(slug).ok_or_else(|| {
                ConfigError::ValidationError(format!("Unknown metric in [objectives]: {}", slug))
            })?;
            if !expression.trim().is_empty() {
                expression.parse::<Objective>().map_err(|e| {
                    ConfigError::ValidationError(format!(
                        "Objective for {}: {:?}: {}",
                        slug, expression, e
                    ))
                })?;
            }
            overrides.insert(key, expression.trim().to_string());
        }
        Ok(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.analysis.low_confidence_margin, 0.1);
        assert_eq!(config.analysis.band_margin, 5.0);
        assert_eq!(config.analysis.ranking_limit, 10);
        assert_eq!(config.analysis.timeline_window_ms(), 600_000);
        assert!(config.objectives.is_empty());
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_margins() {
        let mut config = AppConfig::default();
        config.analysis.low_confidence_margin = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.analysis.band_margin = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_limit() {
        let mut config = AppConfig::default();
        config.analysis.ranking_limit = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_objectives() {
        let mut config = AppConfig::default();
        config
            .objectives
            .insert("turnover-rate".to_string(), "<10".to_string());
        config
            .objectives
            .insert("shooting_efficiency".to_string(), String::new());
        let overrides = config.objective_overrides().unwrap();
        assert_eq!(overrides.get(&MetricKey::TurnoverRate).map(String::as_str), Some("<10"));
        assert_eq!(overrides.get(&MetricKey::ShootingEfficiency).map(String::as_str), Some(""));

        config
            .objectives
            .insert("possession_magic".to_string(), "50".to_string());
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config
            .objectives
            .insert("turnover_rate".to_string(), "peu".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = AppConfig::default();
        config
            .objectives
            .insert("goalkeeper_save_rate".to_string(), ">=35".to_string());
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_from_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/handball\"\n\n[analysis]\nranking_limit = 5\n\n[objectives]\nattack_efficiency = \"50-60\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/handball"));
        assert_eq!(config.analysis.ranking_limit, 5);
        assert_eq!(config.analysis.band_margin, 5.0);
        assert_eq!(config.objectives.len(), 1);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analysis\nranking_limit = ").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
