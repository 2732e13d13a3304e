//! Service Configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `HEART_RISK__SECTION__KEY` environment variables.

use config::{Config, ConfigError, Environment, File};
use data_validator::ValidationConfig;
use inference_engine::{
    ArtifactPaths, DEFAULT_CONTINUOUS_MODEL_FILE, DEFAULT_DISCRETE_MODEL_FILE, DEFAULT_MODELS_DIR,
    DEFAULT_SCALER_FILE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file consulted when `HEART_RISK_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/heart-risk.toml";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub models: ModelsConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the form is served on
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:7860".to_string(),
        }
    }
}

/// Model artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Directory holding the artifacts
    pub dir: PathBuf,
    pub scaler_file: String,
    /// Checked first
    pub continuous_model_file: String,
    /// Checked when the continuous model is absent
    pub discrete_model_file: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_MODELS_DIR),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
            continuous_model_file: DEFAULT_CONTINUOUS_MODEL_FILE.to_string(),
            discrete_model_file: DEFAULT_DISCRETE_MODEL_FILE.to_string(),
        }
    }
}

impl ModelsConfig {
    /// Resolved artifact paths
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            scaler: self.dir.join(&self.scaler_file),
            continuous_model: self.dir.join(&self.continuous_model_file),
            discrete_model: self.dir.join(&self.discrete_model_file),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve `/metrics`
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl AppConfig {
    /// Load from `HEART_RISK_CONFIG` or the default path
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("HEART_RISK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from_path(path)
    }

    /// Load with a specific file layered over the defaults; the file may be absent
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("HEART_RISK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Resolved artifact paths
    pub fn artifact_paths(&self) -> ArtifactPaths {
        self.models.artifact_paths()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:7860");
        assert!(config.validation.enabled);
        assert!(config.metrics.enabled);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.artifact_paths(), ArtifactPaths::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_path(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.models.dir, PathBuf::from("saved_models"));
        assert_eq!(config.models.scaler_file, "scaler.json");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heart-risk.toml");
        fs::write(
            &path,
            r#"
[server]
bind_addr = "0.0.0.0:9000"

[models]
dir = "/srv/models"

[validation]
enabled = false

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert!(!config.validation.enabled);
        assert_eq!(config.logging.format, LogFormat::Json);
        // Untouched keys keep their defaults
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.artifact_paths().discrete_model,
            PathBuf::from("/srv/models/best_model.json")
        );
    }
}
