use crate::config::ValidationConfig;
use crate::constants::{logging as logging_constants, validation};
use crate::error::{Result, ValhookError};
use crate::logging::{LogConfig, LogFormat};
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::Level;

/// Hook configuration as stored on disk (TOML or JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfigFile {
    /// Validation hook settings
    #[serde(default)]
    pub validation: ValidationSection,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSection {
    /// Summary name prefix (default: "validation")
    pub prefix: String,

    /// Epochs between validation passes (default: 1)
    pub period: usize,

    /// Graph output with the per-batch wrong count (default: "wrong:0")
    pub wrong_output: String,

    /// Graph output with the per-batch mean cost (default: "cost:0")
    pub cost_output: String,

    /// Draw a progress bar while a pass runs (default: true)
    pub show_progress: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// One of trace, debug, info, warn, error (default: "info")
    pub level: String,

    /// One of compact, pretty, json (default: "compact")
    pub format: String,

    /// Also write JSON logs to a daily rolling file (default: false)
    pub file_logging: bool,

    /// Directory for file logs (default: "logs")
    pub log_directory: Option<String>,

    /// Install the Prometheus exporter for pass metrics (default: false)
    pub metrics_exporter: bool,
}

impl Default for ValidationSection {
    fn default() -> Self {
        Self {
            prefix: validation::DEFAULT_PREFIX.to_string(),
            period: validation::DEFAULT_PERIOD,
            wrong_output: validation::DEFAULT_WRONG_OUTPUT.to_string(),
            cost_output: validation::DEFAULT_COST_OUTPUT.to_string(),
            show_progress: true,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            file_logging: false,
            log_directory: Some(logging_constants::DEFAULT_LOG_DIRECTORY.to_string()),
            metrics_exporter: false,
        }
    }
}

impl ValidationConfigFile {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ValhookError::Parse(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| ValhookError::Parse(format!("Failed to parse JSON config: {}", e)))
    }

    /// Save configuration to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ValhookError::Serialization(format!("Failed to serialize to TOML: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Convert to a validated ValidationConfig
    pub fn to_validation_config(&self) -> Result<ValidationConfig> {
        let config = ValidationConfig {
            prefix: self.validation.prefix.clone(),
            period: self.validation.period,
            wrong_output: self.validation.wrong_output.clone(),
            cost_output: self.validation.cost_output.clone(),
            show_progress: self.validation.show_progress,
        };
        config.validate()?;
        Ok(config)
    }

    /// Convert to LogConfig
    pub fn to_log_config(&self) -> Result<LogConfig> {
        let level = self
            .logging
            .level
            .parse::<Level>()
            .map_err(|_| ValhookError::Parse(format!("Invalid log level: {}", self.logging.level)))?;

        let format = match self.logging.format.to_lowercase().as_str() {
            "compact" => LogFormat::Compact,
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ValhookError::Parse(format!(
                    "Invalid log format: {}. Must be compact, pretty or json",
                    other
                )))
            }
        };

        Ok(LogConfig {
            level,
            format,
            enable_file_logging: self.logging.file_logging,
            log_directory: self.logging.log_directory.clone(),
            enable_metrics_exporter: self.logging.metrics_exporter,
        })
    }
}
