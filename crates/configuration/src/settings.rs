use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing sections fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: Analysis,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub output: Output,
}

/// Defaults handed to the analytics engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Analysis {
    /// Rolling window length in trading days.
    pub window_size: usize,
    /// Annual risk-free rate as a fraction. 0.04 corresponds to 4%.
    pub risk_free_rate: f64,
    /// Daily return threshold for upside/downside deviation.
    pub target_return: f64,
    /// Window count from which rolling evaluation runs on all cores.
    pub parallel_threshold: usize,
}

/// Where and how verbosely to log.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Filter directive used when `RUST_LOG` is not set (e.g. "info", "analytics=debug").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Output {
    pub format: OutputFormat,
}

/// How results are printed by the command-line front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for Analysis {
    fn default() -> Self {
        Self {
            window_size: 30,
            risk_free_rate: 0.0,
            target_return: 0.0,
            parallel_threshold: 512,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "curvestats.log".to_string(),
        }
    }
}

impl Config {
    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analysis;
        if a.window_size == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.window_size must be at least 1".to_string(),
            ));
        }
        if !a.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "analysis.risk_free_rate must be finite, got {}",
                a.risk_free_rate
            )));
        }
        if !a.target_return.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "analysis.target_return must be finite, got {}",
                a.target_return
            )));
        }
        if a.parallel_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.parallel_threshold must be at least 1".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
