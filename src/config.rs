use std::path::Path;

use log::warn;

use crate::ai::RolloutConfig;
use crate::error::ConfigError;
use crate::experiment::ExperimentConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: RolloutConfig,
    pub experiment: ExperimentConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.simulations == 0 {
            return Err(ConfigError::Validation(
                "game.simulations must be >= 1".into(),
            ));
        }
        if self.game.rollout_chunks == 0 {
            return Err(ConfigError::Validation(
                "game.rollout_chunks must be >= 1".into(),
            ));
        }
        if self.experiment.budgets.contains(&0) {
            return Err(ConfigError::Validation(
                "experiment.budgets must all be >= 1".into(),
            ));
        }
        self.experiment.validate()
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
