//! Layered configuration: defaults, TOML file, environment, then CLI.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color_list::InitialColors;
use crate::widget::WidgetOptions;

/// Palette used when nothing else is configured.
pub const DEFAULT_PALETTE: [&str; 9] = [
    "#335791", "#db4e4e", "#f68e59", "#cba6f7", "#a6e3a1", "#f38ba8", "#99d1db", "#ffd072",
    "#f4b8e4",
];

/// Prefix for environment overrides, e.g. `SWATCHES_WIDGET__HISTORY_LENGTH`.
pub const ENV_PREFIX: &str = "SWATCHES_";

/// Error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("at least one color is required")]
    NoColors,
    #[error("color {index} is empty")]
    EmptyColor { index: usize },
    #[error("history_length must be at least 1")]
    ZeroHistory,
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwatchConfig {
    pub widget: WidgetOptions,
    pub export: ExportConfig,
}

impl Default for SwatchConfig {
    fn default() -> Self {
        Self {
            widget: WidgetOptions {
                colors: InitialColors::from(&DEFAULT_PALETTE[..]),
                ..WidgetOptions::default()
            },
            export: ExportConfig::default(),
        }
    }
}

/// Where exported style files go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("swatches.mplstyle"),
        }
    }
}

/// Values set explicitly on the command line. Unset fields are skipped
/// when serialized so they never mask lower layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub widget: WidgetOverrides,
    pub export: ExportOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct WidgetOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_length: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SwatchConfig {
    /// Build the provider chain without extracting.
    pub fn figment(file: Option<&Path>, overrides: &ConfigOverrides) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["log"]).split("__"))
            .merge(Serialized::defaults(overrides))
    }

    /// Load and validate the effective configuration.
    pub fn load(file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(path) = file
            && !path.exists()
        {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let config: Self = Self::figment(file, overrides)
            .extract()
            .map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let colors = self.widget.colors.clone().into_vec();
        if colors.is_empty() {
            return Err(ConfigError::NoColors);
        }
        if let Some(index) = colors.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigError::EmptyColor { index });
        }
        if self.widget.history_length == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SwatchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.widget.colors.clone().into_vec().len(), 9);
        assert_eq!(config.widget.history_length, 10);
    }

    #[test]
    fn empty_color_is_reported_by_index() {
        let mut config = SwatchConfig::default();
        config.widget.colors = InitialColors::from(&["#111111", " "][..]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyColor { index: 1 })
        ));
    }

    #[test]
    fn zero_history_is_rejected() {
        let mut config = SwatchConfig::default();
        config.widget.history_length = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroHistory)));
    }

    #[test]
    fn empty_list_is_rejected() {
        let mut config = SwatchConfig::default();
        config.widget.colors = InitialColors::Many(Vec::new());
        assert!(matches!(config.validate(), Err(ConfigError::NoColors)));
    }
}
