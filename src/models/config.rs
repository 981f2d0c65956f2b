use map_palette::{Color, ResolveOptions, TableMode, DEFAULT_ALPHA_COLOR, DEFAULT_INTERVAL};
use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::services::Conversion;

/// Conversion settings loaded from a YAML file
///
/// ```yaml
/// alpha_color: [255, 0, 255]   # or "#FF00FF"
/// interval: 10
/// use_grid: true
/// approximate: true
/// ```
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Color standing in for the transparent palette slot
    pub alpha_color: Color,

    /// Grid interval for approximate conversion; 1 means exact nearest color
    pub interval: u32,

    /// Dense array tables (true) or sparse map tables (false)
    pub use_grid: bool,

    /// Snap off-palette colors to the nearest entry instead of failing
    pub approximate: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            alpha_color: DEFAULT_ALPHA_COLOR,
            interval: DEFAULT_INTERVAL,
            use_grid: true,
            approximate: true,
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    alpha = %config.alpha_color,
                    interval = config.interval,
                    use_grid = config.use_grid,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval == 0 {
            return Err(ConfigError::Invalid(
                "interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn table_mode(&self) -> TableMode {
        TableMode::from_use_grid(self.use_grid)
    }

    /// How image pixels are turned into palette indices
    pub fn conversion(&self) -> Conversion {
        if !self.approximate {
            Conversion::Exact
        } else if self.interval <= 1 {
            Conversion::Nearest
        } else {
            Conversion::Grid(ResolveOptions {
                interval: self.interval,
                mode: self.table_mode(),
            })
        }
    }
}
