//! TOML configuration for the whole workspace.

use std::path::Path;

use helios_resample::Options;
use helios_solar::{SolarError, SolarMethod};
use helios_subdaily::{SubdailyConfig, SubdailyError};
use serde::Deserialize;

/// Error raised while loading or converting a [`HeliosConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The TOML text is malformed or has unknown keys.
    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid `[solar]` section.
    #[error(transparent)]
    Solar(#[from] SolarError),

    /// Invalid `[subdaily]` section.
    #[error(transparent)]
    Subdaily(#[from] SubdailyError),
}

/// Top-level configuration.
///
/// Every section and key is optional; missing values take the library
/// defaults.
///
/// ```toml
/// [resample]
/// map_blocks = true
///
/// [solar]
/// method = "spencer"
///
/// [subdaily]
/// steps_per_day = 48
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeliosConfig {
    /// Resample dispatcher settings.
    #[serde(default)]
    pub resample: ResampleToml,

    /// Solar geometry settings.
    #[serde(default)]
    pub solar: SolarToml,

    /// Sub-daily interpolation settings.
    #[serde(default)]
    pub subdaily: SubdailyToml,
}

/// `[resample]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResampleToml {
    /// Execution-mode flag; absent means automatic.
    #[serde(default)]
    pub map_blocks: Option<bool>,
}

/// `[solar]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolarToml {
    /// Orbital approximation, `"simple"` or `"spencer"` (the default).
    #[serde(default = "default_method")]
    pub method: String,
}

impl Default for SolarToml {
    fn default() -> Self {
        Self {
            method: default_method(),
        }
    }
}

fn default_method() -> String {
    SolarMethod::default().to_string()
}

/// `[subdaily]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubdailyToml {
    /// Output samples per day; must split a day into whole seconds.
    #[serde(default = "default_steps_per_day")]
    pub steps_per_day: u32,
}

impl Default for SubdailyToml {
    fn default() -> Self {
        Self {
            steps_per_day: default_steps_per_day(),
        }
    }
}

fn default_steps_per_day() -> u32 {
    SubdailyConfig::new().steps_per_day()
}

impl HeliosConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Dispatcher options.
    pub fn options(&self) -> Options {
        Options::new().with_map_blocks(self.resample.map_blocks)
    }

    /// Declination method.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Solar`] for an unknown method label.
    pub fn solar_method(&self) -> Result<SolarMethod, ConfigError> {
        Ok(self.solar.method.parse()?)
    }

    /// Validated sub-daily configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Solar`] for an unknown method label and
    /// [`ConfigError::Subdaily`] for an invalid step count.
    pub fn subdaily_config(&self) -> Result<SubdailyConfig, ConfigError> {
        let config = SubdailyConfig::new()
            .with_steps_per_day(self.subdaily.steps_per_day)
            .with_method(self.solar_method()?);
        config.validate()?;
        Ok(config)
    }
}
