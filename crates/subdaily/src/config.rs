//! Configuration for sub-daily interpolation.

use helios_calendar::SECONDS_PER_DAY;
use helios_solar::SolarMethod;

use crate::error::SubdailyError;

/// Configuration for the sub-daily temperature interpolator.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use helios_subdaily::SubdailyConfig;
///
/// let config = SubdailyConfig::new().with_steps_per_day(48);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.step_seconds(), 1800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdailyConfig {
    steps_per_day: u32,
    method: SolarMethod,
}

impl SubdailyConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `steps_per_day = 24`, `method = Spencer`.
    pub fn new() -> Self {
        Self {
            steps_per_day: 24,
            method: SolarMethod::Spencer,
        }
    }

    /// Sets the number of output steps per day.
    pub fn with_steps_per_day(mut self, n: u32) -> Self {
        self.steps_per_day = n;
        self
    }

    /// Sets the declination method used for day lengths.
    pub fn with_method(mut self, method: SolarMethod) -> Self {
        self.method = method;
        self
    }

    // --- Accessors ---

    /// Returns the number of output steps per day.
    pub fn steps_per_day(&self) -> u32 {
        self.steps_per_day
    }

    /// Returns the declination method.
    pub fn method(&self) -> SolarMethod {
        self.method
    }

    /// Returns the output step in seconds.
    ///
    /// Meaningful only for a validated configuration.
    pub fn step_seconds(&self) -> i64 {
        SECONDS_PER_DAY / i64::from(self.steps_per_day.max(1))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SubdailyError::InvalidConfig`] if `steps_per_day` is zero
    /// or does not divide a day into whole seconds.
    pub fn validate(&self) -> Result<(), SubdailyError> {
        if self.steps_per_day == 0 {
            return Err(SubdailyError::InvalidConfig {
                reason: "steps_per_day must be >= 1".to_string(),
            });
        }
        if SECONDS_PER_DAY % i64::from(self.steps_per_day) != 0 {
            return Err(SubdailyError::InvalidConfig {
                reason: format!(
                    "steps_per_day must divide {SECONDS_PER_DAY} s evenly, got {}",
                    self.steps_per_day
                ),
            });
        }
        Ok(())
    }
}

impl Default for SubdailyConfig {
    fn default() -> Self {
        Self::new()
    }
}
