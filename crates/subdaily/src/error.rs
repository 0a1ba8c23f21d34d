//! Error types for the helios-subdaily crate.

use helios_array::ArrayError;
use helios_calendar::CalendarError;
use helios_solar::SolarError;
use helios_units::UnitError;

/// Error type for all fallible operations in the helios-subdaily crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubdailyError {
    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an input has no time coordinate.
    #[error("{name}: missing time coordinate")]
    MissingTimeCoordinate {
        /// Name of the input.
        name: String,
    },

    /// Returned when the inputs are not daily series.
    #[error("expected a daily time step, got {step} s")]
    NotDaily {
        /// Inferred step in seconds.
        step: i64,
    },

    /// Solar geometry error.
    #[error(transparent)]
    Solar(#[from] SolarError),

    /// Unit error.
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Array error.
    #[error(transparent)]
    Array(#[from] ArrayError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_config() {
        let e = SubdailyError::InvalidConfig {
            reason: "steps_per_day must be >= 1".to_string(),
        };
        assert_eq!(e.to_string(), "invalid configuration: steps_per_day must be >= 1");
    }

    #[test]
    fn display_not_daily() {
        let e = SubdailyError::NotDaily { step: 3600 };
        assert_eq!(e.to_string(), "expected a daily time step, got 3600 s");
    }

    #[test]
    fn display_missing_time() {
        let e = SubdailyError::MissingTimeCoordinate {
            name: "tasmax".to_string(),
        };
        assert_eq!(e.to_string(), "tasmax: missing time coordinate");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SubdailyError>();
    }
}
