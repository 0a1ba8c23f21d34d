//! Error types for the helios-solar crate.

use helios_array::ArrayError;
use helios_calendar::CalendarError;
use helios_units::UnitError;

/// Error type for all fallible operations in the helios-solar crate.
///
/// Polar night and polar day are not errors; they saturate to 0 h / 24 h
/// and zero / full-day flux.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolarError {
    /// Returned when a solar method label is not recognised.
    #[error("unknown solar method: '{label}' (expected 'simple' or 'spencer')")]
    UnknownMethod {
        /// The label that was provided.
        label: String,
    },

    /// Returned when a zenith statistic label is not recognised.
    #[error("unknown zenith statistic: '{label}' (expected 'instant', 'average' or 'integral')")]
    UnknownStatistic {
        /// The label that was provided.
        label: String,
    },

    /// Returned when an interval anchor label is not recognised.
    #[error("unknown interval anchor: '{label}' (expected 'start' or 'end')")]
    UnknownAnchor {
        /// The label that was provided.
        label: String,
    },

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
