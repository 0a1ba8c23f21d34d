//! Error types for the helios-resample crate.

use helios_array::ArrayError;
use helios_calendar::CalendarError;

/// Error type for all fallible operations in the helios-resample crate.
///
/// Execution-mode fallbacks are not errors; they are logged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// Returned when the resample request is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the resampled dimension carries no time coordinate.
    #[error("dimension '{dim}' has no time coordinate")]
    MissingTimeCoordinate {
        /// Name of the dimension.
        dim: String,
    },

    /// Array error.
    #[error(transparent)]
    Array(#[from] ArrayError),

    /// Calendar error, including unknown frequency labels.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
