//! Error types for the helios-array crate.

use helios_calendar::CalendarError;

/// Error type for all fallible operations in the helios-array crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArrayError {
    /// Returned when the number of dimension names does not match the data.
    #[error("expected {expected} dimension names, got {got}")]
    DimensionCount {
        /// Number of axes of the data.
        expected: usize,
        /// Number of names provided.
        got: usize,
    },

    /// Returned when a dimension name appears twice.
    #[error("duplicate dimension: '{dim}'")]
    DuplicateDimension {
        /// The repeated name.
        dim: String,
    },

    /// Returned when a named dimension does not exist on an array.
    #[error("dimension not found: '{dim}'")]
    DimensionNotFound {
        /// The missing dimension name.
        dim: String,
    },

    /// Returned when two arrays disagree on the length of a shared dimension.
    #[error("dimension '{dim}' has conflicting lengths {left} and {right}")]
    DimensionSizeMismatch {
        /// The shared dimension name.
        dim: String,
        /// Length on the first array.
        left: usize,
        /// Length on the second array.
        right: usize,
    },

    /// Returned when a coordinate does not match the length of its dimension.
    #[error("coordinate '{name}': expected {expected} values, got {got}")]
    CoordinateLength {
        /// Coordinate name.
        name: String,
        /// Length of the dimension.
        expected: usize,
        /// Number of coordinate values.
        got: usize,
    },

    /// Returned when partition metadata does not describe the array shape.
    #[error("invalid chunks along '{dim}': {reason}")]
    InvalidChunks {
        /// Dimension the chunks refer to.
        dim: String,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when concrete values are requested from a deferred array.
    #[error("array is deferred; call compute() to materialise it")]
    NotMaterialized,

    /// Returned when a reducer produces a block of unexpected shape.
    #[error("reducer '{reducer}' returned shape {got:?}, expected {expected:?}")]
    ReducerShape {
        /// Reducer name.
        reducer: String,
        /// Shape the reduced block should have.
        expected: Vec<usize>,
        /// Shape actually returned.
        got: Vec<usize>,
    },

    /// Returned when a reduction label is not recognised.
    #[error("unknown reduction: '{label}'")]
    UnknownReduction {
        /// The label as given.
        label: String,
    },

    /// Shape error raised by `ndarray`.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
