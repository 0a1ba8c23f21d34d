//! Error types for the helios-units crate.

use helios_array::ArrayError;

use crate::unit::{Dimension, Unit};

/// Error type for all fallible operations in the helios-units crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// Returned when a unit label is not recognised.
    #[error("unknown unit: '{label}'")]
    UnknownUnit {
        /// The label that was provided.
        label: String,
    },

    /// Returned when an input expected to carry units has none.
    #[error("{name}: missing 'units' attribute")]
    MissingUnits {
        /// Name of the input.
        name: String,
    },

    /// Returned when converting between units of different dimensions.
    #[error("cannot convert '{from}' to '{to}'")]
    Incompatible {
        /// Source unit.
        from: Unit,
        /// Target unit.
        to: Unit,
    },

    /// Returned when an input's unit has the wrong physical dimension.
    #[error("{name}: expected {expected} units, got '{unit}'")]
    WrongDimension {
        /// Name of the input.
        name: String,
        /// Dimension required by the caller.
        expected: Dimension,
        /// Unit of the input.
        unit: Unit,
    },

    /// Returned when a quantity string cannot be parsed.
    #[error("invalid quantity: '{text}'")]
    InvalidQuantity {
        /// The text that was provided.
        text: String,
    },

    /// Returned when no input carries a required coordinate.
    #[error("coordinate '{name}' not found on any input")]
    MissingCoordinate {
        /// Coordinate name.
        name: String,
    },

    /// Array error.
    #[error(transparent)]
    Array(#[from] ArrayError),
}
