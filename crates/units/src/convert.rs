//! Conversion of array `units` attributes and coordinate gathering.

use helios_array::DataArray;
use tracing::debug;

use crate::error::UnitError;
use crate::unit::{Dimension, Unit};

fn input_name(array: &DataArray) -> String {
    array.name().unwrap_or("input").to_string()
}

/// Parses the `units` attribute of `array`.
///
/// # Errors
///
/// Returns [`UnitError::MissingUnits`] if the attribute is absent, or
/// [`UnitError::UnknownUnit`] if it cannot be parsed.
pub fn units_of(array: &DataArray) -> Result<Unit, UnitError> {
    array
        .units()
        .ok_or_else(|| UnitError::MissingUnits {
            name: input_name(array),
        })?
        .parse()
}

/// Checks that `array` carries units of dimension `expected`.
///
/// # Errors
///
/// Returns [`UnitError::WrongDimension`] on a mismatch, or the errors of
/// [`units_of`].
pub fn ensure_dimension(array: &DataArray, expected: Dimension) -> Result<Unit, UnitError> {
    let unit = units_of(array)?;
    if unit.dimension() != expected {
        return Err(UnitError::WrongDimension {
            name: input_name(array),
            expected,
            unit,
        });
    }
    Ok(unit)
}

/// Converts `array` to `target`, relabelling its `units` attribute.
///
/// The conversion is an affine map, so deferred inputs stay deferred and
/// keep their partitioning.
///
/// # Errors
///
/// Returns [`UnitError::MissingUnits`], [`UnitError::UnknownUnit`] or
/// [`UnitError::Incompatible`].
pub fn convert(array: &DataArray, target: Unit) -> Result<DataArray, UnitError> {
    let source = units_of(array)?;
    if source == target {
        return Ok(array.clone().with_units(target.symbol()));
    }
    let (scale, offset) = source.conversion_to(target)?;
    debug!(from = %source, to = %target, "converting units");
    Ok(array.affine(scale, offset).with_units(target.symbol()))
}

/// Converts `array` to the units of `reference`.
///
/// # Errors
///
/// See [`convert`]; fails if either input lacks units.
pub fn convert_like(array: &DataArray, reference: &DataArray) -> Result<DataArray, UnitError> {
    convert(array, units_of(reference)?)
}

/// Converts an angle array (latitude, longitude, declination) to radians.
///
/// # Errors
///
/// Returns [`UnitError::WrongDimension`] if `array` is not an angle.
pub fn to_radians(array: &DataArray) -> Result<DataArray, UnitError> {
    ensure_dimension(array, Dimension::Angle)?;
    convert(array, Unit::Radian)
}

/// Finds coordinate `name` on the first input carrying it and returns it as
/// a named array.
///
/// # Errors
///
/// Returns [`UnitError::MissingCoordinate`] if no input has it.
pub fn gather_coord(arrays: &[&DataArray], name: &str) -> Result<DataArray, UnitError> {
    arrays
        .iter()
        .find_map(|a| a.coord_array(name))
        .map(|c| c.with_name(name))
        .ok_or_else(|| UnitError::MissingCoordinate {
            name: name.to_string(),
        })
}
