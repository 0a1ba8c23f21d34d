//! Scalar quantities: a value with a unit.

use std::fmt;
use std::str::FromStr;

use crate::error::UnitError;
use crate::unit::{Dimension, Unit};

/// A scalar value with a unit, e.g. `1361 W m-2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity.
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Numeric value in [`unit`](Self::unit).
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Unit of the value.
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Converts to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Incompatible`] if the dimensions differ.
    pub fn to(self, target: Unit) -> Result<Self, UnitError> {
        Ok(Self {
            value: self.unit.convert_value(self.value, target)?,
            unit: target,
        })
    }

    /// Checks that the quantity has dimension `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::WrongDimension`] naming `name` otherwise.
    pub fn ensure_dimension(&self, name: &str, expected: Dimension) -> Result<(), UnitError> {
        if self.unit.dimension() != expected {
            return Err(UnitError::WrongDimension {
                name: name.to_string(),
                expected,
                unit: self.unit,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Dimensionless => write!(f, "{}", self.value),
            unit => write!(f, "{} {unit}", self.value),
        }
    }
}

impl FromStr for Quantity {
    type Err = UnitError;

    /// Parses `"<number> <unit>"`; a bare number is dimensionless.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (number, unit) = match text.split_once(char::is_whitespace) {
            Some((number, unit)) => (number, unit.parse()?),
            None => (text, Unit::Dimensionless),
        };
        let value = number.parse::<f64>().map_err(|_| UnitError::InvalidQuantity {
            text: s.to_string(),
        })?;
        Ok(Self { value, unit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parse_with_unit() {
        let q: Quantity = "1361 W m-2".parse().unwrap();
        assert_relative_eq!(q.value(), 1361.0);
        assert_eq!(q.unit(), Unit::WattPerSquareMetre);
        assert_eq!(q.to_string(), "1361 W m-2");
    }

    #[test]
    fn parse_bare_number() {
        let q: Quantity = "0.5".parse().unwrap();
        assert_eq!(q.unit(), Unit::Dimensionless);
        assert_eq!(q.to_string(), "0.5");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "abc W m-2".parse::<Quantity>(),
            Err(UnitError::InvalidQuantity { .. })
        ));
        assert!(matches!(
            "12 parsecs".parse::<Quantity>(),
            Err(UnitError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn convert_quantity() {
        let q = Quantity::new(117.6, Unit::MegajoulePerSquareMetrePerDay);
        let w = q.to(Unit::WattPerSquareMetre).unwrap();
        assert_relative_eq!(w.value(), 1361.111, epsilon = 1e-3);
        assert!(q.to(Unit::Kelvin).is_err());
    }

    #[test]
    fn dimension_check() {
        let q = Quantity::new(1.0, Unit::Metre);
        assert!(q.ensure_dimension("solar_constant", Dimension::Length).is_ok());
        assert!(matches!(
            q.ensure_dimension("solar_constant", Dimension::EnergyFlux),
            Err(UnitError::WrongDimension { .. })
        ));
    }
}
