//! Supported units, their physical dimensions and affine conversions.

use std::fmt;
use std::str::FromStr;

use crate::error::UnitError;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Physical dimension of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Plane angle.
    Angle,
    /// Thermodynamic temperature.
    Temperature,
    /// Power per area.
    EnergyFlux,
    /// Duration.
    Time,
    /// Length.
    Length,
    /// Pure number.
    Dimensionless,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Angle => "angle",
            Self::Temperature => "temperature",
            Self::EnergyFlux => "energy flux",
            Self::Time => "time",
            Self::Length => "length",
            Self::Dimensionless => "dimensionless",
        })
    }
}

/// A supported unit.
///
/// Each unit converts to the base unit of its dimension (rad, K, W m-2, s,
/// m, 1) by `base = value * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Radian.
    Radian,
    /// Degree of arc.
    Degree,
    /// Kelvin.
    Kelvin,
    /// Degree Celsius.
    Celsius,
    /// Degree Fahrenheit.
    Fahrenheit,
    /// Watt per square metre.
    WattPerSquareMetre,
    /// Kilowatt per square metre.
    KilowattPerSquareMetre,
    /// Megajoule per square metre per day.
    MegajoulePerSquareMetrePerDay,
    /// Joule per square metre per day.
    JoulePerSquareMetrePerDay,
    /// Second.
    Second,
    /// Minute.
    Minute,
    /// Hour.
    Hour,
    /// Day.
    Day,
    /// Metre.
    Metre,
    /// Kilometre.
    Kilometre,
    /// Millimetre.
    Millimetre,
    /// Dimensionless ratio.
    Dimensionless,
}

impl Unit {
    /// Physical dimension.
    pub fn dimension(self) -> Dimension {
        match self {
            Self::Radian | Self::Degree => Dimension::Angle,
            Self::Kelvin | Self::Celsius | Self::Fahrenheit => Dimension::Temperature,
            Self::WattPerSquareMetre
            | Self::KilowattPerSquareMetre
            | Self::MegajoulePerSquareMetrePerDay
            | Self::JoulePerSquareMetrePerDay => Dimension::EnergyFlux,
            Self::Second | Self::Minute | Self::Hour | Self::Day => Dimension::Time,
            Self::Metre | Self::Kilometre | Self::Millimetre => Dimension::Length,
            Self::Dimensionless => Dimension::Dimensionless,
        }
    }

    /// Canonical symbol, as written to `units` attributes.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Radian => "rad",
            Self::Degree => "deg",
            Self::Kelvin => "K",
            Self::Celsius => "degC",
            Self::Fahrenheit => "degF",
            Self::WattPerSquareMetre => "W m-2",
            Self::KilowattPerSquareMetre => "kW m-2",
            Self::MegajoulePerSquareMetrePerDay => "MJ m-2 d-1",
            Self::JoulePerSquareMetrePerDay => "J m-2 d-1",
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Metre => "m",
            Self::Kilometre => "km",
            Self::Millimetre => "mm",
            Self::Dimensionless => "1",
        }
    }

    /// `(scale, offset)` of the conversion to the base unit.
    fn to_base(self) -> (f64, f64) {
        match self {
            Self::Radian
            | Self::Kelvin
            | Self::WattPerSquareMetre
            | Self::Second
            | Self::Metre
            | Self::Dimensionless => (1.0, 0.0),
            Self::Degree => (std::f64::consts::PI / 180.0, 0.0),
            Self::Celsius => (1.0, 273.15),
            Self::Fahrenheit => (5.0 / 9.0, 459.67 * 5.0 / 9.0),
            Self::KilowattPerSquareMetre => (1e3, 0.0),
            Self::MegajoulePerSquareMetrePerDay => (1e6 / SECONDS_PER_DAY, 0.0),
            Self::JoulePerSquareMetrePerDay => (1.0 / SECONDS_PER_DAY, 0.0),
            Self::Minute => (60.0, 0.0),
            Self::Hour => (3600.0, 0.0),
            Self::Day => (SECONDS_PER_DAY, 0.0),
            Self::Kilometre => (1e3, 0.0),
            Self::Millimetre => (1e-3, 0.0),
        }
    }

    /// `(scale, offset)` such that `value_in_target = value * scale + offset`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Incompatible`] if the dimensions differ.
    pub fn conversion_to(self, target: Unit) -> Result<(f64, f64), UnitError> {
        if self.dimension() != target.dimension() {
            return Err(UnitError::Incompatible {
                from: self,
                to: target,
            });
        }
        let (s1, o1) = self.to_base();
        let (s2, o2) = target.to_base();
        Ok((s1 / s2, (o1 - o2) / s2))
    }

    /// Converts a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::Incompatible`] if the dimensions differ.
    pub fn convert_value(self, value: f64, target: Unit) -> Result<f64, UnitError> {
        let (scale, offset) = self.conversion_to(target)?;
        Ok(value * scale + offset)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Collapses whitespace and exponent markers so that `W m**-2`, `W m^-2`
/// and `W  m-2` read the same.
fn normalise(label: &str) -> String {
    label
        .replace("**", "")
        .replace('^', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for Unit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match normalise(s).as_str() {
            "rad" | "radian" | "radians" => Self::Radian,
            "deg" | "degree" | "degrees" | "°" | "degree_north" | "degrees_north" | "degree_N"
            | "degrees_N" | "degree_east" | "degrees_east" | "degree_E" | "degrees_E" => {
                Self::Degree
            }
            "K" | "kelvin" | "degK" => Self::Kelvin,
            "degC" | "°C" | "celsius" | "deg_C" | "degree_Celsius" | "degrees_Celsius" => {
                Self::Celsius
            }
            "degF" | "°F" | "fahrenheit" | "deg_F" => Self::Fahrenheit,
            "W m-2" | "W/m2" | "W.m-2" => Self::WattPerSquareMetre,
            "kW m-2" | "kW/m2" => Self::KilowattPerSquareMetre,
            "MJ m-2 d-1" | "MJ m-2 day-1" | "MJ/m2/d" | "MJ/m2/day" => {
                Self::MegajoulePerSquareMetrePerDay
            }
            "J m-2 d-1" | "J m-2 day-1" | "J/m2/d" => Self::JoulePerSquareMetrePerDay,
            "s" | "sec" | "second" | "seconds" => Self::Second,
            "min" | "minute" | "minutes" => Self::Minute,
            "h" | "hr" | "hour" | "hours" => Self::Hour,
            "d" | "day" | "days" => Self::Day,
            "m" | "metre" | "metres" | "meter" | "meters" => Self::Metre,
            "km" | "kilometre" | "kilometer" => Self::Kilometre,
            "mm" | "millimetre" | "millimeter" => Self::Millimetre,
            "" | "1" | "-" | "dimensionless" => Self::Dimensionless,
            _ => {
                return Err(UnitError::UnknownUnit {
                    label: s.to_string(),
                });
            }
        };
        Ok(unit)
    }
}
