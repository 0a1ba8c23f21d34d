//! Closed option sets, each parsed once at the call boundary.

use std::fmt;
use std::str::FromStr;

use crate::error::SolarError;

/// Approximation used for declination and orbital eccentricity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SolarMethod {
    /// Single-harmonic approximation.
    Simple,
    /// Spencer (1971) Fourier series; the reference method.
    #[default]
    Spencer,
}

impl fmt::Display for SolarMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Simple => "simple",
            Self::Spencer => "spencer",
        })
    }
}

impl FromStr for SolarMethod {
    type Err = SolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "spencer" => Ok(Self::Spencer),
            _ => Err(SolarError::UnknownMethod {
                label: s.to_string(),
            }),
        }
    }
}

/// Statistic of the cosine of the solar zenith angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZenithStat {
    /// Value at the timestamp.
    Instant,
    /// Mean over the time step.
    #[default]
    Average,
    /// Integral over the time step, in radians of hour angle.
    Integral,
}

impl fmt::Display for ZenithStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Instant => "instant",
            Self::Average => "average",
            Self::Integral => "integral",
        })
    }
}

impl FromStr for ZenithStat {
    type Err = SolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instant" => Ok(Self::Instant),
            "average" => Ok(Self::Average),
            "integral" => Ok(Self::Integral),
            _ => Err(SolarError::UnknownStatistic {
                label: s.to_string(),
            }),
        }
    }
}

/// Placement of the averaging window relative to each timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntervalAnchor {
    /// The window is the time step ending at the timestamp.
    #[default]
    End,
    /// The window is the time step starting at the timestamp.
    Start,
}

impl fmt::Display for IntervalAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::End => "end",
            Self::Start => "start",
        })
    }
}

impl FromStr for IntervalAnchor {
    type Err = SolarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "end" => Ok(Self::End),
            "start" => Ok(Self::Start),
            _ => Err(SolarError::UnknownAnchor {
                label: s.to_string(),
            }),
        }
    }
}
