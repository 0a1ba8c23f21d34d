//! # helios-units
//!
//! Unit handling at function boundaries: a closed set of supported units,
//! scalar quantities, conversion of array `units` attributes, and gathering
//! of latitude/longitude coordinates from inputs.
//!
//! Conversions are affine, so partitioned inputs stay deferred.
//!
//! ## Quick Start
//!
//! ```ignore
//! use helios_units::{Quantity, Unit, convert, to_radians};
//!
//! let s0: Quantity = "1361 W m-2".parse()?;
//! let lat_rad = to_radians(&lat)?;          // degrees_north -> rad
//! let tas_k = convert(&tas, Unit::Kelvin)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `unit` | Units, dimensions, affine conversion factors |
//! | `quantity` | Scalar value with a unit |
//! | `convert` | Array conversion and coordinate gathering |
//! | `error` | Error types |

mod convert;
mod error;
mod quantity;
mod unit;

pub use convert::{convert, convert_like, ensure_dimension, gather_coord, to_radians, units_of};
pub use error::UnitError;
pub use quantity::Quantity;
pub use unit::{Dimension, Unit};
