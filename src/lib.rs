//! # helios
//!
//! Solar geometry, sub-daily temperature and adaptive resampling over
//! labelled, calendar-aware arrays.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph TD
//!     CAL["helios-calendar"] --> ARR["helios-array"]
//!     ARR --> UNI["helios-units"]
//!     CAL --> SOL["helios-solar"]
//!     UNI --> SOL
//!     SOL --> SUB["helios-subdaily"]
//!     ARR --> RES["helios-resample"]
//!     CFG["helios::config"] --> RES & SOL & SUB
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use helios::config::HeliosConfig;
//! use helios::{Reduction, ResampleSpec, make_hourly_temperature, resample_map};
//!
//! helios::logging::init(1);
//! let config = HeliosConfig::load("helios.toml")?;
//! let tas = make_hourly_temperature(&tasmax, &tasmin, &config.subdaily_config()?)?;
//! let spec = ResampleSpec::new("time", "MS", Arc::new(Reduction::Mean))?;
//! let monthly = resample_map(&tas, &spec, &config.options())?.compute()?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | TOML configuration and conversion to library settings |
//! | `logging` | Tracing subscriber setup |

pub mod config;
pub mod logging;

pub use helios_array::{
    ArrayError, BinaryOp, Chunks, Coordinate, DataArray, Dataset, NodeKind, ReduceFn, Reducer,
    Reduction,
};
pub use helios_calendar::{CalendarDateTime, CalendarError, CalendarSystem, Frequency, TimeAxis};
pub use helios_resample::{
    Options, OptionsGuard, Resample, ResampleError, ResampleSpec, Strategy, resample_map,
};
pub use helios_solar::{
    IntervalAnchor, SolarError, SolarMethod, ZenithOptions, ZenithStat,
    cosine_of_solar_zenith_angle, cosine_of_solar_zenith_angle_with, day_lengths,
    eccentricity_correction_factor, extraterrestrial_solar_radiation, solar_declination,
    time_correction_for_solar_angle,
};
pub use helios_subdaily::{
    SubdailyConfig, SubdailyError, make_hourly_temperature, make_subdaily_temperature,
};
pub use helios_units::{Quantity, Unit, UnitError, convert};

/// Crate-level re-exports of every workspace crate.
pub mod crates {
    pub use helios_array as array;
    pub use helios_calendar as calendar;
    pub use helios_resample as resample;
    pub use helios_solar as solar;
    pub use helios_subdaily as subdaily;
    pub use helios_units as units;
}
