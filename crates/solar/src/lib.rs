//! # helios-solar
//!
//! Solar geometry over calendar-aware time axes: declination, orbital
//! eccentricity, equation of time, extraterrestrial radiation, day length
//! and the cosine of the solar zenith angle.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["TimeAxis"] -->|".day_angle()"| B["orbit (scalar formulas)"]
//!     B -->|"solar_declination()"| C["declination [time]"]
//!     C --> D["day_lengths()"]
//!     C --> E["extraterrestrial_solar_radiation()"]
//!     C --> F["cosine_of_solar_zenith_angle()"]
//!     G["lat / lon (angle units)"] -->|"to_radians()"| D & E & F
//! ```
//!
//! Angle inputs are converted to radians once, at the function boundary.
//! Polar day and polar night saturate through a single clamp in
//! [`orbit::sunset_hour_angle`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use helios_solar::{SolarMethod, ZenithStat, cosine_of_solar_zenith_angle, solar_declination};
//!
//! let dec = solar_declination(&time, SolarMethod::Spencer)?;
//! let csza = cosine_of_solar_zenith_angle(&time, &dec, &lat, &lon, ZenithStat::Average, true)?;
//! let dl = day_lengths(&time, &lat, "spencer".parse()?)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `method` | Solar method, zenith statistic and window anchor |
//! | `orbit` | Scalar orbital formulas |
//! | `radiation` | Declination, corrections, radiation and day length arrays |
//! | `zenith` | Cosine of the solar zenith angle |
//! | `error` | Error types |

mod error;
mod method;
pub mod orbit;
mod radiation;
mod zenith;

pub use error::SolarError;
pub use method::{IntervalAnchor, SolarMethod, ZenithStat};
pub use radiation::{
    SOLAR_CONSTANT, TIME_DIM, day_lengths, default_solar_constant, eccentricity_correction_factor,
    extraterrestrial_solar_radiation, solar_declination, time_correction_for_solar_angle,
};
pub use zenith::{ZenithOptions, cosine_of_solar_zenith_angle, cosine_of_solar_zenith_angle_with};
