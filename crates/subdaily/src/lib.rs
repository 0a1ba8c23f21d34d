//! # helios-subdaily
//!
//! Sub-daily temperature from daily extremes: a sinusoidal daytime rise
//! and a logarithmic night-time decay, with the day length taken from the
//! solar geometry of each day and latitude.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["tasmax / tasmin (daily)"] -->|"convert_like()"| B["common units"]
//!     C["lat"] -->|"day_lengths()"| D["day length [time, ...]"]
//!     B --> E["diurnal_temperature()"]
//!     D --> E
//!     E --> F["tas (N steps per day)"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use helios_subdaily::{SubdailyConfig, make_hourly_temperature};
//!
//! let config = SubdailyConfig::new().with_steps_per_day(24);
//! let tas = make_hourly_temperature(&tasmax, &tasmin, &config)?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | Steps per day and declination method |
//! | `temperature` | Diurnal curve and array interpolation |
//! | `error` | Error types |

mod config;
mod error;
mod temperature;

pub use config::SubdailyConfig;
pub use error::SubdailyError;
pub use temperature::{diurnal_temperature, make_hourly_temperature, make_subdaily_temperature};
