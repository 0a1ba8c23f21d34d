//! # helios-calendar
//!
//! Calendar-aware time axes for climate data: CF calendar systems, validated
//! timestamps, day-of-year fractions and frequency grouping.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["CalendarSystem"] -->|"validates"| B["CalendarDateTime"]
//!     B -->|"TimeAxis::new()"| C["TimeAxis"]
//!     C -->|".day_of_year_fraction()"| D["Vec of f64 in [0, 1)"]
//!     C -->|".day_angle()"| E["Vec of radians"]
//!     F["Frequency"] -->|"TimeAxis::group_by()"| G["Vec of TimeGroup"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use helios_calendar::{CalendarDateTime, CalendarSystem, Frequency, TimeAxis};
//!
//! let cal: CalendarSystem = "noleap".parse().unwrap();
//! let start = CalendarDateTime::new(cal, 2000, 1, 1).unwrap();
//! let axis = TimeAxis::daily(cal, start, 365).unwrap();
//!
//! // Fraction of the year elapsed at each timestamp
//! let frac = axis.day_of_year_fraction();
//!
//! // Monthly bins
//! let groups = axis.group_by("MS".parse::<Frequency>().unwrap());
//! assert_eq!(groups.len(), 12);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `system` | Calendar systems and leap rules |
//! | `datetime` | Calendar-validated timestamps and serial arithmetic |
//! | `axis` | Ordered time axes and year-fraction quantities |
//! | `frequency` | Resampling frequencies and time grouping |
//! | `error` | Error types |

mod axis;
mod datetime;
mod error;
mod frequency;
mod system;

pub use axis::TimeAxis;
pub use datetime::{CalendarDateTime, SECONDS_PER_DAY};
pub use error::CalendarError;
pub use frequency::{Frequency, TimeGroup};
pub use system::CalendarSystem;
