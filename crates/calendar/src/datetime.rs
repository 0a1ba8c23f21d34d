//! Calendar-agnostic timestamps validated against a [`CalendarSystem`].

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::CalendarError;
use crate::system::CalendarSystem;

/// Number of seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// A timestamp with second resolution.
///
/// The timestamp does not carry its calendar; it is validated against one at
/// construction and interpreted in the calendar of the [`TimeAxis`] holding
/// it. Field order makes the derived ordering chronological in every
/// calendar.
///
/// [`TimeAxis`]: crate::TimeAxis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDateTime {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl CalendarDateTime {
    /// Creates a timestamp at midnight of the given date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] or [`CalendarError::InvalidDate`]
    /// if the date does not exist in `calendar`.
    pub fn new(calendar: CalendarSystem, year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        Self::with_hms(calendar, year, month, day, 0, 0, 0)
    }

    /// Creates a timestamp from a date and a time of day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if the date does not exist in
    /// `calendar`, or [`CalendarError::InvalidTime`] if the time of day is out
    /// of range.
    pub fn with_hms(
        calendar: CalendarSystem,
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, CalendarError> {
        let max_day = calendar.days_in_month(year, month)?;
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDate {
                year,
                month,
                day,
                calendar,
            });
        }
        if hour > 23 || minute > 59 || second > 59 {
            return Err(CalendarError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Builds the first day of a month without validation.
    pub(crate) fn month_start(year: i32, month: u8) -> Self {
        Self {
            year,
            month,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Re-validates this timestamp against `calendar`.
    pub(crate) fn validate(self, calendar: CalendarSystem) -> Result<Self, CalendarError> {
        Self::with_hms(
            calendar,
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }

    /// Returns the day within the month.
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the hour (0..=23).
    pub fn hour(self) -> u8 {
        self.hour
    }

    /// Returns the minute (0..=59).
    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Returns the second (0..=59).
    pub fn second(self) -> u8 {
        self.second
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_of_day(self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }

    /// Fractional hours elapsed since midnight.
    pub fn hours_of_day(self) -> f64 {
        f64::from(self.seconds_of_day()) / 3600.0
    }

    /// Returns this timestamp truncated to midnight.
    pub fn date(self) -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            ..self
        }
    }

    /// Ordinal day within the year (1-based) in `calendar`.
    pub fn day_of_year(self, calendar: CalendarSystem) -> u16 {
        calendar.ordinal(self.year, self.month, self.day)
    }

    /// Days since 0000-01-01 in `calendar`.
    pub fn serial_day(self, calendar: CalendarSystem) -> i64 {
        calendar.days_before_year(self.year) + i64::from(self.day_of_year(calendar)) - 1
    }

    /// Seconds since 0000-01-01T00:00:00 in `calendar`.
    pub fn serial_seconds(self, calendar: CalendarSystem) -> i64 {
        self.serial_day(calendar) * SECONDS_PER_DAY + i64::from(self.seconds_of_day())
    }

    /// Inverse of [`serial_seconds`](Self::serial_seconds).
    pub fn from_serial_seconds(calendar: CalendarSystem, seconds: i64) -> Self {
        let serial_day = seconds.div_euclid(SECONDS_PER_DAY);
        let sod = seconds.rem_euclid(SECONDS_PER_DAY);
        let year = calendar.year_of_serial(serial_day);
        let ordinal = (serial_day - calendar.days_before_year(year) + 1) as u16;
        let (month, day) = calendar.month_day(year, ordinal);
        Self {
            year,
            month,
            day,
            hour: (sod / 3600) as u8,
            minute: ((sod % 3600) / 60) as u8,
            second: (sod % 60) as u8,
        }
    }

    /// Returns this timestamp shifted by `seconds` (may be negative).
    pub fn add_seconds(self, calendar: CalendarSystem, seconds: i64) -> Self {
        Self::from_serial_seconds(calendar, self.serial_seconds(calendar) + seconds)
    }
}

impl From<NaiveDateTime> for CalendarDateTime {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            year: value.year(),
            month: value.month() as u8,
            day: value.day() as u8,
            hour: value.hour() as u8,
            minute: value.minute() as u8,
            second: value.second().min(59) as u8,
        }
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}
