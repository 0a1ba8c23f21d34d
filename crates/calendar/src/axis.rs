//! Ordered time axes tagged with a calendar system.

use std::f64::consts::TAU;

use chrono::NaiveDateTime;

use crate::datetime::{CalendarDateTime, SECONDS_PER_DAY};
use crate::error::CalendarError;
use crate::system::CalendarSystem;

/// An ordered sequence of timestamps interpreted in one calendar system.
///
/// Timestamps are non-decreasing. All year-length dependent quantities are
/// evaluated per timestamp with the axis calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAxis {
    calendar: CalendarSystem,
    times: Vec<CalendarDateTime>,
}

impl TimeAxis {
    /// Creates a time axis from explicit timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] if a timestamp does not exist in
    /// `calendar`, or [`CalendarError::NonMonotonic`] if timestamps decrease.
    pub fn new(calendar: CalendarSystem, times: Vec<CalendarDateTime>) -> Result<Self, CalendarError> {
        for t in &times {
            t.validate(calendar)?;
        }
        if let Some(i) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(CalendarError::NonMonotonic { index: i + 1 });
        }
        Ok(Self { calendar, times })
    }

    /// Creates a standard-calendar axis from `chrono` timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NonMonotonic`] if timestamps decrease.
    pub fn from_naive(times: &[NaiveDateTime]) -> Result<Self, CalendarError> {
        Self::new(
            CalendarSystem::Standard,
            times.iter().copied().map(CalendarDateTime::from).collect(),
        )
    }

    /// Creates a regularly spaced axis of `n` timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidStep`] if `step_seconds` is not
    /// positive, or a validation error if `start` does not exist in `calendar`.
    pub fn regular(
        calendar: CalendarSystem,
        start: CalendarDateTime,
        step_seconds: i64,
        n: usize,
    ) -> Result<Self, CalendarError> {
        if step_seconds <= 0 {
            return Err(CalendarError::InvalidStep { step: step_seconds });
        }
        let start = start.validate(calendar)?;
        let origin = start.serial_seconds(calendar);
        let times = (0..n as i64)
            .map(|i| CalendarDateTime::from_serial_seconds(calendar, origin + i * step_seconds))
            .collect();
        Ok(Self { calendar, times })
    }

    /// Creates a daily axis of `n` days starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `start` does not exist in `calendar`.
    pub fn daily(calendar: CalendarSystem, start: CalendarDateTime, n: usize) -> Result<Self, CalendarError> {
        Self::regular(calendar, start, SECONDS_PER_DAY, n)
    }

    /// Returns the calendar system of this axis.
    pub fn calendar(&self) -> CalendarSystem {
        self.calendar
    }

    /// Returns the number of timestamps.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the axis holds no timestamps.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the timestamps.
    pub fn times(&self) -> &[CalendarDateTime] {
        &self.times
    }

    /// Returns the timestamp at `index`.
    pub fn get(&self, index: usize) -> Option<CalendarDateTime> {
        self.times.get(index).copied()
    }

    /// Iterates over the timestamps.
    pub fn iter(&self) -> impl Iterator<Item = CalendarDateTime> + '_ {
        self.times.iter().copied()
    }

    /// Index of the first timestamp equal to `t`.
    pub fn position(&self, t: CalendarDateTime) -> Option<usize> {
        let i = self.times.partition_point(|x| *x < t);
        (self.times.get(i) == Some(&t)).then_some(i)
    }

    /// Spacing between the first two timestamps, in seconds.
    ///
    /// Returns `None` for axes with fewer than two timestamps.
    pub fn step_seconds(&self) -> Option<i64> {
        match self.times.as_slice() {
            [a, b, ..] => Some(b.serial_seconds(self.calendar) - a.serial_seconds(self.calendar)),
            _ => None,
        }
    }

    /// Position of each timestamp within its year, in [0, 1).
    ///
    /// Computed as `(ordinal day − 1 + seconds of day / 86400) / year length`,
    /// where the year length is that of the timestamp's own year in the axis
    /// calendar (360, 365 or 366 days).
    pub fn day_of_year_fraction(&self) -> Vec<f64> {
        self.times
            .iter()
            .map(|t| {
                let elapsed = f64::from(t.day_of_year(self.calendar) - 1)
                    + f64::from(t.seconds_of_day()) / SECONDS_PER_DAY as f64;
                elapsed / f64::from(self.calendar.days_in_year(t.year()))
            })
            .collect()
    }

    /// Year plus the day-of-year fraction of each timestamp.
    pub fn decimal_year(&self) -> Vec<f64> {
        self.times
            .iter()
            .zip(self.day_of_year_fraction())
            .map(|(t, f)| f64::from(t.year()) + f)
            .collect()
    }

    /// Day-of-year fraction expressed as an angle in radians, in [0, 2π).
    pub fn day_angle(&self) -> Vec<f64> {
        self.day_of_year_fraction()
            .into_iter()
            .map(|f| f * TAU)
            .collect()
    }

    /// Checks that `other` uses the same calendar system.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::CalendarMismatch`] if the calendars differ.
    pub fn ensure_compatible(&self, other: &TimeAxis) -> Result<(), CalendarError> {
        if self.calendar != other.calendar {
            return Err(CalendarError::CalendarMismatch {
                left: self.calendar,
                right: other.calendar,
            });
        }
        Ok(())
    }
}
