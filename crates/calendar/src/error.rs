//! Error types for the helios-calendar crate.

use crate::system::CalendarSystem;

/// Error type for all fallible operations in the helios-calendar crate.
///
/// Covers unknown calendar and frequency labels, dates that do not exist in
/// a given calendar system, and time axes that violate ordering or mix
/// calendars.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a calendar label is not one of the supported systems.
    #[error("unknown calendar: '{name}'")]
    UnknownCalendar {
        /// The label that was provided.
        name: String,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day does not exist in the given month and calendar.
    #[error("invalid date: {year:04}-{month:02}-{day:02} does not exist in the {calendar} calendar")]
    InvalidDate {
        /// Year of the rejected date.
        year: i32,
        /// Month of the rejected date.
        month: u8,
        /// Day of the rejected date.
        day: u8,
        /// Calendar the date was validated against.
        calendar: CalendarSystem,
    },

    /// Returned when a time of day is out of range.
    #[error("invalid time of day: {hour:02}:{minute:02}:{second:02}")]
    InvalidTime {
        /// Hour (0..=23).
        hour: u8,
        /// Minute (0..=59).
        minute: u8,
        /// Second (0..=59).
        second: u8,
    },

    /// Returned when timestamps of an axis decrease.
    #[error("time axis is not non-decreasing at index {index}")]
    NonMonotonic {
        /// First index whose timestamp precedes its predecessor.
        index: usize,
    },

    /// Returned when a regular axis is requested with a non-positive step.
    #[error("invalid time step: {step} s (must be positive)")]
    InvalidStep {
        /// The rejected step in seconds.
        step: i64,
    },

    /// Returned when two time axes with different calendars are combined.
    #[error("calendar mismatch: {left} vs {right}")]
    CalendarMismatch {
        /// Calendar of the first axis.
        left: CalendarSystem,
        /// Calendar of the second axis.
        right: CalendarSystem,
    },

    /// Returned when a resampling frequency label cannot be parsed.
    #[error("unknown frequency: '{label}'")]
    UnknownFrequency {
        /// The label that was provided.
        label: String,
    },
}
