//! Calendar systems and their year and month length rules.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// Number of days in each month of a common year (index 0 unused).
const COMMON_DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A calendar system, i.e. the year-length and leap-rule convention of a
/// time axis.
///
/// Labels follow the CF conventions: `standard` (also `gregorian` and
/// `proleptic_gregorian`), `julian`, `noleap` / `365_day`, `all_leap` /
/// `366_day` and `360_day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalendarSystem {
    /// Proleptic Gregorian leap rules.
    #[default]
    Standard,
    /// Leap year every fourth year.
    Julian,
    /// Every year has 365 days.
    NoLeap,
    /// Every year has 366 days.
    AllLeap,
    /// Twelve months of 30 days.
    Day360,
}

impl CalendarSystem {
    /// Returns the canonical CF label of this calendar.
    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Julian => "julian",
            Self::NoLeap => "noleap",
            Self::AllLeap => "all_leap",
            Self::Day360 => "360_day",
        }
    }

    /// Returns `true` if `year` carries a leap day in this calendar.
    pub fn is_leap(self, year: i32) -> bool {
        match self {
            Self::Standard => {
                year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
            }
            Self::Julian => year.rem_euclid(4) == 0,
            Self::NoLeap | Self::Day360 => false,
            Self::AllLeap => true,
        }
    }

    /// Returns the number of days in `year`.
    pub fn days_in_year(self, year: i32) -> u16 {
        match self {
            Self::Day360 => 360,
            _ if self.is_leap(year) => 366,
            _ => 365,
        }
    }

    /// Returns the number of days in `month` of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    pub fn days_in_month(self, year: i32, month: u8) -> Result<u8, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(self.month_length(year, month))
    }

    /// Month length for an already validated month.
    fn month_length(self, year: i32, month: u8) -> u8 {
        match self {
            Self::Day360 => 30,
            _ if month == 2 && self.is_leap(year) => 29,
            _ => COMMON_DAYS_PER_MONTH[month as usize],
        }
    }

    /// Number of days between 0000-01-01 and January 1 of `year`.
    ///
    /// Negative for years before 0. Differences of this function give year
    /// lengths, which makes it the basis of all serial-day arithmetic.
    pub fn days_before_year(self, year: i32) -> i64 {
        let y = i64::from(year);
        match self {
            Self::NoLeap => 365 * y,
            Self::AllLeap => 366 * y,
            Self::Day360 => 360 * y,
            Self::Julian => 365 * y + (y + 3).div_euclid(4),
            Self::Standard => {
                365 * y + (y + 3).div_euclid(4) - (y + 99).div_euclid(100)
                    + (y + 399).div_euclid(400)
            }
        }
    }

    /// Ordinal day of year (1-based) of a validated date.
    pub(crate) fn ordinal(self, year: i32, month: u8, day: u8) -> u16 {
        let before: u16 = (1..month)
            .map(|m| u16::from(self.month_length(year, m)))
            .sum();
        before + u16::from(day)
    }

    /// Inverse of [`ordinal`](Self::ordinal): `(month, day)` of a 1-based
    /// ordinal day within `year`.
    pub(crate) fn month_day(self, year: i32, ordinal: u16) -> (u8, u8) {
        let mut remaining = ordinal;
        for month in 1..=12u8 {
            let len = u16::from(self.month_length(year, month));
            if remaining <= len {
                return (month, remaining as u8);
            }
            remaining -= len;
        }
        (12, self.month_length(year, 12))
    }

    /// Year containing the serial day `serial` (days since 0000-01-01).
    pub(crate) fn year_of_serial(self, serial: i64) -> i32 {
        let mean_year = match self {
            Self::Standard => 365.2425,
            Self::Julian => 365.25,
            Self::NoLeap => 365.0,
            Self::AllLeap => 366.0,
            Self::Day360 => 360.0,
        };
        let mut year = (serial as f64 / mean_year).floor() as i32;
        while self.days_before_year(year) > serial {
            year -= 1;
        }
        while self.days_before_year(year + 1) <= serial {
            year += 1;
        }
        year
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarSystem {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" => Ok(Self::Standard),
            "julian" => Ok(Self::Julian),
            "noleap" | "365_day" => Ok(Self::NoLeap),
            "all_leap" | "366_day" => Ok(Self::AllLeap),
            "360_day" => Ok(Self::Day360),
            _ => Err(CalendarError::UnknownCalendar {
                name: s.to_string(),
            }),
        }
    }
}
