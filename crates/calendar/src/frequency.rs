//! Resampling frequencies and grouping of time axes into calendar bins.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::axis::TimeAxis;
use crate::datetime::{CalendarDateTime, SECONDS_PER_DAY};
use crate::error::CalendarError;
use crate::system::CalendarSystem;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// A calendar resampling frequency, labelled at the start of each bin.
///
/// Parsed from pandas-style labels: `D`, `MS`, `QS` / `QS-<MON>`,
/// `YS` / `YS-<MON>` (also `AS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Calendar days.
    Day,
    /// Calendar months.
    MonthStart,
    /// Three-month bins; `anchor` is the first month of one of the quarters.
    QuarterStart {
        /// Anchor month (1..=12).
        anchor: u8,
    },
    /// Years starting in `anchor`.
    YearStart {
        /// Anchor month (1..=12).
        anchor: u8,
    },
}

impl Frequency {
    /// Returns the start of the bin containing `t`.
    pub fn floor(self, t: CalendarDateTime) -> CalendarDateTime {
        match self {
            Self::Day => t.date(),
            Self::MonthStart => CalendarDateTime::month_start(t.year(), t.month()),
            Self::QuarterStart { anchor } => {
                let offset = (i32::from(t.month()) - i32::from(anchor)).rem_euclid(3);
                shift_months(CalendarDateTime::month_start(t.year(), t.month()), -offset)
            }
            Self::YearStart { anchor } => {
                let year = if t.month() >= anchor {
                    t.year()
                } else {
                    t.year() - 1
                };
                CalendarDateTime::month_start(year, anchor)
            }
        }
    }

    /// Returns the start of the bin following the one starting at `label`.
    pub fn advance(self, label: CalendarDateTime, calendar: CalendarSystem) -> CalendarDateTime {
        match self {
            Self::Day => label.add_seconds(calendar, SECONDS_PER_DAY),
            Self::MonthStart => shift_months(label, 1),
            Self::QuarterStart { .. } => shift_months(label, 3),
            Self::YearStart { .. } => shift_months(label, 12),
        }
    }
}

/// First day of the month `months` away from the month of `t`.
fn shift_months(t: CalendarDateTime, months: i32) -> CalendarDateTime {
    let total = t.year() * 12 + i32::from(t.month()) - 1 + months;
    CalendarDateTime::month_start(total.div_euclid(12), (total.rem_euclid(12) + 1) as u8)
}

fn parse_anchor(abbrev: &str, label: &str) -> Result<u8, CalendarError> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|m| *m == abbrev)
        .map(|i| i as u8 + 1)
        .ok_or_else(|| CalendarError::UnknownFrequency {
            label: label.to_string(),
        })
}

impl FromStr for Frequency {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let (base, anchor) = match upper.split_once('-') {
            Some((base, anchor)) => (base, Some(parse_anchor(anchor, s)?)),
            None => (upper.as_str(), None),
        };
        match (base, anchor) {
            ("D", None) => Ok(Self::Day),
            ("MS", None) => Ok(Self::MonthStart),
            ("QS", anchor) => Ok(Self::QuarterStart {
                anchor: anchor.unwrap_or(1),
            }),
            ("YS" | "AS", anchor) => Ok(Self::YearStart {
                anchor: anchor.unwrap_or(1),
            }),
            _ => Err(CalendarError::UnknownFrequency {
                label: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => f.write_str("D"),
            Self::MonthStart => f.write_str("MS"),
            Self::QuarterStart { anchor } => {
                write!(f, "QS-{}", MONTH_ABBREVIATIONS[usize::from(*anchor) - 1])
            }
            Self::YearStart { anchor } => {
                write!(f, "YS-{}", MONTH_ABBREVIATIONS[usize::from(*anchor) - 1])
            }
        }
    }
}

/// One resampling bin: its start label and the contiguous range of axis
/// indices falling inside it. The range is empty when no sample falls in
/// the bin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGroup {
    label: CalendarDateTime,
    range: Range<usize>,
}

impl TimeGroup {
    /// Returns the bin start label.
    pub fn label(&self) -> CalendarDateTime {
        self.label
    }

    /// Returns the index range covered by this bin.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Returns the number of samples in this bin.
    pub fn len(&self) -> usize {
        self.range.len()
    }

    /// Returns `true` if no sample falls in this bin.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

impl TimeAxis {
    /// Splits the axis into consecutive bins of `freq`.
    ///
    /// Bins run from the one containing the first timestamp to the one
    /// containing the last, including bins without samples. Ranges are
    /// contiguous and cover the axis in order.
    pub fn group_by(&self, freq: Frequency) -> Vec<TimeGroup> {
        let times = self.times();
        let Some(&first) = times.first() else {
            return Vec::new();
        };
        let mut groups = Vec::new();
        let mut label = freq.floor(first);
        let mut start = 0;
        while start < times.len() {
            let next = freq.advance(label, self.calendar());
            let end = start + times[start..].partition_point(|t| *t < next);
            groups.push(TimeGroup {
                label,
                range: start..end,
            });
            start = end;
            label = next;
        }
        groups
    }

    /// Builds the axis of bin labels for `groups`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a label does not exist in the calendar,
    /// which cannot happen for groups produced by [`group_by`](Self::group_by).
    pub fn group_labels(&self, groups: &[TimeGroup]) -> Result<TimeAxis, CalendarError> {
        TimeAxis::new(self.calendar(), groups.iter().map(TimeGroup::label).collect())
    }
}
