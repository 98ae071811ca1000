//! Calendar interval algebra.
//!
//! Value types for absolute date intervals ([`DateInterval`]), year-independent
//! day-of-year ranges that may wrap past year end ([`CyclicDayRange`]), absolute
//! month ranges ([`YearMonthRange`]) and signed calendar offsets
//! ([`CalendarDuration`]), plus [`DateIntervalSet`], a sorted collection of
//! non-overlapping intervals with set-algebraic mutation.
//!
//! Dates are proleptic Gregorian [`chrono::NaiveDate`] values in
//! `0001-01-01..=9999-12-31`. Ranges and intervals carry an opaque tag `T`
//! (defaulting to `()`) that the algebra copies but never interprets.

mod calendar;
mod consts;
mod cyclic;
mod day;
mod duration;
mod error;
pub mod format;
mod interval;
mod prelude;
mod set;
mod year_month;

#[cfg(test)]
mod test_utils;

pub use calendar::{
    add_days, add_months, days_in_month, is_leap_year, is_month_end, is_month_start, max_date, min_date,
    month_end, month_start,
};
pub use consts::*;
pub use cyclic::{CalendarDays, CyclicDayRange, YearAnchor};
pub use day::CalendarDay;
pub use duration::CalendarDuration;
pub use error::IntervalError;
pub use interval::{DateInterval, DateIter};
pub use set::DateIntervalSet;
pub use year_month::{YearMonth, YearMonthRange};

use crate::prelude::*;

/// Component validation and text parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MONTHS_IN_YEAR)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {month:02}")]
    InvalidDay { month: u32, day: u32 },
    #[display(fmt = "Invalid day of year: {} (must be 1-{})", "_0", DAYS_IN_YEAR)]
    InvalidDayOfYear(u16),
    #[display(fmt = "Empty input")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Helper to parse an unsigned component with a format error naming the token
    pub(crate) fn parse_u32(s: &str) -> Result<u32, Self> {
        s.trim()
            .parse::<u32>()
            .map_err(|_| Self::InvalidFormat(s.to_owned()))
    }

    /// Helper to parse a year component
    pub(crate) fn parse_year(s: &str) -> Result<i32, Self> {
        s.trim()
            .parse::<i32>()
            .map_err(|_| Self::InvalidFormat(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        assert_eq!(ParseError::InvalidYear(0).to_string(), "Invalid year: 0 (must be 1-9999)");
        assert_eq!(ParseError::InvalidMonth(13).to_string(), "Invalid month: 13 (must be 1-12)");
        assert_eq!(
            ParseError::InvalidDay { month: 4, day: 31 }.to_string(),
            "Invalid day 31 for month 04"
        );
        assert_eq!(
            ParseError::InvalidDayOfYear(366).to_string(),
            "Invalid day of year: 366 (must be 1-365)"
        );
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(ParseError::parse_u32(" 07 "), Ok(7));
        assert!(matches!(ParseError::parse_u32("x7"), Err(ParseError::InvalidFormat(_))));
        assert_eq!(ParseError::parse_year("2024"), Ok(2024));
        assert!(matches!(ParseError::parse_year(""), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_constants() {
        assert_eq!(MAX_YEAR, 9999);
        assert_eq!(DAYS_IN_YEAR, 365);
        assert_eq!(DAYS_IN_MONTH.iter().sum::<u32>(), 365);
    }
}
