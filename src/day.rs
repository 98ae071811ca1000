use std::fmt;
use std::num::NonZeroU16;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::is_leap_year;
use crate::consts::{
    DATE_SEPARATOR, DAYS_BEFORE_MONTH, DAYS_IN_MONTH, DAYS_IN_YEAR, FEBRUARY, FEBRUARY_LAST_COMMON_DAY, LEAP_DAY,
    MAX_YEAR, MIN_YEAR, MONTHS_IN_YEAR,
};
use crate::ParseError;

/// A year-independent calendar day, identified by its day of year in a common year.
///
/// Feb 29 has no calendar day of its own: it folds onto Feb 28, so the ordinal
/// always lies in `1..=365`. An absent day is `Option<CalendarDay>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDay(NonZeroU16);

impl CalendarDay {
    /// Jan 1
    pub const FIRST: Self = Self(NonZeroU16::MIN);
    /// Dec 31
    pub const LAST: Self = match NonZeroU16::new(DAYS_IN_YEAR) {
        Some(ordinal) => Self(ordinal),
        None => Self::FIRST,
    };

    /// Creates a day from month and day-of-month. Feb 29 silently becomes Feb 28.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidMonth` or `ParseError::InvalidDay` for values outside the calendar.
    pub fn new(month: u32, day: u32) -> Result<Self, ParseError> {
        if month == 0 || month > MONTHS_IN_YEAR {
            return Err(ParseError::InvalidMonth(month));
        }
        let day = if month == FEBRUARY && day == LEAP_DAY {
            FEBRUARY_LAST_COMMON_DAY
        } else {
            day
        };
        if day == 0 || day > DAYS_IN_MONTH[month as usize] {
            return Err(ParseError::InvalidDay { month, day });
        }
        #[allow(clippy::cast_possible_truncation)]
        let ordinal = DAYS_BEFORE_MONTH[month as usize] + day as u16;
        Self::from_ordinal(ordinal)
    }

    /// Creates a day from its day of year in a common year.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidDayOfYear` unless `ordinal` is in `1..=365`.
    pub fn from_ordinal(ordinal: u16) -> Result<Self, ParseError> {
        let non_zero = NonZeroU16::new(ordinal).ok_or(ParseError::InvalidDayOfYear(ordinal))?;
        if ordinal > DAYS_IN_YEAR {
            return Err(ParseError::InvalidDayOfYear(ordinal));
        }
        Ok(Self(non_zero))
    }

    /// The calendar day of an absolute date, folding Feb 29 onto Feb 28.
    pub fn from_date(date: NaiveDate) -> Self {
        let (month, day) = fold_leap_day(date.month(), date.day());
        #[allow(clippy::cast_possible_truncation)]
        let ordinal = DAYS_BEFORE_MONTH[month as usize] + day as u16;
        NonZeroU16::new(ordinal).map_or(Self::FIRST, Self)
    }

    /// Day of year in `1..=365`
    #[inline]
    pub const fn ordinal(self) -> u16 {
        self.0.get()
    }

    /// Month in `1..=12`
    pub fn month(self) -> u32 {
        let ordinal = self.ordinal();
        let before = DAYS_BEFORE_MONTH[1..].partition_point(|&start| start < ordinal);
        #[allow(clippy::cast_possible_truncation)]
        let month = before as u32;
        month
    }

    /// Day of month in `1..=31`
    pub fn day(self) -> u32 {
        u32::from(self.ordinal() - DAYS_BEFORE_MONTH[self.month() as usize])
    }

    /// Moves forward `days` days around the year cycle.
    ///
    /// `days` is reduced modulo 365 first, so whole-year shifts are no-ops.
    pub fn add_days(self, days: i32) -> Self {
        let shift = days.rem_euclid(i32::from(DAYS_IN_YEAR));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let shift = shift as u16;
        self.rotate(shift)
    }

    /// Moves backward `days` days around the year cycle.
    pub fn sub_days(self, days: i32) -> Self {
        let shift = days.rem_euclid(i32::from(DAYS_IN_YEAR));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let shift = shift as u16;
        self.rotate(DAYS_IN_YEAR - shift)
    }

    fn rotate(self, forward: u16) -> Self {
        let zero_based = (self.ordinal() - 1 + forward) % DAYS_IN_YEAR;
        NonZeroU16::new(zero_based + 1).map_or(Self::FIRST, Self)
    }

    /// The following day; Dec 31 wraps to Jan 1.
    pub fn next(self) -> Self {
        self.rotate(1)
    }

    /// The preceding day; Jan 1 wraps to Dec 31.
    pub fn prev(self) -> Self {
        self.rotate(DAYS_IN_YEAR - 1)
    }

    /// Days to go forward from `from` to reach `to`, in `0..=364`.
    pub fn difference(to: Self, from: Self) -> u16 {
        (to.ordinal() + DAYS_IN_YEAR - from.ordinal()) % DAYS_IN_YEAR
    }

    /// Projects the day onto `year`.
    ///
    /// With `leap_correction`, Feb 28 becomes Feb 29 in leap years.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for years outside `1..=9999`.
    pub fn to_date(self, year: i32, leap_correction: bool) -> Result<NaiveDate, ParseError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(year));
        }
        let (month, mut day) = (self.month(), self.day());
        if leap_correction && month == FEBRUARY && day == FEBRUARY_LAST_COMMON_DAY && is_leap_year(year) {
            day = LEAP_DAY;
        }
        NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidYear(year))
    }

    /// Whether this is the folded Feb 28/29 day.
    pub fn is_end_of_february(self) -> bool {
        self.month() == FEBRUARY && self.day() == FEBRUARY_LAST_COMMON_DAY
    }
}

const fn fold_leap_day(month: u32, day: u32) -> (u32, u32) {
    if month == FEBRUARY && day == LEAP_DAY {
        (month, FEBRUARY_LAST_COMMON_DAY)
    } else {
        (month, day)
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl TryFrom<u16> for CalendarDay {
    type Error = ParseError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_ordinal(value)
    }
}

impl From<CalendarDay> for u16 {
    fn from(day: CalendarDay) -> Self {
        day.ordinal()
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{DATE_SEPARATOR}{:02}", self.month(), self.day())
    }
}

impl FromStr for CalendarDay {
    type Err = ParseError;

    /// Parses `MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let (month, day) = trimmed
            .split_once(DATE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        Self::new(ParseError::parse_u32(month)?, ParseError::parse_u32(day)?)
    }
}

impl Serialize for CalendarDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cday, date};

    #[test]
    fn test_new_valid_and_invalid() {
        assert_eq!(cday(1, 1).ordinal(), 1);
        assert_eq!(cday(3, 1).ordinal(), 60);
        assert_eq!(cday(12, 31).ordinal(), 365);

        assert!(matches!(CalendarDay::new(0, 1), Err(ParseError::InvalidMonth(0))));
        assert!(matches!(CalendarDay::new(13, 1), Err(ParseError::InvalidMonth(13))));
        assert!(matches!(
            CalendarDay::new(4, 31),
            Err(ParseError::InvalidDay { month: 4, day: 31 })
        ));
        assert!(matches!(CalendarDay::new(2, 30), Err(ParseError::InvalidDay { .. })));
        assert!(matches!(CalendarDay::new(6, 0), Err(ParseError::InvalidDay { .. })));
    }

    #[test]
    fn test_feb_29_folds_to_feb_28() {
        assert_eq!(CalendarDay::new(2, 29).expect("Feb 29 folds"), cday(2, 28));
        assert_eq!(CalendarDay::from_date(date(2024, 2, 29)), cday(2, 28));
        assert_eq!(CalendarDay::from_date(date(2024, 3, 1)), cday(3, 1));
        assert!(cday(2, 28).is_end_of_february());
    }

    #[test]
    fn test_month_and_day_for_every_ordinal() {
        let mut ordinal = 0;
        for month in 1..=12 {
            for day in 1..=DAYS_IN_MONTH[month as usize] {
                ordinal += 1;
                let value = CalendarDay::from_ordinal(ordinal).expect("ordinal in range");
                assert_eq!((value.month(), value.day()), (month, day), "ordinal {ordinal}");
            }
        }
        assert_eq!(ordinal, 365);
    }

    #[test]
    fn test_from_ordinal_bounds() {
        assert!(CalendarDay::from_ordinal(0).is_err());
        assert!(CalendarDay::from_ordinal(366).is_err());
        assert_eq!(CalendarDay::from_ordinal(365).expect("Dec 31"), CalendarDay::LAST);
    }

    #[test]
    fn test_wraparound_arithmetic() {
        assert_eq!(cday(12, 31).add_days(1), cday(1, 1));
        assert_eq!(cday(3, 1).sub_days(1), cday(2, 28));
        assert_eq!(cday(1, 1).sub_days(1), cday(12, 31));
        assert_eq!(cday(1, 1).add_days(-1), cday(12, 31));
        assert_eq!(cday(12, 31).next(), cday(1, 1));
        assert_eq!(cday(1, 1).prev(), cday(12, 31));
    }

    #[test]
    fn test_whole_year_shift_is_noop() {
        let day = cday(7, 14);
        assert_eq!(day.add_days(365), day);
        assert_eq!(day.add_days(-730), day);
        assert_eq!(day.sub_days(365 * 3), day);
        assert_eq!(day.sub_days(i32::MIN).add_days(i32::MIN), day);
    }

    #[test]
    fn test_difference() {
        assert_eq!(CalendarDay::difference(cday(1, 10), cday(1, 1)), 9);
        assert_eq!(CalendarDay::difference(cday(1, 1), cday(12, 31)), 1);
        assert_eq!(CalendarDay::difference(cday(12, 31), cday(1, 1)), 364);
        assert_eq!(CalendarDay::difference(cday(5, 5), cday(5, 5)), 0);
    }

    #[test]
    fn test_to_date_leap_correction() {
        assert_eq!(cday(2, 28).to_date(2020, false).expect("valid"), date(2020, 2, 28));
        assert_eq!(cday(2, 28).to_date(2020, true).expect("valid"), date(2020, 2, 29));
        assert_eq!(cday(2, 28).to_date(2021, true).expect("valid"), date(2021, 2, 28));
        assert_eq!(cday(3, 1).to_date(2020, true).expect("valid"), date(2020, 3, 1));
        assert!(matches!(cday(1, 1).to_date(0, false), Err(ParseError::InvalidYear(0))));
        assert!(cday(1, 1).to_date(10000, false).is_err());
    }

    #[test]
    fn test_ordering() {
        assert!(cday(1, 31) < cday(2, 1));
        assert!(cday(12, 31) > cday(12, 30));
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(cday(3, 5).to_string(), "03-05");
        assert_eq!("03-05".parse::<CalendarDay>().expect("parses"), cday(3, 5));
        assert_eq!(" 2-29 ".parse::<CalendarDay>().expect("folds"), cday(2, 28));
        assert!(matches!("".parse::<CalendarDay>(), Err(ParseError::EmptyInput)));
        assert!(matches!("0305".parse::<CalendarDay>(), Err(ParseError::InvalidFormat(_))));
        assert!(matches!("13-01".parse::<CalendarDay>(), Err(ParseError::InvalidMonth(13))));
    }

    #[test]
    fn test_serde() {
        let day = cday(10, 10);
        let json = serde_json::to_string(&day).expect("serializes");
        assert_eq!(json, r#""10-10""#);
        let parsed: CalendarDay = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(parsed, day);

        let invalid: Result<CalendarDay, _> = serde_json::from_str(r#""04-31""#);
        assert!(invalid.is_err());
    }
}
