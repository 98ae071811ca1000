use std::fmt;
use std::num::NonZeroU16;
use std::ops::{BitOr, Sub};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::month_length;
use crate::consts::{DATE_SEPARATOR, MAX_YEAR_MONTH_YEAR, MIN_YEAR, MONTHS_IN_YEAR, RANGE_SEPARATOR};
use crate::error::IntervalError;
use crate::interval::DateInterval;
use crate::ParseError;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const MIN_ORDINAL: u16 = (MIN_YEAR as u32 * MONTHS_IN_YEAR) as u16;
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const MAX_ORDINAL: u16 = (MAX_YEAR_MONTH_YEAR as u32 * MONTHS_IN_YEAR + MONTHS_IN_YEAR - 1) as u16;

/// An absolute month, packed as `year * 12 + (month - 1)`.
///
/// Years are limited to `1..=5460` so the ordinal fits in 16 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NonZeroU16);

impl YearMonth {
    /// Creates a year-month, validating both components.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for years outside `1..=5460` and
    /// `ParseError::InvalidMonth` for months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, ParseError> {
        if !(MIN_YEAR..=MAX_YEAR_MONTH_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(year));
        }
        if month == 0 || month > MONTHS_IN_YEAR {
            return Err(ParseError::InvalidMonth(month));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ordinal = (year as u32 * MONTHS_IN_YEAR + month - 1) as u16;
        Self::from_ordinal(ordinal)
    }

    /// Creates a year-month from its packed ordinal.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` if the ordinal encodes a year outside `1..=5460`.
    pub fn from_ordinal(ordinal: u16) -> Result<Self, ParseError> {
        if !(MIN_ORDINAL..=MAX_ORDINAL).contains(&ordinal) {
            return Err(ParseError::InvalidYear(i32::from(ordinal) / 12));
        }
        NonZeroU16::new(ordinal)
            .map(Self)
            .ok_or(ParseError::InvalidYear(0))
    }

    /// The month containing `date`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` for dates after year 5460.
    pub fn from_date(date: NaiveDate) -> Result<Self, ParseError> {
        Self::new(date.year(), date.month())
    }

    /// Returns the packed ordinal, `year * 12 + month - 1`
    #[inline]
    pub const fn ordinal(self) -> u16 {
        self.0.get()
    }

    /// Returns the year
    pub fn year(self) -> i32 {
        i32::from(self.ordinal()) / 12
    }

    /// Returns the month (1-12)
    pub fn month(self) -> u32 {
        u32::from(self.ordinal()) % MONTHS_IN_YEAR + 1
    }

    /// Length of this month, 29 for a leap February.
    pub fn days_in_month(self) -> u32 {
        month_length(self.year(), self.month())
    }

    /// First day of the month
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year(), self.month(), 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month
    pub fn last_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year(), self.month(), self.days_in_month()).unwrap_or(NaiveDate::MIN)
    }

    /// Shifts by a signed number of months.
    ///
    /// # Errors
    /// Returns `IntervalError::OutOfRange` if the result leaves years `1..=5460`.
    pub fn add_months(self, months: i32) -> Result<Self, IntervalError> {
        let shifted = i64::from(self.ordinal()) + i64::from(months);
        u16::try_from(shifted)
            .ok()
            .and_then(|ordinal| Self::from_ordinal(ordinal).ok())
            .ok_or_else(|| IntervalError::OutOfRange(format!("{self} {months:+} months")))
    }

    /// Shifts back by a signed number of months.
    ///
    /// # Errors
    /// Returns `IntervalError::OutOfRange` if the result leaves years `1..=5460`.
    pub fn sub_months(self, months: i32) -> Result<Self, IntervalError> {
        let months = months
            .checked_neg()
            .ok_or_else(|| IntervalError::OutOfRange(format!("{self} -{months} months")))?;
        self.add_months(months)
    }

    /// The following month.
    ///
    /// # Errors
    /// Returns `IntervalError::OutOfRange` after December 5460.
    pub fn next(self) -> Result<Self, IntervalError> {
        self.add_months(1)
    }

    /// The preceding month.
    ///
    /// # Errors
    /// Returns `IntervalError::OutOfRange` before January of year 1.
    pub fn prev(self) -> Result<Self, IntervalError> {
        self.add_months(-1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(self, other: Self) -> i32 {
        i32::from(other.ordinal()) - i32::from(self.ordinal())
    }
}

impl Sub for YearMonth {
    type Output = i32;

    fn sub(self, rhs: Self) -> i32 {
        rhs.months_until(self)
    }
}

impl TryFrom<NaiveDate> for YearMonth {
    type Error = ParseError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_date(date)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{DATE_SEPARATOR}{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        let (year, month) = trimmed
            .split_once(DATE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        Self::new(ParseError::parse_year(year)?, ParseError::parse_u32(month)?)
    }
}

impl Serialize for YearMonth {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A contiguous, non-wrapping range of months (inclusive), or empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonthRange {
    bounds: Option<(YearMonth, YearMonth)>,
}

impl YearMonthRange {
    pub const EMPTY: Self = Self { bounds: None };

    /// Creates a range with validation.
    ///
    /// # Errors
    /// Returns `IntervalError::InvalidYearMonthRange` if `first > last`.
    pub fn new(first: YearMonth, last: YearMonth) -> Result<Self, IntervalError> {
        if first > last {
            return Err(IntervalError::InvalidYearMonthRange { first, last });
        }
        Ok(Self {
            bounds: Some((first, last)),
        })
    }

    /// A one-month range.
    pub const fn single(month: YearMonth) -> Self {
        Self {
            bounds: Some((month, month)),
        }
    }

    /// Same as [`YearMonthRange::EMPTY`].
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Months touched by a date interval. Empty intervals give an empty range.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` (wrapped) if the interval reaches past year 5460.
    pub fn from_date_interval<T>(interval: &DateInterval<T>) -> Result<Self, IntervalError> {
        match interval.bounds() {
            None => Ok(Self::EMPTY),
            Some((first, last)) => Self::new(YearMonth::from_date(first)?, YearMonth::from_date(last)?),
        }
    }

    /// Returns the first month of the range
    pub const fn first(&self) -> Option<YearMonth> {
        match self.bounds {
            Some((first, _)) => Some(first),
            None => None,
        }
    }

    /// Returns the last month of the range (inclusive)
    pub const fn last(&self) -> Option<YearMonth> {
        match self.bounds {
            Some((_, last)) => Some(last),
            None => None,
        }
    }

    /// Returns both ends as a tuple, `None` when empty
    pub const fn bounds(&self) -> Option<(YearMonth, YearMonth)> {
        self.bounds
    }

    /// Checks if the range covers no months
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Number of months covered (inclusive), 0 when empty.
    pub fn len(&self) -> u32 {
        self.bounds.map_or(0, |(first, last)| {
            u32::from(last.ordinal() - first.ordinal()) + 1
        })
    }

    /// Checks if the range contains a given month
    pub fn contains(&self, month: YearMonth) -> bool {
        self.bounds
            .is_some_and(|(first, last)| first <= month && month <= last)
    }

    /// Smallest range covering both operands. An empty operand yields the other.
    pub fn union(&self, other: &Self) -> Self {
        match (self.bounds, other.bounds) {
            (None, _) => *other,
            (_, None) => *self,
            (Some((a1, a2)), Some((b1, b2))) => Self {
                bounds: Some((a1.min(b1), a2.max(b2))),
            },
        }
    }

    /// Overlap of both operands, or `None` when they do not cross.
    pub fn try_intersect(&self, other: &Self) -> Option<Self> {
        let (a1, a2) = self.bounds?;
        let (b1, b2) = other.bounds?;
        let (first, last) = (a1.max(b1), a2.min(b2));
        (first <= last).then_some(Self {
            bounds: Some((first, last)),
        })
    }

    /// Overlap of both operands.
    ///
    /// # Errors
    /// Returns `IntervalError::Disjoint` when the ranges do not cross.
    pub fn intersect(&self, other: &Self) -> Result<Self, IntervalError> {
        self.try_intersect(other).ok_or(IntervalError::Disjoint)
    }

    /// Whether the ranges share a month.
    pub fn is_crossed(&self, other: &Self) -> bool {
        self.try_intersect(other).is_some()
    }

    /// Moves both ends by a signed number of months. Empty stays empty.
    ///
    /// # Errors
    /// Returns `IntervalError::OutOfRange` if either end leaves years `1..=5460`.
    pub fn shift_months(&self, months: i32) -> Result<Self, IntervalError> {
        match self.bounds {
            None => Ok(Self::EMPTY),
            Some((first, last)) => Self::new(first.add_months(months)?, last.add_months(months)?),
        }
    }

    /// Iterates the months of the range in order.
    pub fn months(self) -> impl DoubleEndedIterator<Item = YearMonth> {
        let ordinals = match self.bounds {
            Some((first, last)) => first.ordinal()..=last.ordinal(),
            #[allow(clippy::reversed_empty_ranges)]
            None => 1..=0,
        };
        ordinals.filter_map(|ordinal| YearMonth::from_ordinal(ordinal).ok())
    }
}

impl From<YearMonth> for YearMonthRange {
    fn from(month: YearMonth) -> Self {
        Self::single(month)
    }
}

impl BitOr for YearMonthRange {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(&rhs)
    }
}

impl fmt::Display for YearMonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            None => Ok(()),
            Some((first, last)) => write!(f, "{first}{RANGE_SEPARATOR}{last}"),
        }
    }
}

impl FromStr for YearMonthRange {
    type Err = IntervalError;

    /// Parses `YYYY-MM/YYYY-MM`; blank input is the empty range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::EMPTY);
        }
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();
        if separator_count != 1 {
            return Err(ParseError::InvalidFormat(format!(
                "expected 1 '{RANGE_SEPARATOR}' separator, found {separator_count}: {trimmed}"
            ))
            .into());
        }
        let (first, last) = trimmed
            .split_once(RANGE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        Self::new(first.parse()?, last.parse()?)
    }
}

impl Serialize for YearMonthRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YearMonthRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
