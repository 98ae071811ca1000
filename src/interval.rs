use std::fmt;
use std::iter::FusedIterator;
use std::ops::BitOr;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    self, check_date, inclusive_days, is_month_end, is_month_start, max_date, min_date, month_delta, month_end,
    year_bounds,
};
use crate::consts::{DECEMBER, JANUARY, MAX_YEAR, MIN_YEAR, MONTHS_IN_YEAR, RANGE_SEPARATOR};
use crate::cyclic::CyclicDayRange;
use crate::duration::CalendarDuration;
use crate::error::IntervalError;
use crate::set::DateIntervalSet;
use crate::year_month::{YearMonth, YearMonthRange};
use crate::ParseError;

/// A closed interval of calendar dates `[first, last]` carrying an opaque tag, or empty.
///
/// Intervals order by `first`, then `last`, then tag; the empty interval sorts first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateInterval<T = ()> {
    bounds: Option<(NaiveDate, NaiveDate)>,
    tag:    T,
}

impl<T> DateInterval<T> {
    /// Creates an interval with validation.
    ///
    /// # Errors
    /// Returns `IntervalError::InvalidRange` if `first > last` and
    /// `IntervalError::OutOfRange` for dates outside `0001-01-01..=9999-12-31`.
    pub fn new(first: NaiveDate, last: NaiveDate, tag: T) -> Result<Self, IntervalError> {
        check_date(first)?;
        check_date(last)?;
        if first > last {
            return Err(IntervalError::InvalidRange { first, last });
        }
        Ok(Self {
            bounds: Some((first, last)),
            tag,
        })
    }

    /// A one-day interval.
    ///
    /// # Errors
    /// Returns `IntervalError::OutOfRange` for dates outside the supported range.
    pub fn single(date: NaiveDate, tag: T) -> Result<Self, IntervalError> {
        Self::new(date, date, tag)
    }

    /// Jan 1 to Dec 31 of `year`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` (wrapped) for years outside `1..=9999`.
    pub fn year(year: i32, tag: T) -> Result<Self, IntervalError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(year).into());
        }
        let (first, last) = year_bounds(year).ok_or(ParseError::InvalidYear(year))?;
        Self::new(first, last, tag)
    }

    /// The whole month `month` of `year`.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`/`InvalidMonth` (wrapped) for invalid components.
    pub fn month(year: i32, month: u32, tag: T) -> Result<Self, IntervalError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ParseError::InvalidYear(year).into());
        }
        if month == 0 || month > MONTHS_IN_YEAR {
            return Err(ParseError::InvalidMonth(month).into());
        }
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ParseError::InvalidMonth(month))?;
        Self::new(first, month_end(first), tag)
    }

    /// The whole month `month`.
    pub fn from_year_month(month: YearMonth, tag: T) -> Self {
        Self {
            bounds: Some((month.first_day(), month.last_day())),
            tag,
        }
    }

    /// First day of the first month to last day of the last month. Empty maps to empty.
    pub fn from_year_month_range(range: &YearMonthRange, tag: T) -> Self {
        Self {
            bounds: range
                .bounds()
                .map(|(first, last)| (first.first_day(), last.last_day())),
            tag,
        }
    }

    /// An interval with optional ends; a missing end extends to the earliest or latest representable date.
    ///
    /// # Errors
    /// Same as [`DateInterval::new`].
    pub fn bounded(first: Option<NaiveDate>, last: Option<NaiveDate>, tag: T) -> Result<Self, IntervalError> {
        Self::new(first.unwrap_or_else(min_date), last.unwrap_or_else(max_date), tag)
    }

    /// `0001-01-01..=9999-12-31`
    pub fn whole_with_tag(tag: T) -> Self {
        Self {
            bounds: Some((min_date(), max_date())),
            tag,
        }
    }

    /// An interval with no dates that still carries `tag`.
    pub const fn empty_with_tag(tag: T) -> Self {
        Self { bounds: None, tag }
    }

    /// Returns `(first, last)`, or `None` for the empty interval
    pub const fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.bounds
    }

    /// Returns the first date of the interval
    pub const fn first(&self) -> Option<NaiveDate> {
        match self.bounds {
            Some((first, _)) => Some(first),
            None => None,
        }
    }

    /// Returns the last date of the interval (inclusive)
    pub const fn last(&self) -> Option<NaiveDate> {
        match self.bounds {
            Some((_, last)) => Some(last),
            None => None,
        }
    }

    /// Returns the tag
    pub const fn tag(&self) -> &T {
        &self.tag
    }

    /// Consumes the interval, keeping only its tag.
    pub fn into_tag(self) -> T {
        self.tag
    }

    /// Same dates, different tag.
    pub fn with_tag<U>(self, tag: U) -> DateInterval<U> {
        DateInterval {
            bounds: self.bounds,
            tag,
        }
    }

    /// Checks if the interval has no dates
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Whether the interval spans every representable date.
    pub fn is_whole(&self) -> bool {
        self.bounds == Some((min_date(), max_date()))
    }

    fn require(&self) -> Result<(NaiveDate, NaiveDate), IntervalError> {
        self.bounds.ok_or(IntervalError::Empty)
    }

    /// Inclusive day count, 0 when empty.
    pub fn days(&self) -> i64 {
        self.bounds
            .map_or(0, |(first, last)| inclusive_days(first, last))
    }

    /// Calendar month count.
    ///
    /// Starts from the number of month boundaries crossed. An interval running from
    /// a 1st to a month end counts every month it touches; one that is aligned on a
    /// single side counts the months up to that side; an unaligned one drops a month
    /// when the last day-of-month falls short of the first day-of-month minus one.
    /// `[Jan 31, Jan 31]` is 0 months, `[Jan 1, Jan 31]` is 1.
    pub fn months(&self) -> i32 {
        let Some((first, last)) = self.bounds else {
            return 0;
        };
        let naive = month_delta(first, last);
        match (is_month_start(first), is_month_end(last)) {
            (true, true) => naive + 1,
            (true, false) | (false, true) => naive,
            (false, false) if last.day() + 1 >= first.day() => naive,
            (false, false) => naive - 1,
        }
    }

    /// Whole calendar years, counted as `months() / 12`.
    pub fn years(&self) -> i32 {
        self.months() / 12
    }

    /// Whole months reached day-for-day, e.g. `[Jan 15, Feb 14]` is 1 and `[Jan 15, Feb 13]` is 0.
    pub fn simple_months(&self) -> i32 {
        self.age().map_or(0, CalendarDuration::total_months)
    }

    /// Years reached day-for-day, `simple_months() / 12`.
    pub fn simple_years(&self) -> i32 {
        self.simple_months() / 12
    }

    /// Starts on the 1st and ends on a month end.
    pub fn are_whole_months(&self) -> bool {
        self.bounds
            .is_some_and(|(first, last)| is_month_start(first) && is_month_end(last))
    }

    /// Starts on Jan 1 and ends on Dec 31.
    pub fn are_whole_years(&self) -> bool {
        self.bounds.is_some_and(|(first, last)| {
            (first.month(), first.day()) == (JANUARY, 1) && (last.month(), last.day()) == (DECEMBER, 31)
        })
    }

    /// Inclusive calendar length: `[2021-01-01, 2021-12-31]` is one year.
    ///
    /// # Errors
    /// Returns `IntervalError::Empty` for the empty interval.
    pub fn age(&self) -> Result<CalendarDuration, IntervalError> {
        let (first, last) = self.require()?;
        let after_last = last
            .succ_opt()
            .ok_or_else(|| IntervalError::OutOfRange(last.to_string()))?;
        CalendarDuration::between(first, after_last)
    }

    /// Checks if the interval contains a given date
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.bounds
            .is_some_and(|(first, last)| first <= date && date <= last)
    }

    /// Whether `other` lies entirely inside `self`. Nothing contains the empty interval.
    pub fn contains_interval<U>(&self, other: &DateInterval<U>) -> bool {
        match (self.bounds, other.bounds) {
            (Some((first, last)), Some((other_first, other_last))) => first <= other_first && other_last <= last,
            _ => false,
        }
    }

    /// Whether the intervals share at least one date.
    pub fn is_crossed<U>(&self, other: &DateInterval<U>) -> bool {
        match (self.bounds, other.bounds) {
            (Some((a1, a2)), Some((b1, b2))) => a1 <= b2 && b1 <= a2,
            _ => false,
        }
    }

    /// Iterates every date from `first` to `last`.
    pub fn iter(&self) -> DateIter {
        DateIter::new(self.bounds)
    }

    /// Months touched by the interval.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear` (wrapped) past year 5460.
    pub fn to_year_month_range(&self) -> Result<YearMonthRange, IntervalError> {
        YearMonthRange::from_date_interval(self)
    }
}

impl<T: Default> DateInterval<T> {
    /// The empty interval.
    pub fn empty() -> Self {
        Self::empty_with_tag(T::default())
    }

    /// The interval spanning every representable date.
    pub fn whole() -> Self {
        Self::whole_with_tag(T::default())
    }
}

impl<T: Clone> DateInterval<T> {
    /// Shifts both ends by `days`.
    ///
    /// # Errors
    /// Returns `IntervalError::Empty` for the empty interval and
    /// `IntervalError::OutOfRange` if an end leaves the supported range.
    pub fn add_days(&self, days: i64) -> Result<Self, IntervalError> {
        let (first, last) = self.require()?;
        Ok(Self {
            bounds: Some((calendar::add_days(first, days)?, calendar::add_days(last, days)?)),
            tag:    self.tag.clone(),
        })
    }

    /// Shifts by `months` calendar months.
    ///
    /// An interval of whole months stays whole: the new start is shifted and the
    /// end is recomputed from the original month count. Otherwise both ends move
    /// keeping their day-of-month, clamped to month end. The operation is not
    /// additive: two 1-month shifts of `[Jan 4, Jan 31]` end on Mar 28, one
    /// 2-month shift ends on Mar 31.
    ///
    /// # Errors
    /// Returns `IntervalError::Empty` for the empty interval and
    /// `IntervalError::OutOfRange` if an end leaves the supported range.
    pub fn add_months(&self, months: i32) -> Result<Self, IntervalError> {
        let (first, last) = self.require()?;
        let bounds = if self.are_whole_months() {
            let first = calendar::add_months(first, months)?;
            let last = month_end(calendar::add_months(first, self.months() - 1)?);
            (first, last)
        } else {
            (calendar::add_months(first, months)?, calendar::add_months(last, months)?)
        };
        Ok(Self {
            bounds: Some(bounds),
            tag:    self.tag.clone(),
        })
    }

    /// Moves forward by `periods` lengths of this interval: by months for whole-month
    /// intervals, by days otherwise. Negative `periods` move backward.
    ///
    /// # Errors
    /// Returns `IntervalError::Empty` for the empty interval and
    /// `IntervalError::OutOfRange` on overflow.
    pub fn shift_forward(&self, periods: i32) -> Result<Self, IntervalError> {
        self.require()?;
        let overflow = || IntervalError::OutOfRange(format!("{self} shifted by {periods} periods"));
        if self.are_whole_months() {
            let months = self.months().checked_mul(periods).ok_or_else(overflow)?;
            self.add_months(months)
        } else {
            let days = self.days().checked_mul(i64::from(periods)).ok_or_else(overflow)?;
            self.add_days(days)
        }
    }

    /// Moves backward by `periods` lengths of this interval.
    ///
    /// # Errors
    /// Same as [`DateInterval::shift_forward`].
    pub fn shift_backward(&self, periods: i32) -> Result<Self, IntervalError> {
        let periods = periods
            .checked_neg()
            .ok_or_else(|| IntervalError::OutOfRange(format!("{self} shifted by -{periods} periods")))?;
        self.shift_forward(periods)
    }

    /// Smallest interval covering both operands, tagged from `self`.
    ///
    /// An empty operand yields the other operand unchanged.
    pub fn union(&self, other: &Self) -> Self {
        match (self.bounds, other.bounds) {
            (None, _) => other.clone(),
            (_, None) => self.clone(),
            (Some((a1, a2)), Some((b1, b2))) => Self {
                bounds: Some((a1.min(b1), a2.max(b2))),
                tag:    self.tag.clone(),
            },
        }
    }

    /// Overlap of both operands tagged from `self`, or `None` when they do not cross.
    pub fn try_intersect<U>(&self, other: &DateInterval<U>) -> Option<Self> {
        let (a1, a2) = self.bounds?;
        let (b1, b2) = other.bounds?;
        let (first, last) = (a1.max(b1), a2.min(b2));
        (first <= last).then(|| Self {
            bounds: Some((first, last)),
            tag:    self.tag.clone(),
        })
    }

    /// Overlap of both operands tagged from `self`.
    ///
    /// # Errors
    /// Returns `IntervalError::Disjoint` when the intervals do not cross.
    pub fn intersect<U>(&self, other: &DateInterval<U>) -> Result<Self, IntervalError> {
        self.try_intersect(other).ok_or(IntervalError::Disjoint)
    }

    /// Partitions the interval at calendar-year boundaries.
    pub fn split_into_years(&self) -> DateIntervalSet<T> {
        let mut pieces = DateIntervalSet::new();
        let Some((first, last)) = self.bounds else {
            return pieces;
        };
        for year in first.year()..=last.year() {
            if let Some((jan_1, dec_31)) = year_bounds(year) {
                pieces.push_sorted(Self {
                    bounds: Some((first.max(jan_1), last.min(dec_31))),
                    tag:    self.tag.clone(),
                });
            }
        }
        pieces
    }

    /// Partitions the interval at calendar-month boundaries.
    pub fn split_into_months(&self) -> DateIntervalSet<T> {
        let mut pieces = DateIntervalSet::new();
        let Some((first, last)) = self.bounds else {
            return pieces;
        };
        let mut cursor = first;
        loop {
            let end = month_end(cursor).min(last);
            pieces.push_sorted(Self {
                bounds: Some((cursor, end)),
                tag:    self.tag.clone(),
            });
            match end.succ_opt() {
                Some(next) if end < last => cursor = next,
                _ => break,
            }
        }
        pieces
    }

    /// Year-independent view of the interval.
    pub fn to_cyclic(&self) -> CyclicDayRange<T> {
        CyclicDayRange::from_date_interval(self)
    }
}

impl<T: Clone> BitOr for DateInterval<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(&rhs)
    }
}

impl<'a, T> IntoIterator for &'a DateInterval<T> {
    type Item = NaiveDate;
    type IntoIter = DateIter;

    fn into_iter(self) -> DateIter {
        self.iter()
    }
}

impl<T> fmt::Display for DateInterval<T> {
    /// `first/last`; the empty interval renders as nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            None => Ok(()),
            Some((first, last)) => write!(f, "{first}{RANGE_SEPARATOR}{last}"),
        }
    }
}

impl<T: Default> FromStr for DateInterval<T> {
    type Err = IntervalError;

    /// Parses `YYYY-MM-DD/YYYY-MM-DD`; blank input is the empty interval.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }
        let (first, last) = trimmed
            .split_once(RANGE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        let parse = |text: &str| {
            text.trim()
                .parse::<NaiveDate>()
                .map_err(|_| ParseError::InvalidFormat(text.to_owned()))
        };
        Self::new(parse(first)?, parse(last)?, T::default())
    }
}

#[derive(Serialize)]
struct DateIntervalRef<'a, T> {
    first: Option<NaiveDate>,
    last:  Option<NaiveDate>,
    tag:   &'a T,
}

#[derive(Deserialize)]
struct DateIntervalRepr<T> {
    first: Option<NaiveDate>,
    last:  Option<NaiveDate>,
    tag:   T,
}

impl<T: Serialize> Serialize for DateInterval<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        DateIntervalRef {
            first: self.first(),
            last:  self.last(),
            tag:   &self.tag,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for DateInterval<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = DateIntervalRepr::<T>::deserialize(deserializer)?;
        match (repr.first, repr.last) {
            (None, None) => Ok(Self::empty_with_tag(repr.tag)),
            (Some(first), Some(last)) => Self::new(first, last, repr.tag).map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom("interval needs both ends or neither")),
        }
    }
}

/// Iterator over the dates of a [`DateInterval`], first to last.
#[derive(Debug, Clone)]
pub struct DateIter {
    front:     NaiveDate,
    back:      NaiveDate,
    remaining: usize,
}

impl DateIter {
    fn new(bounds: Option<(NaiveDate, NaiveDate)>) -> Self {
        match bounds {
            Some((first, last)) => Self {
                front:     first,
                back:      last,
                remaining: usize::try_from(inclusive_days(first, last)).unwrap_or(0),
            },
            None => Self {
                front:     min_date(),
                back:      min_date(),
                remaining: 0,
            },
        }
    }
}

impl Iterator for DateIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front;
        self.remaining -= 1;
        if self.remaining > 0 {
            if let Some(next) = current.succ_opt() {
                self.front = next;
            }
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for DateIter {
    fn next_back(&mut self) -> Option<NaiveDate> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back;
        self.remaining -= 1;
        if self.remaining > 0 {
            if let Some(prev) = current.pred_opt() {
                self.back = prev;
            }
        }
        Some(current)
    }
}

impl ExactSizeIterator for DateIter {}

impl FusedIterator for DateIter {}
