use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::consts::{DAYS_IN_YEAR, RANGE_SEPARATOR};
use crate::day::CalendarDay;
use crate::error::IntervalError;
use crate::interval::DateInterval;
use crate::ParseError;

/// Which endpoint of a wrapped range the requested year belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YearAnchor {
    /// The first day falls in the given year, the last day in the next one.
    #[default]
    FirstDay,
    /// The last day falls in the given year, the first day in the previous one.
    LastDay,
}

/// A year-independent range of calendar days carrying an opaque tag, or empty.
///
/// `first > last` is legal and means the range wraps through year end, e.g.
/// `Oct 10..May 15`. A range covering all 365 days is the whole year; every whole
/// range equals every other whole range with an equal tag, whatever its endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct CyclicDayRange<T = ()> {
    bounds: Option<(CalendarDay, CalendarDay)>,
    tag:    T,
}

/// Shape of the overlap between two non-empty, non-whole ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    None,
    One(CalendarDay, CalendarDay),
    Two((CalendarDay, CalendarDay), (CalendarDay, CalendarDay)),
}

impl Crossing {
    /// Classifies two ranges using only endpoint comparisons.
    fn classify(a: (CalendarDay, CalendarDay), b: (CalendarDay, CalendarDay)) -> Self {
        let ((p1, p2), (q1, q2)) = if a.0 <= b.0 { (a, b) } else { (b, a) };
        match (p1 > p2, q1 > q2) {
            (false, false) => {
                if q1 > p2 {
                    Self::None
                } else {
                    Self::One(q1, q2.min(p2))
                }
            }
            (false, true) => match (q1 <= p2, p1 <= q2) {
                (true, true) => Self::Two((p1, q2), (q1, p2)),
                (true, false) => Self::One(q1, p2),
                (false, true) => Self::One(p1, p2.min(q2)),
                (false, false) => Self::None,
            },
            // q1 >= p1 puts all of `q` in the part of `p` before year end
            (true, false) => Self::One(q1, q2),
            (true, true) => {
                if p1 <= q2 {
                    Self::Two((p1, q2), (q1, p2))
                } else {
                    Self::One(q1, q2.min(p2))
                }
            }
        }
    }
}

/// Whether the arc `outer` contains every day of the arc `inner`.
fn covers(outer: (CalendarDay, CalendarDay), inner: (CalendarDay, CalendarDay)) -> bool {
    CalendarDay::difference(inner.0, outer.0) + CalendarDay::difference(inner.1, inner.0)
        <= CalendarDay::difference(outer.1, outer.0)
}

impl<T> CyclicDayRange<T> {
    /// Creates a range; `first > last` wraps through year end.
    pub const fn new(first: CalendarDay, last: CalendarDay, tag: T) -> Self {
        Self {
            bounds: Some((first, last)),
            tag,
        }
    }

    /// A one-day range.
    pub const fn single(day: CalendarDay, tag: T) -> Self {
        Self::new(day, day, tag)
    }

    /// Jan 1 to Dec 31.
    pub const fn whole_with_tag(tag: T) -> Self {
        Self::new(CalendarDay::FIRST, CalendarDay::LAST, tag)
    }

    /// A range with no days that still carries `tag`.
    pub const fn empty_with_tag(tag: T) -> Self {
        Self { bounds: None, tag }
    }

    /// Creates a range from `(month, day)` pairs.
    ///
    /// # Errors
    /// Returns the wrapped `ParseError` for an invalid month or day.
    pub fn from_month_days(first: (u32, u32), last: (u32, u32), tag: T) -> Result<Self, IntervalError> {
        Ok(Self::new(
            CalendarDay::new(first.0, first.1)?,
            CalendarDay::new(last.0, last.1)?,
            tag,
        ))
    }

    /// Year-independent view of a date interval.
    ///
    /// Intervals longer than 365 days collapse to the whole year. Shorter ones keep
    /// their folded endpoints, so a span that skips a calendar day only because it
    /// contains Feb 29 (`2019-03-02..2020-02-29`) stays short of the whole year.
    pub fn from_date_interval(interval: &DateInterval<T>) -> Self
    where
        T: Clone,
    {
        let tag = interval.tag().clone();
        let Some((first, last)) = interval.bounds() else {
            return Self::empty_with_tag(tag);
        };
        if interval.days() > i64::from(DAYS_IN_YEAR) {
            return Self::whole_with_tag(tag);
        }
        Self::new(CalendarDay::from_date(first), CalendarDay::from_date(last), tag)
    }

    /// Returns `(first, last)` as stored; `first > last` when wrapped.
    pub const fn bounds(&self) -> Option<(CalendarDay, CalendarDay)> {
        self.bounds
    }

    /// Returns the first day of the range
    pub const fn first(&self) -> Option<CalendarDay> {
        match self.bounds {
            Some((first, _)) => Some(first),
            None => None,
        }
    }

    /// Returns the last day of the range, which precedes `first` when wrapped
    pub const fn last(&self) -> Option<CalendarDay> {
        match self.bounds {
            Some((_, last)) => Some(last),
            None => None,
        }
    }

    /// Returns the tag
    pub const fn tag(&self) -> &T {
        &self.tag
    }

    /// Consumes the range and returns its tag.
    pub fn into_tag(self) -> T {
        self.tag
    }

    /// Same days, different tag.
    pub fn with_tag<U>(self, tag: U) -> CyclicDayRange<U> {
        CyclicDayRange {
            bounds: self.bounds,
            tag,
        }
    }

    /// Checks if the range has no days
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Number of days covered, `0..=365`.
    pub fn len(&self) -> u16 {
        self.bounds
            .map_or(0, |(first, last)| CalendarDay::difference(last, first) + 1)
    }

    /// Whether all 365 days are covered.
    pub fn is_whole(&self) -> bool {
        self.len() == DAYS_IN_YEAR
    }

    /// Whether the range passes through Dec 31 into Jan 1.
    pub fn is_wrapped(&self) -> bool {
        self.bounds.is_some_and(|(first, last)| first > last)
    }

    /// Checks if `day` falls in the range, following the wrap through year end
    pub fn contains(&self, day: CalendarDay) -> bool {
        match self.bounds {
            None => false,
            Some((first, last)) if first <= last => first <= day && day <= last,
            Some((first, last)) => day >= first || day <= last,
        }
    }

    /// Whether the two ranges share at least one day.
    pub fn is_crossed<U>(&self, other: &CyclicDayRange<U>) -> bool {
        match (self.bounds, other.bounds) {
            (Some(_), Some(_)) if self.is_whole() || other.is_whole() => true,
            (Some(a), Some(b)) => Crossing::classify(a, b) != Crossing::None,
            _ => false,
        }
    }

    /// Iterates the days of the range in order, wrapping past Dec 31.
    pub fn days(&self) -> CalendarDays {
        CalendarDays {
            next:      self.first().unwrap_or(CalendarDay::FIRST),
            remaining: self.len(),
        }
    }
}

impl<T: Default> CyclicDayRange<T> {
    /// Whole year with the default tag.
    pub fn whole() -> Self {
        Self::whole_with_tag(T::default())
    }

    /// Empty range with the default tag.
    pub fn empty() -> Self {
        Self::empty_with_tag(T::default())
    }
}

impl<T: Clone> CyclicDayRange<T> {
    /// Rotates both endpoints by `days` (modulo 365).
    pub fn shift_days(&self, days: i32) -> Self {
        Self {
            bounds: self
                .bounds
                .map(|(first, last)| (first.add_days(days), last.add_days(days))),
            tag:    self.tag.clone(),
        }
    }

    /// The days outside the range. Empty and whole ranges map to themselves.
    pub fn complement(&self) -> Self {
        match self.bounds {
            Some((first, last)) if !self.is_whole() => Self::new(last.next(), first.prev(), self.tag.clone()),
            _ => self.clone(),
        }
    }

    /// Overlap of two ranges: zero, one or two sub-ranges ordered by start, tagged from `self`.
    ///
    /// Crossing with a whole range gives the other operand unchanged, tag included.
    /// When both are whole the result takes `other`'s endpoints with `self`'s tag.
    pub fn crosses(&self, other: &Self) -> Vec<Self> {
        let (Some(a), Some(b)) = (self.bounds, other.bounds) else {
            return Vec::new();
        };
        match (self.is_whole(), other.is_whole()) {
            (true, true) => return vec![Self::new(b.0, b.1, self.tag.clone())],
            (true, false) => return vec![other.clone()],
            (false, true) => return vec![self.clone()],
            (false, false) => {}
        }
        match Crossing::classify(a, b) {
            Crossing::None => Vec::new(),
            Crossing::One(first, last) => vec![Self::new(first, last, self.tag.clone())],
            Crossing::Two(low, high) => vec![
                Self::new(low.0, low.1, self.tag.clone()),
                Self::new(high.0, high.1, self.tag.clone()),
            ],
        }
    }

    /// Smallest range covering both operands, tagged from `self`.
    ///
    /// An empty operand yields the other operand unchanged. A whole operand, or two
    /// ranges that only a full year can cover, give the whole year.
    pub fn union(&self, other: &Self) -> Self {
        let (a, b) = match (self.bounds, other.bounds) {
            (None, _) => return other.clone(),
            (_, None) => return self.clone(),
            (Some(a), Some(b)) => (a, b),
        };
        if self.is_whole() || other.is_whole() {
            return Self::whole_with_tag(self.tag.clone());
        }
        // a cover starts where one operand starts and ends where one ends
        [a, (a.0, b.1), (b.0, a.1), b]
            .into_iter()
            .filter(|&candidate| covers(candidate, a) && covers(candidate, b))
            .min_by_key(|&(first, last)| (CalendarDay::difference(last, first), first, last))
            .map_or_else(
                || Self::whole_with_tag(self.tag.clone()),
                |(first, last)| Self::new(first, last, self.tag.clone()),
            )
    }

    /// Projects the range onto absolute dates in `year`.
    ///
    /// A non-wrapped range lies in `year`. A wrapped range spans `year` and the
    /// adjacent year chosen by `anchor`. Only the last endpoint is leap-corrected:
    /// a last day of Feb 28 becomes Feb 29 in a leap year. The empty range projects
    /// to the empty interval.
    ///
    /// # Errors
    /// Returns the wrapped `ParseError::InvalidYear` when a projected year leaves `1..=9999`.
    pub fn date_range(&self, year: i32, anchor: YearAnchor) -> Result<DateInterval<T>, IntervalError> {
        let Some((first, last)) = self.bounds else {
            return Ok(DateInterval::empty_with_tag(self.tag.clone()));
        };
        let (first_year, last_year) = match (first > last, anchor) {
            (false, _) => (year, year),
            (true, YearAnchor::FirstDay) => (year, year.saturating_add(1)),
            (true, YearAnchor::LastDay) => (year.saturating_sub(1), year),
        };
        DateInterval::new(
            first.to_date(first_year, false)?,
            last.to_date(last_year, true)?,
            self.tag.clone(),
        )
    }
}

impl<T: Clone> BitOr for CyclicDayRange<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(&rhs)
    }
}

impl CyclicDayRange<()> {
    /// Parses `MM-DD/MM-DD`; blank input is the empty range.
    ///
    /// # Errors
    /// Returns the wrapped `ParseError` for malformed text.
    pub fn parse(s: &str) -> Result<Self, IntervalError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }
        let (first, last) = trimmed
            .split_once(RANGE_SEPARATOR)
            .ok_or_else(|| ParseError::InvalidFormat(trimmed.to_owned()))?;
        Ok(Self::new(first.trim().parse()?, last.trim().parse()?, ()))
    }
}

impl<T: PartialEq> PartialEq for CyclicDayRange<T> {
    fn eq(&self, other: &Self) -> bool {
        let same_days = match (self.is_whole(), other.is_whole()) {
            (true, true) => true,
            (false, false) => self.bounds == other.bounds,
            _ => false,
        };
        same_days && self.tag == other.tag
    }
}

impl<T: Eq> Eq for CyclicDayRange<T> {}

impl<T: Hash> Hash for CyclicDayRange<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_whole() {
            DAYS_IN_YEAR.hash(state);
        } else {
            self.bounds.hash(state);
        }
        self.tag.hash(state);
    }
}

impl<T> fmt::Display for CyclicDayRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            None => Ok(()),
            Some((first, last)) => write!(f, "{first}{RANGE_SEPARATOR}{last}"),
        }
    }
}

#[derive(Serialize)]
struct CyclicDayRangeRef<'a, T> {
    first: Option<CalendarDay>,
    last:  Option<CalendarDay>,
    tag:   &'a T,
}

#[derive(Deserialize)]
struct CyclicDayRangeRepr<T> {
    first: Option<CalendarDay>,
    last:  Option<CalendarDay>,
    tag:   T,
}

impl<T: Serialize> Serialize for CyclicDayRange<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        CyclicDayRangeRef {
            first: self.first(),
            last:  self.last(),
            tag:   &self.tag,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for CyclicDayRange<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = CyclicDayRangeRepr::<T>::deserialize(deserializer)?;
        match (repr.first, repr.last) {
            (None, None) => Ok(Self::empty_with_tag(repr.tag)),
            (Some(first), Some(last)) => Ok(Self::new(first, last, repr.tag)),
            _ => Err(serde::de::Error::custom("cyclic range needs both ends or neither")),
        }
    }
}

/// Iterator over the days of a [`CyclicDayRange`].
#[derive(Debug, Clone)]
pub struct CalendarDays {
    next:      CalendarDay,
    remaining: u16,
}

impl Iterator for CalendarDays {
    type Item = CalendarDay;

    fn next(&mut self) -> Option<CalendarDay> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.next = current.next();
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.remaining);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CalendarDays {}

impl FusedIterator for CalendarDays {}
