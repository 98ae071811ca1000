//! Builders shared by the unit tests.

use chrono::NaiveDate;

use crate::{CalendarDay, CyclicDayRange, DateInterval, DateIntervalSet, YearMonth, YearMonthRange};

pub(crate) type Ymd = (i32, u32, u32);

/// Any proleptic Gregorian date, including ones outside the supported range.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub(crate) fn cday(month: u32, day: u32) -> CalendarDay {
    CalendarDay::new(month, day).expect("valid calendar day")
}

pub(crate) fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).expect("valid year-month")
}

pub(crate) fn ym_range(first: (i32, u32), last: (i32, u32)) -> YearMonthRange {
    YearMonthRange::new(ym(first.0, first.1), ym(last.0, last.1)).expect("ordered range")
}

pub(crate) fn interval(first: Ymd, last: Ymd) -> DateInterval {
    tagged(first, last, ())
}

pub(crate) fn tagged<T>(first: Ymd, last: Ymd, tag: T) -> DateInterval<T> {
    DateInterval::new(date(first.0, first.1, first.2), date(last.0, last.1, last.2), tag).expect("ordered interval")
}

pub(crate) fn cyclic(first: (u32, u32), last: (u32, u32)) -> CyclicDayRange {
    cyclic_tagged(first, last, ())
}

pub(crate) fn cyclic_tagged<T>(first: (u32, u32), last: (u32, u32), tag: T) -> CyclicDayRange<T> {
    CyclicDayRange::new(cday(first.0, first.1), cday(last.0, last.1), tag)
}

/// Set built through the append-only path.
pub(crate) fn set_of(ranges: &[(Ymd, Ymd)]) -> DateIntervalSet {
    let mut set = DateIntervalSet::new();
    for &(first, last) in ranges {
        set.append(interval(first, last)).expect("strictly increasing members");
    }
    set
}

/// Member bounds, for compact assertions.
pub(crate) fn bounds_of<T>(set: &DateIntervalSet<T>) -> Vec<(NaiveDate, NaiveDate)> {
    set.iter().filter_map(DateInterval::bounds).collect()
}
