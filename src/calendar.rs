use chrono::{Datelike, Days, Months, NaiveDate};

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DECEMBER, FEBRUARY, GREGORIAN_CYCLE, JANUARY, LEAP_DAY, LEAP_YEAR_CYCLE,
    MAX_YEAR, MIN_YEAR,
};
use crate::error::IntervalError;
use crate::ParseError;

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Length of `month` in `year`.
///
/// # Errors
/// Returns `ParseError::InvalidMonth` unless `month` is in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, ParseError> {
    if month == 0 || month > DECEMBER {
        return Err(ParseError::InvalidMonth(month));
    }
    Ok(month_length(year, month))
}

/// Unchecked month length for months taken from valid dates.
pub(crate) const fn month_length(year: i32, month: u32) -> u32 {
    debug_assert!(month != 0 && month <= DECEMBER);

    if month == FEBRUARY && is_leap_year(year) {
        LEAP_DAY
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Earliest representable date, `0001-01-01`.
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(MIN_YEAR, JANUARY, 1).unwrap_or(NaiveDate::MIN)
}

/// Latest representable date, `9999-12-31`.
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(MAX_YEAR, DECEMBER, 31).unwrap_or(NaiveDate::MAX)
}

/// Checks that `date` lies within the supported range.
///
/// # Errors
/// Returns `IntervalError::OutOfRange` for dates before `0001-01-01` or after `9999-12-31`.
pub fn check_date(date: NaiveDate) -> Result<NaiveDate, IntervalError> {
    if date < min_date() || date > max_date() {
        return Err(IntervalError::OutOfRange(date.to_string()));
    }
    Ok(date)
}

/// Shifts a date by a signed number of days.
///
/// # Errors
/// Returns `IntervalError::OutOfRange` if the result leaves the supported range.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, IntervalError> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted
        .ok_or_else(|| IntervalError::OutOfRange(format!("{date} {days:+} days")))
        .and_then(check_date)
}

/// Shifts a date by a signed number of months, clamping the day to the target month's length.
///
/// # Errors
/// Returns `IntervalError::OutOfRange` if the result leaves the supported range.
pub fn add_months(date: NaiveDate, months: i32) -> Result<NaiveDate, IntervalError> {
    raw_add_months(date, months)
        .ok_or_else(|| IntervalError::OutOfRange(format!("{date} {months:+} months")))
        .and_then(check_date)
}

/// Month shift without the supported-range check, for differences that may touch `10000-01-01`.
pub(crate) fn raw_add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(month_length(date.year(), date.month()))
        .unwrap_or(date)
}

pub fn is_month_start(date: NaiveDate) -> bool {
    date.day() == 1
}

pub fn is_month_end(date: NaiveDate) -> bool {
    date.day() == month_length(date.year(), date.month())
}

/// Jan 1 and Dec 31 of `year`.
pub(crate) fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, JANUARY, 1)?,
        NaiveDate::from_ymd_opt(year, DECEMBER, 31)?,
    ))
}

/// Inclusive day count of `[first, last]`.
pub(crate) fn inclusive_days(first: NaiveDate, last: NaiveDate) -> i64 {
    last.signed_duration_since(first).num_days() + 1
}

/// Months from the month of `first` to the month of `last`, ignoring days.
pub(crate) fn month_delta(first: NaiveDate, last: NaiveDate) -> i32 {
    (last.year() - first.year()) * 12 + last.month() as i32 - first.month() as i32
}
