//! Human-readable text for dates and ranges.
//!
//! Every function takes a `long_form` flag: the short form is numeric
//! (`05.03.2021`), the long form spells the month in English (`5 March 2021`).
//! Endpoints equal to [`min_date`] or [`max_date`] count as open, so half-open
//! intervals render as `>=date` or `<=date` and the whole interval renders as
//! nothing.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{max_date, min_date};
use crate::consts::MONTH_NAMES;
use crate::cyclic::CyclicDayRange;
use crate::day::CalendarDay;
use crate::interval::DateInterval;
use crate::year_month::{YearMonth, YearMonthRange};

const SPAN_SEPARATOR: char = '-';

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES.get(month as usize).copied().unwrap_or_default()
}

/// `DD.MM.YYYY`, or `D Month YYYY`.
pub fn format_date(date: NaiveDate, long_form: bool) -> String {
    if long_form {
        format!("{} {} {}", date.day(), month_name(date.month()), date.year())
    } else {
        format!("{:02}.{:02}.{:04}", date.day(), date.month(), date.year())
    }
}

/// `DD.MM`, or `D Month`.
pub fn format_calendar_day(day: CalendarDay, long_form: bool) -> String {
    if long_form {
        format!("{} {}", day.day(), month_name(day.month()))
    } else {
        format!("{:02}.{:02}", day.day(), day.month())
    }
}

/// `MM.YYYY`, or `Month YYYY`.
pub fn format_year_month(month: YearMonth, long_form: bool) -> String {
    if long_form {
        format!("{} {}", month_name(month.month()), month.year())
    } else {
        format!("{:02}.{:04}", month.month(), month.year())
    }
}

/// Formats a possibly half-open interval.
///
/// Missing ends and ends at the representable limits are open: `>=first`,
/// `<=last`, or an empty string when both are open. Equal ends collapse to one
/// date; otherwise `first-last`.
pub fn format_interval(first: Option<NaiveDate>, last: Option<NaiveDate>, long_form: bool) -> String {
    let first = first.filter(|&date| date != min_date());
    let last = last.filter(|&date| date != max_date());
    match (first, last) {
        (None, None) => String::new(),
        (Some(first), None) => format!(">={}", format_date(first, long_form)),
        (None, Some(last)) => format!("<={}", format_date(last, long_form)),
        (Some(first), Some(last)) if first == last => format_date(first, long_form),
        (Some(first), Some(last)) => format!(
            "{}{SPAN_SEPARATOR}{}",
            format_date(first, long_form),
            format_date(last, long_form)
        ),
    }
}

/// Formats a date interval; the empty interval renders as an empty string.
pub fn format_date_interval<T>(interval: &DateInterval<T>, long_form: bool) -> String {
    match interval.bounds() {
        None => String::new(),
        Some((first, last)) => format_interval(Some(first), Some(last), long_form),
    }
}

/// Formats a cyclic range.
///
/// A non-wrapped range within one month names the month once: `01-15.03`, or
/// `1-15 March`.
pub fn format_cyclic_range<T>(range: &CyclicDayRange<T>, long_form: bool) -> String {
    let Some((first, last)) = range.bounds() else {
        return String::new();
    };
    if first == last {
        return format_calendar_day(first, long_form);
    }
    if first < last && first.month() == last.month() {
        return if long_form {
            format!("{}{SPAN_SEPARATOR}{} {}", first.day(), last.day(), month_name(first.month()))
        } else {
            format!("{:02}{SPAN_SEPARATOR}{:02}.{:02}", first.day(), last.day(), first.month())
        };
    }
    format!(
        "{}{SPAN_SEPARATOR}{}",
        format_calendar_day(first, long_form),
        format_calendar_day(last, long_form)
    )
}

/// Formats a month range.
///
/// Months of the same year name the year once: `01-03.2021`, or `January-March 2021`.
pub fn format_year_month_range(range: &YearMonthRange, long_form: bool) -> String {
    let Some((first, last)) = range.bounds() else {
        return String::new();
    };
    if first == last {
        return format_year_month(first, long_form);
    }
    if first.year() == last.year() {
        return if long_form {
            format!(
                "{}{SPAN_SEPARATOR}{} {}",
                month_name(first.month()),
                month_name(last.month()),
                first.year()
            )
        } else {
            format!("{:02}{SPAN_SEPARATOR}{:02}.{:04}", first.month(), last.month(), first.year())
        };
    }
    format!(
        "{}{SPAN_SEPARATOR}{}",
        format_year_month(first, long_form),
        format_year_month(last, long_form)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{cday, cyclic, date, interval, ym, ym_range};

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date(2021, 3, 5), false), "05.03.2021");
        assert_eq!(format_date(date(2021, 3, 5), true), "5 March 2021");
        assert_eq!(format_date(date(45, 12, 31), false), "31.12.0045");
    }

    #[test]
    fn test_format_interval_cases() {
        struct TestCase {
            first:       Option<NaiveDate>,
            last:        Option<NaiveDate>,
            long_form:   bool,
            expected:    &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase {
                first:       Some(date(2021, 1, 1)),
                last:        Some(date(2021, 3, 31)),
                long_form:   false,
                expected:    "01.01.2021-31.03.2021",
                description: "closed",
            },
            TestCase {
                first:       Some(date(2021, 1, 1)),
                last:        Some(date(2021, 3, 31)),
                long_form:   true,
                expected:    "1 January 2021-31 March 2021",
                description: "closed, long form",
            },
            TestCase {
                first:       Some(date(2021, 1, 1)),
                last:        None,
                long_form:   false,
                expected:    ">=01.01.2021",
                description: "open end",
            },
            TestCase {
                first:       None,
                last:        Some(date(2021, 1, 1)),
                long_form:   false,
                expected:    "<=01.01.2021",
                description: "open start",
            },
            TestCase {
                first:       Some(min_date()),
                last:        Some(date(2021, 1, 1)),
                long_form:   true,
                expected:    "<=1 January 2021",
                description: "start at the lower limit",
            },
            TestCase {
                first:       Some(date(2021, 1, 1)),
                last:        Some(max_date()),
                long_form:   false,
                expected:    ">=01.01.2021",
                description: "end at the upper limit",
            },
            TestCase {
                first:       None,
                last:        None,
                long_form:   false,
                expected:    "",
                description: "fully open",
            },
            TestCase {
                first:       Some(date(2021, 7, 4)),
                last:        Some(date(2021, 7, 4)),
                long_form:   false,
                expected:    "04.07.2021",
                description: "single day",
            },
        ];

        for case in &cases {
            assert_eq!(
                format_interval(case.first, case.last, case.long_form),
                case.expected,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_format_date_interval() {
        assert_eq!(format_date_interval(&interval((2021, 2, 1), (2021, 2, 28)), false), "01.02.2021-28.02.2021");
        assert_eq!(format_date_interval(&DateInterval::<()>::empty(), true), "");
        assert_eq!(format_date_interval(&DateInterval::<()>::whole(), true), "");
    }

    #[test]
    fn test_format_cyclic_range() {
        assert_eq!(format_cyclic_range(&cyclic((3, 1), (3, 15)), false), "01-15.03");
        assert_eq!(format_cyclic_range(&cyclic((3, 1), (3, 15)), true), "1-15 March");
        assert_eq!(format_cyclic_range(&cyclic((10, 10), (5, 15)), false), "10.10-15.05");
        assert_eq!(format_cyclic_range(&cyclic((3, 20), (3, 10)), true), "20 March-10 March");
        assert_eq!(format_cyclic_range(&cyclic((12, 24), (12, 24)), true), "24 December");
        assert_eq!(format_cyclic_range(&CyclicDayRange::<()>::empty(), false), "");
        assert_eq!(format_calendar_day(cday(2, 28), false), "28.02");
    }

    #[test]
    fn test_format_year_month_range() {
        assert_eq!(format_year_month_range(&ym_range((2021, 1), (2021, 3)), false), "01-03.2021");
        assert_eq!(format_year_month_range(&ym_range((2021, 1), (2021, 3)), true), "January-March 2021");
        assert_eq!(format_year_month_range(&ym_range((2020, 11), (2021, 2)), false), "11.2020-02.2021");
        assert_eq!(format_year_month_range(&YearMonthRange::single(ym(2021, 6)), true), "June 2021");
        assert_eq!(format_year_month_range(&YearMonthRange::EMPTY, true), "");
    }
}
