use chrono::NaiveDate;

use crate::ParseError;
use crate::year_month::YearMonth;

/// Error type for interval construction and interval algebra.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntervalError {
    /// First date is after last date.
    #[error("Invalid date range: first ({first}) is after last ({last})")]
    InvalidRange { first: NaiveDate, last: NaiveDate },

    /// First month is after last month.
    #[error("Invalid year-month range: first ({first}) is after last ({last})")]
    InvalidYearMonthRange { first: YearMonth, last: YearMonth },

    /// A date or date arithmetic result fell outside `0001-01-01..=9999-12-31`.
    #[error("Value out of supported range: {0}")]
    OutOfRange(String),

    /// The operation needs an initialized value.
    #[error("Operation requires a non-empty value")]
    Empty,

    /// Strict intersection of values that do not cross.
    #[error("Values do not intersect")]
    Disjoint,

    /// Mutation attempted on a frozen interval set.
    #[error("Interval set is read-only")]
    ReadOnly,

    /// Append-only insertion received an interval that does not follow the set.
    #[error("Interval starting {first} does not follow the last member ending {last}")]
    OutOfOrder { first: NaiveDate, last: NaiveDate },

    /// Duration components out of range or of mixed sign.
    #[error("Invalid duration {years}y {months}m {days}d: {reason}")]
    InvalidDuration {
        years:  i32,
        months: i32,
        days:   i32,
        reason: &'static str,
    },

    /// Error validating or parsing a component.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_invalid_range_display() {
        let err = IntervalError::InvalidRange {
            first: date(2021, 5, 1),
            last:  date(2021, 4, 1),
        };
        let msg = err.to_string();
        assert!(msg.contains("first (2021-05-01)"));
        assert!(msg.contains("last (2021-04-01)"));
    }

    #[test]
    fn test_out_of_order_display() {
        let err = IntervalError::OutOfOrder {
            first: date(2020, 1, 1),
            last:  date(2020, 6, 30),
        };
        assert_eq!(
            err.to_string(),
            "Interval starting 2020-01-01 does not follow the last member ending 2020-06-30"
        );
    }

    #[test]
    fn test_parse_error_is_transparent() {
        let err: IntervalError = ParseError::InvalidMonth(13).into();
        assert_eq!(err.to_string(), ParseError::InvalidMonth(13).to_string());
    }
}
