/// Minimum supported year (inclusive)
pub const MIN_YEAR: i32 = 1;
/// Maximum supported year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum year a packed `YearMonth` ordinal can hold
pub const MAX_YEAR_MONTH_YEAR: i32 = 5460;

/// Months in a year
pub const MONTHS_IN_YEAR: u32 = 12;

/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for February
pub const FEBRUARY: u32 = 2;
/// Month number for December
pub const DECEMBER: u32 = 12;

/// Day-of-month of the day folded away in year-independent days
pub const LEAP_DAY: u32 = 29;
/// Day-of-month Feb 29 folds onto
pub const FEBRUARY_LAST_COMMON_DAY: u32 = 28;

/// Length of a calendar-day cycle (Feb 29 is folded)
pub const DAYS_IN_YEAR: u16 = 365;

/// Days in each month of a common year (index 0 is unused, months are 1-indexed)
pub const DAYS_IN_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days elapsed in a common year before the first of each month (index 0 unused)
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Largest magnitude of the years component of a duration
pub const MAX_DURATION_YEARS: u32 = 9999;
/// Largest magnitude of the months component of a duration
pub const MAX_DURATION_MONTHS: u32 = 11;
/// Largest magnitude of the days component of a duration
pub const MAX_DURATION_DAYS: u32 = 30;

/// English month names (index 0 is unused, months are 1-indexed)
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
