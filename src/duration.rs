use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, add_months, month_delta, raw_add_months};
use crate::consts::{MAX_DURATION_DAYS, MAX_DURATION_MONTHS, MAX_DURATION_YEARS, MONTHS_IN_YEAR};
use crate::error::IntervalError;
use crate::ParseError;

// Signed-magnitude layout: sign | 15 bits years | 8 bits months | 8 bits days.
const SIGN_BIT: u32 = 1 << 31;
const YEARS_SHIFT: u32 = 16;
const YEARS_MASK: u32 = 0x7FFF;
const MONTHS_SHIFT: u32 = 8;
const COMPONENT_MASK: u32 = 0xFF;

/// A signed calendar offset of years, months and days.
///
/// All non-zero components share one sign. Magnitudes are bounded by
/// 9999 years (only with zero months and days), 11 months and 30 days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CalendarDuration {
    packed: u32,
}

impl CalendarDuration {
    pub const ZERO: Self = Self { packed: 0 };

    /// Creates a duration, validating ranges and sign consistency.
    ///
    /// # Errors
    /// Returns `IntervalError::InvalidDuration` if a component is out of range,
    /// components mix signs, or 9999 years is combined with months or days.
    pub fn new(years: i32, months: i32, days: i32) -> Result<Self, IntervalError> {
        let invalid = |reason| IntervalError::InvalidDuration {
            years,
            months,
            days,
            reason,
        };

        let (y, m, d) = (years.unsigned_abs(), months.unsigned_abs(), days.unsigned_abs());
        if y > MAX_DURATION_YEARS {
            return Err(invalid("years out of range"));
        }
        if m > MAX_DURATION_MONTHS {
            return Err(invalid("months out of range"));
        }
        if d > MAX_DURATION_DAYS {
            return Err(invalid("days out of range"));
        }
        if y == MAX_DURATION_YEARS && (m != 0 || d != 0) {
            return Err(invalid("9999 years allows no months or days"));
        }

        let components = [years, months, days];
        let negative = components.iter().any(|&c| c < 0);
        if negative && components.iter().any(|&c| c > 0) {
            return Err(invalid("components have mixed signs"));
        }

        let sign = if negative { SIGN_BIT } else { 0 };
        Ok(Self {
            packed: sign | (y << YEARS_SHIFT) | (m << MONTHS_SHIFT) | d,
        })
    }

    /// Exclusive calendar difference `to - from`: whole months first, then remaining days.
    ///
    /// Month steps clamp to month end, so Jan 31 plus one month is the last day of February.
    ///
    /// # Errors
    /// Returns `IntervalError::InvalidDuration` if the difference exceeds 9999 years.
    pub fn between(from: NaiveDate, to: NaiveDate) -> Result<Self, IntervalError> {
        if to < from {
            return Self::between(to, from).map(Neg::neg);
        }

        let out_of_range = || IntervalError::OutOfRange(format!("{from}..{to}"));
        let mut total_months = month_delta(from, to);
        let mut anchor = raw_add_months(from, total_months).ok_or_else(out_of_range)?;
        if anchor > to {
            total_months -= 1;
            anchor = raw_add_months(from, total_months).ok_or_else(out_of_range)?;
        }
        let days = to.signed_duration_since(anchor).num_days();
        let days = i32::try_from(days).map_err(|_| IntervalError::OutOfRange(format!("{days} days")))?;

        #[allow(clippy::cast_possible_wrap)]
        let per_year = MONTHS_IN_YEAR as i32;
        Self::new(total_months / per_year, total_months % per_year, days)
    }

    #[inline]
    const fn magnitude_years(self) -> u32 {
        (self.packed >> YEARS_SHIFT) & YEARS_MASK
    }

    #[inline]
    const fn magnitude_months(self) -> u32 {
        (self.packed >> MONTHS_SHIFT) & COMPONENT_MASK
    }

    #[inline]
    const fn magnitude_days(self) -> u32 {
        self.packed & COMPONENT_MASK
    }

    const fn signed(self, magnitude: u32) -> i32 {
        #[allow(clippy::cast_possible_wrap)]
        let value = magnitude as i32;
        if self.is_negative() { -value } else { value }
    }

    /// Returns the signed year component
    pub const fn years(self) -> i32 {
        self.signed(self.magnitude_years())
    }

    /// Returns the signed month component
    pub const fn months(self) -> i32 {
        self.signed(self.magnitude_months())
    }

    /// Returns the signed day component
    pub const fn days(self) -> i32 {
        self.signed(self.magnitude_days())
    }

    /// Years and months folded into months
    pub const fn total_months(self) -> i32 {
        self.years() * 12 + self.months()
    }

    /// Set for offsets pointing back in time.
    pub const fn is_negative(self) -> bool {
        self.packed & SIGN_BIT != 0
    }

    /// All three components are zero.
    pub const fn is_zero(self) -> bool {
        self.packed & !SIGN_BIT == 0
    }

    /// Applies the offset to `date`: months first (clamping to month end), then days.
    ///
    /// # Errors
    /// Returns `IntervalError::OutOfRange` if the result leaves the supported range.
    pub fn add_to(self, date: NaiveDate) -> Result<NaiveDate, IntervalError> {
        let shifted = add_months(date, self.total_months())?;
        add_days(shifted, i64::from(self.days()))
    }
}

impl Neg for CalendarDuration {
    type Output = Self;

    fn neg(self) -> Self {
        if self.is_zero() {
            return self;
        }
        Self {
            packed: self.packed ^ SIGN_BIT,
        }
    }
}

impl fmt::Display for CalendarDuration {
    /// ISO 8601 duration, e.g. `P1Y2M3D`, `-P10D`, `P0D`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "P")?;
        if self.is_zero() {
            return write!(f, "0D");
        }
        let (y, m, d) = (self.magnitude_years(), self.magnitude_months(), self.magnitude_days());
        if y != 0 {
            write!(f, "{y}Y")?;
        }
        if m != 0 {
            write!(f, "{m}M")?;
        }
        if d != 0 {
            write!(f, "{d}D")?;
        }
        Ok(())
    }
}

impl FromStr for CalendarDuration {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }
        let invalid = || ParseError::InvalidFormat(trimmed.to_owned());

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let mut rest = unsigned.strip_prefix('P').ok_or_else(invalid)?;
        if rest.is_empty() {
            return Err(invalid().into());
        }

        let mut components = [0_i32; 3];
        let mut last_rank = None;
        while !rest.is_empty() {
            let digits = rest
                .find(|c: char| !c.is_ascii_digit())
                .filter(|&end| end > 0)
                .ok_or_else(invalid)?;
            let value = ParseError::parse_u32(&rest[..digits])?;
            let value = i32::try_from(value).map_err(|_| invalid())?;
            let rank = match rest[digits..].chars().next() {
                Some('Y') => 0,
                Some('M') => 1,
                Some('D') => 2,
                _ => return Err(invalid().into()),
            };
            if last_rank.is_some_and(|last| rank <= last) {
                return Err(invalid().into());
            }
            last_rank = Some(rank);
            components[rank] = if negative { -value } else { value };
            rest = &rest[digits + 1..];
        }

        let [years, months, days] = components;
        Self::new(years, months, days)
    }
}

impl Serialize for CalendarDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CalendarDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
