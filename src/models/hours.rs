//! Hours type for representing logged work
//!
//! Internally stores hours in hundredths (i64) to avoid floating-point
//! precision issues when summing entries. Provides safe arithmetic
//! operations and two-decimal formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Represents a duration in hours stored as hundredths of an hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(i64);

impl Hours {
    /// Smallest amount a single entry may log (0.01)
    pub const MIN_ENTRY: Hours = Hours(1);

    /// Largest amount a single entry may log (24.00)
    pub const MAX_ENTRY: Hours = Hours(24_00);

    /// Create an Hours amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use timesheet::models::Hours;
    /// let h = Hours::from_hundredths(750); // 7.50h
    /// assert_eq!(h.to_string(), "7.50");
    /// ```
    pub const fn from_hundredths(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Create a zero Hours amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn hundredths(&self) -> i64 {
        self.0
    }

    /// Get the whole hours portion (truncated toward zero)
    pub const fn whole(&self) -> i64 {
        self.0 / 100
    }

    /// Get the fractional portion (0-99)
    pub const fn fraction(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Whether this amount is loggable as a single entry (0.01 through 24.00)
    pub fn is_valid_entry(&self) -> bool {
        *self >= Self::MIN_ENTRY && *self <= Self::MAX_ENTRY
    }

    /// Parse an hours amount from a string
    ///
    /// Accepts "7.5", "7.50", "7" and ".25". More than two decimal places is
    /// rejected rather than silently truncated.
    pub fn parse(s: &str) -> Result<Self, HoursParseError> {
        let s = s.trim();
        let invalid = || HoursParseError::InvalidFormat(s.to_string());

        let (negative, body) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        if body.is_empty() {
            return Err(invalid());
        }

        let (whole_str, frac_str) = match body.split_once('.') {
            Some((w, f)) => (w, f),
            None => (body, ""),
        };

        if !whole_str.chars().all(|c| c.is_ascii_digit())
            || !frac_str.chars().all(|c| c.is_ascii_digit())
            || (whole_str.is_empty() && frac_str.is_empty())
        {
            return Err(invalid());
        }

        let whole: i64 = if whole_str.is_empty() {
            0
        } else {
            whole_str.parse().map_err(|_| invalid())?
        };

        let frac: i64 = match frac_str.len() {
            0 => 0,
            1 => frac_str.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => frac_str.parse().map_err(|_| invalid())?,
            _ => return Err(HoursParseError::TooPrecise(s.to_string())),
        };

        let hundredths = whole
            .checked_mul(100)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -hundredths } else { hundredths }))
    }
}

impl Default for Hours {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Hours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.whole().abs(), self.fraction());
        f.pad(&text)
    }
}

impl Add for Hours {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Hours::zero(), |acc, h| acc + h)
    }
}

impl<'a> std::iter::Sum<&'a Hours> for Hours {
    fn sum<I: Iterator<Item = &'a Hours>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for hours parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoursParseError {
    InvalidFormat(String),
    TooPrecise(String),
}

impl fmt::Display for HoursParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoursParseError::InvalidFormat(s) => write!(f, "Invalid hours format: {}", s),
            HoursParseError::TooPrecise(s) => {
                write!(f, "Hours allow at most two decimal places: {}", s)
            }
        }
    }
}

impl std::error::Error for HoursParseError {}
