//! Epidemiological week labels.

use crate::error::{DenoiseError, Result};
use chrono::{Days, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A `(year, week)` epidemiological week, written `YYYYWW` (e.g. `202015`).
///
/// Weeks run from 1 to 53. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpiWeek {
    year: i32,
    week: u32,
}

impl EpiWeek {
    /// Build from components.
    ///
    /// # Errors
    /// `InvalidEpiWeek` if `week` is outside `1..=53` or the year is not
    /// representable as a calendar date.
    pub fn new(year: i32, week: u32) -> Result<Self> {
        let code = i64::from(year) * 100 + i64::from(week);
        if !(1..=53).contains(&week) || NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(DenoiseError::InvalidEpiWeek(code));
        }
        Ok(Self { year, week })
    }

    /// Parse a `YYYYWW` code.
    ///
    /// # Example
    /// ```
    /// use epidenoise::region::EpiWeek;
    ///
    /// let ew = EpiWeek::from_code(202015).unwrap();
    /// assert_eq!((ew.year(), ew.week()), (2020, 15));
    /// assert!(EpiWeek::from_code(202054).is_err());
    /// ```
    pub fn from_code(code: i64) -> Result<Self> {
        if code < 0 {
            return Err(DenoiseError::InvalidEpiWeek(code));
        }
        let year = i32::try_from(code / 100).map_err(|_| DenoiseError::InvalidEpiWeek(code))?;
        let week = (code % 100) as u32;
        Self::new(year, week).map_err(|_| DenoiseError::InvalidEpiWeek(code))
    }

    /// The `YYYYWW` code.
    pub fn code(&self) -> i64 {
        i64::from(self.year) * 100 + i64::from(self.week)
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Week number within the year.
    pub fn week(&self) -> u32 {
        self.week
    }

    /// January 1 of the year plus `week - 1` whole weeks.
    ///
    /// Week 53 may fall in early January of the following year.
    pub fn to_date(&self) -> Result<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 1, 1)
            .and_then(|start| start.checked_add_days(Days::new(7 * u64::from(self.week - 1))))
            .ok_or(DenoiseError::InvalidEpiWeek(self.code()))
    }
}

impl fmt::Display for EpiWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.year, self.week)
    }
}

impl FromStr for EpiWeek {
    type Err = DenoiseError;

    fn from_str(s: &str) -> Result<Self> {
        let code: i64 = s
            .trim()
            .parse()
            .map_err(|_| DenoiseError::InvalidParameter(format!("not an epidemiological week: {s:?}")))?;
        Self::from_code(code)
    }
}
