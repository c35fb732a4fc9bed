//! Month range resolution
//!
//! Maps a (year, month) pair to the half-open UTC interval covering exactly
//! that calendar month.

use caltally_domain::{CalTallyError, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Half-open `[start, end)` interval covering one calendar month in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    year: i32,
    month: u32,
}

impl MonthRange {
    /// Create a range for the given year and month.
    ///
    /// # Errors
    /// Returns `CalTallyError::InvalidInput` when `month` is outside `1..=12`
    /// or `year` is outside the supported calendar range.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalTallyError::InvalidInput(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        // The successor month must be representable too, otherwise end() has
        // no valid value.
        let (next_year, next_month) = next_month(year, month);
        if NaiveDate::from_ymd_opt(year, month, 1).is_none()
            || NaiveDate::from_ymd_opt(next_year, next_month, 1).is_none()
        {
            return Err(CalTallyError::InvalidInput(format!(
                "year {year} is outside the supported range"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month.
    pub fn start(&self) -> DateTime<Utc> {
        self.first_day().and_time(NaiveTime::MIN).and_utc()
    }

    /// First instant of the following month. December rolls over to January
    /// of the next year.
    pub fn end(&self) -> DateTime<Utc> {
        self.end_day().and_time(NaiveTime::MIN).and_utc()
    }

    /// Every calendar date in the month, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_day();
        self.first_day().iter_days().take_while(move |day| *day < end)
    }

    fn first_day(&self) -> NaiveDate {
        // Both days validated in new()
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    fn end_day(&self) -> NaiveDate {
        let (year, month) = next_month(self.year, self.month);
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
