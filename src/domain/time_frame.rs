// Time frame domain model - The "YYYY-MM" period a batch of readings is fetched for
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// How many years before the reference year are offered for selection
const YEARS_BACK: i32 = 2;

/// Years that print as four digits
const YEARS: RangeInclusive<i32> = 0..=9999;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeFrameError {
    #[error("time frame must look like YYYY-MM, got {0:?}")]
    Format(String),
    #[error("month must be between 1 and 12, got {0}")]
    Month(u32),
    #[error("year must be between 0 and 9999, got {0}")]
    Year(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeFrame {
    year: i32,
    month: u32,
}

impl TimeFrame {
    pub fn new(year: i32, month: u32) -> Result<Self, TimeFrameError> {
        if !(1..=12).contains(&month) {
            return Err(TimeFrameError::Month(month));
        }
        if !YEARS.contains(&year) {
            return Err(TimeFrameError::Year(year));
        }
        Ok(Self { year, month })
    }

    /// Time frame containing `date`, with the year clamped to four digits
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(*YEARS.start(), *YEARS.end()),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Years a user may pick relative to `today`
    pub fn year_options(today: NaiveDate) -> RangeInclusive<i32> {
        (today.year() - YEARS_BACK)..=today.year()
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for TimeFrame {
    type Err = TimeFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| TimeFrameError::Format(s.to_string()))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| TimeFrameError::Format(s.to_string()))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| TimeFrameError::Format(s.to_string()))?;
        Self::new(year, month)
    }
}
