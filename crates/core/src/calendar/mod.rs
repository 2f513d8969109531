//! Calendar arithmetic used to date planner pages.
//!
//! Everything here is pure: no clock access except through the `today`
//! arguments callers pass in.

pub mod business;
pub mod periods;
pub mod week;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

pub use business::{business_days_between, business_days_left_in_year};
pub use periods::{
    Semester, SemesterTerms, SprintCadence, quarter, quarter_range, semester_label,
    sprint_window,
};
pub use week::{WeekStart, parse_date, resolve_week_start, sunday_on_or_before, year_weeks};

/// Errors raised by calendar arithmetic and date parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("could not parse '{0}' as a date")]
    UnparseableDate(String),

    #[error("date range is inverted: {start} is after {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("month {0} is out of range (expected 1-12)")]
    InvalidMonth(u32),

    #[error("date arithmetic overflowed near {0}")]
    Overflow(NaiveDate),
}

/// An inclusive span of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if start > end {
            return Err(CalendarError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, counting both ends.
    pub fn len_days(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    /// Iterate every day of the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        let end = self.end;
        start.iter_days().take_while(move |d| *d <= end)
    }

    /// Days remaining after `date` until the end of the range.
    pub fn days_after(&self, date: NaiveDate) -> i64 {
        (self.end - date).num_days().max(0)
    }
}
