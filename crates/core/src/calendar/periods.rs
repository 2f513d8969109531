//! Fiscal quarters, sprints and semesters.

use std::fmt;
use std::num::NonZeroU32;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{CalendarError, DateRange};

/// Fiscal quarter (1-4) of `date`, where `q1_start_month` (1-12) opens Q1.
///
/// With `q1_start_month = 1` this is the calendar quarter; with 2, February
/// to April is Q1 and January falls in Q4.
pub fn quarter(date: NaiveDate, q1_start_month: u32) -> Result<u32, CalendarError> {
    Ok(months_into_fiscal_year(date, q1_start_month)? / 3 + 1)
}

/// The first and last day of the fiscal quarter containing `date`.
pub fn quarter_range(date: NaiveDate, q1_start_month: u32) -> Result<DateRange, CalendarError> {
    let into_quarter = months_into_fiscal_year(date, q1_start_month)? % 3;
    let first_of_month = date.with_day(1).ok_or(CalendarError::Overflow(date))?;
    let start = first_of_month
        .checked_sub_months(Months::new(into_quarter))
        .ok_or(CalendarError::Overflow(date))?;
    let end = start
        .checked_add_months(Months::new(3))
        .and_then(|d| d.checked_sub_days(Days::new(1)))
        .ok_or(CalendarError::Overflow(start))?;
    DateRange::new(start, end)
}

fn months_into_fiscal_year(date: NaiveDate, q1_start_month: u32) -> Result<u32, CalendarError> {
    if !(1..=12).contains(&q1_start_month) {
        return Err(CalendarError::InvalidMonth(q1_start_month));
    }
    Ok((date.month() + 12 - q1_start_month) % 12)
}

/// Fixed-length iterations counted from an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SprintCadence {
    pub epoch: NaiveDate,
    pub length_days: NonZeroU32,
}

impl SprintCadence {
    pub fn new(epoch: NaiveDate, length_days: NonZeroU32) -> Self {
        Self { epoch, length_days }
    }

    /// The sprint containing `date`.
    pub fn window(&self, date: NaiveDate) -> DateRange {
        sprint_window(date, self.epoch, self.length_days)
    }

    /// Days after `date` until the sprint ends.
    pub fn days_left(&self, date: NaiveDate) -> i64 {
        self.window(date).days_after(date)
    }
}

/// The sprint `[start, start + length - 1]` whose start is the latest
/// epoch-aligned boundary on or before `date`.
///
/// Works for epochs after `date` too: the boundaries extend backwards.
pub fn sprint_window(date: NaiveDate, epoch: NaiveDate, length_days: NonZeroU32) -> DateRange {
    let length = i64::from(length_days.get());
    let offset = (date - epoch).num_days().div_euclid(length) * length;
    let start = epoch + chrono::Duration::days(offset);
    let end = start + chrono::Duration::days(length - 1);
    // start <= date <= end by construction
    DateRange { start, end }
}

/// Month boundaries of the two academic terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterTerms {
    pub summer_start_month: u32,
    pub winter_start_month: u32,
}

/// An academic term, labelled by the year(s) it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Semester {
    Summer(i32),
    /// Winter term starting in the given year and ending in the next one.
    Winter(i32),
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semester::Summer(year) => write!(f, "{year}"),
            Semester::Winter(year) => write!(f, "{year}/{}", year + 1),
        }
    }
}

impl SemesterTerms {
    pub fn semester(&self, date: NaiveDate) -> Semester {
        let month = date.month();
        let year = date.year();
        if month >= self.summer_start_month && month < self.winter_start_month {
            Semester::Summer(year)
        } else if month >= self.winter_start_month {
            Semester::Winter(year)
        } else {
            Semester::Winter(year - 1)
        }
    }
}

/// Label of the semester containing `date`: `"2024"` for a summer term,
/// `"2024/2025"` for a winter term.
pub fn semester_label(date: NaiveDate, summer_start_month: u32, winter_start_month: u32) -> String {
    SemesterTerms { summer_start_month, winter_start_month }.semester(date).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[rstest]
    #[case(1, 1, 1)]
    #[case(3, 1, 1)]
    #[case(4, 1, 2)]
    #[case(12, 1, 4)]
    #[case(2, 2, 1)]
    #[case(1, 2, 4)]
    #[case(10, 10, 1)]
    #[case(9, 10, 4)]
    fn fiscal_quarters(#[case] month: u32, #[case] q1: u32, #[case] expected: u32) {
        assert_eq!(quarter(d(2024, month, 15), q1).unwrap(), expected);
    }

    #[test]
    fn quarter_rejects_bad_start_month() {
        assert_eq!(quarter(d(2024, 1, 1), 13), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(quarter(d(2024, 1, 1), 0), Err(CalendarError::InvalidMonth(0)));
    }

    #[test]
    fn quarter_range_wraps_year() {
        let r = quarter_range(d(2024, 1, 20), 11).unwrap();
        assert_eq!(r.start(), d(2023, 11, 1));
        assert_eq!(r.end(), d(2024, 1, 31));
    }

    #[test]
    fn quarter_range_calendar_quarter() {
        let r = quarter_range(d(2024, 5, 5), 1).unwrap();
        assert_eq!(r.start(), d(2024, 4, 1));
        assert_eq!(r.end(), d(2024, 6, 30));
    }

    #[test]
    fn sprint_window_from_past_epoch() {
        let len = NonZeroU32::new(14).unwrap();
        let w = sprint_window(d(2023, 1, 20), d(2023, 1, 4), len);
        assert_eq!(w.start(), d(2023, 1, 18));
        assert_eq!(w.end(), d(2023, 1, 31));
    }

    #[test]
    fn sprint_window_on_boundary() {
        let len = NonZeroU32::new(14).unwrap();
        let w = sprint_window(d(2023, 1, 18), d(2023, 1, 4), len);
        assert_eq!(w.start(), d(2023, 1, 18));
    }

    #[test]
    fn sprint_window_with_future_epoch() {
        let len = NonZeroU32::new(14).unwrap();
        let w = sprint_window(d(2023, 1, 1), d(2023, 1, 4), len);
        assert_eq!(w.start(), d(2022, 12, 21));
        assert_eq!(w.end(), d(2023, 1, 3));
        assert!(w.contains(d(2023, 1, 1)));
    }

    #[test]
    fn sprint_days_left() {
        let cadence = SprintCadence::new(d(2023, 1, 4), NonZeroU32::new(14).unwrap());
        assert_eq!(cadence.days_left(d(2023, 1, 4)), 13);
        assert_eq!(cadence.days_left(d(2023, 1, 17)), 0);
    }

    #[rstest]
    #[case(d(2024, 4, 1), "2024")]
    #[case(d(2024, 9, 30), "2024")]
    #[case(d(2024, 10, 1), "2024/2025")]
    #[case(d(2025, 2, 1), "2024/2025")]
    fn semester_labels(#[case] date: NaiveDate, #[case] expected: &str) {
        assert_eq!(semester_label(date, 4, 10), expected);
    }
}
