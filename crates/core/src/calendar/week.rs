//! Sunday-anchored weeks and start-date parsing.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::CalendarError;

/// The Sunday that opens the week containing `date`.
pub fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Where a run starts, and a human-readable explanation of why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekStart {
    pub sunday: NaiveDate,
    pub reason: String,
}

/// Resolve the Sunday a run starts on.
///
/// With an explicit date, that date's week. Without one, this week when
/// `today` is Sunday through Tuesday, otherwise next week.
pub fn resolve_week_start(arg: Option<&str>, today: NaiveDate) -> Result<WeekStart, CalendarError> {
    if let Some(raw) = arg {
        let date = parse_date(raw)?;
        return Ok(WeekStart {
            sunday: sunday_on_or_before(date),
            reason: format!("Parsed {date} from arguments"),
        });
    }

    let this_sunday = sunday_on_or_before(today);
    if today.weekday().num_days_from_sunday() > 2 {
        Ok(WeekStart {
            sunday: this_sunday + chrono::Duration::days(7),
            reason: "No date argument, using next week".to_string(),
        })
    } else {
        Ok(WeekStart {
            sunday: this_sunday,
            reason: "No date argument, using this week".to_string(),
        })
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%A, %B %d, %Y",
];

/// Parse an unambiguous date string.
///
/// Slash and dot formats are only accepted year-first or day-first with
/// dots, so `01/02/2024` style input is rejected rather than guessed.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    let input = raw.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, fmt) {
            return Ok(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.date());
    }

    Err(CalendarError::UnparseableDate(raw.to_string()))
}

/// First Sunday of a yearly run and how many weeks cover the whole year.
pub fn year_weeks(year: i32) -> Result<(NaiveDate, u32), CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| CalendarError::UnparseableDate(year.to_string()))?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| CalendarError::UnparseableDate(year.to_string()))?;
    let sunday = sunday_on_or_before(first);
    let days = (last - sunday).num_days() + 1;
    let weeks = u32::try_from((days + 6) / 7).map_err(|_| CalendarError::Overflow(sunday))?;
    Ok((sunday, weeks))
}
