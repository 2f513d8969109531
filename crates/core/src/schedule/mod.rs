//! Recurring templates and their resolution onto concrete weeks.

pub mod hours;
pub mod resolver;
pub mod templates;

use std::path::PathBuf;

use chrono::Weekday;
use thiserror::Error;

pub use hours::HourLabels;
pub use resolver::{DaySchedule, RosterOrder, ScheduleResolver, ScheduledEntry, WeekSchedule};
pub use templates::{
    AppointmentTemplate, RosterTemplate, RowCapacity, TemplateSet, WeekTemplate, WeekdayMap,
};

/// Errors loading or validating templates. All of them are configuration
/// errors reported before any page is laid out.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid weekday '{key}' in [{section}] (expected 0-6 or a weekday name)")]
    InvalidWeekday { section: &'static str, key: String },

    #[error("weekday {weekday} appears more than once in [{section}]")]
    DuplicateWeekday { section: &'static str, weekday: Weekday },

    #[error("invalid task row '{key}' for {weekday} (expected a row number)")]
    InvalidRow { weekday: Weekday, key: String },

    #[error("task row {row} for {weekday} does not fit the page ({capacity} rows)")]
    RowOutOfRange { weekday: Weekday, row: usize, capacity: usize },

    #[error("blank name in roster for {weekday}")]
    BlankName { weekday: Weekday },

    #[error("appointment for {weekday} is attached to a blank hour label '{label}'")]
    BlankHourLabel { weekday: Weekday, label: String },

    #[error("appointment for {weekday} uses unknown hour label '{label}'")]
    UnknownHourLabel { weekday: Weekday, label: String },
}
