//! Resolving weekday templates against a concrete Sunday-anchored week.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::templates::{SUNDAY_FIRST, TemplateSet};
use crate::calendar::sunday_on_or_before;

/// Presentation order of resolved roster entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterOrder {
    /// Alphabetical by name, then by date.
    #[default]
    #[serde(alias = "name-then-date")]
    Name,
    /// Chronological, then by name.
    #[serde(alias = "date-then-name")]
    Date,
}

/// A person (or label) pinned to a concrete date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledEntry {
    pub name: String,
    pub date: NaiveDate,
    /// Position of the entry within its weekday's roster.
    pub row_index: usize,
}

/// Everything the templates say about one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule<'a> {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub tasks: Vec<(usize, &'a str)>,
    pub roster: Vec<&'a str>,
    pub appointments: Vec<(&'a str, &'a str)>,
}

/// The seven days of a Sunday-anchored week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekSchedule<'a> {
    pub sunday: NaiveDate,
    pub days: Vec<DaySchedule<'a>>,
}

impl<'a> WeekSchedule<'a> {
    pub fn day(&self, weekday: Weekday) -> &DaySchedule<'a> {
        &self.days[weekday.num_days_from_sunday() as usize]
    }
}

/// Maps the read-only templates onto dates.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleResolver<'a> {
    templates: &'a TemplateSet,
}

impl<'a> ScheduleResolver<'a> {
    pub fn new(templates: &'a TemplateSet) -> Self {
        Self { templates }
    }

    /// Concrete date of `weekday` in the week opened by `sunday`.
    pub fn date_of(sunday: NaiveDate, weekday: Weekday) -> NaiveDate {
        sunday + Duration::days(i64::from(weekday.num_days_from_sunday()))
    }

    pub fn tasks_for(&self, weekday: Weekday) -> impl Iterator<Item = (usize, &'a str)> + use<'a> {
        self.templates.tasks.tasks_for(weekday)
    }

    /// Dense row view; blank rows are kept, not skipped.
    pub fn task_rows(&self, weekday: Weekday, capacity: usize) -> Vec<Option<&'a str>> {
        self.templates.tasks.task_rows(weekday, capacity)
    }

    pub fn appointment_at(&self, weekday: Weekday, hour_label: &str) -> Option<&'a str> {
        self.templates.appointments.at(weekday, hour_label)
    }

    /// Resolve all templates for the week containing `anchor`.
    pub fn resolve_week(&self, anchor: NaiveDate) -> WeekSchedule<'a> {
        let sunday = sunday_on_or_before(anchor);
        let days = SUNDAY_FIRST
            .iter()
            .map(|&weekday| DaySchedule {
                date: Self::date_of(sunday, weekday),
                weekday,
                tasks: self.templates.tasks.tasks_for(weekday).collect(),
                roster: self.templates.roster.names_for(weekday).collect(),
                appointments: self.templates.appointments.entries_for(weekday).collect(),
            })
            .collect();
        WeekSchedule { sunday, days }
    }

    /// One entry per rostered person per day of the week, sorted by `order`.
    pub fn roster_entries(&self, anchor: NaiveDate, order: RosterOrder) -> Vec<ScheduledEntry> {
        let sunday = sunday_on_or_before(anchor);
        let mut entries: Vec<ScheduledEntry> = SUNDAY_FIRST
            .iter()
            .flat_map(|&weekday| {
                let date = Self::date_of(sunday, weekday);
                self.templates.roster.names_for(weekday).enumerate().map(move |(row_index, name)| {
                    ScheduledEntry { name: name.to_string(), date, row_index }
                })
            })
            .collect();

        match order {
            RosterOrder::Name => {
                entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.date.cmp(&b.date)));
            }
            RosterOrder::Date => {
                entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.name.cmp(&b.name)));
            }
        }
        entries
    }
}

/// Group resolved entries by date, names sorted within each day.
pub fn roster_by_date(entries: &[ScheduledEntry]) -> BTreeMap<NaiveDate, Vec<&str>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&str>> = BTreeMap::new();
    for entry in entries {
        by_date.entry(entry.date).or_default().push(entry.name.as_str());
    }
    for names in by_date.values_mut() {
        names.sort_unstable();
    }
    by_date
}
