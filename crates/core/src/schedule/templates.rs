//! Weekday-indexed recurring templates and their TOML form.
//!
//! Template files look like:
//!
//! ```toml
//! [tasks.1]            # weekday 0 (Sunday) .. 6, or a name such as "mon"
//! 0 = "Sign folder"
//! 15 = "Emails"        # row 15: rows 1-14 stay blank
//!
//! [roster]
//! tue = ["Hendrik", "Marvin"]
//!
//! [appointments.1]
//! "9" = "Standup"      # keyed by hour label
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::Deserialize;
use tracing::debug;

use super::TemplateError;
use super::hours::HourLabels;

/// Weekdays in Sunday-first order, matching template indices 0..=6.
pub const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Weekday for a Sunday-based index, `None` outside 0..=6.
pub fn weekday_from_index(index: usize) -> Option<Weekday> {
    SUNDAY_FIRST.get(index).copied()
}

/// Parse a template weekday key: `0`-`6` (0 is Sunday) or an English name.
pub fn parse_weekday_key(section: &'static str, key: &str) -> Result<Weekday, TemplateError> {
    let trimmed = key.trim();
    if let Ok(index) = trimmed.parse::<usize>() {
        return weekday_from_index(index)
            .ok_or_else(|| TemplateError::InvalidWeekday { section, key: key.to_string() });
    }
    trimmed
        .parse::<Weekday>()
        .map_err(|_| TemplateError::InvalidWeekday { section, key: key.to_string() })
}

/// A sparse map keyed by weekday.
///
/// A weekday that was never inserted is empty; callers never see a
/// "missing" state, only the absence of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayMap<T> {
    slots: [Option<T>; 7],
}

impl<T> Default for WeekdayMap<T> {
    fn default() -> Self {
        Self { slots: Default::default() }
    }
}

impl<T> WeekdayMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, weekday: Weekday) -> Option<&T> {
        self.slots[weekday.num_days_from_sunday() as usize].as_ref()
    }

    pub fn insert(&mut self, weekday: Weekday, value: T) -> Option<T> {
        self.slots[weekday.num_days_from_sunday() as usize].replace(value)
    }

    /// Present entries in Sunday-first order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &T)> {
        SUNDAY_FIRST.iter().zip(self.slots.iter()).filter_map(|(w, v)| v.as_ref().map(|v| (*w, v)))
    }

    /// Overlay `other` on top of `self`: every weekday present in `other`
    /// replaces this map's entry wholesale.
    pub fn overlay(mut self, other: WeekdayMap<T>) -> Self {
        for (slot, replacement) in self.slots.iter_mut().zip(other.slots) {
            if replacement.is_some() {
                *slot = replacement;
            }
        }
        self
    }
}

/// Recurring tasks: weekday to sparse `row -> label`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekTemplate(WeekdayMap<BTreeMap<usize, String>>);

impl WeekTemplate {
    pub fn insert(&mut self, weekday: Weekday, rows: BTreeMap<usize, String>) {
        self.0.insert(weekday, rows);
    }

    /// The weekday's tasks in row order, exactly as configured.
    pub fn tasks_for(&self, weekday: Weekday) -> impl Iterator<Item = (usize, &str)> {
        self.0.get(weekday).into_iter().flatten().map(|(row, label)| (*row, label.as_str()))
    }

    /// Dense view of `capacity` rows; rows without a task are `None`.
    pub fn task_rows(&self, weekday: Weekday, capacity: usize) -> Vec<Option<&str>> {
        let mut rows = vec![None; capacity];
        for (row, label) in self.tasks_for(weekday) {
            if let Some(slot) = rows.get_mut(row) {
                *slot = Some(label);
            }
        }
        rows
    }

    fn overlay(self, other: Self) -> Self {
        Self(self.0.overlay(other.0))
    }
}

/// Out-of-office roster: weekday to the names met that day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterTemplate(WeekdayMap<BTreeSet<String>>);

impl RosterTemplate {
    pub fn insert(&mut self, weekday: Weekday, names: BTreeSet<String>) {
        self.0.insert(weekday, names);
    }

    pub fn names_for(&self, weekday: Weekday) -> impl Iterator<Item = &str> {
        self.0.get(weekday).into_iter().flatten().map(String::as_str)
    }

    fn overlay(self, other: Self) -> Self {
        Self(self.0.overlay(other.0))
    }
}

/// Recurring appointments: weekday to `hour label -> text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentTemplate(WeekdayMap<BTreeMap<String, String>>);

impl AppointmentTemplate {
    pub fn insert(&mut self, weekday: Weekday, entries: BTreeMap<String, String>) {
        self.0.insert(weekday, entries);
    }

    /// Appointment at an exact hour label, if any.
    pub fn at(&self, weekday: Weekday, hour_label: &str) -> Option<&str> {
        self.0.get(weekday).and_then(|m| m.get(hour_label.trim())).map(String::as_str)
    }

    pub fn entries_for(&self, weekday: Weekday) -> impl Iterator<Item = (&str, &str)> {
        self.0.get(weekday).into_iter().flatten().map(|(h, t)| (h.as_str(), t.as_str()))
    }

    fn overlay(self, other: Self) -> Self {
        Self(self.0.overlay(other.0))
    }
}

/// How many task rows the page printing a weekday can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCapacity {
    /// Monday to Friday task pages.
    pub weekdays: usize,
    /// The shared Saturday/Sunday page.
    pub weekend: usize,
}

impl RowCapacity {
    pub fn for_weekday(&self, weekday: Weekday) -> usize {
        match weekday {
            Weekday::Sat | Weekday::Sun => self.weekend,
            _ => self.weekdays,
        }
    }
}

/// All recurring templates of a planner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateSet {
    pub tasks: WeekTemplate,
    pub roster: RosterTemplate,
    pub appointments: AppointmentTemplate,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TemplateFile {
    #[serde(default)]
    tasks: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(default)]
    roster: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    appointments: BTreeMap<String, BTreeMap<String, String>>,
}

impl TemplateSet {
    /// Read and parse a template file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let s = fs::read_to_string(path)
            .map_err(|e| TemplateError::Read { path: path.to_path_buf(), source: e })?;
        let set = Self::from_toml_str(&s, path)?;
        debug!(path = %path.display(), "loaded template file");
        Ok(set)
    }

    /// Parse template TOML. `origin` only labels errors.
    pub fn from_toml_str(s: &str, origin: &Path) -> Result<Self, TemplateError> {
        let file: TemplateFile = toml::from_str(s)
            .map_err(|e| TemplateError::Parse { path: origin.to_path_buf(), source: e })?;
        Self::from_file(file)
    }

    fn from_file(file: TemplateFile) -> Result<Self, TemplateError> {
        let mut set = TemplateSet::default();

        for (key, rows) in file.tasks {
            let weekday = parse_weekday_key("tasks", &key)?;
            let mut parsed = BTreeMap::new();
            for (row_key, label) in rows {
                let row = row_key
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| TemplateError::InvalidRow { weekday, key: row_key.clone() })?;
                parsed.insert(row, label);
            }
            if set.tasks.0.insert(weekday, parsed).is_some() {
                return Err(TemplateError::DuplicateWeekday { section: "tasks", weekday });
            }
        }

        for (key, names) in file.roster {
            let weekday = parse_weekday_key("roster", &key)?;
            let mut set_names = BTreeSet::new();
            for name in names {
                let name = name.trim();
                if name.is_empty() {
                    return Err(TemplateError::BlankName { weekday });
                }
                set_names.insert(name.to_string());
            }
            if set.roster.0.insert(weekday, set_names).is_some() {
                return Err(TemplateError::DuplicateWeekday { section: "roster", weekday });
            }
        }

        for (key, entries) in file.appointments {
            let weekday = parse_weekday_key("appointments", &key)?;
            let entries = entries.into_iter().map(|(h, t)| (h.trim().to_string(), t)).collect();
            if set.appointments.0.insert(weekday, entries).is_some() {
                return Err(TemplateError::DuplicateWeekday { section: "appointments", weekday });
            }
        }

        Ok(set)
    }

    /// Compose a base and an override template. Each weekday present in the
    /// override replaces the base's entry for that weekday; rows are never
    /// merged individually.
    pub fn with_override(self, over: TemplateSet) -> TemplateSet {
        TemplateSet {
            tasks: self.tasks.overlay(over.tasks),
            roster: self.roster.overlay(over.roster),
            appointments: self.appointments.overlay(over.appointments),
        }
    }

    /// Check the templates against the hour labels and the row space of the
    /// pages they print on.
    pub fn validate(&self, hours: &HourLabels, capacity: RowCapacity) -> Result<(), TemplateError> {
        for (weekday, rows) in self.tasks.0.iter() {
            let cap = capacity.for_weekday(weekday);
            if let Some((&row, _)) = rows.iter().find(|(row, _)| **row >= cap) {
                return Err(TemplateError::RowOutOfRange { weekday, row, capacity: cap });
            }
        }

        for (weekday, entries) in self.appointments.0.iter() {
            for label in entries.keys() {
                if label.is_empty() {
                    return Err(TemplateError::BlankHourLabel { weekday, label: label.clone() });
                }
                if hours.position(label).is_none() {
                    return Err(TemplateError::UnknownHourLabel { weekday, label: label.clone() });
                }
            }
        }

        Ok(())
    }

    /// Where a template file path given in config should be read from.
    pub fn resolve_path(base_dir: Option<&Path>, path: &Path) -> PathBuf {
        match base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<TemplateSet, TemplateError> {
        TemplateSet::from_toml_str(s, Path::new("test.toml"))
    }

    #[test]
    fn weekday_keys_accept_indices_and_names() {
        assert_eq!(parse_weekday_key("tasks", "0").unwrap(), Weekday::Sun);
        assert_eq!(parse_weekday_key("tasks", "6").unwrap(), Weekday::Sat);
        assert_eq!(parse_weekday_key("tasks", "mon").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday_key("tasks", "Friday").unwrap(), Weekday::Fri);
    }

    #[test]
    fn weekday_out_of_range_is_rejected() {
        let err = parse("[tasks.7]\n0 = \"x\"\n").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidWeekday { section: "tasks", .. }));

        let err = parse("[roster]\n9 = [\"Toni\"]\n").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidWeekday { section: "roster", .. }));
    }

    #[test]
    fn same_weekday_twice_is_rejected() {
        let err = parse("[roster]\n1 = [\"A\"]\nmon = [\"B\"]\n").unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateWeekday { weekday: Weekday::Mon, .. }));
    }

    #[test]
    fn sparse_rows_stay_sparse() {
        let set = parse("[tasks.1]\n0 = \"Sign\"\n3 = \"Review\"\n").unwrap();
        let rows = set.tasks.task_rows(Weekday::Mon, 5);
        assert_eq!(rows, vec![Some("Sign"), None, None, Some("Review"), None]);
        assert!(set.tasks.task_rows(Weekday::Tue, 3).iter().all(Option::is_none));
    }

    #[test]
    fn override_replaces_weekday_wholesale() {
        let base = parse("[tasks.1]\n0 = \"A\"\n1 = \"B\"\n[tasks.2]\n0 = \"C\"\n").unwrap();
        let over = parse("[tasks.1]\n5 = \"Z\"\n").unwrap();
        let merged = base.with_override(over);
        let monday: Vec<_> = merged.tasks.tasks_for(Weekday::Mon).collect();
        assert_eq!(monday, vec![(5, "Z")]);
        let tuesday: Vec<_> = merged.tasks.tasks_for(Weekday::Tue).collect();
        assert_eq!(tuesday, vec![(0, "C")]);
    }

    #[test]
    fn appointment_on_spacer_is_rejected() {
        let set = parse("[appointments.1]\n\"\" = \"Lunch\"\n").unwrap();
        let cap = RowCapacity { weekdays: 24, weekend: 13 };
        let err = set.validate(&HourLabels::default(), cap).unwrap_err();
        assert!(matches!(err, TemplateError::BlankHourLabel { .. }));
    }

    #[test]
    fn appointment_on_unknown_hour_is_rejected() {
        let set = parse("[appointments.3]\n\"7\" = \"Gym\"\n").unwrap();
        let cap = RowCapacity { weekdays: 24, weekend: 13 };
        let err = set.validate(&HourLabels::default(), cap).unwrap_err();
        assert!(matches!(err, TemplateError::UnknownHourLabel { weekday: Weekday::Wed, .. }));
    }

    #[test]
    fn weekend_rows_have_less_room() {
        let set = parse("[tasks.6]\n13 = \"Sport\"\n").unwrap();
        let cap = RowCapacity { weekdays: 24, weekend: 13 };
        let err = set.validate(&HourLabels::default(), cap).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::RowOutOfRange { weekday: Weekday::Sat, row: 13, capacity: 13 }
        ));
    }
}
