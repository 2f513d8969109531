use chrono::{Datelike, Duration, NaiveDate, Weekday};
use planbook_core::schedule::{RosterOrder, ScheduleResolver, TemplateSet};
use std::collections::HashSet;
use std::path::Path;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn templates(toml: &str) -> TemplateSet {
    TemplateSet::from_toml_str(toml, Path::new("weekly.toml")).unwrap()
}

const WEEKLY: &str = r#"
[tasks.1]
0 = "Sign folder"
3 = "Emails"
[tasks.friday]
0 = "Timesheet"

[roster]
0 = ["Sam"]
2 = ["Marvin", "Hendrik"]
3 = ["Toni"]
6 = ["Hendrik"]

[appointments.1]
"9" = "Standup"
"#;

#[test]
fn roster_dates_stay_within_the_week() {
    let set = templates(WEEKLY);
    let resolver = ScheduleResolver::new(&set);
    for anchor in [d(2024, 1, 7), d(2024, 1, 10), d(2024, 1, 13), d(2024, 12, 30)] {
        let sunday = anchor - Duration::days(i64::from(anchor.weekday().num_days_from_sunday()));
        let entries = resolver.roster_entries(anchor, RosterOrder::Date);
        assert_eq!(entries.len(), 5);
        for entry in &entries {
            assert!(entry.date >= sunday && entry.date <= sunday + Duration::days(6));
        }
        let unique: HashSet<_> = entries.iter().map(|e| (e.name.as_str(), e.date)).collect();
        assert_eq!(unique.len(), entries.len());
    }
}

#[test]
fn roster_orders() {
    let set = templates(WEEKLY);
    let resolver = ScheduleResolver::new(&set);

    let by_name: Vec<(String, NaiveDate)> = resolver
        .roster_entries(d(2024, 1, 9), RosterOrder::Name)
        .into_iter()
        .map(|e| (e.name, e.date))
        .collect();
    assert_eq!(
        by_name,
        vec![
            ("Hendrik".to_string(), d(2024, 1, 9)),
            ("Hendrik".to_string(), d(2024, 1, 13)),
            ("Marvin".to_string(), d(2024, 1, 9)),
            ("Sam".to_string(), d(2024, 1, 7)),
            ("Toni".to_string(), d(2024, 1, 10)),
        ]
    );

    let by_date: Vec<String> = resolver
        .roster_entries(d(2024, 1, 9), RosterOrder::Date)
        .into_iter()
        .map(|e| format!("{} {}", e.date, e.name))
        .collect();
    assert_eq!(
        by_date,
        vec![
            "2024-01-07 Sam",
            "2024-01-09 Hendrik",
            "2024-01-09 Marvin",
            "2024-01-10 Toni",
            "2024-01-13 Hendrik",
        ]
    );
}

#[test]
fn week_resolves_every_day() {
    let set = templates(WEEKLY);
    let week = ScheduleResolver::new(&set).resolve_week(d(2024, 1, 11));
    assert_eq!(week.sunday, d(2024, 1, 7));
    assert_eq!(week.days.len(), 7);

    let monday = week.day(Weekday::Mon);
    assert_eq!(monday.date, d(2024, 1, 8));
    assert_eq!(monday.tasks, vec![(0, "Sign folder"), (3, "Emails")]);
    assert_eq!(monday.appointments, vec![("9", "Standup")]);
    assert_eq!(week.day(Weekday::Fri).tasks, vec![(0, "Timesheet")]);
    assert!(week.day(Weekday::Thu).tasks.is_empty());
}

#[test]
fn task_rows_keep_gaps() {
    let set = templates(WEEKLY);
    let resolver = ScheduleResolver::new(&set);
    assert_eq!(
        resolver.task_rows(Weekday::Mon, 5),
        vec![Some("Sign folder"), None, None, Some("Emails"), None]
    );
}

#[test]
fn override_replaces_a_whole_weekday() {
    let base = templates(WEEKLY);
    let over = templates("[tasks.1]\n1 = \"Trello\"\n[roster]\n2 = [\"Ada\"]\n");
    let set = base.with_override(over);
    let resolver = ScheduleResolver::new(&set);

    let monday: Vec<_> = resolver.tasks_for(Weekday::Mon).collect();
    assert_eq!(monday, vec![(1, "Trello")]);
    let friday: Vec<_> = resolver.tasks_for(Weekday::Fri).collect();
    assert_eq!(friday, vec![(0, "Timesheet")]);
    assert_eq!(resolver.appointment_at(Weekday::Mon, "9"), Some("Standup"));

    let tuesday: Vec<String> = resolver
        .roster_entries(d(2024, 1, 7), RosterOrder::Date)
        .into_iter()
        .filter(|e| e.date == d(2024, 1, 9))
        .map(|e| e.name)
        .collect();
    assert_eq!(tuesday, vec!["Ada"]);
}
