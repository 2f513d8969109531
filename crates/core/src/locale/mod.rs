//! Printed strings and date formats for the supported languages.

use std::fmt;
use std::str::FromStr;

use chrono::{Locale, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Language of the printed planner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    En,
    De,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}' (expected en or de)")]
pub struct UnknownLocale(pub String);

impl FromStr for Language {
    type Err = UnknownLocale;

    /// Accepts `en`, `de` and region-qualified forms such as `de_DE` or `en-GB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s.trim().split(['_', '-', '.']).next().unwrap_or_default().to_lowercase();
        match lang.as_str() {
            "en" => Ok(Language::En),
            "de" => Ok(Language::De),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = UnknownLocale;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::En => "en",
            Language::De => "de",
        })
    }
}

impl Language {
    pub fn strings(self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::De => &DE,
        }
    }

    fn chrono_locale(self) -> Locale {
        match self {
            Language::En => Locale::en_US,
            Language::De => Locale::de_DE,
        }
    }

    /// Format a date with localized month and weekday names.
    pub fn format_date(self, date: NaiveDate, fmt: &str) -> String {
        date.and_time(NaiveTime::MIN).and_utc().format_localized(fmt, self.chrono_locale()).to_string()
    }
}

/// The fixed strings printed on pages.
#[derive(Debug)]
pub struct Strings {
    pub week_ahead: &'static str,
    pub week_number: &'static str,
    pub day_heading: &'static str,
    pub calendar_heading: &'static str,
    pub date_long: &'static str,
    pub date_full: &'static str,
    pub date_short: &'static str,
    pub range_start: &'static str,
    pub range_end: &'static str,
    pub weekday: &'static str,
    pub daily_metrics: &'static str,
    pub shutdown_complete: &'static str,
    pub tasks: &'static str,
    pub notes: &'static str,
    pub notes_title: &'static str,
    pub work_days_left_in_year: &'static str,
    pub days_left_in_sprint: &'static str,
    pub semester: &'static str,
    pub quarter: &'static str,
    pub quarter_goals: &'static str,
    pub personal_notes: &'static str,
    pub personal_notes_example: &'static str,
    pub their_update: &'static str,
    pub their_update_instructions: &'static str,
    pub my_update: &'static str,
    pub my_update_instructions: &'static str,
    pub future: &'static str,
    pub future_instructions: &'static str,
    pub additional_notes: &'static str,
    pub feedback: &'static str,
    pub questions_to_ask: &'static str,
    pub questions_left: &'static str,
    pub questions_right: &'static str,
}

static EN: Strings = Strings {
    week_ahead: "The Week Ahead",
    week_number: "Week %W",
    day_heading: "%B %-d, %Y",
    calendar_heading: "Week %W » Day %j",
    date_long: "%B %-d, %Y",
    date_full: "%A, %B %-d, %Y",
    date_short: "%B %-d",
    range_start: "%A, %B %-d",
    range_end: " — %A, %B %-d, %Y",
    weekday: "%A",
    daily_metrics: "Daily Metrics",
    shutdown_complete: "Shutdown Complete",
    tasks: "Tasks:",
    notes: "Notes:",
    notes_title: "Notes",
    work_days_left_in_year: "work days left in year",
    days_left_in_sprint: "days left in sprint",
    semester: "Semester",
    quarter: "Q",
    quarter_goals: "Goals",
    personal_notes: "Personal Notes",
    personal_notes_example: "(vacation, family, hobbies)",
    their_update: "Their Update",
    their_update_instructions: "(what's on their mind, progress, blockers)",
    my_update: "My Update",
    my_update_instructions: "(team news, feedback, decisions)",
    future: "Future",
    future_instructions: "(goals, growth, next steps)",
    additional_notes: "Additional Notes",
    feedback: "Feedback",
    questions_to_ask: "Questions to ask",
    questions_left: "How are you feeling about your work?\nWhat is getting in your way?\nWhat should we start doing?",
    questions_right: "What are you most proud of lately?\nWhere do you want to grow?\nWhat should we stop doing?",
};

static DE: Strings = Strings {
    week_ahead: "Die Woche",
    week_number: "KW %W",
    day_heading: "%-d. %B %Y",
    calendar_heading: "KW %W » Tag %j",
    date_long: "%-d. %B %Y",
    date_full: "%A, %-d. %B %Y",
    date_short: "%-d. %B",
    range_start: "%A, %-d. %B",
    range_end: " — %A, %-d. %B %Y",
    weekday: "%A",
    daily_metrics: "Tageswerte",
    shutdown_complete: "Feierabend",
    tasks: "Aufgaben:",
    notes: "Notizen:",
    notes_title: "Notizen",
    work_days_left_in_year: "Arbeitstage bis Jahresende",
    days_left_in_sprint: "Tage bis Sprintende",
    semester: "Semester",
    quarter: "Q",
    quarter_goals: "Ziele",
    personal_notes: "Persönliches",
    personal_notes_example: "(Urlaub, Familie, Hobbys)",
    their_update: "Ihr Update",
    their_update_instructions: "(Themen, Fortschritt, Hindernisse)",
    my_update: "Mein Update",
    my_update_instructions: "(Neuigkeiten, Feedback, Entscheidungen)",
    future: "Zukunft",
    future_instructions: "(Ziele, Entwicklung, nächste Schritte)",
    additional_notes: "Weitere Notizen",
    feedback: "Feedback",
    questions_to_ask: "Fragen",
    questions_left: "Wie geht es dir mit deiner Arbeit?\nWas hält dich auf?\nWas sollten wir anfangen?",
    questions_right: "Worauf bist du stolz?\nWo willst du wachsen?\nWas sollten wir lassen?",
};
