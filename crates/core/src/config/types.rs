use std::num::NonZeroU32;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::calendar::{SemesterTerms, SprintCadence};
use crate::layout::{MarginProfiles, Margins, PageSize};
use crate::locale::Language;
use crate::render::Palette;
use crate::schedule::{HourLabels, RosterOrder, TemplateSet};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub page: PageSection,
    #[serde(default)]
    pub hours: HoursSection,
    #[serde(default)]
    pub colors: ColorsSection,
    #[serde(default)]
    pub calendar: CalendarSection,
    #[serde(default)]
    pub templates: TemplatesSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageSection {
    #[serde(default)]
    pub size: PageSize,
    #[serde(default = "default_columns")]
    pub columns: u16,
    /// `[top, right, bottom, left]` of Left pages.
    #[serde(default)]
    pub left_bound_margins: Option<[f64; 4]>,
    /// `[top, right, bottom, left]` of Right pages.
    #[serde(default)]
    pub right_bound_margins: Option<[f64; 4]>,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for PageSection {
    fn default() -> Self {
        Self {
            size: PageSize::default(),
            columns: default_columns(),
            left_bound_margins: None,
            right_bound_margins: None,
            font_family: default_font_family(),
        }
    }
}

fn default_columns() -> u16 {
    4
}

fn default_font_family() -> String {
    "Futura".to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoursSection {
    /// Blank strings are spacer rows.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorsSection {
    pub light: Option<String>,
    pub medium: Option<String>,
    pub dark: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarSection {
    #[serde(default = "default_q1_start_month")]
    pub q1_start_month: u32,
    #[serde(default)]
    pub semesters: Option<SemesterTerms>,
    #[serde(default)]
    pub sprints: Option<SprintSection>,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self { q1_start_month: default_q1_start_month(), semesters: None, sprints: None }
    }
}

fn default_q1_start_month() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SprintSection {
    pub epoch: NaiveDate,
    pub length_days: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesSection {
    pub base: Option<String>,
    #[serde(rename = "override")]
    pub override_file: Option<String>,
    #[serde(default)]
    pub roster_order: RosterOrder,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Page setup shared by every page of a run.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub size: PageSize,
    pub columns: u16,
    pub margins: MarginProfiles,
    pub font_family: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            size: PageSize::default(),
            columns: default_columns(),
            margins: MarginProfiles::default(),
            font_family: default_font_family(),
        }
    }
}

impl PageSettings {
    pub(crate) fn margins_from(values: Option<[f64; 4]>, fallback: Margins) -> Margins {
        values.map_or(fallback, Margins::from_trbl)
    }
}

/// Fiscal and academic calendar settings.
#[derive(Debug, Clone)]
pub struct CalendarSettings {
    pub q1_start_month: u32,
    pub semesters: Option<SemesterTerms>,
    pub sprints: Option<SprintCadence>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self { q1_start_month: default_q1_start_month(), semesters: None, sprints: None }
    }
}

impl CalendarSettings {
    pub(crate) fn sprint_from(section: &SprintSection) -> Option<SprintCadence> {
        NonZeroU32::new(section.length_days).map(|len| SprintCadence::new(section.epoch, len))
    }
}

/// The validated, immutable configuration of a run. Built once at startup
/// and passed by reference everywhere.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The file this was loaded from; `None` for built-in defaults.
    pub source: Option<PathBuf>,
    pub language: Language,
    pub page: PageSettings,
    pub hours: HourLabels,
    pub palette: Palette,
    pub calendar: CalendarSettings,
    pub templates: TemplateSet,
    /// Template files in the order they were applied.
    pub template_files: Vec<PathBuf>,
    pub roster_order: RosterOrder,
    pub output_dir: PathBuf,
    pub logging: LoggingConfig,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: None,
            language: Language::default(),
            page: PageSettings::default(),
            hours: HourLabels::default(),
            palette: Palette::default(),
            calendar: CalendarSettings::default(),
            templates: TemplateSet::default(),
            template_files: Vec::new(),
            roster_order: RosterOrder::default(),
            output_dir: PathBuf::from("."),
            logging: LoggingConfig::default(),
        }
    }
}
