use crate::config::types::{
    CalendarSettings, ColorsSection, ConfigFile, LoggingConfig, PageSettings, ResolvedConfig,
};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;
use tracing::debug;

use crate::compose::row_capacity;
use crate::layout::{MarginProfiles, Margins};
use crate::locale::Language;
use crate::render::{Color, Palette};
use crate::schedule::{HourLabels, TemplateError, TemplateSet};

/// Hour label counts the page grid can hold legibly.
const HOUR_RANGE: std::ops::RangeInclusive<usize> = 3..=48;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the configuration.
    ///
    /// An explicit `config_path` must exist. Without one the default path is
    /// tried, and built-in defaults are used when nothing is there.
    pub fn load(
        config_path: Option<&Path>,
        locale_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        if !path.exists() {
            if config_path.is_some() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            debug!(path = %path.display(), "no config file, using built-in defaults");
            let mut rc = ResolvedConfig::default();
            if let Some(locale) = locale_override {
                rc.language = parse_language(locale)?;
            }
            return Ok(rc);
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        let cf: ConfigFile = toml::from_str(&s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        let resolved = Self::resolve(cf, &path, locale_override)?;
        debug!(path = %path.display(), language = %resolved.language, "loaded config");
        Ok(resolved)
    }

    fn resolve(
        cf: ConfigFile,
        path: &Path,
        locale_override: Option<&str>,
    ) -> Result<ResolvedConfig, ConfigError> {
        let base_dir = path.parent();

        let language = match locale_override.or(cf.locale.as_deref()) {
            Some(locale) => parse_language(locale)?,
            None => Language::default(),
        };

        if cf.page.columns < 2 {
            return Err(invalid("page.columns", format!("{} is fewer than 2 columns", cf.page.columns)));
        }
        let defaults = MarginProfiles::default();
        let margins = MarginProfiles {
            left_bound: PageSettings::margins_from(cf.page.left_bound_margins, defaults.left_bound),
            right_bound: PageSettings::margins_from(cf.page.right_bound_margins, defaults.right_bound),
        };
        check_margins("page.left_bound_margins", &margins.left_bound)?;
        check_margins("page.right_bound_margins", &margins.right_bound)?;
        let page = PageSettings { size: cf.page.size, columns: cf.page.columns, margins, font_family: cf.page.font_family };
        let content = page.size.content_box(&margins.left_bound);
        let content_right = page.size.content_box(&margins.right_bound);
        if content.width <= 0.0 || content.height <= 0.0 || content_right.width <= 0.0 || content_right.height <= 0.0 {
            return Err(invalid("page margins", "margins leave no room on the page"));
        }

        let hours = match cf.hours.labels {
            Some(labels) => HourLabels::new(labels),
            None => HourLabels::default(),
        };
        if !HOUR_RANGE.contains(&hours.len()) {
            return Err(invalid(
                "hours.labels",
                format!("{} labels given, expected {} to {}", hours.len(), HOUR_RANGE.start(), HOUR_RANGE.end()),
            ));
        }

        let palette = resolve_palette(&cf.colors)?;

        let q1_start_month = cf.calendar.q1_start_month;
        if !(1..=12).contains(&q1_start_month) {
            return Err(invalid("calendar.q1_start_month", format!("{q1_start_month} is not a month")));
        }
        if let Some(terms) = cf.calendar.semesters {
            let months = 1..=12;
            if !months.contains(&terms.summer_start_month)
                || !months.contains(&terms.winter_start_month)
                || terms.summer_start_month >= terms.winter_start_month
            {
                return Err(invalid(
                    "calendar.semesters",
                    "start months must be 1-12 with summer before winter",
                ));
            }
        }
        let sprints = match &cf.calendar.sprints {
            Some(section) => Some(
                CalendarSettings::sprint_from(section)
                    .ok_or_else(|| invalid("calendar.sprints.length_days", "must be at least 1"))?,
            ),
            None => None,
        };
        let calendar = CalendarSettings { q1_start_month, semesters: cf.calendar.semesters, sprints };

        let mut template_files = Vec::new();
        let mut templates = TemplateSet::default();
        if let Some(base) = &cf.templates.base {
            let file = TemplateSet::resolve_path(base_dir, &expand_path(base)?);
            templates = TemplateSet::load(&file)?;
            template_files.push(file);
        }
        if let Some(over) = &cf.templates.override_file {
            let file = TemplateSet::resolve_path(base_dir, &expand_path(over)?);
            templates = templates.with_override(TemplateSet::load(&file)?);
            template_files.push(file);
        }
        templates.validate(&hours, row_capacity(hours.len()))?;

        let output_dir = match &cf.output.dir {
            Some(dir) => expand_path(dir)?,
            None => PathBuf::from("."),
        };

        // Resolve log file path if present
        let logging = if let Some(ref file) = cf.logging.file {
            LoggingConfig {
                level: cf.logging.level.clone(),
                file_level: cf.logging.file_level.clone(),
                file: Some(expand_path(&file.to_string_lossy())?),
            }
        } else {
            cf.logging.clone()
        };

        Ok(ResolvedConfig {
            source: Some(path.to_path_buf()),
            language,
            page,
            hours,
            palette,
            calendar,
            templates,
            template_files,
            roster_order: cf.templates.roster_order,
            output_dir,
            logging,
        })
    }
}

fn parse_language(locale: &str) -> Result<Language, ConfigError> {
    locale.parse().map_err(|e: crate::locale::UnknownLocale| invalid("locale", e.to_string()))
}

fn check_margins(field: &'static str, margins: &Margins) -> Result<(), ConfigError> {
    let values = [margins.top, margins.right, margins.bottom, margins.left];
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(invalid(field, "margins must be non-negative"));
    }
    Ok(())
}

fn resolve_palette(colors: &ColorsSection) -> Result<Palette, ConfigError> {
    let defaults = Palette::default();
    let pick = |field: &'static str, value: &Option<String>, fallback: Color| match value {
        Some(hex) => hex.parse::<Color>().map_err(|e| invalid(field, e.to_string())),
        None => Ok(fallback),
    };
    Ok(Palette {
        light: pick("colors.light", &colors.light, defaults.light)?,
        medium: pick("colors.medium", &colors.medium, defaults.medium)?,
        dark: pick("colors.dark", &colors.dark, defaults.dark)?,
    })
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("planbook").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("planbook").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
