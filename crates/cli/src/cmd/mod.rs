pub mod doctor;
pub mod notes;
pub mod one_on_one;
pub mod output;
pub mod planner;
pub mod year;

use color_eyre::eyre::{Result, WrapErr};
use planbook_core::calendar::{WeekStart, resolve_week_start};
use planbook_core::config::{ConfigLoader, ResolvedConfig};
use std::path::Path;

/// Load the configuration and start logging as it asks.
pub fn load_config(config: Option<&Path>, locale: Option<&str>) -> Result<ResolvedConfig> {
    let rc = ConfigLoader::load(config, locale).wrap_err("failed to load config")?;
    crate::logging::init(&rc);
    Ok(rc)
}

/// The Sunday a run starts on, from the optional date argument.
pub fn week_start(date: Option<&str>) -> Result<WeekStart> {
    let today = chrono::Local::now().date_naive();
    let start = resolve_week_start(date, today).wrap_err("invalid start date")?;
    Ok(start)
}
