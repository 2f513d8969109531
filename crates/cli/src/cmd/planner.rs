use chrono::{Duration, NaiveDate};
use color_eyre::eyre::Result;
use planbook_core::compose;
use planbook_core::config::ResolvedConfig;
use std::path::Path;

use super::output;
use crate::PlannerArgs;

pub fn run(config: Option<&Path>, locale: Option<&str>, args: &PlannerArgs) -> Result<()> {
    let cfg = super::load_config(config, locale)?;
    let start = super::week_start(args.run.date.as_deref())?;
    let doc = compose::planner(&cfg, start.sunday, args.run.weeks)?;

    if args.json {
        return output::print_json(&doc);
    }

    println!("{}", start.reason);
    for week in 0..args.run.weeks {
        let sunday = start.sunday + Duration::weeks(i64::from(week));
        println!("{}", week_line(&cfg, sunday));
    }

    let name = format!("planner_{}.html", start.sunday.format("%Y_%m_%d"));
    output::emit(&doc, &cfg, &args.out, &name)
}

/// Progress line naming a week's Monday to Friday range.
pub fn week_line(cfg: &ResolvedConfig, sunday: NaiveDate) -> String {
    let lang = cfg.language;
    let strings = lang.strings();
    let monday = sunday + Duration::days(1);
    let friday = sunday + Duration::days(5);
    format!(
        "Generating pages for week {}: {} through {}",
        monday.format("%W"),
        lang.format_date(monday, strings.date_full),
        lang.format_date(friday, strings.date_full)
    )
}
