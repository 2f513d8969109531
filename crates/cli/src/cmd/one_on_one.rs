use chrono::Duration;
use color_eyre::eyre::Result;
use planbook_core::compose;
use planbook_core::schedule::{RosterOrder, ScheduleResolver, resolver::roster_by_date};
use std::path::Path;

use super::output;
use crate::OneOnOneArgs;

pub fn run(config: Option<&Path>, locale: Option<&str>, args: &OneOnOneArgs) -> Result<()> {
    let cfg = super::load_config(config, locale)?;
    let start = super::week_start(args.run.date.as_deref())?;
    let order = args.sort.map_or(cfg.roster_order, RosterOrder::from);
    let doc = compose::one_on_ones(&cfg, start.sunday, args.run.weeks, order)?;

    println!("{}", start.reason);
    let lang = cfg.language;
    let strings = lang.strings();
    let resolver = ScheduleResolver::new(&cfg.templates);
    for week in 0..args.run.weeks {
        let sunday = start.sunday + Duration::weeks(i64::from(week));
        println!(
            "Generating one-on-one forms for {}{}",
            lang.format_date(sunday + Duration::days(1), strings.range_start),
            lang.format_date(sunday + Duration::days(7), strings.range_end)
        );

        // who we're meeting each day
        let entries = resolver.roster_entries(sunday, order);
        for (date, names) in roster_by_date(&entries) {
            println!("{}", lang.format_date(date, strings.date_long));
            for name in names {
                println!("- {name}");
            }
        }
    }

    let name = format!("one-on-ones_{}.html", start.sunday.format("%Y_%m_%d"));
    output::emit(&doc, &cfg, &args.out, &name)
}
