use color_eyre::eyre::Result;
use planbook_core::calendar::year_weeks;
use planbook_core::compose;
use std::path::Path;

use super::output;
use crate::YearArgs;

pub fn run(config: Option<&Path>, locale: Option<&str>, args: &YearArgs) -> Result<()> {
    let cfg = super::load_config(config, locale)?;
    let (sunday, weeks) = year_weeks(args.year)?;
    println!("Generating {weeks} weeks of {} starting {sunday}", args.year);
    let doc = compose::year(&cfg, args.year)?;
    output::emit(&doc, &cfg, &args.out, &format!("yearly_planner_{}.html", args.year))
}
