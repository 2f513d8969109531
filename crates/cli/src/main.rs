mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use planbook_core::schedule::RosterOrder;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "planbook", version, about = "Printable booklet planners: task grids, hourly calendars and one-on-one forms")]
struct Cli {
    /// Path to config.toml (default: ~/.config/planbook/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Language of the printed pages (en, de, de_DE, ...)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Weekly planner pages
    Planner(PlannerArgs),

    /// One-on-one meeting forms for everyone on the roster
    #[command(name = "one-on-ones")]
    OneOnOnes(OneOnOneArgs),

    /// A double-sided notes sheet
    Notes(NotesArgs),

    /// Planner pages for every week of a year
    Year(YearArgs),

    /// Validate configuration and templates
    Doctor,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Any date in the first week; defaults to this week (Sun-Tue) or next week
    pub date: Option<String>,

    /// Number of weeks
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=520))]
    pub weeks: u32,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// File to write (default: derived from the run inside output.dir)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the page sequence instead of writing a file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct PlannerArgs {
    #[command(flatten)]
    pub run: RunArgs,

    #[command(flatten)]
    pub out: OutputArgs,

    /// Print the layout tree as JSON instead of writing a file
    #[arg(long, conflicts_with = "dry_run")]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Name,
    Date,
}

impl From<SortArg> for RosterOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => RosterOrder::Name,
            SortArg::Date => RosterOrder::Date,
        }
    }
}

#[derive(Debug, Args)]
pub struct OneOnOneArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Order of the forms (default: templates.roster_order)
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Debug, Args)]
pub struct NotesArgs {
    /// File to write (default: notes.html inside output.dir)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct YearArgs {
    /// Calendar year, e.g. 2024
    pub year: i32,

    #[command(flatten)]
    pub out: OutputArgs,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    let locale = cli.locale.as_deref();

    match cli.command {
        Commands::Planner(args) => cmd::planner::run(config, locale, &args),
        Commands::OneOnOnes(args) => cmd::one_on_one::run(config, locale, &args),
        Commands::Notes(args) => cmd::notes::run(config, locale, &args),
        Commands::Year(args) => cmd::year::run(config, locale, &args),
        Commands::Doctor => {
            cmd::doctor::run(config, locale);
            Ok(())
        }
    }
}
