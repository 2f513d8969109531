use color_eyre::eyre::Result;
use planbook_core::compose;
use std::path::Path;

use super::output;
use crate::NotesArgs;

pub fn run(config: Option<&Path>, locale: Option<&str>, args: &NotesArgs) -> Result<()> {
    let cfg = super::load_config(config, locale)?;
    let doc = compose::notes(&cfg)?;
    let path = output::destination(&cfg, args.output.as_deref(), "notes.html");
    println!("Generating a notes page into {}", path.display());
    output::write_document(&doc, &cfg, &path)
}
